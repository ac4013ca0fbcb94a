//! Generation turnover: fitness-proportionate selection with elitism.
//!
//! Breeding is mutation-only. Each new network is a clone of a
//! roulette-selected parent with per-scalar Gaussian noise; the single
//! exception is slot 0, which carries the previous best unchanged.

use rand::Rng;
use thiserror::Error;

use super::brain::{Brain, BrainError};

/// Errors raised while breeding the next generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvolutionError {
    /// Breeding was invoked with no (network, fitness) pairs at all.
    #[error("cannot breed from an empty population")]
    EmptyPopulation,
    /// Mutating a child network failed.
    #[error(transparent)]
    Brain(#[from] BrainError),
}

/// Returns the pair with the highest fitness; ties keep the earliest pair.
pub fn best_of(pairs: &[(Brain, f32)]) -> Result<&(Brain, f32), EvolutionError> {
    let mut best = pairs.first().ok_or(EvolutionError::EmptyPopulation)?;
    for pair in pairs {
        if pair.1 > best.1 {
            best = pair;
        }
    }
    Ok(best)
}

/// Roulette-wheel selection: each pair is drawn with probability proportional
/// to its share of the total fitness.
///
/// When every fitness is zero the draw target is zero and the scan stops at
/// the first pair — defined behaviour, not an error.
pub fn select_parent(pairs: &[(Brain, f32)]) -> Result<&(Brain, f32), EvolutionError> {
    if pairs.is_empty() {
        return Err(EvolutionError::EmptyPopulation);
    }
    let total_fitness: f32 = pairs.iter().map(|pair| pair.1).sum();
    let target = rand::rng().random_range(0.0..=total_fitness);

    let mut cumulative = 0.0;
    for pair in pairs {
        cumulative += pair.1;
        if cumulative >= target {
            return Ok(pair);
        }
    }
    // Float rounding can leave the cumulative sum just short of the target.
    Ok(&pairs[pairs.len() - 1])
}

/// Breeds the next generation's networks from the expiring one.
///
/// Slot 0 is an exact, unmutated clone of the fittest network so the
/// population can never regress below the previous best. Every other slot is
/// a roulette-selected parent, cloned and then mutated at `mutation_rate`.
pub fn next_generation(
    pairs: &[(Brain, f32)],
    mutation_rate: f32,
) -> Result<Vec<Brain>, EvolutionError> {
    let best = best_of(pairs)?;

    let mut brains = Vec::with_capacity(pairs.len());
    brains.push(best.0.clone());

    for _ in 1..pairs.len() {
        let parent = select_parent(pairs)?;
        let mut child = parent.0.clone();
        child.mutate(mutation_rate)?;
        brains.push(child);
    }

    Ok(brains)
}
