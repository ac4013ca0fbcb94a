//! Per-tick orchestration across all birds and walls, and generation
//! turnover.
//!
//! Birds update in parallel with rayon: during the bird phase each bird
//! reads only the frozen wall set and writes only its own state, and the
//! alive tally is an associative sum computed after the phase.

use geo::Intersects;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::brain::{Brain, BrainError};
use super::evolution::{self, EvolutionError};
use super::params::Params;
use super::wall::{self, Wall};

/// The whole simulation state for one generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// The population; index 0 always carries the previous generation's
    /// fittest network.
    pub birds: Vec<Bird>,
    /// The fixed-size, recycled wall set.
    pub walls: Vec<Wall>,
    /// Simulation time since the current generation started.
    pub time: f32,
    /// Monotonically increasing generation index.
    pub generation: u32,
}

impl World {
    /// Seeds a fresh population with random brains, and walls just off the
    /// right edge of the field.
    pub fn new(params: &Params) -> Result<Self, BrainError> {
        let birds = (0..params.n_birds)
            .map(|_| Ok(Bird::new(Brain::from_sizes(&params.layer_sizes)?, params)))
            .collect::<Result<Vec<_>, BrainError>>()?;

        Ok(Self {
            birds,
            walls: wall::reset_walls(params),
            time: 0.0,
            generation: 0,
        })
    }

    /// Advances the simulation by one tick and returns how many birds are
    /// still alive.
    ///
    /// Walls move and recycle first; birds then update in parallel against
    /// the frozen wall set: gravity integration, bounds and collision kills,
    /// then sense → decide → jump for the survivors.
    pub fn step(&mut self, params: &Params, dt: f32) -> usize {
        self.time += dt;

        for wall in &mut self.walls {
            wall.advance(dt, params.max_wall_speed);
        }
        wall::recycle_offscreen(&mut self.walls, params);

        let walls = &self.walls;
        let now = self.time;
        self.birds.par_iter_mut().for_each(|bird| {
            if !bird.alive {
                return;
            }

            bird.acceleration[1] = params.gravity;
            bird.update(dt);

            if bird.position[1] < 0.0 || bird.position[1] + bird.size[1] > params.field_height {
                bird.kill(now);
            }

            let body = bird.body();
            for wall in walls {
                let (upper, lower) = wall.rectangles(params.field_height);
                if body.intersects(&upper) || body.intersects(&lower) {
                    bird.kill(now);
                }
            }

            if bird.alive {
                let inputs = bird
                    .sense(walls, params)
                    .unwrap_or_else(|e| panic!("sensor encoding failed: {e}"));
                let output = bird
                    .brain
                    .forward(&inputs)
                    .unwrap_or_else(|e| panic!("brain evaluation failed: {e}"));
                if output[0] > 0.5 {
                    bird.jump(params);
                }
            }
        });

        self.birds.iter().filter(|bird| bird.alive).count()
    }

    /// Retires the current population and breeds the next one.
    ///
    /// Walls reset before birds so nobody collides with a leftover wall on
    /// the first tick. Returns the expiring generation's best fitness.
    pub fn next_generation(&mut self, params: &Params) -> Result<f32, EvolutionError> {
        let pairs: Vec<(Brain, f32)> = self.birds.drain(..).map(Bird::into_pair).collect();
        let best_fitness = evolution::best_of(&pairs)?.1;
        let brains = evolution::next_generation(&pairs, params.mutation_rate)?;

        self.walls = wall::reset_walls(params);
        self.birds = brains
            .into_iter()
            .map(|brain| Bird::new(brain, params))
            .collect();
        self.time = 0.0;
        self.generation += 1;

        Ok(best_fitness)
    }
}
