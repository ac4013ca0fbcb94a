//! # Flappy - Neuroevolution of Gap-Running Birds
//!
//! A population of birds flies through a continuously scrolling field of gap
//! walls, each bird steered by a small dense feed-forward network. Birds that
//! collide or leave the field die; when a whole generation is dead, the next
//! one is bred from the survivors' networks by fitness-proportionate
//! selection, elitism, and per-scalar Gaussian mutation.
//!
//! ## Features
//!
//! - Dense feed-forward brains (sigmoid activation, ndarray-backed)
//! - Mutation-only genetic hill-climb with an elitism slot
//! - Fixed-count wall recycling with speed-scaled spacing
//! - Parallel per-bird updates with rayon
//! - Real-time visualization with egui/macroquad
//!
//! ## Core Modules
//!
//! - [`simulation::bird`] - Bird physics, sensing, and the jump action
//! - [`simulation::brain`] - Neural network implementation
//! - [`simulation::wall`] - Scrolling gap walls and their recycling
//! - [`simulation::world`] - Per-tick orchestration and generation turnover
//! - [`simulation::evolution`] - Fitness-proportionate breeding

/// Core simulation logic and data structures.
pub mod simulation {
    /// Bird physics, sensing, and the jump action.
    pub mod bird;
    /// Dense feed-forward network used as a bird's brain.
    pub mod brain;
    /// Fitness-proportionate breeding with elitism.
    pub mod evolution;
    /// Rectangle construction and linear range remapping.
    pub mod geometry;
    /// Simulation parameters and settings persistence.
    pub mod params;
    /// Scrolling gap walls and their recycling.
    pub mod wall;
    /// Per-tick orchestration and generation turnover.
    pub mod world;
}
