//! Simulation parameters.

use serde::{Deserialize, Serialize};

/// Tunable constants for the whole simulation.
///
/// One instance is threaded through the tick and breeding functions; the UI
/// adjusts `mutation_rate` live through its slider. Lengths are in pixels,
/// rates per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Number of birds per generation.
    pub n_birds: usize,
    /// Number of walls kept alive at all times.
    pub n_walls: usize,
    /// Downward acceleration applied to every bird (px/s²).
    pub gravity: f32,
    /// Upward speed a jump resets the bird to (px/s).
    pub jump_velocity: f32,
    /// Bird body edge length (birds are square).
    pub bird_size: f32,
    /// Spawn x of every bird.
    pub bird_spawn_x: f32,
    /// Height of the opening in each wall.
    pub wall_gap_height: f32,
    /// Wall width.
    pub wall_width: f32,
    /// Base horizontal distance between consecutive walls.
    pub wall_spacing: f32,
    /// Initial leftward wall speed (px/s).
    pub wall_speed: f32,
    /// Leftward wall acceleration (px/s²); difficulty rises over a generation.
    pub wall_acceleration: f32,
    /// Fastest the walls may go (px/s).
    pub max_wall_speed: f32,
    /// The gap never opens closer than this to the field's top or bottom.
    pub wall_buffer: f32,
    /// Extra spacing per unit of wall speed, keeping consecutive gaps
    /// reachable as the walls accelerate (seconds).
    pub wall_speed_spacing_coeff: f32,
    /// Probability that any single weight or bias is perturbed while breeding
    /// the next generation. Adjustable live from the UI.
    pub mutation_rate: f32,
    /// Field width, used for the wall-distance sensor mapping.
    pub field_width: f32,
    /// Field height, used for bounds checks and the height sensor mapping.
    pub field_height: f32,
    /// Velocity magnitude mapped to ±1 in the sensor encoding (px/s).
    pub velocity_range: f32,
    /// Network layer sizes, input layer first.
    pub layer_sizes: Vec<usize>,
    /// Global speed multiplier applied to all integration.
    pub world_speed: f32,
}

impl Params {
    /// Saves the settings to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads settings from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }
}
