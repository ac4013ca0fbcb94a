//! Bird behaviour: physics, sensing, and the jump action.

use geo::Rect;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::brain::Brain;
use super::geometry::{map_range, rect};
use super::params::Params;
use super::wall::Wall;

/// Errors raised while encoding a bird's sensor inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SenseError {
    /// The nearest-wall search was handed an empty wall set.
    #[error("cannot sense the nearest wall of an empty wall set")]
    NoWalls,
}

/// A bird with a physical body and a network brain.
///
/// Once `alive` turns false the bird is frozen for the rest of the
/// generation; its fitness is fixed at the moment of death.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Body extent (width, height).
    pub size: Array1<f32>,
    /// Top-left corner of the body.
    pub position: Array1<f32>,
    /// Current velocity (px/s).
    pub velocity: Array1<f32>,
    /// Current acceleration (px/s²); recomputed from scratch every tick.
    pub acceleration: Array1<f32>,
    /// Global speed multiplier applied to all integration.
    pub time_scale: f32,
    /// The network deciding when to jump.
    pub brain: Brain,
    /// False once the bird collided or left the field.
    pub alive: bool,
    /// Squared survival time, set exactly once at death.
    pub fitness: f32,
}

impl Bird {
    /// Creates a live bird at the spawn point, owning `brain`.
    pub fn new(brain: Brain, params: &Params) -> Self {
        Self {
            size: Array1::from_vec(vec![params.bird_size, params.bird_size]),
            position: Array1::from_vec(vec![params.bird_spawn_x, params.field_height / 2.0]),
            velocity: Array1::zeros(2),
            acceleration: Array1::zeros(2),
            time_scale: params.world_speed,
            brain,
            alive: true,
            fitness: 0.0,
        }
    }

    /// The bird's collision rectangle.
    pub fn body(&self) -> Rect<f32> {
        rect(self.position[0], self.position[1], self.size[0], self.size[1])
    }

    /// Euler-integrates velocity and position, then clears the acceleration.
    /// Dead birds stay frozen.
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        let scaled = dt * self.time_scale;
        self.velocity += &(&self.acceleration * scaled);
        self.position += &(&self.velocity * scaled);
        self.acceleration.fill(0.0);
    }

    /// Marks the bird dead and fixes its fitness to the square of the time it
    /// survived. Squaring rewards longevity super-linearly. Dead birds can't
    /// die again.
    pub fn kill(&mut self, survival_time: f32) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.fitness = survival_time * survival_time;
    }

    /// Overwrites the vertical velocity with the jump speed. An overwrite,
    /// not an impulse: successive jumps do not stack.
    pub fn jump(&mut self, params: &Params) {
        self.velocity[1] = -params.jump_velocity;
    }

    /// Encodes what the bird perceives into the network's five inputs, each
    /// mapped into [-1, 1]:
    ///
    /// 1. height within the field,
    /// 2. vertical velocity,
    /// 3. horizontal distance to the nearest wall still ahead,
    /// 4. that wall's gap y,
    /// 5. that wall's horizontal velocity.
    pub fn sense(&self, walls: &[Wall], params: &Params) -> Result<Array1<f32>, SenseError> {
        let closest = nearest_ahead(walls, self.position[0]).ok_or(SenseError::NoWalls)?;

        let height = map_range(self.position[1], 0.0, params.field_height, -1.0, 1.0);
        let vertical_velocity = map_range(
            self.velocity[1],
            -params.velocity_range,
            params.velocity_range,
            -1.0,
            1.0,
        );
        let wall_distance = map_range(
            closest.position[0] - self.position[0],
            0.0,
            params.field_width,
            -1.0,
            1.0,
        );
        let gap_y = map_range(closest.size[1], 0.0, params.field_height, -1.0, 1.0);
        let wall_velocity = map_range(
            closest.velocity[0],
            -params.velocity_range,
            params.velocity_range,
            -1.0,
            1.0,
        );

        Ok(Array1::from_vec(vec![
            height,
            vertical_velocity,
            wall_distance,
            gap_y,
            wall_velocity,
        ]))
    }

    /// Surrenders the brain and fitness to the evolution stage.
    pub fn into_pair(self) -> (Brain, f32) {
        (self.brain, self.fitness)
    }
}

/// Finds the wall with the smallest x whose right edge is still ahead of `x`.
/// Ties keep the first wall in iteration order. Falls back to the first wall
/// when every wall is already behind; `None` only for an empty set.
pub fn nearest_ahead(walls: &[Wall], x: f32) -> Option<&Wall> {
    let first = walls.first()?;
    let mut closest: Option<&Wall> = None;
    for wall in walls {
        let ahead = wall.right_edge() > x;
        let closer = closest.is_none_or(|c| wall.position[0] < c.position[0]);
        if ahead && closer {
            closest = Some(wall);
        }
    }
    Some(closest.unwrap_or(first))
}
