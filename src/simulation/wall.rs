//! Scrolling gap walls the birds must fly through.
//!
//! The wall count is fixed for a whole run: walls that scroll off the left
//! edge are recycled back past the furthest wall instead of being dropped
//! and reallocated.

use geo::Rect;
use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::rect;
use super::params::Params;

/// A wall moving from right to left with a randomly placed vertical gap.
///
/// `size` is the extent of the upper segment: `size[0]` is the wall width
/// and `size[1]` the y where the gap opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    /// Height of the opening birds can pass through. Fixed per instance.
    pub gap_height: f32,
    /// Extent of the upper segment (width, gap y).
    pub size: Array1<f32>,
    /// Top-left corner of the upper segment.
    pub position: Array1<f32>,
    /// Current velocity (px/s).
    pub velocity: Array1<f32>,
    /// Current acceleration (px/s²).
    pub acceleration: Array1<f32>,
    /// Global speed multiplier applied to all integration.
    pub time_scale: f32,
}

impl Wall {
    /// Spawns a wall at `x` moving left at `speed`, with its gap y drawn
    /// uniformly between the configured buffers.
    pub fn spawn(x: f32, speed: f32, params: &Params) -> Self {
        let gap_y = rand::rng().random_range(
            params.wall_buffer..params.field_height - params.wall_gap_height - params.wall_buffer,
        );
        Self {
            gap_height: params.wall_gap_height,
            size: Array1::from_vec(vec![params.wall_width, gap_y]),
            position: Array1::from_vec(vec![x, 0.0]),
            velocity: Array1::from_vec(vec![-speed.abs(), 0.0]),
            acceleration: Array1::from_vec(vec![-params.wall_acceleration, 0.0]),
            time_scale: params.world_speed,
        }
    }

    /// Integrates one step. Walls accelerate slowly to raise the difficulty,
    /// but the horizontal velocity stays in [-max_speed, 0]: they only ever
    /// move left or stand still.
    pub fn advance(&mut self, dt: f32, max_speed: f32) {
        let scaled = dt * self.time_scale;
        self.velocity += &(&self.acceleration * scaled);
        self.velocity[0] = self.velocity[0].clamp(-max_speed, 0.0);
        self.position += &(&self.velocity * scaled);
    }

    /// Returns the (upper, lower) collision rectangles: the upper segment
    /// runs from the field's top edge down to the gap, the lower from below
    /// the gap to the field's floor.
    pub fn rectangles(&self, field_height: f32) -> (Rect<f32>, Rect<f32>) {
        let upper = rect(self.position[0], self.position[1], self.size[0], self.size[1]);
        let lower_top = self.position[1] + self.size[1] + self.gap_height;
        let lower = rect(
            self.position[0],
            lower_top,
            self.size[0],
            field_height - lower_top,
        );
        (upper, lower)
    }

    /// The x coordinate of the wall's right edge.
    pub fn right_edge(&self) -> f32 {
        self.position[0] + self.size[0]
    }
}

/// Seeds `n_walls` fresh walls spaced out beyond the right edge of the field.
pub fn reset_walls(params: &Params) -> Vec<Wall> {
    (0..params.n_walls)
        .map(|i| {
            Wall::spawn(
                params.field_width + params.wall_spacing * i as f32,
                params.wall_speed,
                params,
            )
        })
        .collect()
}

/// Recycles any wall whose right edge scrolled past the left field edge,
/// re-spawning it one spacing unit beyond the current furthest wall at that
/// wall's speed. Faster walls get proportionally more room so consecutive
/// gaps stay reachable.
pub fn recycle_offscreen(walls: &mut [Wall], params: &Params) {
    for i in 0..walls.len() {
        if walls[i].right_edge() >= 0.0 {
            continue;
        }

        let mut furthest_x = 0.0f32;
        let mut furthest_speed = params.wall_speed;
        for wall in walls.iter() {
            if wall.position[0] > furthest_x {
                furthest_x = wall.position[0];
                furthest_speed = wall.velocity[0].abs();
            }
        }

        let spacing = params.wall_spacing
            + params.wall_width * furthest_speed * params.wall_speed_spacing_coeff;
        walls[i] = Wall::spawn(furthest_x + spacing, furthest_speed, params);
    }
}
