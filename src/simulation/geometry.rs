//! Geometric helpers shared by the simulation: axis-aligned rectangles and
//! linear range remapping.

use geo::{Rect, coord};

/// Builds an axis-aligned rectangle from a top-left corner and an extent.
pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect<f32> {
    Rect::new(
        coord! { x: x, y: y },
        coord! { x: x + width, y: y + height },
    )
}

/// Linearly remaps `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Values outside the input range extrapolate rather than clamp.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}
