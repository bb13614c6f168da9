//! Movement domain: normalized per-frame input.

use bevy::prelude::*;

/// One frame of already-debounced input. Axes are in [-1, 1]; the `just_*` flags are
/// edges for this frame only.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub jump_held: bool,
    pub dash_just_pressed: bool,
    pub run_held: bool,
}

impl MovementInput {
    /// Clamp axes into [-1, 1] (NaN reads as 0), logging any correction.
    pub fn sanitized(mut self) -> Self {
        for (name, value) in [("x", &mut self.axis.x), ("y", &mut self.axis.y)] {
            let clamped = if value.is_nan() {
                0.0
            } else {
                value.clamp(-1.0, 1.0)
            };
            if clamped != *value {
                debug!("Clamped input axis {} from {} to {}", name, value, clamped);
                *value = clamped;
            }
        }
        self
    }
}
