//! Config domain: per-archetype controller tuning, loaded from RON and validated once.

mod loader;
mod validation;


pub use loader::{
    ArchetypeDef, ConfigLoadError, DataFile, load_archetype, load_archetypes, parse_archetypes,
};
pub use validation::ConfigError;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Complete tuning for one character archetype.
///
/// Immutable once a controller is built from it; toggles for optional abilities live in
/// the sub-structs next to the values they gate.
#[derive(Resource, Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub motion: MotionTuning,
    pub gravity: GravityTuning,
    pub jump: JumpTuning,
    pub wall: WallTuning,
    pub dash: DashTuning,
    pub health: HealthTuning,
    pub probe: ProbeTuning,
}

impl ControllerConfig {
    /// Every violated constraint; empty when the config is usable.
    pub fn validate(&self) -> Vec<ConfigError> {
        validation::validate_config(self)
    }

    /// Validate and hand back the config, or every violated constraint.
    pub fn validated(self) -> Result<Self, Vec<ConfigError>> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(errors)
        }
    }

    /// Apex height of a single ground jump, ignoring apex hang: h = v² / (2g)
    pub fn single_jump_height(&self) -> f32 {
        self.jump.jump_velocity * self.jump.jump_velocity / (2.0 * self.gravity.gravity)
    }

    /// Height reachable by chaining every jump charge at its apex.
    pub fn max_reachable_height(&self) -> f32 {
        self.single_jump_height() * self.jump.max_jumps as f32
    }
}

/// Horizontal movement. Speeds are units/sec, smoothing coefficients are 1/sec.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionTuning {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub air_walk_speed: f32,
    pub air_run_speed: f32,
    pub ground_acceleration: f32,
    pub run_acceleration: f32,
    pub air_acceleration: f32,
    pub wall_slide_acceleration: f32,
    pub ground_deceleration: f32,
    pub air_deceleration: f32,
    /// |horizontal| at or below this counts as no input
    pub input_dead_zone: f32,
    /// While wall-sliding, |horizontal| below this pins velocity.x to zero
    pub wall_stick_dead_zone: f32,
    pub step_height: f32,
    pub step_width: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            walk_speed: 220.0,
            run_speed: 340.0,
            air_walk_speed: 200.0,
            air_run_speed: 300.0,
            ground_acceleration: 12.0,
            run_acceleration: 16.0,
            air_acceleration: 6.0,
            wall_slide_acceleration: 2.0,
            ground_deceleration: 9.0,
            air_deceleration: 3.0,
            input_dead_zone: 0.1,
            wall_stick_dead_zone: 0.2,
            step_height: 12.0,
            step_width: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GravityTuning {
    /// Base downward acceleration magnitude (units/sec²)
    pub gravity: f32,
    /// Gravity scale once velocity.y is no longer positive
    pub fall_multiplier: f32,
    /// Fraction of launch velocity spent (0..1) after which the apex hang starts
    pub apex_threshold: f32,
    pub apex_hang_time: f32,
    /// Downward speed seeded when the apex hang ends
    pub apex_exit_speed: f32,
    pub max_fall_speed: f32,
    pub max_rise_speed: f32,
    /// Constant downward speed held while grounded so the ground probe stays in contact
    pub grounded_bias: f32,
    /// Upward speed applied after a max-speed landing
    pub landing_bop: f32,
    pub fall_damage: i32,
    pub wall_slide_speed: f32,
    pub wall_slide_smoothing: f32,
    /// Scales gravity (free fall) or the slide cap (wall slide) while fast-dropping
    pub fast_drop_multiplier: f32,
    /// vertical axis at or below -threshold requests a fast drop
    pub fast_drop_threshold: f32,
}

impl Default for GravityTuning {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            fall_multiplier: 1.6,
            apex_threshold: 0.97,
            apex_hang_time: 0.075,
            apex_exit_speed: 1.0,
            max_fall_speed: 900.0,
            max_rise_speed: 1400.0,
            grounded_bias: 20.0,
            landing_bop: 180.0,
            fall_damage: 1,
            wall_slide_speed: 120.0,
            wall_slide_smoothing: 12.0,
            fast_drop_multiplier: 2.0,
            fast_drop_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpTuning {
    pub jump_velocity: f32,
    /// Applied to upward velocity when the button is released mid-rise
    pub jump_cut_multiplier: f32,
    pub variable_jump: bool,
    /// Total charges: one ground jump plus `max_jumps - 1` air jumps
    pub max_jumps: u32,
    pub jump_buffer_time: f32,
    pub coyote_time: f32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            jump_velocity: 680.0,
            jump_cut_multiplier: 0.5,
            variable_jump: true,
            max_jumps: 2,
            jump_buffer_time: 0.12,
            coyote_time: 0.12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WallTuning {
    pub slide_enabled: bool,
    pub jump_enabled: bool,
    pub jump_horizontal: f32,
    pub jump_vertical: f32,
    /// Stun-lock after a wall jump so the player can't steer straight back into the wall
    pub jump_lock_time: f32,
}

impl Default for WallTuning {
    fn default() -> Self {
        Self {
            slide_enabled: true,
            jump_enabled: true,
            jump_horizontal: 400.0,
            jump_vertical: 600.0,
            jump_lock_time: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashTuning {
    pub enabled: bool,
    pub max_dashes: u32,
    pub dash_force: f32,
    pub dash_time: f32,
    pub invincibility_time: f32,
    pub dash_buffer_time: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            max_dashes: 1,
            dash_force: 900.0,
            dash_time: 0.16,
            invincibility_time: 0.2,
            dash_buffer_time: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthTuning {
    pub max_health: i32,
    pub damage_invincibility_time: f32,
    pub max_knockback_speed: f32,
    /// Minimum upward component of any knockback impulse
    pub knockback_lift: f32,
    pub respawn_invincibility_time: f32,
    pub respawn_stun_time: f32,
}

impl Default for HealthTuning {
    fn default() -> Self {
        Self {
            max_health: 5,
            damage_invincibility_time: 1.0,
            max_knockback_speed: 800.0,
            knockback_lift: 100.0,
            respawn_invincibility_time: 2.0,
            respawn_stun_time: 0.5,
        }
    }
}

/// Shape-cast distances and the slices of the body used as feet/head/ankle probes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeTuning {
    pub ground_cast_distance: f32,
    pub wall_cast_distance: f32,
    pub head_cast_distance: f32,
    pub feet_height: f32,
    /// Feet and head slices are narrowed to this fraction of body width
    pub feet_width_fraction: f32,
    pub head_width_fraction: f32,
    /// Height of the low step ray above the feet
    pub ankle_height: f32,
}

impl Default for ProbeTuning {
    fn default() -> Self {
        Self {
            ground_cast_distance: 4.0,
            wall_cast_distance: 4.0,
            head_cast_distance: 4.0,
            feet_height: 6.0,
            feet_width_fraction: 0.9,
            head_width_fraction: 0.8,
            ankle_height: 2.0,
        }
    }
}
