//! Movement domain: horizontal velocity smoothing and step-up correction.

use bevy::prelude::*;

use crate::config::MotionTuning;
use crate::movement::{CharacterState, ProbeResult};

/// Horizontal inputs the motion model reads for one fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionInput {
    pub horizontal: f32,
    pub run_held: bool,
}

/// Top speed for the current context: walk/run on the ground, and in the air the run
/// state that was held at takeoff.
pub fn speed_for(grounded: bool, run_held: bool, run_latched: bool, tuning: &MotionTuning) -> f32 {
    let running = if grounded { run_held } else { run_latched };
    match (grounded, running) {
        (true, true) => tuning.run_speed,
        (true, false) => tuning.walk_speed,
        (false, true) => tuning.air_run_speed,
        (false, false) => tuning.air_walk_speed,
    }
}

/// Exponential smoothing step toward `target`, stable for any `dt`.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let t = (rate * dt).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Update velocity.x for one fixed step. Returns the position correction for a step-up.
pub fn apply_motion(
    state: &mut CharacterState,
    input: MotionInput,
    probe: &ProbeResult,
    tuning: &MotionTuning,
    dt: f32,
) -> Vec2 {
    // Dash and stun-lock own horizontal velocity until they end
    if state.is_dashing || state.is_stun_locked {
        return Vec2::ZERO;
    }

    let horizontal = input.horizontal.clamp(-1.0, 1.0);
    let has_input = horizontal.abs() > tuning.input_dead_zone;

    if state.grounded {
        state.run_latched = input.run_held;
    }

    if state.is_wall_sliding() && horizontal.abs() < tuning.wall_stick_dead_zone {
        state.velocity.x = 0.0;
        return Vec2::ZERO;
    }

    let speed = speed_for(state.grounded, input.run_held, state.run_latched, tuning);
    let (target, rate) = if has_input {
        let rate = if state.is_wall_sliding() {
            tuning.wall_slide_acceleration
        } else if !state.grounded {
            tuning.air_acceleration
        } else if input.run_held {
            tuning.run_acceleration
        } else {
            tuning.ground_acceleration
        };
        (horizontal * speed, rate)
    } else {
        let rate = if state.grounded {
            tuning.ground_deceleration
        } else {
            tuning.air_deceleration
        };
        (0.0, rate)
    };

    state.velocity.x = approach(state.velocity.x, target, rate, dt);

    step_up(state, probe, tuning)
}

/// Climb a low ledge by translating the body instead of feeding velocity into gravity.
fn step_up(state: &mut CharacterState, probe: &ProbeResult, tuning: &MotionTuning) -> Vec2 {
    let Some(step) = probe.step_hit else {
        return Vec2::ZERO;
    };
    let moving_into_step = state.velocity.x * step.direction > f32::EPSILON;
    if !state.grounded || !moving_into_step {
        return Vec2::ZERO;
    }

    let correction = Vec2::new(step.direction * tuning.step_width, tuning.step_height);
    state.position += correction;
    debug!(
        "Stepped up ledge: dir={}, new position={:?}",
        step.direction, state.position
    );
    correction
}
