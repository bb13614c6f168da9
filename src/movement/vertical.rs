//! Movement domain: gravity, apex hang, fall clamp, wall slide and landings.

use bevy::prelude::*;

use crate::config::{GravityTuning, WallTuning};
use crate::movement::motion::approach;
use crate::movement::{CharacterState, JumpPhase, VerticalPhase};

/// A transition from any airborne phase back onto the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Downward speed at the moment of contact
    pub impact_speed: f32,
    /// Landed while at max fall speed: fall damage and a landing bop apply
    pub hard: bool,
}

/// Apply one fixed step of vertical motion. Probe outputs must already be on `state`.
pub fn apply_vertical(
    state: &mut CharacterState,
    tuning: &GravityTuning,
    wall: &WallTuning,
    dt: f32,
) -> Option<Landing> {
    if state.grounded && state.velocity.y <= 0.0 {
        return settle_on_ground(state, tuning);
    }

    if state.is_dashing {
        // Dashes travel flat
        state.velocity.y = 0.0;
        state.vertical_phase = VerticalPhase::Descending;
        return None;
    }

    let can_wall_slide = wall.slide_enabled
        && !state.grounded
        && state.touching_wall
        && state.velocity.y <= 0.0;

    if can_wall_slide {
        wall_slide(state, tuning, dt);
    } else if state.velocity.y > 0.0 || state.vertical_phase == VerticalPhase::ApexHang {
        ascend(state, tuning, dt);
    } else {
        let scale = if state.fast_dropping {
            tuning.fall_multiplier * tuning.fast_drop_multiplier
        } else {
            tuning.fall_multiplier
        };
        state.velocity.y -= tuning.gravity * scale * dt;
    }

    state.velocity.y = state
        .velocity
        .y
        .clamp(-tuning.max_fall_speed, tuning.max_rise_speed);

    if can_wall_slide {
        state.is_fast_falling = false;
        state.at_max_fall_speed = false;
    } else if state.vertical_phase != VerticalPhase::ApexHang && state.velocity.y <= 0.0 {
        state.is_fast_falling = state.velocity.y < -tuning.max_fall_speed * 0.5;
        state.at_max_fall_speed = state.velocity.y <= -tuning.max_fall_speed;
        state.vertical_phase = if state.is_fast_falling {
            VerticalPhase::FastFalling
        } else {
            VerticalPhase::Descending
        };
    }

    None
}

/// Grounded with no upward velocity: hold the ground bias, and report a landing if we
/// were airborne until now.
fn settle_on_ground(state: &mut CharacterState, tuning: &GravityTuning) -> Option<Landing> {
    let landing = state.vertical_phase.is_airborne().then(|| Landing {
        impact_speed: -state.velocity.y,
        hard: state.at_max_fall_speed,
    });

    state.jump_in_progress = false;
    state.is_fast_falling = false;
    state.at_max_fall_speed = false;
    state.timers.apex_hang = 0.0;
    if state.jump_phase != JumpPhase::Requested {
        state.jump_phase = JumpPhase::Idle;
    }

    match landing {
        Some(landing) if landing.hard && tuning.landing_bop > 0.0 => {
            state.velocity.y = tuning.landing_bop;
            state.launch_velocity = tuning.landing_bop;
            state.vertical_phase = VerticalPhase::Ascending;
        }
        _ => {
            state.velocity.y = -tuning.grounded_bias;
            state.vertical_phase = VerticalPhase::Grounded;
        }
    }

    if let Some(landing) = landing {
        debug!(
            "Landed: impact_speed={}, hard={}, jumps_remaining={}",
            landing.impact_speed, landing.hard, state.jumps_remaining
        );
    }
    landing
}

fn ascend(state: &mut CharacterState, tuning: &GravityTuning, dt: f32) {
    if state.bumped_head {
        state.velocity.y = 0.0;
        state.timers.apex_hang = 0.0;
        state.vertical_phase = VerticalPhase::Descending;
        debug!("Bumped head, ascent cancelled");
        return;
    }

    if state.vertical_phase == VerticalPhase::ApexHang {
        state.timers.apex_hang += dt;
        if state.timers.apex_hang >= tuning.apex_hang_time {
            state.timers.apex_hang = 0.0;
            state.velocity.y = -tuning.apex_exit_speed;
            state.vertical_phase = VerticalPhase::Descending;
        } else {
            state.velocity.y = 0.0;
        }
        return;
    }

    state.velocity.y -= tuning.gravity * dt;

    let apex_eligible =
        state.jump_in_progress && state.launch_velocity > 0.0 && tuning.apex_hang_time > 0.0;
    let apex_point = if state.launch_velocity > 0.0 {
        1.0 - state.velocity.y / state.launch_velocity
    } else {
        0.0
    };

    if apex_eligible && apex_point > tuning.apex_threshold {
        state.velocity.y = 0.0;
        state.timers.apex_hang = 0.0;
        state.vertical_phase = VerticalPhase::ApexHang;
    } else if state.velocity.y > 0.0 {
        state.vertical_phase = VerticalPhase::Ascending;
    } else {
        state.vertical_phase = VerticalPhase::Descending;
    }
}

fn wall_slide(state: &mut CharacterState, tuning: &GravityTuning, dt: f32) {
    let cap = if state.fast_dropping {
        tuning.wall_slide_speed * tuning.fast_drop_multiplier
    } else {
        tuning.wall_slide_speed
    };
    state.velocity.y = approach(state.velocity.y, -cap, tuning.wall_slide_smoothing, dt);
    state.timers.apex_hang = 0.0;
    if state.vertical_phase != VerticalPhase::WallSliding {
        debug!("Wall slide started: wall={:?}", state.wall_contact());
    }
    state.vertical_phase = VerticalPhase::WallSliding;
}
