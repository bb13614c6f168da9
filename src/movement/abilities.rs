//! Movement domain: jump buffering, coyote time, jump charges, wall jumps, dashes and
//! fast-drop.

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::movement::{CharacterState, Facing, JumpPhase, VerticalPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    /// Ground jump taken during the grace window after leaving a ledge
    Coyote,
    Air,
    Wall,
}

/// A jump that launched this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpLaunch {
    pub kind: JumpKind,
    pub charges_spent: u32,
}

/// A dash that started this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashLaunch {
    pub direction: f32,
    pub consumed_charge: bool,
}

/// Jump button went down this frame.
pub fn press_jump(state: &mut CharacterState, config: &ControllerConfig) {
    if !state.can_act() {
        debug!("Jump press dropped: dashing={}, stunned={}", state.is_dashing, state.is_stun_locked);
        return;
    }
    state.timers.jump_buffer.arm(config.jump.jump_buffer_time);
    state.jump_released_during_buffer = false;
    if state.jump_phase != JumpPhase::Cut {
        state.jump_phase = JumpPhase::Requested;
    }
}

/// Jump button came up this frame: the variable-height cut.
pub fn release_jump(state: &mut CharacterState, config: &ControllerConfig) {
    if state.timers.jump_buffer.is_armed() {
        state.jump_released_during_buffer = true;
    }
    if !config.jump.variable_jump {
        return;
    }
    if state.jump_in_progress && state.velocity.y > 0.0 && state.jump_phase != JumpPhase::Cut {
        cut_jump(state, config);
    }
}

fn cut_jump(state: &mut CharacterState, config: &ControllerConfig) {
    state.velocity.y *= config.jump.jump_cut_multiplier;
    state.jump_phase = JumpPhase::Cut;
    debug!("Jump cut: velocity.y={}", state.velocity.y);
}

/// Dash button went down this frame.
pub fn press_dash(state: &mut CharacterState, config: &ControllerConfig) {
    if !config.dash.enabled {
        return;
    }
    if !state.can_act() {
        debug!("Dash press dropped: dashing={}, stunned={}", state.is_dashing, state.is_stun_locked);
        return;
    }
    state.timers.dash_buffer.arm(config.dash.dash_buffer_time);
}

/// The buffered jump ran out of time without launching.
pub(crate) fn expire_jump_request(state: &mut CharacterState) {
    state.jump_released_during_buffer = false;
    if state.jump_phase == JumpPhase::Requested {
        state.jump_phase = if state.jump_in_progress {
            JumpPhase::Airborne
        } else {
            JumpPhase::Idle
        };
    }
}

/// Ground contact refills charges. Jumps only refill once no jump is in progress, so
/// the frames right after takeoff (feet still within probe range) can't hand back the
/// charge that was just spent.
pub fn refill_charges(state: &mut CharacterState, config: &ControllerConfig) {
    if !state.grounded {
        return;
    }
    if !state.jump_in_progress && state.jumps_remaining != config.jump.max_jumps {
        debug!(
            "Jump charges refilled: {} -> {}",
            state.jumps_remaining, config.jump.max_jumps
        );
        state.jumps_remaining = config.jump.max_jumps;
    }
    state.dashes_remaining = config.dash.max_dashes;
}

/// Holding down while airborne speeds up falls and wall slides.
pub fn update_fast_drop(state: &mut CharacterState, vertical_axis: f32, config: &ControllerConfig) {
    state.fast_dropping = !state.grounded
        && state.can_act()
        && vertical_axis <= -config.gravity.fast_drop_threshold;
}

/// Launch the buffered jump if any jump condition holds.
pub fn resolve_jump(state: &mut CharacterState, config: &ControllerConfig) -> Option<JumpLaunch> {
    if !state.timers.jump_buffer.is_open() || !state.can_act() {
        return None;
    }

    let wall_away = state.wall_contact().away_sign();
    let coyote_open = state.timers.coyote.is_open();

    let launch = if config.wall.jump_enabled && !state.grounded && wall_away.is_some() {
        JumpLaunch {
            kind: JumpKind::Wall,
            charges_spent: 0,
        }
    } else if !state.jump_in_progress
        && (state.grounded || coyote_open)
        && state.jumps_remaining >= 1
    {
        JumpLaunch {
            kind: if state.grounded {
                JumpKind::Ground
            } else {
                JumpKind::Coyote
            },
            charges_spent: 1,
        }
    } else if state.jump_in_progress && state.jumps_remaining >= 1 {
        JumpLaunch {
            kind: JumpKind::Air,
            charges_spent: 1,
        }
    } else if !state.jump_in_progress && !state.grounded && state.jumps_remaining >= 2 {
        // Walked off a ledge and the grace window lapsed: the unused ground charge is
        // forfeited along with the air charge.
        JumpLaunch {
            kind: JumpKind::Air,
            charges_spent: 2,
        }
    } else {
        return None;
    };

    let vertical = match launch.kind {
        JumpKind::Wall => {
            let away = wall_away.unwrap_or_else(|| -state.facing.sign());
            state.velocity.x = away * config.wall.jump_horizontal;
            if let Some(facing) = Facing::from_sign(away) {
                state.facing = facing;
            }
            state.jumps_remaining = config.jump.max_jumps.saturating_sub(1);
            state.start_stun_lock(config.wall.jump_lock_time);
            config.wall.jump_vertical
        }
        _ => {
            state.jumps_remaining = state.jumps_remaining.saturating_sub(launch.charges_spent);
            config.jump.jump_velocity
        }
    };

    state.velocity.y = vertical;
    state.launch_velocity = vertical;
    state.jump_in_progress = true;
    state.jump_phase = JumpPhase::Airborne;
    state.vertical_phase = VerticalPhase::Ascending;
    state.is_fast_falling = false;
    state.at_max_fall_speed = false;
    state.timers.jump_buffer.consume();
    state.timers.coyote.consume();
    state.timers.apex_hang = 0.0;
    state.timers.variable_jump_held = 0.0;

    debug!(
        "{:?} jump: charges_spent={}, jumps_remaining={}",
        launch.kind, launch.charges_spent, state.jumps_remaining
    );

    if state.jump_released_during_buffer && config.jump.variable_jump {
        cut_jump(state, config);
    }
    state.jump_released_during_buffer = false;

    Some(launch)
}

/// Start the buffered dash if a charge is available.
pub fn resolve_dash(state: &mut CharacterState, config: &ControllerConfig) -> Option<DashLaunch> {
    if !config.dash.enabled || !state.timers.dash_buffer.is_open() || !state.can_act() {
        return None;
    }
    if state.dashes_remaining == 0 {
        return None;
    }

    let direction = state.facing.sign();
    let consumed_charge = !state.grounded;
    if consumed_charge {
        state.dashes_remaining -= 1;
    }

    state.velocity.x = direction * config.dash.dash_force;
    if !state.grounded {
        state.velocity.y = 0.0;
    }
    state.dash_direction = direction;
    state.timers.dash.start(config.dash.dash_time);
    state.is_dashing = state.timers.dash.is_active();
    state.start_invincibility(config.dash.invincibility_time);
    state.timers.dash_buffer.consume();

    debug!(
        "Dash: direction={}, airborne={}, dashes_remaining={}",
        direction, consumed_charge, state.dashes_remaining
    );

    Some(DashLaunch {
        direction,
        consumed_charge,
    })
}
