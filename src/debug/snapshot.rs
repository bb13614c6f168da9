//! Debug domain: serializable copy of a controller's state.

use serde::Serialize;

use crate::movement::{CharacterState, Facing, JumpPhase, VerticalPhase, WallContact};

/// Read-only view of every [`CharacterState`] field, with timers flattened to their
/// remaining (or elapsed) seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSnapshot {
    pub position: [f32; 2],
    pub velocity: [f32; 2],
    pub facing: Facing,

    pub grounded: bool,
    pub touching_wall: bool,
    pub touching_wall_left: bool,
    pub touching_wall_right: bool,
    pub wall_contact: WallContact,
    pub bumped_head: bool,

    pub health: i32,
    pub is_invincible: bool,
    pub invincibility_remaining: f32,
    pub is_stun_locked: bool,
    pub stun_lock_remaining: f32,
    pub is_dashing: bool,
    pub dash_remaining: f32,
    pub dash_direction: f32,

    pub jumps_remaining: u32,
    pub dashes_remaining: u32,
    pub jump_buffer_remaining: f32,
    pub coyote_remaining: f32,
    pub dash_buffer_remaining: f32,
    pub variable_jump_held: f32,
    pub apex_hang: f32,

    pub vertical_phase: VerticalPhase,
    pub jump_phase: JumpPhase,
    pub jump_in_progress: bool,
    pub launch_velocity: f32,
    pub is_fast_falling: bool,
    pub at_max_fall_speed: bool,
    pub fast_dropping: bool,
    pub run_latched: bool,
    pub jump_released_during_buffer: bool,
    pub respawn_count: u32,
}

impl ControllerSnapshot {
    pub fn capture(state: &CharacterState) -> Self {
        let timers = &state.timers;
        Self {
            position: state.position.to_array(),
            velocity: state.velocity.to_array(),
            facing: state.facing,
            grounded: state.grounded,
            touching_wall: state.touching_wall,
            touching_wall_left: state.touching_wall_left,
            touching_wall_right: state.touching_wall_right,
            wall_contact: state.wall_contact(),
            bumped_head: state.bumped_head,
            health: state.health,
            is_invincible: state.is_invincible,
            invincibility_remaining: timers.invincibility.remaining(),
            is_stun_locked: state.is_stun_locked,
            stun_lock_remaining: timers.stun_lock.remaining(),
            is_dashing: state.is_dashing,
            dash_remaining: timers.dash.remaining(),
            dash_direction: state.dash_direction,
            jumps_remaining: state.jumps_remaining,
            dashes_remaining: state.dashes_remaining,
            jump_buffer_remaining: timers.jump_buffer.remaining(),
            coyote_remaining: timers.coyote.remaining(),
            dash_buffer_remaining: timers.dash_buffer.remaining(),
            variable_jump_held: timers.variable_jump_held,
            apex_hang: timers.apex_hang,
            vertical_phase: state.vertical_phase,
            jump_phase: state.jump_phase,
            jump_in_progress: state.jump_in_progress,
            launch_velocity: state.launch_velocity,
            is_fast_falling: state.is_fast_falling,
            at_max_fall_speed: state.at_max_fall_speed,
            fast_dropping: state.fast_dropping,
            run_latched: state.run_latched,
            jump_released_during_buffer: state.jump_released_during_buffer,
            respawn_count: state.respawn_count,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
