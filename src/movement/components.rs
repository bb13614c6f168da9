//! Movement domain: character state, phases and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::Serialize;

use crate::config::ControllerConfig;
use crate::movement::timers::TimerSet;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, steps)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Contact triggers (hazards, checkpoints, teleporters) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn from_sign(sign: f32) -> Option<Self> {
        if sign > 0.0 {
            Some(Facing::Right)
        } else if sign < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WallContact {
    #[default]
    None,
    Left,
    Right,
    /// Squeezed between two walls
    Both,
}

impl WallContact {
    pub fn from_sides(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, true) => WallContact::Both,
            (true, false) => WallContact::Left,
            (false, true) => WallContact::Right,
            (false, false) => WallContact::None,
        }
    }

    /// Horizontal direction pointing away from the touched wall, if unambiguous.
    pub fn away_sign(self) -> Option<f32> {
        match self {
            WallContact::Left => Some(1.0),
            WallContact::Right => Some(-1.0),
            WallContact::None | WallContact::Both => None,
        }
    }
}

/// Vertical state machine owned by the gravity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VerticalPhase {
    Grounded,
    Ascending,
    ApexHang,
    #[default]
    Descending,
    FastFalling,
    WallSliding,
}

impl VerticalPhase {
    pub fn is_airborne(self) -> bool {
        !matches!(self, VerticalPhase::Grounded)
    }
}

/// Jump lifecycle owned by the ability model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum JumpPhase {
    #[default]
    Idle,
    /// A press is buffered and waiting for a valid condition
    Requested,
    Airborne,
    /// Upward velocity was shortened by an early release
    Cut,
}

/// Everything the controller knows about one character.
///
/// Mutated only by the controller's own pipeline stages; hosts read it (or a
/// [`ControllerSnapshot`](crate::debug::ControllerSnapshot)) for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,

    // Probe outputs, recomputed every fixed step
    pub grounded: bool,
    pub touching_wall: bool,
    pub touching_wall_left: bool,
    pub touching_wall_right: bool,
    pub bumped_head: bool,

    pub health: i32,
    pub is_invincible: bool,
    pub is_stun_locked: bool,
    pub is_dashing: bool,
    pub dash_direction: f32,

    pub jumps_remaining: u32,
    pub dashes_remaining: u32,
    pub timers: TimerSet,

    pub vertical_phase: VerticalPhase,
    pub jump_phase: JumpPhase,
    pub jump_in_progress: bool,
    /// Upward speed of the most recent launch, used for the apex fraction
    pub launch_velocity: f32,
    pub is_fast_falling: bool,
    pub at_max_fall_speed: bool,
    pub fast_dropping: bool,
    /// Run button state captured when the character left the ground
    pub run_latched: bool,
    /// The buffered jump was released before it could launch
    pub jump_released_during_buffer: bool,
    pub respawn_count: u32,
}

impl CharacterState {
    pub fn new(config: &ControllerConfig, position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            grounded: false,
            touching_wall: false,
            touching_wall_left: false,
            touching_wall_right: false,
            bumped_head: false,
            health: config.health.max_health,
            is_invincible: false,
            is_stun_locked: false,
            is_dashing: false,
            dash_direction: 0.0,
            jumps_remaining: config.jump.max_jumps,
            dashes_remaining: config.dash.max_dashes,
            timers: TimerSet::default(),
            vertical_phase: VerticalPhase::default(),
            jump_phase: JumpPhase::default(),
            jump_in_progress: false,
            launch_velocity: 0.0,
            is_fast_falling: false,
            at_max_fall_speed: false,
            fast_dropping: false,
            run_latched: false,
            jump_released_during_buffer: false,
            respawn_count: 0,
        }
    }

    /// Input is accepted only when neither a dash nor a stun-lock holds it.
    pub fn can_act(&self) -> bool {
        !self.is_dashing && !self.is_stun_locked
    }

    pub fn wall_contact(&self) -> WallContact {
        WallContact::from_sides(self.touching_wall_left, self.touching_wall_right)
    }

    pub fn is_wall_sliding(&self) -> bool {
        self.vertical_phase == VerticalPhase::WallSliding
    }

    pub fn start_invincibility(&mut self, duration: f32) {
        self.timers.invincibility.extend_to(duration);
        if self.timers.invincibility.is_active() {
            self.is_invincible = true;
        }
    }

    pub fn start_stun_lock(&mut self, duration: f32) {
        self.timers.stun_lock.extend_to(duration);
        if self.timers.stun_lock.is_active() {
            self.is_stun_locked = true;
        }
    }

    /// Clamp counters back into their legal ranges, logging any correction.
    pub(crate) fn clamp_counters(&mut self, config: &ControllerConfig) {
        let max_health = config.health.max_health;
        if !(0..=max_health).contains(&self.health) {
            debug!("Clamped health {} into [0, {}]", self.health, max_health);
            self.health = self.health.clamp(0, max_health);
        }
        if self.jumps_remaining > config.jump.max_jumps {
            debug!(
                "Clamped jumps_remaining {} to {}",
                self.jumps_remaining, config.jump.max_jumps
            );
            self.jumps_remaining = config.jump.max_jumps;
        }
        if self.dashes_remaining > config.dash.max_dashes {
            debug!(
                "Clamped dashes_remaining {} to {}",
                self.dashes_remaining, config.dash.max_dashes
            );
            self.dashes_remaining = config.dash.max_dashes;
        }
    }
}
