//! Movement domain: the per-character controller tying the pipeline stages together.

use std::sync::Arc;

use bevy::prelude::*;

use crate::checkpoint::CheckpointService;
use crate::combat::{DamageCause, DamageRequest};
use crate::config::{ConfigError, ControllerConfig};
use crate::debug::ControllerSnapshot;
use crate::effects::{EffectKind, EffectSignal, EffectsSink};
use crate::movement::abilities::{self, DashLaunch, JumpKind, JumpLaunch};
use crate::movement::motion::{self, MotionInput};
use crate::movement::probe::{self, BodyShape, ProbeResult, ShapeCaster};
use crate::movement::vertical::{self, Landing};
use crate::movement::{CharacterState, Facing, MovementInput};

/// What one fixed step produced, for the host to apply to its physics body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutput {
    pub velocity: Vec2,
    /// Translation applied directly to the position this step (step-ups)
    pub position_correction: Vec2,
    pub probe: ProbeResult,
    pub landing: Option<Landing>,
    pub jump: Option<JumpLaunch>,
    pub dash: Option<DashLaunch>,
    /// The character died and was moved back to a checkpoint during this step
    pub respawned: bool,
}

/// Kinematic controller for one character.
///
/// Two cadences drive it: [`frame`](Self::frame) once per rendered frame (input edges,
/// facing, timers) and [`fixed_step`](Self::fixed_step) once per physics tick (probe,
/// gravity, motion, abilities, damage). The controller owns velocity; the host feeds
/// the body position in and applies the resulting velocity and position back.
#[derive(Component)]
pub struct CharacterController {
    pub(crate) config: ControllerConfig,
    pub(crate) state: CharacterState,
    pub(crate) body: Option<BodyShape>,
    pub(crate) input: MovementInput,
    pub(crate) input_enabled: bool,
    pub(crate) pending_damage: Vec<DamageRequest>,
    pub(crate) checkpoints: Arc<dyn CheckpointService>,
    pub(crate) effects: Arc<dyn EffectsSink>,
}

impl std::fmt::Debug for CharacterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterController")
            .field("state", &self.state)
            .field("body", &self.body)
            .field("input_enabled", &self.input_enabled)
            .field("pending_damage", &self.pending_damage)
            .finish_non_exhaustive()
    }
}

impl CharacterController {
    /// Build a controller at `spawn`. Refuses a config that fails validation.
    pub fn new(
        config: ControllerConfig,
        spawn: Vec2,
        body: Option<BodyShape>,
        checkpoints: Arc<dyn CheckpointService>,
        effects: Arc<dyn EffectsSink>,
    ) -> Result<Self, Vec<ConfigError>> {
        let config = config.validated()?;
        if body.is_none() {
            warn!("Character controller created without a body shape; probes will report no contact");
        }
        let state = CharacterState::new(&config, spawn);
        Ok(Self {
            config,
            state,
            body,
            input: MovementInput::default(),
            input_enabled: true,
            pending_damage: Vec::new(),
            checkpoints,
            effects,
        })
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn body(&self) -> Option<&BodyShape> {
        self.body.as_ref()
    }

    pub fn can_act(&self) -> bool {
        self.state.can_act()
    }

    /// Gate for menus, cutscenes and the like. While disabled every frame reads as
    /// neutral input.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        if self.input_enabled != enabled {
            debug!("Controller input enabled: {}", enabled);
        }
        self.input_enabled = enabled;
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Read-only copy of the full state for HUDs and debug dumps.
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot::capture(&self.state)
    }

    /// Host moved the body (physics integration, external teleport).
    pub fn sync_position(&mut self, position: Vec2) {
        self.state.position = position;
    }

    /// Frame cadence: advance timers, then apply this frame's input edges and facing.
    pub fn frame(&mut self, input: &MovementInput, dt: f32) {
        let input = if self.input_enabled {
            input.sanitized()
        } else {
            MovementInput::default()
        };
        let dt = dt.max(0.0);

        let state = &mut self.state;
        let expired = state.timers.advance(
            dt,
            state.grounded && !state.jump_in_progress,
            self.config.jump.coyote_time,
            input.jump_held && state.jump_in_progress,
        );

        if expired.invincibility {
            state.is_invincible = false;
            debug!("Invincibility ended");
        }
        if expired.stun_lock {
            state.is_stun_locked = false;
            debug!("Stun lock ended");
        }
        if expired.dash {
            state.is_dashing = false;
            debug!("Dash ended: velocity={:?}", state.velocity);
        }
        if expired.jump_buffer {
            abilities::expire_jump_request(state);
        }

        if input.jump_just_pressed {
            abilities::press_jump(state, &self.config);
        }
        if input.jump_just_released {
            abilities::release_jump(state, &self.config);
        }
        if input.dash_just_pressed {
            abilities::press_dash(state, &self.config);
        }

        self.update_facing(input.axis.x);
        self.input = input;
    }

    fn update_facing(&mut self, horizontal: f32) {
        let state = &mut self.state;
        if state.is_wall_sliding() {
            if let Some(facing) = state.wall_contact().away_sign().and_then(Facing::from_sign) {
                state.facing = facing;
            }
            return;
        }
        if !state.can_act() || horizontal.abs() <= self.config.motion.input_dead_zone {
            return;
        }
        if let Some(facing) = Facing::from_sign(horizontal) {
            state.facing = facing;
        }
    }

    /// Fixed cadence: run the full pipeline once. Never fails; bad inputs degrade to
    /// the least capable state.
    pub fn fixed_step(&mut self, caster: &dyn ShapeCaster, dt: f32) -> StepOutput {
        let dt = dt.max(0.0);
        let config = &self.config;

        let probe = probe::probe(
            self.body.as_ref(),
            self.state.position,
            self.state.velocity,
            config.motion.step_height,
            config.motion.step_width,
            caster,
            &config.probe,
        );
        apply_probe(&mut self.state, &probe);

        let landing = vertical::apply_vertical(&mut self.state, &config.gravity, &config.wall, dt);
        if let Some(landing) = landing {
            self.effects.emit(EffectSignal::new(
                EffectKind::Land,
                self.state.position,
                landing.impact_speed,
            ));
            if landing.hard && config.gravity.fall_damage > 0 {
                self.pending_damage
                    .push(DamageRequest::new(config.gravity.fall_damage, DamageCause::Fall));
            }
        }

        let position_correction = motion::apply_motion(
            &mut self.state,
            MotionInput {
                horizontal: self.input.axis.x,
                run_held: self.input.run_held,
            },
            &probe,
            &config.motion,
            dt,
        );

        abilities::refill_charges(&mut self.state, config);
        abilities::update_fast_drop(&mut self.state, self.input.axis.y, config);

        let jump = abilities::resolve_jump(&mut self.state, config);
        if let Some(launch) = jump {
            let kind = match launch.kind {
                JumpKind::Ground | JumpKind::Coyote | JumpKind::Wall => EffectKind::Jump,
                JumpKind::Air => EffectKind::AirJump,
            };
            self.effects
                .emit(EffectSignal::new(kind, self.state.position, self.state.velocity.y));
        }

        let dash = abilities::resolve_dash(&mut self.state, config);
        if let Some(launch) = dash {
            self.effects.emit(EffectSignal::new(
                EffectKind::Dash,
                self.state.position,
                launch.direction,
            ));
        }

        let respawn_count = self.state.respawn_count;
        self.resolve_pending_damage();
        self.state.clamp_counters(&self.config);

        StepOutput {
            velocity: self.state.velocity,
            position_correction,
            probe,
            landing,
            jump,
            dash,
            respawned: self.state.respawn_count != respawn_count,
        }
    }

    /// Advance position by the current velocity. Hosts with their own physics
    /// integration (avian) skip this and feed positions back through
    /// [`sync_position`](Self::sync_position).
    pub fn integrate(&mut self, dt: f32) {
        self.state.position += self.state.velocity * dt.max(0.0);
    }
}

fn apply_probe(state: &mut CharacterState, probe: &ProbeResult) {
    if state.grounded != probe.grounded {
        debug!(
            "Ground contact changed: grounded={}, jumps_remaining={}",
            probe.grounded, state.jumps_remaining
        );
    }
    state.grounded = probe.grounded;
    state.touching_wall = probe.touching_wall;
    state.touching_wall_left = probe.touching_wall_left;
    state.touching_wall_right = probe.touching_wall_right;
    state.bumped_head = probe.bumped_head;
}
