//! Combat domain: health, invincibility, knockback, death and respawn.

use bevy::prelude::*;

use crate::combat::{Collidable, DamageCause, DamageOutcome, DamageRequest};
use crate::effects::{EffectKind, EffectSignal};
use crate::movement::{CharacterController, JumpPhase, VerticalPhase};

impl CharacterController {
    /// Apply damage immediately. No-op while dead or invincible.
    pub fn damage_health(
        &mut self,
        amount: i32,
        cause: DamageCause,
        grant_invincibility: bool,
    ) -> DamageOutcome {
        let mut request = DamageRequest::new(amount, cause);
        request.grant_invincibility = grant_invincibility;
        self.apply_damage(request)
    }

    /// Queue damage for the end of the current (or next) fixed step.
    pub fn queue_damage(&mut self, request: DamageRequest) {
        self.pending_damage.push(request);
    }

    /// Resolve queued damage in order. A death drops whatever is still queued, so one
    /// death means exactly one respawn.
    pub(crate) fn resolve_pending_damage(&mut self) {
        let pending = std::mem::take(&mut self.pending_damage);
        let total = pending.len();
        for (index, request) in pending.into_iter().enumerate() {
            let outcome = self.apply_damage(request);
            if outcome == DamageOutcome::Killed {
                let dropped = total - index - 1;
                if dropped > 0 {
                    debug!("Dropped {} damage request(s) queued behind a death", dropped);
                }
                return;
            }
            if request.return_to_checkpoint {
                self.return_to_checkpoint();
            }
        }
    }

    pub(crate) fn apply_damage(&mut self, request: DamageRequest) -> DamageOutcome {
        let state = &mut self.state;
        if state.health <= 0 || state.is_invincible {
            debug!(
                "Ignored {:?} damage: health={}, invincible={}",
                request.cause, state.health, state.is_invincible
            );
            return DamageOutcome::Ignored;
        }

        let amount = if request.amount < 0 {
            debug!("Clamped negative damage {} to 0", request.amount);
            0
        } else {
            request.amount
        };

        state.health = state.health.saturating_sub(amount).max(0);
        if request.grant_invincibility {
            state.start_invincibility(self.config.health.damage_invincibility_time);
        }
        if let Some(impulse) = request.knockback {
            self.apply_knockback(impulse);
        }

        debug!(
            "Took {} {:?} damage: health={}/{}",
            amount, request.cause, self.state.health, self.config.health.max_health
        );
        self.effects.emit(EffectSignal::new(
            EffectKind::Damage,
            self.state.position,
            amount as f32,
        ));

        if self.state.health == 0 {
            info!("Character died from {:?} damage", request.cause);
            self.effects
                .emit(EffectSignal::new(EffectKind::Death, self.state.position, 0.0));
            self.respawn_from_checkpoint();
            return DamageOutcome::Killed;
        }
        DamageOutcome::Hurt
    }

    /// Reset velocity, add the impulse (with a minimum upward lift) and clamp the speed.
    fn apply_knockback(&mut self, impulse: Vec2) {
        let tuning = &self.config.health;
        let state = &mut self.state;

        let mut velocity = Vec2::new(impulse.x, impulse.y.max(tuning.knockback_lift));
        let speed = velocity.length();
        if speed > tuning.max_knockback_speed && speed > 0.0 {
            velocity *= tuning.max_knockback_speed / speed;
        }

        state.velocity = velocity;
        state.is_dashing = false;
        state.timers.dash.cancel();
        state.jump_in_progress = false;
        state.launch_velocity = velocity.y.max(0.0);
        state.jump_phase = JumpPhase::Idle;
        state.vertical_phase = if velocity.y > 0.0 {
            VerticalPhase::Ascending
        } else {
            VerticalPhase::Descending
        };

        debug!(
            "Knockback applied: knockback={:?}, final_velocity=({:.1}, {:.1})",
            impulse, velocity.x, velocity.y
        );
    }

    /// Full reset at the active checkpoint (or spawn point).
    pub fn respawn_from_checkpoint(&mut self) {
        let target = self.checkpoints.active_checkpoint_or_spawn();
        let config = &self.config;
        let state = &mut self.state;

        state.position = target;
        state.velocity = Vec2::ZERO;
        state.health = config.health.max_health;
        state.jumps_remaining = config.jump.max_jumps;
        state.dashes_remaining = config.dash.max_dashes;
        state.timers.clear();
        state.is_dashing = false;
        state.dash_direction = 0.0;
        state.is_invincible = false;
        state.is_stun_locked = false;
        state.jump_in_progress = false;
        state.launch_velocity = 0.0;
        state.jump_phase = JumpPhase::Idle;
        state.vertical_phase = VerticalPhase::Descending;
        state.is_fast_falling = false;
        state.at_max_fall_speed = false;
        state.fast_dropping = false;
        state.jump_released_during_buffer = false;
        state.start_invincibility(config.health.respawn_invincibility_time);
        state.start_stun_lock(config.health.respawn_stun_time);
        state.respawn_count += 1;
        self.pending_damage.clear();

        info!(
            "Respawned at {:?} (respawn #{})",
            target, self.state.respawn_count
        );
        self.effects
            .emit(EffectSignal::new(EffectKind::Respawn, target, 0.0));
    }

    /// Put the character back on the active checkpoint without touching health.
    pub fn return_to_checkpoint(&mut self) {
        let target = self.checkpoints.active_checkpoint_or_spawn();
        self.teleport(target);
        info!("Returned to checkpoint at {:?}", target);
    }

    /// Move instantly, dropping all momentum.
    pub fn teleport(&mut self, destination: Vec2) {
        let state = &mut self.state;
        state.position = destination;
        state.velocity = Vec2::ZERO;
        state.is_dashing = false;
        state.timers.dash.cancel();
        state.vertical_phase = VerticalPhase::Descending;
        debug!("Teleported to {:?}", destination);
    }

    /// React to touching a collider. Damage is queued and resolves at the end of the
    /// next fixed step; checkpoints and teleporters apply immediately.
    pub fn handle_contact(&mut self, contact: &Collidable, source_position: Vec2) {
        match *contact {
            Collidable::Enemy { damage, knockback } => {
                let away = (self.state.position - source_position).normalize_or_zero();
                let away = if away == Vec2::ZERO { Vec2::X } else { away };
                self.queue_damage(
                    DamageRequest::new(damage, DamageCause::Enemy).with_knockback(away * knockback),
                );
            }
            Collidable::Hazard { damage } => {
                self.queue_damage(DamageRequest::new(damage, DamageCause::Hazard));
            }
            Collidable::RespawnZone { damage } => {
                self.queue_damage(
                    DamageRequest::new(damage, DamageCause::RespawnZone).returning_to_checkpoint(),
                );
            }
            Collidable::Checkpoint { id, position } => {
                self.checkpoints.notify_checkpoint_reached(id, position);
            }
            Collidable::Teleporter { destination } => {
                self.teleport(destination);
            }
        }
    }
}
