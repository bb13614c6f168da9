use std::sync::Arc;

use bevy::prelude::*;

use crate::checkpoint::{CheckpointId, CheckpointLedger, CheckpointService};
use crate::combat::{Collidable, DamageCause, DamageOutcome, DamageRequest};
use crate::config::ControllerConfig;
use crate::effects::{EffectKind, EffectQueue};
use crate::movement::{
    BodyShape, CharacterController, GameLayer, MovementInput, StaticBoxWorld,
};

const DT: f32 = 1.0 / 64.0;
const SPAWN: Vec2 = Vec2::new(0.0, 24.0);

struct Harness {
    controller: CharacterController,
    ledger: CheckpointLedger,
    effects: EffectQueue,
    world: StaticBoxWorld,
}

fn harness(config: ControllerConfig) -> Harness {
    let ledger = CheckpointLedger::new(SPAWN);
    let effects = EffectQueue::default();
    let controller = CharacterController::new(
        config,
        SPAWN,
        Some(BodyShape::new(24.0, 48.0)),
        Arc::new(ledger.clone()),
        Arc::new(effects.clone()),
    )
    .expect("valid config");
    let world = StaticBoxWorld::new().with_box(
        Vec2::new(0.0, -10.0),
        Vec2::new(4000.0, 20.0),
        GameLayer::Ground,
    );
    Harness {
        controller,
        ledger,
        effects,
        world,
    }
}

fn effect_kinds(effects: &EffectQueue) -> Vec<EffectKind> {
    effects.drain().into_iter().map(|signal| signal.kind).collect()
}

#[test]
fn test_damage_while_invincible_is_noop() {
    let mut h = harness(ControllerConfig::default());
    let max = h.controller.config().health.max_health;

    assert_eq!(
        h.controller.damage_health(1, DamageCause::Scripted, true),
        DamageOutcome::Hurt
    );
    assert_eq!(h.controller.state().health, max - 1);
    assert!(h.controller.state().is_invincible);

    assert_eq!(
        h.controller.damage_health(3, DamageCause::Scripted, true),
        DamageOutcome::Ignored
    );
    assert_eq!(h.controller.state().health, max - 1);
}

#[test]
fn test_two_hits_on_two_health_kill_and_respawn() {
    let mut config = ControllerConfig::default();
    config.health.max_health = 2;
    config.health.damage_invincibility_time = 0.0;
    let mut h = harness(config);

    assert_eq!(
        h.controller.damage_health(1, DamageCause::Scripted, true),
        DamageOutcome::Hurt
    );
    assert_eq!(h.controller.state().health, 1);
    assert!(!h.controller.state().is_invincible);

    assert_eq!(
        h.controller.damage_health(1, DamageCause::Scripted, true),
        DamageOutcome::Killed
    );
    let state = h.controller.state();
    assert_eq!(state.health, 2);
    assert!(state.is_invincible);
    assert!(state.is_stun_locked);
    assert_eq!(state.respawn_count, 1);

    assert_eq!(
        effect_kinds(&h.effects),
        vec![
            EffectKind::Damage,
            EffectKind::Damage,
            EffectKind::Death,
            EffectKind::Respawn,
        ]
    );
}

#[test]
fn test_queued_lethal_damage_respawns_exactly_once() {
    let mut h = harness(ControllerConfig::default());
    for _ in 0..3 {
        h.controller
            .queue_damage(DamageRequest::new(100, DamageCause::Hazard).without_invincibility());
    }

    let output = h.controller.fixed_step(&h.world, DT);
    assert!(output.respawned);
    let state = h.controller.state();
    assert_eq!(state.respawn_count, 1);
    assert_eq!(state.health, h.controller.config().health.max_health);
    assert!(state.is_invincible);
    assert!(h.controller.pending_damage.is_empty());
}

#[test]
fn test_negative_damage_clamps_to_zero() {
    let mut h = harness(ControllerConfig::default());
    let max = h.controller.config().health.max_health;
    h.controller.damage_health(-3, DamageCause::Scripted, false);
    assert_eq!(h.controller.state().health, max);
}

#[test]
fn test_respawn_goes_to_active_checkpoint_and_restores_state() {
    let mut h = harness(ControllerConfig::default());
    let checkpoint = Vec2::new(300.0, 80.0);
    h.controller.handle_contact(
        &Collidable::Checkpoint {
            id: CheckpointId(4),
            position: checkpoint,
        },
        checkpoint,
    );
    assert_eq!(h.ledger.active().map(|c| c.id), Some(CheckpointId(4)));

    {
        let state = &mut h.controller.state;
        state.velocity = Vec2::new(120.0, -300.0);
        state.jumps_remaining = 0;
        state.dashes_remaining = 0;
        state.timers.jump_buffer.arm(0.1);
    }
    h.controller.respawn_from_checkpoint();

    let state = h.controller.state();
    let config = h.controller.config();
    assert_eq!(state.position, checkpoint);
    assert_eq!(state.velocity, Vec2::ZERO);
    assert_eq!(state.jumps_remaining, config.jump.max_jumps);
    assert_eq!(state.dashes_remaining, config.dash.max_dashes);
    assert!(!state.timers.jump_buffer.is_armed());
    assert!(state.is_invincible);
    assert!(!state.can_act());
}

#[test]
fn test_respawn_stun_lock_expires_after_its_window() {
    let mut config = ControllerConfig::default();
    config.health.respawn_stun_time = 0.5;
    let mut h = harness(config);
    h.controller.respawn_from_checkpoint();

    for _ in 0..31 {
        h.controller.frame(&MovementInput::default(), DT);
    }
    assert!(h.controller.state().is_stun_locked);

    h.controller.frame(&MovementInput::default(), DT);
    assert!(!h.controller.state().is_stun_locked);
    assert!(h.controller.can_act());
}

#[test]
fn test_damage_invincibility_expires_exactly_once() {
    let mut h = harness(ControllerConfig::default());
    h.controller.damage_health(1, DamageCause::Scripted, true);

    // 1.0 s window at 1/64 s per frame
    for _ in 0..63 {
        h.controller.frame(&MovementInput::default(), DT);
    }
    assert!(h.controller.state().is_invincible);

    h.controller.frame(&MovementInput::default(), DT);
    assert!(!h.controller.state().is_invincible);

    h.controller.frame(&MovementInput::default(), DT);
    assert!(!h.controller.state().is_invincible);
}

#[test]
fn test_enemy_knockback_pushes_away_and_is_clamped() {
    let mut h = harness(ControllerConfig::default());
    let max_speed = h.controller.config().health.max_knockback_speed;

    h.controller.handle_contact(
        &Collidable::Enemy {
            damage: 1,
            knockback: 5000.0,
        },
        SPAWN - Vec2::new(50.0, 0.0),
    );
    let output = h.controller.fixed_step(&h.world, DT);

    assert!(output.velocity.x > 0.0, "pushed away from the enemy");
    assert!(output.velocity.y > 0.0, "minimum lift applied");
    assert!((output.velocity.length() - max_speed).abs() < 0.01);
    assert_eq!(
        h.controller.state().health,
        h.controller.config().health.max_health - 1
    );
}

#[test]
fn test_small_knockback_keeps_impulse_and_lift() {
    let mut h = harness(ControllerConfig::default());
    let lift = h.controller.config().health.knockback_lift;

    h.controller
        .queue_damage(DamageRequest::new(1, DamageCause::Enemy).with_knockback(Vec2::new(-200.0, 0.0)));
    let output = h.controller.fixed_step(&h.world, DT);

    assert_eq!(output.velocity, Vec2::new(-200.0, lift));
}

#[test]
fn test_respawn_zone_returns_to_checkpoint_keeping_health() {
    let mut h = harness(ControllerConfig::default());
    let checkpoint = Vec2::new(-150.0, 60.0);
    h.ledger
        .notify_checkpoint_reached(CheckpointId(1), checkpoint);

    h.controller
        .handle_contact(&Collidable::RespawnZone { damage: 1 }, Vec2::new(0.0, -300.0));
    let output = h.controller.fixed_step(&h.world, DT);

    let state = h.controller.state();
    assert!(!output.respawned);
    assert_eq!(state.position, checkpoint);
    assert_eq!(state.velocity, Vec2::ZERO);
    assert_eq!(state.health, h.controller.config().health.max_health - 1);
    assert_eq!(state.respawn_count, 0);
}

#[test]
fn test_respawn_zone_returns_even_while_invincible() {
    let mut h = harness(ControllerConfig::default());
    h.controller.damage_health(1, DamageCause::Scripted, true);
    h.controller.teleport(Vec2::new(500.0, 500.0));

    h.controller
        .handle_contact(&Collidable::RespawnZone { damage: 1 }, Vec2::ZERO);
    h.controller.fixed_step(&h.world, DT);

    assert_eq!(h.controller.state().position, SPAWN);
    assert_eq!(
        h.controller.state().health,
        h.controller.config().health.max_health - 1
    );
}

#[test]
fn test_hazard_damage_resolves_at_end_of_step() {
    let mut h = harness(ControllerConfig::default());
    let max = h.controller.config().health.max_health;

    h.controller
        .handle_contact(&Collidable::Hazard { damage: 2 }, Vec2::ZERO);
    assert_eq!(h.controller.state().health, max);

    h.controller.fixed_step(&h.world, DT);
    assert_eq!(h.controller.state().health, max - 2);
}

#[test]
fn test_teleporter_moves_and_stops_character() {
    let mut h = harness(ControllerConfig::default());
    h.controller.state.velocity = Vec2::new(300.0, 200.0);
    let destination = Vec2::new(640.0, 320.0);

    h.controller
        .handle_contact(&Collidable::Teleporter { destination }, Vec2::ZERO);

    assert_eq!(h.controller.state().position, destination);
    assert_eq!(h.controller.state().velocity, Vec2::ZERO);
}

#[test]
fn test_hard_landing_deals_fall_damage_and_bops() {
    let mut config = ControllerConfig::default();
    config.gravity.max_fall_speed = 300.0;
    let mut h = harness(config);
    h.controller.sync_position(SPAWN + Vec2::new(0.0, 200.0));

    let mut landing = None;
    for _ in 0..200 {
        h.controller.frame(&MovementInput::default(), DT);
        let output = h.controller.fixed_step(&h.world, DT);
        if output.landing.is_some() {
            landing = output.landing;
            break;
        }
        h.controller.integrate(DT);
        if h.controller.state().position.y < SPAWN.y {
            h.controller.sync_position(Vec2::new(0.0, SPAWN.y));
        }
    }

    let landing = landing.expect("landed");
    let config = h.controller.config();
    assert!(landing.hard);
    assert_eq!(
        h.controller.state().health,
        config.health.max_health - config.gravity.fall_damage
    );
    assert_eq!(h.controller.state().velocity.y, config.gravity.landing_bop);

    let kinds = effect_kinds(&h.effects);
    assert!(kinds.contains(&EffectKind::Land));
    assert!(kinds.contains(&EffectKind::Damage));
}
