//! Movement domain: player bootstrap from data-driven controller archetypes.

use std::path::Path;
use std::sync::Arc;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::checkpoint::CheckpointLedger;
use crate::config::{ControllerConfig, load_archetype};
use crate::effects::{EffectQueue, EffectsSink, NullEffects};
use crate::movement::{BodyShape, CharacterController, GameLayer, Player};

/// Archetype data file, relative to the working directory.
pub const ARCHETYPE_FILE: &str = "assets/data/controller_archetypes.ron";

const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);
const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 100.0);

/// Which archetype the player is built from.
#[derive(Resource, Debug, Clone)]
pub struct PlayerArchetype(pub String);

impl Default for PlayerArchetype {
    fn default() -> Self {
        Self("player_default".to_string())
    }
}

/// Resolve the archetype's config, falling back to the built-in defaults.
pub(crate) fn resolve_player_config(path: &Path, archetype: &str) -> ControllerConfig {
    match load_archetype(path, archetype) {
        Ok(config) => config,
        Err(err) => {
            warn!("{}; using default controller config", err);
            ControllerConfig::default()
        }
    }
}

pub(crate) fn bootstrap_player(
    mut commands: Commands,
    archetype: Res<PlayerArchetype>,
    ledger: Res<CheckpointLedger>,
    effects: Option<Res<EffectQueue>>,
    existing_player: Query<Entity, With<Player>>,
    mut active_config: ResMut<ControllerConfig>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let config = resolve_player_config(Path::new(ARCHETYPE_FILE), &archetype.0);
    ledger.set_spawn_point(PLAYER_SPAWN);

    let effects: Arc<dyn EffectsSink> = match effects {
        Some(queue) => Arc::new(queue.clone()),
        None => Arc::new(NullEffects),
    };

    let controller = match CharacterController::new(
        config.clone(),
        PLAYER_SPAWN,
        Some(BodyShape::new(PLAYER_SIZE.x, PLAYER_SIZE.y)),
        Arc::new(ledger.clone()),
        effects,
    ) {
        Ok(controller) => controller,
        Err(errors) => {
            for error in &errors {
                warn!("Invalid controller config: {}", error);
            }
            return;
        }
    };

    info!(
        "Spawning player: archetype={}, health={}, max_jumps={}, max_dashes={}, jump_height={:.1}",
        archetype.0,
        config.health.max_health,
        config.jump.max_jumps,
        config.dash.max_dashes,
        config.single_jump_height()
    );
    *active_config = config;

    commands.spawn((
        Player,
        controller,
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // The controller owns gravity
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
            ),
        ),
    ));
}
