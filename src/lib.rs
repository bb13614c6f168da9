//! Kinematic movement and combat-state engine for a 2D side-scrolling character.
//!
//! The simulation lives on [`movement::CharacterController`]; the plugins drive it
//! from Bevy schedules against an avian2d physics world.

pub mod checkpoint;
pub mod combat;
pub mod config;
pub mod debug;
pub mod effects;
pub mod movement;

pub use checkpoint::{CheckpointId, CheckpointLedger, CheckpointService};
pub use combat::{Collidable, CombatPlugin, DamageCause, DamageOutcome, DamageRequest};
pub use config::{ConfigError, ConfigLoadError, ControllerConfig};
pub use debug::{ControllerSnapshot, DebugPlugin};
pub use effects::{EffectKind, EffectQueue, EffectSignal, EffectsPlugin, EffectsSink, NullEffects};
pub use movement::{
    BodyShape, CharacterController, CharacterState, MovementInput, MovementPlugin, ShapeCaster,
    StaticBoxWorld, StepOutput,
};

/// Spawns the dev test room at startup.
#[cfg(feature = "dev-tools")]
pub struct DevRoomPlugin;

#[cfg(feature = "dev-tools")]
impl bevy::prelude::Plugin for DevRoomPlugin {
    fn build(&self, app: &mut bevy::prelude::App) {
        app.add_systems(bevy::prelude::Startup, movement::dev::spawn_test_room);
    }
}
