//! Movement domain: character kinematics (probe, gravity, motion, abilities) and the
//! Bevy systems that drive it.

pub(crate) mod abilities;
pub(crate) mod bootstrap;
mod components;
mod controller;
#[cfg(feature = "dev-tools")]
pub(crate) mod dev;
pub(crate) mod motion;
pub(crate) mod probe;
mod resources;
pub(crate) mod systems;
pub(crate) mod timers;
pub(crate) mod vertical;


use bevy::prelude::*;

pub use abilities::{DashLaunch, JumpKind, JumpLaunch};
pub use bootstrap::{ARCHETYPE_FILE, PlayerArchetype};
pub use components::{
    CharacterState, Facing, GameLayer, Ground, JumpPhase, Player, VerticalPhase, Wall,
    WallContact,
};
pub use controller::{CharacterController, StepOutput};
pub use motion::MotionInput;
pub use probe::{
    BodyShape, NoCollision, ProbeResult, ShapeCaster, StaticBox, StaticBoxWorld, StepHit,
};
pub use resources::MovementInput;
pub use timers::{Countdown, ExpiredTimers, GraceWindow, TimerSet};
pub use vertical::Landing;

use crate::checkpoint::CheckpointLedger;
use crate::config::ControllerConfig;

/// Ordering for the controller's two cadences.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControllerSystems {
    /// `Update`: input sampling, then timers and input edges
    Frame,
    /// `FixedUpdate`: the full pipeline
    Step,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerConfig>()
            .init_resource::<MovementInput>()
            .init_resource::<CheckpointLedger>()
            .init_resource::<PlayerArchetype>()
            .add_systems(Startup, bootstrap::bootstrap_player)
            .add_systems(
                Update,
                (systems::read_input, systems::frame_controllers)
                    .chain()
                    .in_set(ControllerSystems::Frame),
            )
            .add_systems(
                FixedUpdate,
                systems::step_controllers.in_set(ControllerSystems::Step),
            );
    }
}
