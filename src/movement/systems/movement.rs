//! Movement domain: controller systems for both cadences.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::systems::AvianCaster;
use crate::movement::{CharacterController, MovementInput, Player};

/// Frame cadence: timers, input edges and facing.
pub(crate) fn frame_controllers(
    time: Res<Time>,
    input: Res<MovementInput>,
    mut query: Query<&mut CharacterController, With<Player>>,
) {
    let dt = time.delta_secs();

    for mut controller in &mut query {
        controller.frame(&input, dt);
    }
}

/// Fixed cadence: run the pipeline against the physics world and hand the result
/// back to the rigid body.
pub(crate) fn step_controllers(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut query: Query<
        (
            Entity,
            &mut CharacterController,
            &mut Transform,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut controller, mut transform, mut velocity) in &mut query {
        controller.sync_position(transform.translation.truncate());

        let caster = AvianCaster::new(&spatial_query, entity);
        let output = controller.fixed_step(&caster, dt);

        // Step-ups and respawns move the body directly
        let position = controller.state().position;
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        velocity.0 = output.velocity;

        if output.respawned {
            debug!("Controller {:?} respawned at {:?}", entity, position);
        }
    }
}
