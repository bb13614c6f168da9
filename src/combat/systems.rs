//! Combat domain: contact dispatch from physics collisions.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{Collidable, ContactEvent};
use crate::movement::CharacterController;

/// Route collision starts between a controller and a [`Collidable`] into the
/// controller, then write any teleport straight back to the body.
pub(crate) fn dispatch_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut contact_events: MessageWriter<ContactEvent>,
    mut characters: Query<(&mut CharacterController, &mut Transform, &mut LinearVelocity)>,
    collidables: Query<(&Collidable, &GlobalTransform), Without<CharacterController>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (character_entity, collider_entity) in pairs {
            let Ok((mut controller, mut transform, mut velocity)) =
                characters.get_mut(character_entity)
            else {
                continue;
            };
            let Ok((contact, collider_transform)) = collidables.get(collider_entity) else {
                continue;
            };

            controller.sync_position(transform.translation.truncate());
            controller.handle_contact(contact, collider_transform.translation().truncate());

            let state = controller.state();
            transform.translation.x = state.position.x;
            transform.translation.y = state.position.y;
            velocity.0 = state.velocity;

            debug!("Contact {:?} with {:?}", contact, collider_entity);
            contact_events.write(ContactEvent {
                character: character_entity,
                collider: collider_entity,
                contact: contact.clone(),
            });
        }
    }
}
