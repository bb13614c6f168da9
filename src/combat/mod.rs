//! Combat domain: health, damage, knockback, respawn and contact handling.

mod components;
mod events;
mod health;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::movement::ControllerSystems;

pub use components::{Collidable, DamageCause, DamageOutcome, DamageRequest};
pub use events::ContactEvent;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ContactEvent>()
            .add_systems(
                FixedUpdate,
                systems::dispatch_contacts.before(ControllerSystems::Step),
            );
    }
}
