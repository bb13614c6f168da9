//! Debug tooling for fast iteration on controller tuning.
//!
//! Features:
//! - JSON snapshot of the player controller (F3)
//! - Per-frame state line (F4)
//! - Forced respawn (F5) and input gate toggle (F6)

mod snapshot;
mod state;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use snapshot::ControllerSnapshot;
pub use state::DebugState;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, systems::handle_debug_hotkeys)
            .add_systems(
                Update,
                systems::log_debug_info.run_if(|state: Res<DebugState>| state.show_info),
            );
    }
}
