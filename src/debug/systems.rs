//! Debug domain: hotkeys for inspecting and poking the player controller.

use bevy::prelude::*;

use crate::debug::DebugState;
use crate::movement::{CharacterController, Player};

/// F3: dump the controller snapshot as JSON
/// F4: toggle the per-frame info line
/// F5: force a respawn at the active checkpoint
/// F6: toggle the input gate
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut player_query: Query<&mut CharacterController, With<Player>>,
) {
    let Ok(mut controller) = player_query.single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::F3) {
        match controller.snapshot().to_json() {
            Ok(json) => {
                info!("[DEBUG] Controller snapshot:\n{}", json);
                debug_state.last_dump = Some(json);
            }
            Err(err) => warn!("[DEBUG] Failed to serialize controller snapshot: {}", err),
        }
    }

    if keyboard.just_pressed(KeyCode::F4) {
        debug_state.show_info = !debug_state.show_info;
        info!("[DEBUG] Info line {}", if debug_state.show_info { "ON" } else { "OFF" });
    }

    if keyboard.just_pressed(KeyCode::F5) {
        info!("[DEBUG] Forcing respawn");
        controller.respawn_from_checkpoint();
    }

    if keyboard.just_pressed(KeyCode::F6) {
        let enabled = !controller.input_enabled();
        controller.set_input_enabled(enabled);
        info!("[DEBUG] Input {}", if enabled { "enabled" } else { "disabled" });
    }
}

pub(crate) fn log_debug_info(player_query: Query<&CharacterController, With<Player>>) {
    for controller in &player_query {
        let state = controller.state();
        info!(
            "[DEBUG] pos=({:.1}, {:.1}) vel=({:.1}, {:.1}) {:?} hp={} jumps={} dashes={}",
            state.position.x,
            state.position.y,
            state.velocity.x,
            state.velocity.y,
            state.vertical_phase,
            state.health,
            state.jumps_remaining,
            state.dashes_remaining
        );
    }
}
