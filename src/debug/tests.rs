use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::debug::ControllerSnapshot;
use crate::movement::{CharacterState, VerticalPhase};

#[test]
fn test_snapshot_copies_state_and_renders_json() {
    let config = ControllerConfig::default();
    let mut state = CharacterState::new(&config, Vec2::new(12.0, -3.5));
    state.velocity = Vec2::new(1.0, 2.0);
    state.touching_wall_right = true;
    state.vertical_phase = VerticalPhase::WallSliding;
    state.start_invincibility(0.5);
    state.touching_wall = true;
    state.launch_velocity = 640.0;
    state.run_latched = true;
    state.dash_direction = -1.0;

    let snapshot = ControllerSnapshot::capture(&state);
    assert_eq!(snapshot.position, [12.0, -3.5]);
    assert_eq!(snapshot.health, config.health.max_health);
    assert_eq!(snapshot.invincibility_remaining, 0.5);

    let json = snapshot.to_json().expect("snapshot serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["wall_contact"], "Right");
    assert_eq!(value["vertical_phase"], "WallSliding");
    assert_eq!(value["jumps_remaining"], config.jump.max_jumps);
    assert_eq!(value["velocity"][1], 2.0);
    assert_eq!(value["touching_wall"], true);
    assert_eq!(value["touching_wall_left"], false);
    assert_eq!(value["touching_wall_right"], true);
    assert_eq!(value["launch_velocity"], 640.0);
    assert_eq!(value["run_latched"], true);
    assert_eq!(value["dash_direction"], -1.0);
    assert_eq!(value["jump_released_during_buffer"], false);
}
