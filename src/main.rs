use avian2d::prelude::*;
use bevy::prelude::*;

use olympia_kinematics::{CombatPlugin, EffectsPlugin, MovementPlugin};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Olympia Kinematics".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .add_plugins((MovementPlugin, CombatPlugin, EffectsPlugin))
    .add_systems(Startup, spawn_camera);

    #[cfg(feature = "dev-tools")]
    app.add_plugins((
        olympia_kinematics::DebugPlugin,
        olympia_kinematics::DevRoomPlugin,
    ));

    app.run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
