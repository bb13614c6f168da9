//! Movement domain: debug-only test room.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::checkpoint::CheckpointId;
use crate::combat::Collidable;
use crate::movement::{GameLayer, Ground, Wall};

fn spawn_block<M: Component>(
    commands: &mut Commands,
    marker: M,
    color: Color,
    center: Vec2,
    size: Vec2,
    layers: CollisionLayers,
) {
    commands.spawn((
        marker,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        layers,
    ));
}

fn spawn_trigger(
    commands: &mut Commands,
    contact: Collidable,
    color: Color,
    center: Vec2,
    size: Vec2,
) {
    commands.spawn((
        contact,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, -1.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        Sensor,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    ));
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    // Ground, split by a pit in the middle of the right half
    let floor = [
        (Vec2::new(-100.0, -200.0), Vec2::new(600.0, 40.0)),
        (Vec2::new(340.0, -200.0), Vec2::new(120.0, 40.0)),
    ];
    for (center, size) in floor {
        spawn_block(&mut commands, Ground, ground_color, center, size, ground_layers);
    }

    // Outer walls
    for x in [-420.0, 420.0] {
        spawn_block(
            &mut commands,
            Wall,
            wall_color,
            Vec2::new(x, 50.0),
            Vec2::new(40.0, 500.0),
            wall_layers,
        );
    }

    // Platforms, rising left to right to center
    let platforms = [
        (Vec2::new(-250.0, -50.0), Vec2::new(150.0, 20.0)),
        (Vec2::new(250.0, 50.0), Vec2::new(150.0, 20.0)),
        (Vec2::new(0.0, 150.0), Vec2::new(120.0, 20.0)),
    ];
    for (center, size) in platforms {
        spawn_block(&mut commands, Ground, platform_color, center, size, ground_layers);
    }

    // Low ledge for step-up
    spawn_block(
        &mut commands,
        Ground,
        platform_color,
        Vec2::new(-320.0, -175.0),
        Vec2::new(60.0, 10.0),
        ground_layers,
    );

    // Small pillar for wall jumping practice
    spawn_block(
        &mut commands,
        Wall,
        wall_color,
        Vec2::new(-100.0, -80.0),
        Vec2::new(30.0, 200.0),
        wall_layers,
    );

    // Spikes on the floor
    spawn_trigger(
        &mut commands,
        Collidable::Hazard { damage: 1 },
        Color::srgb(0.8, 0.2, 0.2),
        Vec2::new(120.0, -172.0),
        Vec2::new(60.0, 16.0),
    );

    // Bottom of the pit
    spawn_trigger(
        &mut commands,
        Collidable::RespawnZone { damage: 1 },
        Color::srgb(0.2, 0.1, 0.1),
        Vec2::new(240.0, -320.0),
        Vec2::new(120.0, 40.0),
    );

    // Checkpoint on the high right platform
    let checkpoint = Vec2::new(250.0, 90.0);
    spawn_trigger(
        &mut commands,
        Collidable::Checkpoint {
            id: CheckpointId(1),
            position: checkpoint,
        },
        Color::srgb(0.9, 0.8, 0.3),
        checkpoint,
        Vec2::new(16.0, 40.0),
    );

    // Teleporter from the left floor up to the center platform
    spawn_trigger(
        &mut commands,
        Collidable::Teleporter {
            destination: Vec2::new(0.0, 200.0),
        },
        Color::srgb(0.4, 0.3, 0.9),
        Vec2::new(-380.0, -160.0),
        Vec2::new(20.0, 40.0),
    );

    info!("Spawned dev test room");
}
