//! Spinning cube example.
//!
//! Drag with the left button to rotate the cube; hold Shift, Control or Alt to
//! rotate about a single axis. Middle drag pans, right drag or the wheel
//! dollies. Release during a drag to leave the cube spinning.
//! Space toggles idle spin, Backspace resets.

use bevy::prelude::*;
use vgizmo3d::{Trackball, TrackballInputMap, TrackballPlugin, TrackballTarget};

#[derive(Component)]
struct Hud;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(TrackballPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (keyboard_controls, update_hud))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut input_map: ResMut<TrackballInputMap>,
) {
    // Pan and dolly speeds grow with the distance to the cube
    input_map.pov_distance = 8.0;

    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Light
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Cube driven by the trackball
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_length(2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.7, 1.0))),
        Transform::default(),
        TrackballTarget::default(),
    ));

    // HUD
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
    )).with_children(|p| {
        p.spawn((
            Text::new(""),
            TextFont { font_size: 14.0, ..default() },
            TextColor(Color::WHITE),
            Hud,
        ));
    });
}

fn keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut input_map: ResMut<TrackballInputMap>,
    mut trackball: ResMut<Trackball>,
) {
    if keys.just_pressed(KeyCode::Space) {
        input_map.idle_spin = !input_map.idle_spin;
    }
    if keys.just_pressed(KeyCode::Backspace) {
        trackball.reset();
    }
}

fn update_hud(
    trackball: Res<Trackball>,
    input_map: Res<TrackballInputMap>,
    mut query: Query<&mut Text, With<Hud>>,
) {
    let Ok(mut text) = query.single_mut() else { return };

    let (axis, angle) = trackball.rotation().to_axis_angle();
    let position = trackball.position();
    text.0 = format!(
        "Axis: ({:.2}, {:.2}, {:.2}) Angle: {:.1} deg\n\
         Position: ({:.2}, {:.2}, {:.2})\n\
         Idle spin: {}\n\n\
         [LMB] Rotate  [Shift/Ctrl/Alt] X/Y/Z only\n\
         [MMB] Pan  [RMB/Wheel] Dolly  [Arrows] Rotate\n\
         [Space] Toggle idle spin  [Backspace] Reset",
        axis.x,
        axis.y,
        axis.z,
        angle.to_degrees(),
        position.x,
        position.y,
        position.z,
        if input_map.idle_spin { "on" } else { "off" },
    );
}
