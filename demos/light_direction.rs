//! Light direction example.
//!
//! The left button rotates the scene as usual while the right button turns
//! the directional light through the secondary rotation. The yellow arrow of
//! the gadget shows where the light shines.

use bevy::prelude::*;
use vgizmo3d::{
    ButtonId, Channels, Modifiers, Trackball, TrackballInputMap, TrackballPlugin,
    TrackballSecondaryTarget, TrackballTarget,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(TrackballPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut trackball: ResMut<Trackball>,
    mut input_map: ResMut<TrackballInputMap>,
) {
    // A flick on the light keeps it turning
    input_map.idle_spin_second = true;

    // Right button turns the light; dolly stays on the wheel
    trackball.unbind(Channels::DOLLY);
    trackball.set_gizmo_second_rot_control(ButtonId::RIGHT, Modifiers::NONE);
    trackball.set_second_rotation(Quat::from_rotation_x(-0.8));

    // Camera
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 3.0, 9.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Light driven by the secondary rotation
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::default(),
        TrackballSecondaryTarget,
    ));

    // Ground and objects rotate together
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(4.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.35, 0.18))),
        TrackballTarget::from_base(Transform::from_xyz(0.0, -1.0, 0.0)),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.8))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.4, 0.2))),
        TrackballTarget::from_base(Transform::from_xyz(-1.2, -0.2, 0.0)),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_length(1.2))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.7, 1.0))),
        TrackballTarget::from_base(Transform::from_xyz(1.2, -0.4, 0.5)),
    ));
}
