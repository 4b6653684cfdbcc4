//! Headless checks of the Bevy systems that move entities.

use approx::assert_abs_diff_eq;
use bevy::prelude::*;
use vgizmo3d::{
    apply_trackball_transforms, forward_arrow_keys, spin_idle, ButtonId, Channels, Modifiers,
    Trackball, TrackballInputMap, TrackballSecondaryTarget, TrackballTarget,
};

const EPSILON: f32 = 1e-5;

fn assert_same_rotation(a: Quat, b: Quat) {
    // q and -q are the same rotation
    assert_abs_diff_eq!(a.dot(b).abs(), 1.0, epsilon = EPSILON);
}

fn app_with(trackball: Trackball, input_map: TrackballInputMap) -> App {
    let mut app = App::new();
    app.insert_resource(trackball)
        .insert_resource(input_map)
        .add_systems(Update, (spin_idle, apply_trackball_transforms).chain());
    app
}

/// Trackball left spinning by a short drag released mid-motion.
fn spinning_trackball() -> Trackball {
    let mut trackball = Trackball::default();
    trackball.viewport_size(256.0, 256.0);
    trackball.mouse(ButtonId::LEFT, Modifiers::NONE, true, 128.0, 128.0);
    trackball.motion(140.0, 128.0, 0.0);
    trackball.mouse(ButtonId::LEFT, Modifiers::NONE, false, 140.0, 128.0);
    trackball
}

/// Trackball whose light was left spinning by a right-button flick.
fn spinning_light() -> Trackball {
    let mut trackball = Trackball::default();
    trackball.viewport_size(256.0, 256.0);
    trackball.unbind(Channels::DOLLY);
    trackball.set_gizmo_second_rot_control(ButtonId::RIGHT, Modifiers::NONE);
    trackball.mouse(ButtonId::RIGHT, Modifiers::NONE, true, 128.0, 128.0);
    trackball.motion(140.0, 128.0, 0.0);
    trackball.mouse(ButtonId::RIGHT, Modifiers::NONE, false, 140.0, 128.0);
    trackball
}

#[test]
fn target_follows_trackball_transform() {
    let mut trackball = Trackball::default();
    trackball.set_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    trackball.set_position(Vec3::new(0.0, 1.0, 0.0));

    let input_map = TrackballInputMap {
        idle_spin: false,
        ..default()
    };
    let mut app = app_with(trackball, input_map);
    let entity = app
        .world_mut()
        .spawn((
            Transform::default(),
            TrackballTarget::from_base(Transform::from_xyz(1.0, 0.0, 0.0)),
        ))
        .id();

    app.update();

    let transform = app.world().get::<Transform>(entity).copied().unwrap();
    // +X turned a quarter about +Y lands on -Z, then lifted by the pan
    assert!(transform
        .translation
        .abs_diff_eq(Vec3::new(0.0, 1.0, -1.0), EPSILON));
    assert_same_rotation(
        transform.rotation,
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
    );
}

#[test]
fn secondary_target_takes_second_rotation_only() {
    let mut trackball = Trackball::default();
    let light = Quat::from_rotation_x(-0.7);
    trackball.set_second_rotation(light);
    trackball.set_rotation(Quat::from_rotation_z(1.0));
    trackball.set_position(Vec3::new(3.0, 0.0, 0.0));

    let mut app = app_with(trackball, TrackballInputMap::default());
    let entity = app
        .world_mut()
        .spawn((Transform::from_xyz(0.0, 5.0, 0.0), TrackballSecondaryTarget))
        .id();

    app.update();

    let transform = app.world().get::<Transform>(entity).copied().unwrap();
    assert_same_rotation(transform.rotation, light);
    assert!(transform
        .translation
        .abs_diff_eq(Vec3::new(0.0, 5.0, 0.0), EPSILON));
}

#[test]
fn idle_spin_applies_one_step_per_frame() {
    let trackball = spinning_trackball();
    let start = trackball.rotation();
    let idle = trackball.idle_rotation();
    assert_ne!(idle, Quat::IDENTITY);

    let mut app = app_with(trackball, TrackballInputMap::default());
    app.update();
    app.update();

    let rotation = app.world().resource::<Trackball>().rotation();
    assert_same_rotation(rotation, (idle * idle * start).normalize());
}

#[test]
fn idle_spin_waits_while_dragging() {
    let mut trackball = spinning_trackball();
    trackball.mouse(ButtonId::LEFT, Modifiers::NONE, true, 140.0, 128.0);
    let start = trackball.rotation();

    let mut app = app_with(trackball, TrackballInputMap::default());
    app.update();

    let rotation = app.world().resource::<Trackball>().rotation();
    assert_same_rotation(rotation, start);
}

#[test]
fn idle_spin_can_be_disabled() {
    let trackball = spinning_trackball();
    let start = trackball.rotation();

    let input_map = TrackballInputMap {
        idle_spin: false,
        ..default()
    };
    let mut app = app_with(trackball, input_map);
    app.update();

    let rotation = app.world().resource::<Trackball>().rotation();
    assert_same_rotation(rotation, start);
}

#[test]
fn idle_spin_second_turns_only_the_light() {
    let trackball = spinning_light();
    let idle = trackball.second_idle_rotation();
    assert_ne!(idle, Quat::IDENTITY);

    let input_map = TrackballInputMap {
        idle_spin_second: true,
        ..default()
    };
    let mut app = app_with(trackball, input_map);
    app.update();

    let trackball = app.world().resource::<Trackball>();
    assert_same_rotation(trackball.second_rotation(), idle);
    assert_eq!(trackball.rotation(), Quat::IDENTITY);
}

#[test]
fn arrow_key_rotation_leaves_no_spin() {
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ArrowRight);

    let mut app = app_with(Trackball::default(), TrackballInputMap::default());
    app.insert_resource(keys)
        .add_systems(Update, forward_arrow_keys.before(spin_idle));
    app.update();

    let rotated = app.world().resource::<Trackball>().rotation();
    assert_ne!(rotated, Quat::IDENTITY);
    assert_eq!(
        app.world().resource::<Trackball>().idle_rotation(),
        Quat::IDENTITY
    );

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::ArrowRight);
    app.update();
    app.update();
    assert_eq!(app.world().resource::<Trackball>().rotation(), rotated);
}
