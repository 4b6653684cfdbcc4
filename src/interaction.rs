//! Input forwarding and transform write-back.
//!
//! This module contains the systems that translate Bevy window, mouse and
//! keyboard state into trackball events, apply idle spin, and copy the
//! trackball result onto tagged entities.

use bevy::gizmos::config::{DefaultGizmoConfigGroup, GizmoConfigStore};
use bevy::input::mouse::{AccumulatedMouseScroll, MouseButton, MouseScrollUnit};
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::types::{
    Trackball, TrackballInputMap, TrackballSecondaryTarget, TrackballStyle, TrackballTarget,
};

/// Approximate pixels per wheel line for pixel-based scroll devices.
const PIXELS_PER_LINE: f32 = 16.0;

/// Configure Bevy's built-in gizmo renderer using our style resource.
pub fn configure_gizmos(
    mut config_store: ResMut<GizmoConfigStore>,
    style: Res<TrackballStyle>,
) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = style.line_width;
    config.depth_bias = style.depth_bias;
}

/// Keep the trackball viewport in step with the primary window size.
pub fn sync_viewport(
    mut trackball: ResMut<Trackball>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(window) = windows.iter().next() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    if trackball.viewport() != (width, height) {
        trackball.viewport_size(width, height);
    }
}

/// Forward mouse button presses and releases.
pub fn forward_mouse_buttons(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    input_map: Res<TrackballInputMap>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut trackball: ResMut<Trackball>,
) {
    let cursor = windows.iter().next().and_then(Window::cursor_position);
    let modifiers = input_map.held_modifiers(&keys);

    for &(mouse_button, button) in &input_map.buttons {
        if buttons.just_pressed(mouse_button) {
            // A press outside the window has no position to anchor a drag.
            if let Some(cursor) = cursor {
                trackball.mouse(button, modifiers, true, cursor.x, cursor.y);
            }
        }
        if buttons.just_released(mouse_button) {
            let at = cursor.unwrap_or_else(|| trackball.cursor_position());
            trackball.mouse(button, modifiers, false, at.x, at.y);
        }
    }
}

/// Forward cursor movement while a drag is active.
pub fn forward_cursor_motion(
    input_map: Res<TrackballInputMap>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut trackball: ResMut<Trackball>,
) {
    if !trackball.is_active() {
        return;
    }
    let Some(cursor) = windows.iter().next().and_then(Window::cursor_position) else {
        return;
    };
    // Only real moves count; a zero-delta motion would stop the idle spin.
    if cursor == trackball.cursor_position() {
        return;
    }
    trackball.motion(cursor.x, cursor.y, input_map.pov_distance);
}

/// Forward the wheel as dolly.
pub fn forward_mouse_wheel(
    scroll: Res<AccumulatedMouseScroll>,
    input_map: Res<TrackballInputMap>,
    mut trackball: ResMut<Trackball>,
) {
    if scroll.delta == Vec2::ZERO {
        return;
    }
    let delta = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta,
        MouseScrollUnit::Pixel => scroll.delta / PIXELS_PER_LINE,
    };
    trackball.wheel(delta.x, delta.y, input_map.pov_distance);
}

/// Rotate with the arrow keys while they are held.
pub fn forward_arrow_keys(
    keys: Res<ButtonInput<KeyCode>>,
    input_map: Res<TrackballInputMap>,
    mut trackball: ResMut<Trackball>,
) {
    let step = input_map.keyboard_step;
    if step <= 0.0 {
        return;
    }

    let mut dx = 0.0;
    let mut dy = 0.0;
    if keys.pressed(KeyCode::ArrowLeft) {
        dx -= step;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        dx += step;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        dy += step;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        dy -= step;
    }
    if dx != 0.0 || dy != 0.0 {
        trackball.motion_immediate(dx, dy);
        // Key steps leave no spin behind.
        trackball.stop_idle();
    }
}

/// Apply the idle rotation once per frame while no drag is active.
pub fn spin_idle(input_map: Res<TrackballInputMap>, mut trackball: ResMut<Trackball>) {
    if trackball.is_active() {
        return;
    }
    if input_map.idle_spin {
        trackball.idle();
    }
    if input_map.idle_spin_second {
        trackball.idle_second();
    }
}

/// Copy the trackball result onto tagged entities.
pub fn apply_trackball_transforms(
    trackball: Res<Trackball>,
    mut targets: Query<(&TrackballTarget, &mut Transform), Without<TrackballSecondaryTarget>>,
    mut secondaries: Query<&mut Transform, (With<TrackballSecondaryTarget>, Without<TrackballTarget>)>,
) {
    let model = trackball.get_transform();
    for (target, mut transform) in &mut targets {
        let base = Mat4::from_scale_rotation_translation(
            target.base.scale,
            target.base.rotation,
            target.base.translation,
        );
        *transform = Transform::from_matrix(model * base);
    }

    let second = trackball.second_rotation();
    for mut transform in &mut secondaries {
        transform.rotation = second;
    }
}
