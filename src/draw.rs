//! Gadget rendering systems.
//!
//! This module draws the trackball state using Bevy's `Gizmos` API: the
//! rotated axes, the secondary direction arrow and, while rotating, a ring
//! around the current drag axis.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::gizmo_frame::GizmoFrame;
use crate::math::axis_basis;
use crate::types::{Channels, GizmoAxis, Trackball, TrackballStyle};

/// Draw the orientation gadget.
pub fn draw_trackball(mut gizmos: Gizmos, trackball: Res<Trackball>, style: Res<TrackballStyle>) {
    if !style.visible {
        return;
    }

    let frame = GizmoFrame::new(&trackball);
    for axis in [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z] {
        let end = frame.origin + frame.axis_dir(axis) * style.axis_length;
        gizmos.line(frame.origin, end, style.axis_color(axis));
    }

    if style.show_secondary {
        // Lights shine along their local -Z.
        let dir = trackball.second_rotation() * Vec3::NEG_Z;
        gizmos
            .arrow(
                frame.origin,
                frame.origin + dir * style.axis_length,
                style.secondary_color,
            )
            .with_tip_length(style.axis_length * 0.2);
    }

    if style.show_drag_ring && trackball.active_channels().intersects(Channels::ROTATION) {
        let (axis, angle) = trackball.step_rotation().to_axis_angle();
        if angle > 0.0 {
            draw_ring(
                &mut gizmos,
                frame.origin,
                axis,
                style.axis_length,
                style.drag_ring_color,
                style.drag_ring_segments,
            );
        }
    }
}

/// Draw a full circle of `radius` around `origin` in the plane normal to `axis`.
fn draw_ring(
    gizmos: &mut Gizmos,
    origin: Vec3,
    axis: Vec3,
    radius: f32,
    color: Color,
    segments: usize,
) {
    let axis = axis.normalize_or_zero();
    if axis.length_squared() < 1e-6 {
        return;
    }

    let (t1, t2) = axis_basis(axis);
    let steps = segments.max(3);

    let mut prev_point: Option<Vec3> = None;
    for i in 0..=steps {
        let angle = TAU * i as f32 / steps as f32;
        let point = origin + radius * (t1 * angle.cos() + t2 * angle.sin());
        if let Some(prev) = prev_point {
            gizmos.line(prev, point, color);
        }
        prev_point = Some(point);
    }
}
