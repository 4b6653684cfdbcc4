//! Gadget coordinate frame.
//!
//! The orientation gadget is drawn at the rotation center as seen through the
//! full trackball transform, with its axes turned by the primary rotation.

use bevy::prelude::*;

use crate::gizmo3d::Gizmo3D;
use crate::types::GizmoAxis;

/// Origin and rotated basis vectors of the gadget.
#[derive(Clone, Copy, Debug)]
pub struct GizmoFrame {
    pub origin: Vec3,
    x: Vec3,
    y: Vec3,
    z: Vec3,
}

impl GizmoFrame {
    pub fn new(gizmo: &Gizmo3D<f32>) -> Self {
        let origin = gizmo
            .get_transform()
            .transform_point3(gizmo.rotation_center());
        let rotation = gizmo.rotation();
        let turned = |axis: GizmoAxis| rotation * axis.mask::<f32>();
        Self {
            origin,
            x: turned(GizmoAxis::X),
            y: turned(GizmoAxis::Y),
            z: turned(GizmoAxis::Z),
        }
    }

    pub fn axis_dir(&self, axis: GizmoAxis) -> Vec3 {
        match axis {
            GizmoAxis::X => self.x,
            GizmoAxis::Y => self.y,
            GizmoAxis::Z => self.z,
        }
    }
}
