//! Virtual trackball for Bevy.
//!
//! This crate turns 2D mouse drags into 3D rotation, pan and dolly. The core,
//! [`GizmoBase`] and [`Gizmo3D`], is a plain state machine you feed button,
//! cursor and wheel events; [`TrackballPlugin`] wires it to Bevy input and
//! draws an orientation gadget.
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use vgizmo3d::{TrackballPlugin, TrackballTarget};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TrackballPlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands) {
//!     commands.spawn((
//!         Camera3d::default(),
//!         Transform::from_xyz(0.0, 0.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
//!     ));
//!
//!     // Entity rotated, panned and dollied by the trackball
//!     commands.spawn((
//!         // ... your mesh and material ...
//!         TrackballTarget::default(),
//!     ));
//! }
//! ```
//!
//! # Without Bevy systems
//!
//! The core works on any event source. Window coordinates grow downward:
//!
//! ```
//! use vgizmo3d::{ButtonId, Gizmo3D, Modifiers};
//!
//! let mut track = Gizmo3D::<f64>::new();
//! track.viewport_size(1280.0, 720.0);
//! track.mouse(ButtonId::LEFT, Modifiers::NONE, true, 640.0, 360.0);
//! track.motion(700.0, 340.0, 0.0);
//! track.mouse(ButtonId::LEFT, Modifiers::NONE, false, 700.0, 340.0);
//! let model = track.get_transform();
//! # let _ = model;
//! ```
//!
//! # Channels
//!
//! - **Rotate**: free arcball rotation (left button by default)
//! - **Rotate X/Y/Z**: rotation about one axis (left button with Shift,
//!   Control, or Alt/Super)
//! - **Secondary rotate**: an independent orientation, e.g. a light
//! - **Pan** and **Dolly**: an offset in the view plane and along the view axis
//!
//! Several channels can be active at once when their bindings overlap.
//!
//! # Configuration
//!
//! - [`GizmoSettings`]: rotation, pan, dolly, wheel and idle speeds
//! - [`ControlBindings`]: which button and modifiers start each channel
//! - [`TrackballInputMap`]: how Bevy buttons and keys map to trackball input
//! - [`TrackballStyle`]: look of the orientation gadget

#![warn(missing_docs)]

use bevy::prelude::*;

mod draw;
mod gizmo;
mod gizmo3d;
mod gizmo_frame;
mod interaction;
mod math;
mod types;

pub use gizmo::GizmoBase;
pub use gizmo3d::{Gizmo3D, Gizmo3Dd, Gizmo3Df};
pub use math::{arcball_delta, hemisphere_point, GizmoFloat};
pub use types::{
    Binding, ButtonId, Channels, ControlBindings, GizmoAxis, GizmoSettings, Modifiers, Trackball,
    TrackballInputMap, TrackballSecondaryTarget, TrackballStyle, TrackballTarget,
};

pub use crate::draw::draw_trackball;
pub use crate::interaction::{
    apply_trackball_transforms, configure_gizmos, forward_arrow_keys, forward_cursor_motion,
    forward_mouse_buttons, forward_mouse_wheel, spin_idle, sync_viewport,
};

/// Plugin that drives a [`Trackball`] from Bevy input.
///
/// The plugin registers the trackball resources and, every frame, forwards
/// window size, mouse and keyboard input, applies idle spin, updates
/// [`TrackballTarget`] and [`TrackballSecondaryTarget`] entities and draws
/// the gadget.
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use vgizmo3d::TrackballPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(TrackballPlugin)
///     .run();
/// ```
pub struct TrackballPlugin;

impl Plugin for TrackballPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Trackball>()
            .init_resource::<TrackballInputMap>()
            .init_resource::<TrackballStyle>()
            .add_systems(Startup, configure_gizmos)
            .add_systems(
                Update,
                (
                    sync_viewport,
                    forward_mouse_buttons,
                    forward_cursor_motion,
                    forward_mouse_wheel,
                    forward_arrow_keys,
                    spin_idle,
                    apply_trackball_transforms,
                    draw_trackball,
                )
                    .chain(),
            );
    }
}
