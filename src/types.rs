//! Core types for the trackball.
//!
//! This module contains the framework-neutral input identifiers, channel
//! bindings and sensitivity settings used by the trackball, plus the Bevy
//! components and resources the plugin works with.

use bevy::prelude::*;

use crate::gizmo3d::Gizmo3D;
use crate::math::GizmoFloat;

/// Opaque mouse button identifier.
///
/// The trackball only compares button ids for equality. The windowing layer
/// decides which of its native buttons map to which id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonId(pub u32);

impl ButtonId {
    /// Conventional id for the left mouse button.
    pub const LEFT: ButtonId = ButtonId(0);
    /// Conventional id for the right mouse button.
    pub const RIGHT: ButtonId = ButtonId(1);
    /// Conventional id for the middle mouse button.
    pub const MIDDLE: ButtonId = ButtonId(2);
}

bitflags::bitflags! {
    /// Keyboard modifier mask.
    ///
    /// The named bits are conveniences; any other bit a windowing layer sets is
    /// retained and takes part in binding matches like the named ones.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        /// Either Shift key.
        const SHIFT   = 1;
        /// Either Control key.
        const CONTROL = 1 << 1;
        /// Either Alt key.
        const ALT     = 1 << 2;
        /// Either Super (Windows/Command) key.
        const SUPER   = 1 << 3;

        const _ = !0;
    }
}

impl Modifiers {
    /// No modifier held, or as a binding: no modifier required.
    pub const NONE: Modifiers = Modifiers::empty();
}

bitflags::bitflags! {
    /// Set of drag channels.
    ///
    /// Several channels can be mouse-down at once, so activity is tracked as a
    /// set rather than a single mode.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Channels: u8 {
        /// Free rotation of the primary orientation.
        const ROTATE        = 1;
        /// Primary rotation constrained to the X axis.
        const ROTATE_X      = 1 << 1;
        /// Primary rotation constrained to the Y axis.
        const ROTATE_Y      = 1 << 2;
        /// Primary rotation constrained to the Z axis.
        const ROTATE_Z      = 1 << 3;
        /// Rotation of the secondary orientation.
        const SECOND_ROTATE = 1 << 4;
        /// Pan in the view plane.
        const PAN           = 1 << 5;
        /// Dolly along the view axis.
        const DOLLY         = 1 << 6;

        /// Every channel that drives the primary orientation.
        const ROTATION = Self::ROTATE.bits()
            | Self::ROTATE_X.bits()
            | Self::ROTATE_Y.bits()
            | Self::ROTATE_Z.bits();
    }
}

impl Channels {
    /// Axis of the first active constrained rotation channel, if any.
    pub fn constrained_axis(self) -> Option<GizmoAxis> {
        if self.contains(Channels::ROTATE_X) {
            Some(GizmoAxis::X)
        } else if self.contains(Channels::ROTATE_Y) {
            Some(GizmoAxis::Y)
        } else if self.contains(Channels::ROTATE_Z) {
            Some(GizmoAxis::Z)
        } else {
            None
        }
    }
}

/// Identifies which axis (X, Y, or Z) a constrained rotation or a drawn
/// gadget axis refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoAxis {
    /// The X axis (typically red).
    X,
    /// The Y axis (typically green).
    Y,
    /// The Z axis (typically blue).
    Z,
}

impl GizmoAxis {
    /// One-hot mask selecting this axis, in any precision.
    pub fn mask<T: GizmoFloat>(self) -> T::Vec3 {
        match self {
            GizmoAxis::X => T::vec3(T::ONE, T::ZERO, T::ZERO),
            GizmoAxis::Y => T::vec3(T::ZERO, T::ONE, T::ZERO),
            GizmoAxis::Z => T::vec3(T::ZERO, T::ZERO, T::ONE),
        }
    }
}

/// A mouse button plus the modifiers that must accompany it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Button that starts the drag.
    pub button: ButtonId,
    /// Acceptable modifiers. Empty means no modifier is required.
    pub modifiers: Modifiers,
}

impl Binding {
    /// Creates a binding.
    pub const fn new(button: ButtonId, modifiers: Modifiers) -> Self {
        Self { button, modifiers }
    }

    /// Whether a press of `button` with `held` modifiers triggers this binding.
    ///
    /// An empty binding mask accepts any modifier state. A non-empty mask is a
    /// set of acceptable modifiers: holding any one of them is enough.
    pub fn matches(&self, button: ButtonId, held: Modifiers) -> bool {
        if button != self.button {
            return false;
        }
        self.modifiers.is_empty() || self.modifiers.intersects(held)
    }
}

/// Channel bindings consulted on every button press.
///
/// A `None` entry leaves the channel unbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBindings {
    /// Free rotation.
    pub rotate: Option<Binding>,
    /// Rotation about X only.
    pub rotate_x: Option<Binding>,
    /// Rotation about Y only.
    pub rotate_y: Option<Binding>,
    /// Rotation about Z only.
    pub rotate_z: Option<Binding>,
    /// Secondary orientation rotation.
    pub second_rotate: Option<Binding>,
    /// Pan.
    pub pan: Option<Binding>,
    /// Dolly.
    pub dolly: Option<Binding>,
}

impl Default for ControlBindings {
    fn default() -> Self {
        Self {
            rotate: Some(Binding::new(ButtonId::LEFT, Modifiers::NONE)),
            rotate_x: Some(Binding::new(ButtonId::LEFT, Modifiers::SHIFT)),
            rotate_y: Some(Binding::new(ButtonId::LEFT, Modifiers::CONTROL)),
            rotate_z: Some(Binding::new(
                ButtonId::LEFT,
                Modifiers::ALT.union(Modifiers::SUPER),
            )),
            second_rotate: None,
            pan: Some(Binding::new(ButtonId::MIDDLE, Modifiers::NONE)),
            dolly: Some(Binding::new(ButtonId::RIGHT, Modifiers::NONE)),
        }
    }
}

impl ControlBindings {
    /// Binding for a single channel flag.
    pub fn get(&self, channel: Channels) -> Option<Binding> {
        *self.slot(channel)?
    }

    /// Replaces the binding of a single channel flag. Composite flags are ignored.
    pub fn set(&mut self, channel: Channels, binding: Option<Binding>) {
        if let Some(slot) = self.slot_mut(channel) {
            *slot = binding;
        }
    }

    /// Channels among `candidates` that a press of `button` with `held`
    /// modifiers activates.
    ///
    /// Constrained rotation channels are tried in X, Y, Z order and at most
    /// one of them is returned. The other channels match independently.
    pub fn pressed(&self, candidates: Channels, button: ButtonId, held: Modifiers) -> Channels {
        let mut matched = Channels::empty();
        for channel in [Channels::ROTATE, Channels::SECOND_ROTATE, Channels::PAN, Channels::DOLLY] {
            if candidates.contains(channel) && self.matches(channel, button, held) {
                matched |= channel;
            }
        }
        for channel in [Channels::ROTATE_X, Channels::ROTATE_Y, Channels::ROTATE_Z] {
            if candidates.contains(channel) && self.matches(channel, button, held) {
                matched |= channel;
                break;
            }
        }
        matched
    }

    /// Channels among `candidates` whose binding uses `button`, regardless of
    /// modifiers.
    pub fn released(&self, candidates: Channels, button: ButtonId) -> Channels {
        candidates
            .iter()
            .filter(|channel| self.get(*channel).is_some_and(|b| b.button == button))
            .fold(Channels::empty(), |acc, channel| acc | channel)
    }

    fn matches(&self, channel: Channels, button: ButtonId, held: Modifiers) -> bool {
        self.get(channel).is_some_and(|b| b.matches(button, held))
    }

    fn slot(&self, channel: Channels) -> Option<&Option<Binding>> {
        let slot = if channel == Channels::ROTATE {
            &self.rotate
        } else if channel == Channels::ROTATE_X {
            &self.rotate_x
        } else if channel == Channels::ROTATE_Y {
            &self.rotate_y
        } else if channel == Channels::ROTATE_Z {
            &self.rotate_z
        } else if channel == Channels::SECOND_ROTATE {
            &self.second_rotate
        } else if channel == Channels::PAN {
            &self.pan
        } else if channel == Channels::DOLLY {
            &self.dolly
        } else {
            return None;
        };
        Some(slot)
    }

    fn slot_mut(&mut self, channel: Channels) -> Option<&mut Option<Binding>> {
        let slot = if channel == Channels::ROTATE {
            &mut self.rotate
        } else if channel == Channels::ROTATE_X {
            &mut self.rotate_x
        } else if channel == Channels::ROTATE_Y {
            &mut self.rotate_y
        } else if channel == Channels::ROTATE_Z {
            &mut self.rotate_z
        } else if channel == Channels::SECOND_ROTATE {
            &mut self.second_rotate
        } else if channel == Channels::PAN {
            &mut self.pan
        } else if channel == Channels::DOLLY {
            &mut self.dolly
        } else {
            return None;
        };
        Some(slot)
    }
}

/// Sensitivity knobs of the trackball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoSettings<T: GizmoFloat = f32> {
    /// Multiplier on the arcball angle of each drag step.
    pub rotation_scale: T,
    /// World units of pan per pixel of drag.
    pub pan_scale: T,
    /// World units of dolly per pixel of vertical drag.
    pub dolly_scale: T,
    /// Extra multiplier applied to `dolly_scale` for wheel input.
    pub wheel_scale: T,
    /// Idle spin speed relative to the last drag step.
    pub idle_speed_ratio: T,
    /// Frame-rate compensation applied to every rotation step.
    pub fps_ratio: T,
}

impl<T: GizmoFloat> Default for GizmoSettings<T> {
    fn default() -> Self {
        Self {
            rotation_scale: T::ONE,
            pan_scale: T::from_f64(0.01),
            dolly_scale: T::from_f64(0.01),
            wheel_scale: T::from_f64(5.0),
            idle_speed_ratio: T::ONE,
            fps_ratio: T::ONE,
        }
    }
}

/// The trackball driven by [`TrackballPlugin`](crate::TrackballPlugin).
///
/// Owned by the app as a resource; systems and UI code reach it through
/// `Res<Trackball>` / `ResMut<Trackball>`.
#[derive(Resource, Debug, Clone, Default, Deref, DerefMut)]
pub struct Trackball(pub Gizmo3D<f32>);

/// Entity whose transform follows the trackball.
///
/// Each frame the entity's `Transform` is set to the trackball transform
/// applied on top of `base`.
#[derive(Component, Debug, Clone, Copy)]
pub struct TrackballTarget {
    /// Transform of the entity before any trackball input.
    pub base: Transform,
}

impl TrackballTarget {
    /// Follows the trackball starting from `base`.
    pub fn from_base(base: Transform) -> Self {
        Self { base }
    }
}

impl Default for TrackballTarget {
    fn default() -> Self {
        Self {
            base: Transform::IDENTITY,
        }
    }
}

/// Entity whose rotation follows the trackball's secondary orientation,
/// typically a directional light.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TrackballSecondaryTarget;

/// How Bevy input is translated into trackball input.
#[derive(Resource, Clone, Debug)]
pub struct TrackballInputMap {
    /// Bevy mouse buttons and the button ids they report.
    pub buttons: Vec<(MouseButton, ButtonId)>,
    /// Keys and the modifier bits they contribute while held.
    pub modifiers: Vec<(KeyCode, Modifiers)>,
    /// Whether the idle rotation is applied to the primary rotation every frame
    /// while no drag is active.
    pub idle_spin: bool,
    /// Whether the idle rotation is also applied to the secondary rotation.
    pub idle_spin_second: bool,
    /// Pixels of rotation per frame while an arrow key is held. Zero disables
    /// keyboard rotation.
    pub keyboard_step: f32,
    /// Camera-to-target distance passed to pan, dolly and wheel. Zero or
    /// negative means unscaled.
    pub pov_distance: f32,
}

impl Default for TrackballInputMap {
    fn default() -> Self {
        Self {
            buttons: vec![
                (MouseButton::Left, ButtonId::LEFT),
                (MouseButton::Right, ButtonId::RIGHT),
                (MouseButton::Middle, ButtonId::MIDDLE),
            ],
            modifiers: vec![
                (KeyCode::ShiftLeft, Modifiers::SHIFT),
                (KeyCode::ShiftRight, Modifiers::SHIFT),
                (KeyCode::ControlLeft, Modifiers::CONTROL),
                (KeyCode::ControlRight, Modifiers::CONTROL),
                (KeyCode::AltLeft, Modifiers::ALT),
                (KeyCode::AltRight, Modifiers::ALT),
                (KeyCode::SuperLeft, Modifiers::SUPER),
                (KeyCode::SuperRight, Modifiers::SUPER),
            ],
            idle_spin: true,
            idle_spin_second: false,
            keyboard_step: 4.0,
            pov_distance: 0.0,
        }
    }
}

impl TrackballInputMap {
    /// Modifier mask for the keys currently held.
    pub fn held_modifiers(&self, keys: &ButtonInput<KeyCode>) -> Modifiers {
        self.modifiers
            .iter()
            .filter(|(key, _)| keys.pressed(*key))
            .fold(Modifiers::NONE, |acc, (_, bits)| acc | *bits)
    }
}

/// Visual style of the orientation gadget.
#[derive(Resource, Clone, Debug)]
pub struct TrackballStyle {
    /// Whether to draw the gadget at all.
    pub visible: bool,
    /// Line width for gadget rendering (in pixels).
    pub line_width: f32,
    /// Depth bias to draw the gadget on top of regular geometry.
    pub depth_bias: f32,
    /// Length of each axis (in world units).
    pub axis_length: f32,
    /// Colors of the X, Y and Z axes.
    pub axis_colors: [Color; 3],
    /// Whether to draw the secondary direction arrow.
    pub show_secondary: bool,
    /// Color of the secondary direction arrow.
    pub secondary_color: Color,
    /// Whether to draw the drag ring while a rotation channel is active.
    pub show_drag_ring: bool,
    /// Color of the drag ring.
    pub drag_ring_color: Color,
    /// Number of line segments in the drag ring.
    pub drag_ring_segments: usize,
}

impl Default for TrackballStyle {
    fn default() -> Self {
        Self {
            visible: true,
            line_width: 3.0,
            depth_bias: -1.0,
            axis_length: 1.5,
            axis_colors: [
                Color::srgb(1.0, 0.25, 0.25),
                Color::srgb(0.25, 1.0, 0.25),
                Color::srgb(0.25, 0.5, 1.0),
            ],
            show_secondary: true,
            secondary_color: Color::srgb(1.0, 0.85, 0.3),
            show_drag_ring: true,
            drag_ring_color: Color::srgb(1.0, 1.0, 0.8),
            drag_ring_segments: 48,
        }
    }
}

impl TrackballStyle {
    /// Color used for an axis of the gadget.
    pub fn axis_color(&self, axis: GizmoAxis) -> Color {
        match axis {
            GizmoAxis::X => self.axis_colors[0],
            GizmoAxis::Y => self.axis_colors[1],
            GizmoAxis::Z => self.axis_colors[2],
        }
    }
}
