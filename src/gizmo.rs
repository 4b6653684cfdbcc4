//! Arcball core shared by every trackball.
//!
//! [`GizmoBase`] turns cursor drags into a primary rotation quaternion. It
//! owns the cursor tracking, the viewport projection and the rotation
//! channels (free and single-axis); [`Gizmo3D`](crate::Gizmo3D) builds pan,
//! dolly and a secondary rotation on top of it.

use bevy::log::{debug, trace, warn};

use crate::math::{arcball_delta, hemisphere_point, is_degenerate_axis, GizmoFloat};
use crate::types::{Binding, ButtonId, Channels, ControlBindings, GizmoSettings, Modifiers};

/// Width and height assumed until the first [`GizmoBase::viewport_size`] call.
const DEFAULT_VIEWPORT: f64 = 256.0;

/// Rotation-only trackball.
///
/// Feed it button and cursor events in the order they happen and read the
/// accumulated rotation back once per frame.
///
/// ```
/// use vgizmo3d::{ButtonId, GizmoBase, Modifiers};
///
/// let mut gizmo = GizmoBase::<f32>::new();
/// gizmo.viewport_size(800.0, 600.0);
/// gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, true, 400.0, 300.0);
/// gizmo.motion(450.0, 300.0);
/// gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, false, 450.0, 300.0);
/// assert!((gizmo.rotation().length() - 1.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct GizmoBase<T: GizmoFloat = f32> {
    rotation: T::Quat,
    step_rotation: T::Quat,
    idle_rotation: T::Quat,
    cursor_pos: T::Vec2,
    cursor_delta: T::Vec2,
    width: T,
    height: T,
    min_dimension: T,
    center_offset: T::Vec2,
    rotation_center: T::Vec3,
    rotation_mask: T::Vec3,
    active: Channels,
    bindings: ControlBindings,
    settings: GizmoSettings<T>,
}

impl<T: GizmoFloat> Default for GizmoBase<T> {
    fn default() -> Self {
        Self::with_settings(GizmoSettings::default())
    }
}

impl<T: GizmoFloat> GizmoBase<T> {
    /// Identity rotation, default bindings and settings, 256x256 viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`GizmoBase::new`] with explicit sensitivity settings.
    pub fn with_settings(settings: GizmoSettings<T>) -> Self {
        let mut gizmo = Self {
            rotation: T::quat_identity(),
            step_rotation: T::quat_identity(),
            idle_rotation: T::quat_identity(),
            cursor_pos: T::vec2(T::ZERO, T::ZERO),
            cursor_delta: T::vec2(T::ZERO, T::ZERO),
            width: T::ZERO,
            height: T::ZERO,
            min_dimension: T::ZERO,
            center_offset: T::vec2(T::ZERO, T::ZERO),
            rotation_center: T::vec3(T::ZERO, T::ZERO, T::ZERO),
            rotation_mask: T::vec3(T::ONE, T::ONE, T::ONE),
            active: Channels::empty(),
            bindings: ControlBindings::default(),
            settings,
        };
        let size = T::from_f64(DEFAULT_VIEWPORT);
        gizmo.set_viewport(size, size);
        gizmo
    }

    /// Records the viewport dimensions used to project the cursor.
    ///
    /// Call this at startup and on every resize. Takes effect for the next
    /// motion event, also in the middle of a drag.
    pub fn viewport_size(&mut self, width: T, height: T) {
        self.set_viewport(width, height);
        debug!(
            "trackball viewport {:?}x{:?}, min dimension {:?}",
            width, height, self.min_dimension
        );
    }

    fn set_viewport(&mut self, width: T, height: T) {
        self.width = width;
        self.height = height;
        self.min_dimension = width.min(height) * T::HALF;
        self.center_offset = T::vec2(width * T::HALF, height * T::HALF);
    }

    /// Current viewport `(width, height)`.
    pub fn viewport(&self) -> (T, T) {
        (self.width, self.height)
    }

    /// Button event from the windowing layer, in window coordinates (y down).
    ///
    /// A press matching a rotation binding starts that channel; releasing the
    /// bound button ends it.
    pub fn mouse(&mut self, button: ButtonId, modifiers: Modifiers, pressed: bool, x: T, y: T) {
        if pressed {
            self.press(Channels::ROTATION, button, modifiers, x, y);
        } else {
            let released = self.releasing(Channels::ROTATION, button);
            if released.is_empty() {
                return;
            }
            if self.has_no_delta() {
                self.update();
            }
            self.finish_release(released);
        }
    }

    /// Cursor event from the windowing layer, in window coordinates (y down).
    pub fn motion(&mut self, x: T, y: T) {
        if self.track_cursor(x, y) {
            self.update();
        }
    }

    /// Applies the idle rotation to the primary rotation.
    ///
    /// Call once per frame for continuous spin at the speed of the last drag
    /// step. A click without drag resets the idle rotation and stops the spin.
    pub fn idle(&mut self) {
        if self.idle_rotation == T::quat_identity() {
            return;
        }
        self.rotation = T::quat_normalize(self.idle_rotation * self.rotation);
    }

    /// Clears the idle rotation without touching the current rotation.
    pub fn stop_idle(&mut self) {
        self.idle_rotation = T::quat_identity();
    }

    /// Rotates from the viewport center by a pixel delta, independent of any
    /// drag. `dy` grows upward. The single-axis mask of an active constrained
    /// channel still applies.
    pub fn motion_immediate(&mut self, dx: T, dy: T) {
        let from = self.center_offset;
        let to = T::vec2(T::vec2_x(from) + dx, T::vec2_y(from) + dy);
        let step = self.arcball_step(from, to, self.rotation_mask);
        self.apply_primary_step(step);
    }

    /// Horizontal-only [`GizmoBase::motion_immediate`].
    pub fn motion_immediate_left_right(&mut self, dx: T) {
        self.motion_immediate(dx, T::ZERO);
    }

    /// Vertical-only [`GizmoBase::motion_immediate`].
    pub fn motion_immediate_up_down(&mut self, dy: T) {
        self.motion_immediate(T::ZERO, dy);
    }

    /// Current primary rotation.
    pub fn rotation(&self) -> T::Quat {
        self.rotation
    }

    /// Mutable access to the primary rotation, for editors that write the
    /// quaternion in place. The caller keeps it unit length.
    pub fn rotation_mut(&mut self) -> &mut T::Quat {
        &mut self.rotation
    }

    /// Overwrites the primary rotation. `rotation` must be unit length; it is
    /// stored as given.
    pub fn set_rotation(&mut self, rotation: T::Quat) {
        self.rotation = rotation;
    }

    /// Rotation computed from the most recent drag step.
    pub fn step_rotation(&self) -> T::Quat {
        self.step_rotation
    }

    /// Rotation applied by each [`GizmoBase::idle`] call.
    pub fn idle_rotation(&self) -> T::Quat {
        self.idle_rotation
    }

    /// Pivot of the rotation when building matrices.
    pub fn rotation_center(&self) -> T::Vec3 {
        self.rotation_center
    }

    /// Moves the pivot of the rotation.
    pub fn set_rotation_center(&mut self, center: T::Vec3) {
        self.rotation_center = center;
    }

    /// Post-multiplies `mat` by the rotation about the rotation center.
    pub fn apply_rotation(&self, mat: &mut T::Mat4) {
        *mat = *mat * self.pivot_rotation(T::vec3(T::ZERO, T::ZERO, T::ZERO));
    }

    /// `Translate(offset + center) * Rotate * Translate(-center)`.
    pub(crate) fn pivot_rotation(&self, offset: T::Vec3) -> T::Mat4 {
        T::mat4_from_translation(offset + self.rotation_center)
            * T::mat4_from_quat(self.rotation)
            * T::mat4_from_translation(-self.rotation_center)
    }

    /// Last cursor position seen during a drag, in window coordinates.
    pub fn cursor_position(&self) -> T::Vec2 {
        self.cursor_pos
    }

    /// Cursor movement of the last motion event, y growing upward.
    pub fn cursor_delta(&self) -> T::Vec2 {
        self.cursor_delta
    }

    /// Whether any drag channel is mouse-down.
    pub fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Channels currently mouse-down.
    pub fn active_channels(&self) -> Channels {
        self.active
    }

    /// Channel bindings.
    pub fn bindings(&self) -> &ControlBindings {
        &self.bindings
    }

    /// Mutable channel bindings.
    pub fn bindings_mut(&mut self) -> &mut ControlBindings {
        &mut self.bindings
    }

    /// Binds free rotation.
    pub fn set_gizmo_rot_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.bind(Channels::ROTATE, button, modifiers);
    }

    /// Binds rotation about X only.
    pub fn set_gizmo_rot_x_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.bind(Channels::ROTATE_X, button, modifiers);
    }

    /// Binds rotation about Y only.
    pub fn set_gizmo_rot_y_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.bind(Channels::ROTATE_Y, button, modifiers);
    }

    /// Binds rotation about Z only.
    pub fn set_gizmo_rot_z_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.bind(Channels::ROTATE_Z, button, modifiers);
    }

    /// Removes the binding of a single channel.
    pub fn unbind(&mut self, channel: Channels) {
        self.bindings.set(channel, None);
    }

    pub(crate) fn bind(&mut self, channel: Channels, button: ButtonId, modifiers: Modifiers) {
        self.bindings
            .set(channel, Some(Binding::new(button, modifiers)));
    }

    /// Sensitivity settings.
    pub fn settings(&self) -> &GizmoSettings<T> {
        &self.settings
    }

    /// Mutable sensitivity settings.
    pub fn settings_mut(&mut self) -> &mut GizmoSettings<T> {
        &mut self.settings
    }

    /// Multiplier on the arcball angle.
    pub fn rotation_scale(&self) -> T {
        self.settings.rotation_scale
    }

    /// Sets the multiplier on the arcball angle.
    pub fn set_rotation_scale(&mut self, scale: T) {
        self.settings.rotation_scale = scale;
    }

    /// Idle spin speed relative to the last drag step.
    pub fn idle_speed_ratio(&self) -> T {
        self.settings.idle_speed_ratio
    }

    /// Sets the idle spin speed relative to the last drag step.
    pub fn set_idle_speed_ratio(&mut self, ratio: T) {
        self.settings.idle_speed_ratio = ratio;
    }

    /// Frame-rate compensation multiplier.
    pub fn fps_ratio(&self) -> T {
        self.settings.fps_ratio
    }

    /// Sets the frame-rate compensation multiplier.
    pub fn set_fps_ratio(&mut self, ratio: T) {
        self.settings.fps_ratio = ratio;
    }

    /// Activates the channels among `candidates` bound to this press.
    pub(crate) fn press(
        &mut self,
        candidates: Channels,
        button: ButtonId,
        modifiers: Modifiers,
        x: T,
        y: T,
    ) -> Channels {
        let matched = self.bindings.pressed(candidates, button, modifiers);
        if matched.is_empty() {
            return matched;
        }
        self.active |= matched;
        self.refresh_rotation_mask();
        self.activate_mouse(x, y);
        debug!("trackball channels {:?} active", self.active);
        matched
    }

    /// Active channels among `candidates` that releasing `button` ends.
    pub(crate) fn releasing(&self, candidates: Channels, button: ButtonId) -> Channels {
        self.bindings.released(candidates & self.active, button)
    }

    /// Deactivates `released` after the caller's final update.
    pub(crate) fn finish_release(&mut self, released: Channels) {
        self.cursor_delta = T::vec2(T::ZERO, T::ZERO);
        self.active.remove(released);
        self.refresh_rotation_mask();
        debug!("trackball channels {:?} released", released);
    }

    pub(crate) fn has_no_delta(&self) -> bool {
        self.cursor_delta == T::vec2(T::ZERO, T::ZERO)
    }

    fn activate_mouse(&mut self, x: T, y: T) {
        self.cursor_pos = T::vec2(x, y);
        self.cursor_delta = T::vec2(T::ZERO, T::ZERO);
    }

    fn refresh_rotation_mask(&mut self) {
        self.rotation_mask = match self.active.constrained_axis() {
            Some(axis) => axis.mask::<T>(),
            None => T::vec3(T::ONE, T::ONE, T::ONE),
        };
    }

    /// Records a cursor move. Returns false when no channel is active.
    pub(crate) fn track_cursor(&mut self, x: T, y: T) -> bool {
        if self.active.is_empty() {
            return false;
        }
        let (px, py) = (T::vec2_x(self.cursor_pos), T::vec2_y(self.cursor_pos));
        self.cursor_delta = T::vec2(x - px, py - y);
        self.cursor_pos = T::vec2(x, y);
        true
    }

    fn update(&mut self) {
        if self.active.intersects(Channels::ROTATION) {
            self.update_primary();
        }
    }

    /// Arcball step of the last cursor move onto the primary rotation.
    pub(crate) fn update_primary(&mut self) {
        let step = self.cursor_step(self.rotation_mask);
        self.apply_primary_step(step);
    }

    /// Arcball step between the previous and the current cursor position.
    fn cursor_step(&mut self, mask: T::Vec3) -> Option<T::Quat> {
        let to = self.flip_y(self.cursor_pos);
        let from = to - self.cursor_delta;
        self.arcball_step(from, to, mask)
    }

    /// Step and idle rotations of the last cursor move, left unrecorded so
    /// another rotation can own them.
    pub(crate) fn cursor_rotations(&self, mask: T::Vec3) -> Option<(T::Quat, T::Quat)> {
        let to = self.flip_y(self.cursor_pos);
        let from = to - self.cursor_delta;
        self.arcball_rotations(from, to, mask)
    }

    fn apply_primary_step(&mut self, step: Option<T::Quat>) {
        if let Some(step) = step {
            self.rotation = T::quat_normalize(step * self.rotation);
        }
    }

    /// Computes the step and idle rotations between two y-up points, records
    /// them, and returns the step. Degenerate moves reset both to identity.
    pub(crate) fn arcball_step(
        &mut self,
        from: T::Vec2,
        to: T::Vec2,
        mask: T::Vec3,
    ) -> Option<T::Quat> {
        match self.arcball_rotations(from, to, mask) {
            Some((step, idle)) => {
                self.step_rotation = step;
                self.idle_rotation = idle;
                Some(step)
            }
            None => {
                self.step_rotation = T::quat_identity();
                self.idle_rotation = T::quat_identity();
                None
            }
        }
    }

    fn arcball_rotations(
        &self,
        from: T::Vec2,
        to: T::Vec2,
        mask: T::Vec3,
    ) -> Option<(T::Quat, T::Quat)> {
        let a = hemisphere_point::<T>(
            T::vec2_x(from),
            T::vec2_y(from),
            self.center_offset,
            self.min_dimension,
        );
        let b = hemisphere_point::<T>(
            T::vec2_x(to),
            T::vec2_y(to),
            self.center_offset,
            self.min_dimension,
        );
        let (axis, angle) = arcball_delta::<T>(a, b)?;
        let axis = axis * mask;
        if is_degenerate_axis::<T>(axis) {
            return None;
        }

        let angle = angle * self.settings.rotation_scale * self.settings.fps_ratio;
        let step = T::quat_normalize(T::quat_from_axis_angle(axis, angle));
        let idle = T::quat_normalize(T::quat_from_axis_angle(
            axis,
            angle * self.settings.idle_speed_ratio,
        ));
        if !T::quat_is_finite(step) || !T::quat_is_finite(idle) {
            warn!("discarding non-finite trackball step for angle {:?}", angle);
            return None;
        }
        trace!("trackball step axis {:?} angle {:?}", axis, angle);
        Some((step, idle))
    }

    fn flip_y(&self, p: T::Vec2) -> T::Vec2 {
        T::vec2(T::vec2_x(p), self.height - T::vec2_y(p))
    }
}
