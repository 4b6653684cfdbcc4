//! Full trackball: rotation, secondary rotation, pan and dolly.

use bevy::log::trace;

use crate::gizmo::GizmoBase;
use crate::math::GizmoFloat;
use crate::types::{ButtonId, Channels, ControlBindings, GizmoSettings, Modifiers};

/// Trackball with pan, dolly and an independent secondary rotation.
///
/// The secondary rotation (typically a light direction) uses the same arcball
/// math as the primary one but is driven by its own binding and keeps its own
/// step and idle rotations. Pan and dolly
/// accumulate into a single offset: `x`/`y` from pan drags, `z` from dolly
/// drags and the wheel.
#[derive(Debug, Clone)]
pub struct Gizmo3D<T: GizmoFloat = f32> {
    base: GizmoBase<T>,
    second_rotation: T::Quat,
    second_step_rotation: T::Quat,
    second_idle_rotation: T::Quat,
    pan_dolly: T::Vec3,
}

/// Single-precision trackball.
pub type Gizmo3Df = Gizmo3D<f32>;
/// Double-precision trackball.
pub type Gizmo3Dd = Gizmo3D<f64>;

impl<T: GizmoFloat> Default for Gizmo3D<T> {
    fn default() -> Self {
        Self::with_settings(GizmoSettings::default())
    }
}

impl<T: GizmoFloat> Gizmo3D<T> {
    /// Identity rotations, zero offset, default bindings and settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`Gizmo3D::new`] with explicit sensitivity settings.
    pub fn with_settings(settings: GizmoSettings<T>) -> Self {
        Self {
            base: GizmoBase::with_settings(settings),
            second_rotation: T::quat_identity(),
            second_step_rotation: T::quat_identity(),
            second_idle_rotation: T::quat_identity(),
            pan_dolly: T::vec3(T::ZERO, T::ZERO, T::ZERO),
        }
    }

    /// The rotation core.
    pub fn base(&self) -> &GizmoBase<T> {
        &self.base
    }

    /// Mutable rotation core.
    pub fn base_mut(&mut self) -> &mut GizmoBase<T> {
        &mut self.base
    }

    /// See [`GizmoBase::viewport_size`].
    pub fn viewport_size(&mut self, width: T, height: T) {
        self.base.viewport_size(width, height);
    }

    /// Current viewport `(width, height)`.
    pub fn viewport(&self) -> (T, T) {
        self.base.viewport()
    }

    /// Button event from the windowing layer, in window coordinates (y down).
    ///
    /// Every channel whose binding matches starts; overlapping bindings can
    /// start several channels from one press.
    pub fn mouse(&mut self, button: ButtonId, modifiers: Modifiers, pressed: bool, x: T, y: T) {
        if pressed {
            self.base.press(Channels::all(), button, modifiers, x, y);
        } else {
            let released = self.base.releasing(Channels::all(), button);
            if released.is_empty() {
                return;
            }
            if self.base.has_no_delta() {
                self.update(T::ZERO);
            }
            self.base.finish_release(released);
        }
    }

    /// Cursor event from the windowing layer, in window coordinates (y down).
    ///
    /// `pov_distance`, when positive, scales pan and dolly so their speed
    /// follows the camera distance. Pass zero otherwise.
    pub fn motion(&mut self, x: T, y: T, pov_distance: T) {
        if self.base.track_cursor(x, y) {
            self.update(pov_distance);
        }
    }

    /// Wheel event. Only the vertical component dollies.
    pub fn wheel(&mut self, _dx: T, dy: T, pov_distance: T) {
        let settings = self.base.settings();
        let dz = dy * settings.dolly_scale * settings.wheel_scale * distance_factor(pov_distance);
        self.pan_dolly = self.pan_dolly + T::vec3(T::ZERO, T::ZERO, dz);
    }

    fn update(&mut self, pov_distance: T) {
        let active = self.base.active_channels();
        if active.intersects(Channels::ROTATION) {
            self.base.update_primary();
        }
        if active.contains(Channels::SECOND_ROTATE) {
            let all_axes = T::vec3(T::ONE, T::ONE, T::ONE);
            match self.base.cursor_rotations(all_axes) {
                Some((step, idle)) => {
                    self.second_step_rotation = step;
                    self.second_idle_rotation = idle;
                    self.second_rotation = T::quat_normalize(step * self.second_rotation);
                }
                None => {
                    self.second_step_rotation = T::quat_identity();
                    self.second_idle_rotation = T::quat_identity();
                }
            }
        }

        let delta = self.base.cursor_delta();
        let (dx, dy) = (T::vec2_x(delta), T::vec2_y(delta));
        let factor = distance_factor(pov_distance);
        let settings = *self.base.settings();
        if active.contains(Channels::PAN) {
            let scale = settings.pan_scale * factor;
            self.pan_dolly = self.pan_dolly + T::vec3(dx * scale, dy * scale, T::ZERO);
        }
        if active.contains(Channels::DOLLY) {
            let dz = dy * settings.dolly_scale * factor;
            self.pan_dolly = self.pan_dolly - T::vec3(T::ZERO, T::ZERO, dz);
        }
        trace!("trackball offset {:?}", self.pan_dolly);
    }

    /// See [`GizmoBase::idle`].
    pub fn idle(&mut self) {
        self.base.idle();
    }

    /// Applies the secondary idle rotation, left by the last secondary drag,
    /// to the secondary rotation.
    pub fn idle_second(&mut self) {
        let idle = self.second_idle_rotation;
        if idle == T::quat_identity() {
            return;
        }
        self.second_rotation = T::quat_normalize(idle * self.second_rotation);
    }

    /// See [`GizmoBase::motion_immediate`].
    pub fn motion_immediate(&mut self, dx: T, dy: T) {
        self.base.motion_immediate(dx, dy);
    }

    /// See [`GizmoBase::motion_immediate_left_right`].
    pub fn motion_immediate_left_right(&mut self, dx: T) {
        self.base.motion_immediate_left_right(dx);
    }

    /// See [`GizmoBase::motion_immediate_up_down`].
    pub fn motion_immediate_up_down(&mut self, dy: T) {
        self.base.motion_immediate_up_down(dy);
    }

    /// Current primary rotation.
    pub fn rotation(&self) -> T::Quat {
        self.base.rotation()
    }

    /// Mutable access to the primary rotation. The caller keeps it unit length.
    pub fn rotation_mut(&mut self) -> &mut T::Quat {
        self.base.rotation_mut()
    }

    /// Overwrites the primary rotation. `rotation` must be unit length.
    pub fn set_rotation(&mut self, rotation: T::Quat) {
        self.base.set_rotation(rotation);
    }

    /// Current secondary rotation.
    pub fn second_rotation(&self) -> T::Quat {
        self.second_rotation
    }

    /// Mutable access to the secondary rotation. The caller keeps it unit length.
    pub fn second_rotation_mut(&mut self) -> &mut T::Quat {
        &mut self.second_rotation
    }

    /// Overwrites the secondary rotation. `rotation` must be unit length.
    pub fn set_second_rotation(&mut self, rotation: T::Quat) {
        self.second_rotation = rotation;
    }

    /// Accumulated pan (`x`, `y`) and dolly (`z`) offset.
    pub fn position(&self) -> T::Vec3 {
        self.pan_dolly
    }

    /// Overwrites the pan/dolly offset.
    pub fn set_position(&mut self, position: T::Vec3) {
        self.pan_dolly = position;
    }

    /// Pan part of the offset.
    pub fn pan_position(&self) -> T::Vec2 {
        T::vec2(T::vec3_x(self.pan_dolly), T::vec3_y(self.pan_dolly))
    }

    /// Overwrites the pan part of the offset, keeping the dolly.
    pub fn set_pan_position(&mut self, pan: T::Vec2) {
        self.pan_dolly = T::vec3(T::vec2_x(pan), T::vec2_y(pan), T::vec3_z(self.pan_dolly));
    }

    /// Dolly part of the offset.
    pub fn dolly_position(&self) -> T {
        T::vec3_z(self.pan_dolly)
    }

    /// Overwrites the dolly part of the offset, keeping the pan.
    pub fn set_dolly_position(&mut self, dolly: T) {
        self.pan_dolly = T::vec3(T::vec3_x(self.pan_dolly), T::vec3_y(self.pan_dolly), dolly);
    }

    /// Pivot of the rotation.
    pub fn rotation_center(&self) -> T::Vec3 {
        self.base.rotation_center()
    }

    /// Moves the pivot of the rotation.
    pub fn set_rotation_center(&mut self, center: T::Vec3) {
        self.base.set_rotation_center(center);
    }

    /// Model transform: rotation about the rotation center, then the pan/dolly
    /// offset. The rotation center stays a fixed point of the rotation while
    /// pan and dolly move the whole result.
    pub fn get_transform(&self) -> T::Mat4 {
        self.base.pivot_rotation(self.pan_dolly)
    }

    /// Post-multiplies `mat` by [`Gizmo3D::get_transform`].
    pub fn apply_transform(&self, mat: &mut T::Mat4) {
        *mat = *mat * self.get_transform();
    }

    /// See [`GizmoBase::apply_rotation`].
    pub fn apply_rotation(&self, mat: &mut T::Mat4) {
        self.base.apply_rotation(mat);
    }

    /// Rotation computed from the most recent drag step.
    pub fn step_rotation(&self) -> T::Quat {
        self.base.step_rotation()
    }

    /// Rotation applied by each idle call.
    pub fn idle_rotation(&self) -> T::Quat {
        self.base.idle_rotation()
    }

    /// See [`GizmoBase::stop_idle`].
    pub fn stop_idle(&mut self) {
        self.base.stop_idle();
    }

    /// Rotation computed from the most recent secondary drag step.
    pub fn second_step_rotation(&self) -> T::Quat {
        self.second_step_rotation
    }

    /// Rotation applied by each [`Gizmo3D::idle_second`] call.
    pub fn second_idle_rotation(&self) -> T::Quat {
        self.second_idle_rotation
    }

    /// Clears the secondary idle rotation.
    pub fn stop_idle_second(&mut self) {
        self.second_idle_rotation = T::quat_identity();
    }

    /// Last cursor position seen during a drag, in window coordinates.
    pub fn cursor_position(&self) -> T::Vec2 {
        self.base.cursor_position()
    }

    /// Whether any drag channel is mouse-down.
    pub fn is_active(&self) -> bool {
        self.base.is_active()
    }

    /// Channels currently mouse-down.
    pub fn active_channels(&self) -> Channels {
        self.base.active_channels()
    }

    /// Back to identity rotations and zero offset, with no active channel.
    /// Bindings, settings, viewport and rotation center are kept.
    pub fn reset(&mut self) {
        let active = self.base.active_channels();
        if !active.is_empty() {
            self.base.finish_release(active);
        }
        self.base.set_rotation(T::quat_identity());
        self.base.stop_idle();
        self.second_rotation = T::quat_identity();
        self.second_step_rotation = T::quat_identity();
        self.second_idle_rotation = T::quat_identity();
        self.pan_dolly = T::vec3(T::ZERO, T::ZERO, T::ZERO);
    }

    /// Channel bindings.
    pub fn bindings(&self) -> &ControlBindings {
        self.base.bindings()
    }

    /// Mutable channel bindings.
    pub fn bindings_mut(&mut self) -> &mut ControlBindings {
        self.base.bindings_mut()
    }

    /// Binds free rotation.
    pub fn set_gizmo_rot_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.base.set_gizmo_rot_control(button, modifiers);
    }

    /// Binds rotation about X only.
    pub fn set_gizmo_rot_x_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.base.set_gizmo_rot_x_control(button, modifiers);
    }

    /// Binds rotation about Y only.
    pub fn set_gizmo_rot_y_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.base.set_gizmo_rot_y_control(button, modifiers);
    }

    /// Binds rotation about Z only.
    pub fn set_gizmo_rot_z_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.base.set_gizmo_rot_z_control(button, modifiers);
    }

    /// Binds the secondary rotation.
    pub fn set_gizmo_second_rot_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.base.bind(Channels::SECOND_ROTATE, button, modifiers);
    }

    /// Binds dolly.
    pub fn set_dolly_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.base.bind(Channels::DOLLY, button, modifiers);
    }

    /// Binds pan.
    pub fn set_pan_control(&mut self, button: ButtonId, modifiers: Modifiers) {
        self.base.bind(Channels::PAN, button, modifiers);
    }

    /// Removes the binding of a single channel.
    pub fn unbind(&mut self, channel: Channels) {
        self.base.unbind(channel);
    }

    /// Sensitivity settings.
    pub fn settings(&self) -> &GizmoSettings<T> {
        self.base.settings()
    }

    /// Mutable sensitivity settings.
    pub fn settings_mut(&mut self) -> &mut GizmoSettings<T> {
        self.base.settings_mut()
    }

    /// World units of pan per pixel of drag.
    pub fn pan_scale(&self) -> T {
        self.settings().pan_scale
    }

    /// Sets the pan speed.
    pub fn set_pan_scale(&mut self, scale: T) {
        self.settings_mut().pan_scale = scale;
    }

    /// World units of dolly per pixel of drag.
    pub fn dolly_scale(&self) -> T {
        self.settings().dolly_scale
    }

    /// Sets the dolly speed.
    pub fn set_dolly_scale(&mut self, scale: T) {
        self.settings_mut().dolly_scale = scale;
    }

    /// Wheel multiplier on top of the dolly speed.
    pub fn wheel_scale(&self) -> T {
        self.settings().wheel_scale
    }

    /// Sets the wheel multiplier.
    pub fn set_wheel_scale(&mut self, scale: T) {
        self.settings_mut().wheel_scale = scale;
    }
}

fn distance_factor<T: GizmoFloat>(pov_distance: T) -> T {
    if pov_distance > T::ZERO {
        pov_distance
    } else {
        T::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bevy::math::{Mat4, Quat, Vec2, Vec3};

    const EPSILON: f32 = 1e-5;

    fn gizmo() -> Gizmo3D<f32> {
        let mut gizmo = Gizmo3D::new();
        gizmo.viewport_size(800.0, 600.0);
        gizmo
    }

    #[test]
    fn pan_follows_drag_with_y_up() {
        let mut gizmo = gizmo();
        gizmo.mouse(ButtonId::MIDDLE, Modifiers::NONE, true, 100.0, 100.0);
        gizmo.motion(130.0, 80.0, 0.0);
        let p = gizmo.position();
        assert_abs_diff_eq!(p.x, 30.0 * 0.01, epsilon = EPSILON);
        assert_abs_diff_eq!(p.y, 20.0 * 0.01, epsilon = EPSILON);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = EPSILON);
        assert_eq!(gizmo.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn dolly_drag_moves_z_only() {
        let mut gizmo = gizmo();
        gizmo.mouse(ButtonId::RIGHT, Modifiers::NONE, true, 100.0, 100.0);
        gizmo.motion(140.0, 60.0, 0.0);
        let p = gizmo.position();
        assert_abs_diff_eq!(p.x, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(p.z, -40.0 * 0.01, epsilon = EPSILON);
    }

    #[test]
    fn distance_hint_scales_pan_and_dolly() {
        let mut gizmo = gizmo();
        gizmo.mouse(ButtonId::MIDDLE, Modifiers::NONE, true, 0.0, 0.0);
        gizmo.motion(10.0, 0.0, 4.0);
        assert_abs_diff_eq!(gizmo.position().x, 10.0 * 0.01 * 4.0, epsilon = EPSILON);

        gizmo.wheel(0.0, 2.0, 0.0);
        assert_abs_diff_eq!(gizmo.dolly_position(), 2.0 * 0.01 * 5.0, epsilon = EPSILON);
        gizmo.wheel(3.0, 2.0, 10.0);
        assert_abs_diff_eq!(
            gizmo.dolly_position(),
            0.1 + 2.0 * 0.01 * 5.0 * 10.0,
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(gizmo.position().x, 0.4, epsilon = EPSILON);
    }

    #[test]
    fn wheel_ignores_button_state() {
        let mut gizmo = gizmo();
        gizmo.wheel(0.0, -1.0, 0.0);
        assert!(!gizmo.is_active());
        assert_abs_diff_eq!(gizmo.dolly_position(), -0.05, epsilon = EPSILON);
    }

    #[test]
    fn secondary_rotation_is_independent() {
        let mut gizmo = gizmo();
        gizmo.unbind(Channels::DOLLY);
        gizmo.set_gizmo_second_rot_control(ButtonId::RIGHT, Modifiers::NONE);
        gizmo.mouse(ButtonId::RIGHT, Modifiers::NONE, true, 400.0, 300.0);
        gizmo.motion(480.0, 300.0, 0.0);
        gizmo.mouse(ButtonId::RIGHT, Modifiers::NONE, false, 480.0, 300.0);

        assert_eq!(gizmo.rotation(), Quat::IDENTITY);
        let (axis, angle) = gizmo.second_rotation().to_axis_angle();
        assert_abs_diff_eq!(axis.y, 1.0, epsilon = EPSILON);
        assert!(angle > 0.0);
        assert_eq!(gizmo.position(), Vec3::ZERO);

        let before = gizmo.second_rotation();
        gizmo.idle_second();
        assert_ne!(gizmo.second_rotation(), before);
        assert_eq!(gizmo.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn secondary_flick_does_not_spin_primary() {
        let mut gizmo = gizmo();
        gizmo.unbind(Channels::DOLLY);
        gizmo.set_gizmo_second_rot_control(ButtonId::RIGHT, Modifiers::NONE);
        gizmo.mouse(ButtonId::RIGHT, Modifiers::NONE, true, 400.0, 300.0);
        gizmo.motion(440.0, 300.0, 0.0);
        gizmo.mouse(ButtonId::RIGHT, Modifiers::NONE, false, 440.0, 300.0);

        assert_eq!(gizmo.idle_rotation(), Quat::IDENTITY);
        assert_eq!(gizmo.step_rotation(), Quat::IDENTITY);
        assert_ne!(gizmo.second_idle_rotation(), Quat::IDENTITY);
        gizmo.idle();
        assert_eq!(gizmo.rotation(), Quat::IDENTITY);

        gizmo.stop_idle_second();
        let second = gizmo.second_rotation();
        gizmo.idle_second();
        assert_eq!(gizmo.second_rotation(), second);
    }

    #[test]
    fn primary_flick_does_not_spin_secondary() {
        let mut gizmo = gizmo();
        gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, true, 400.0, 300.0);
        gizmo.motion(440.0, 300.0, 0.0);
        gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, false, 440.0, 300.0);

        assert_ne!(gizmo.idle_rotation(), Quat::IDENTITY);
        gizmo.idle_second();
        assert_eq!(gizmo.second_rotation(), Quat::IDENTITY);
    }

    #[test]
    fn alt_or_super_starts_z_rotation() {
        let mut gizmo = gizmo();
        gizmo.unbind(Channels::ROTATE);
        gizmo.unbind(Channels::ROTATE_X);
        gizmo.unbind(Channels::ROTATE_Y);

        for held in [Modifiers::ALT, Modifiers::SUPER, Modifiers::ALT | Modifiers::SUPER] {
            gizmo.mouse(ButtonId::LEFT, held, true, 400.0, 300.0);
            assert_eq!(gizmo.active_channels(), Channels::ROTATE_Z, "held {held:?}");
            gizmo.mouse(ButtonId::LEFT, held, false, 400.0, 300.0);
            assert!(!gizmo.is_active());
        }
        for held in [Modifiers::NONE, Modifiers::SHIFT] {
            gizmo.mouse(ButtonId::LEFT, held, true, 400.0, 300.0);
            assert!(gizmo.active_channels().is_empty(), "held {held:?}");
        }
    }

    #[test]
    fn reset_while_idle_stops_both_spins() {
        let mut gizmo = gizmo();
        gizmo.unbind(Channels::DOLLY);
        gizmo.set_gizmo_second_rot_control(ButtonId::RIGHT, Modifiers::NONE);
        for button in [ButtonId::LEFT, ButtonId::RIGHT] {
            gizmo.mouse(button, Modifiers::NONE, true, 400.0, 300.0);
            gizmo.motion(430.0, 320.0, 0.0);
            gizmo.mouse(button, Modifiers::NONE, false, 430.0, 320.0);
        }
        assert!(!gizmo.is_active());

        gizmo.reset();
        assert!(gizmo.active_channels().is_empty());
        assert_eq!(gizmo.idle_rotation(), Quat::IDENTITY);
        assert_eq!(gizmo.second_idle_rotation(), Quat::IDENTITY);
        gizmo.idle();
        gizmo.idle_second();
        assert_eq!(gizmo.rotation(), Quat::IDENTITY);
        assert_eq!(gizmo.second_rotation(), Quat::IDENTITY);
    }

    #[test]
    fn rotate_and_dolly_can_run_together() {
        let mut gizmo = gizmo();
        gizmo.set_dolly_control(ButtonId::LEFT, Modifiers::SHIFT);
        gizmo.unbind(Channels::ROTATE_X);
        gizmo.mouse(ButtonId::LEFT, Modifiers::SHIFT, true, 400.0, 300.0);
        assert_eq!(gizmo.active_channels(), Channels::ROTATE | Channels::DOLLY);

        gizmo.motion(430.0, 250.0, 0.0);
        assert_ne!(gizmo.rotation(), Quat::IDENTITY);
        assert_abs_diff_eq!(gizmo.dolly_position(), -50.0 * 0.01, epsilon = EPSILON);

        gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, false, 430.0, 250.0);
        assert!(!gizmo.is_active());
    }

    #[test]
    fn rotation_center_is_fixed_and_pan_shifts_everything() {
        let mut gizmo = gizmo();
        let center = Vec3::new(1.0, 0.0, 0.0);
        gizmo.set_rotation_center(center);

        gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, true, 400.0, 300.0);
        gizmo.motion(520.0, 240.0, 0.0);
        gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, false, 520.0, 240.0);
        assert_ne!(gizmo.rotation(), Quat::IDENTITY);

        let other = Vec3::new(-2.0, 0.5, 3.0);
        let rotated = gizmo.get_transform();
        assert!(rotated.transform_point3(center).abs_diff_eq(center, EPSILON));
        let other_rotated = rotated.transform_point3(other);

        gizmo.mouse(ButtonId::MIDDLE, Modifiers::NONE, true, 200.0, 200.0);
        gizmo.motion(260.0, 170.0, 0.0);
        let pan = gizmo.position();
        assert!(pan.length() > 0.0);

        let panned = gizmo.get_transform();
        assert!(panned
            .transform_point3(center)
            .abs_diff_eq(center + pan, EPSILON));
        assert!(panned
            .transform_point3(other)
            .abs_diff_eq(other_rotated + pan, EPSILON));
    }

    #[test]
    fn apply_transform_post_multiplies() {
        let mut gizmo = gizmo();
        gizmo.set_rotation(Quat::from_rotation_y(0.8));
        gizmo.set_position(Vec3::new(0.5, -1.0, 2.0));
        gizmo.set_rotation_center(Vec3::new(0.0, 1.0, 0.0));

        let model = Mat4::from_scale(Vec3::splat(2.0));
        let mut applied = model;
        gizmo.apply_transform(&mut applied);
        assert!(applied.abs_diff_eq(model * gizmo.get_transform(), EPSILON));
    }

    #[test]
    fn pan_and_dolly_positions_are_split_views() {
        let mut gizmo = gizmo();
        gizmo.set_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(gizmo.pan_position(), Vec2::new(1.0, 2.0));
        assert_eq!(gizmo.dolly_position(), 3.0);

        gizmo.set_pan_position(Vec2::new(-1.0, -2.0));
        gizmo.set_dolly_position(7.0);
        assert_eq!(gizmo.position(), Vec3::new(-1.0, -2.0, 7.0));
    }

    #[test]
    fn reset_keeps_configuration() {
        let mut gizmo = gizmo();
        gizmo.set_pan_scale(0.5);
        gizmo.set_rotation_center(Vec3::Y);
        gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, true, 400.0, 300.0);
        gizmo.motion(450.0, 300.0, 0.0);
        gizmo.wheel(0.0, 1.0, 0.0);

        gizmo.reset();
        assert!(!gizmo.is_active());
        assert_eq!(gizmo.rotation(), Quat::IDENTITY);
        assert_eq!(gizmo.idle_rotation(), Quat::IDENTITY);
        assert_eq!(gizmo.position(), Vec3::ZERO);
        assert_eq!(gizmo.pan_scale(), 0.5);
        assert_eq!(gizmo.rotation_center(), Vec3::Y);
        assert_eq!(gizmo.viewport(), (800.0, 600.0));
    }

    #[test]
    fn end_to_end_center_drag() {
        let mut gizmo = gizmo();
        gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, true, 400.0, 300.0);
        gizmo.motion(500.0, 300.0, 0.0);
        let (axis, angle) = gizmo.step_rotation().to_axis_angle();
        assert!(axis.abs_diff_eq(Vec3::Y, 1e-4), "axis was {axis:?}");
        assert!(angle > 0.0);

        gizmo.motion(500.0, 300.0, 0.0);
        gizmo.mouse(ButtonId::LEFT, Modifiers::NONE, false, 500.0, 300.0);
        assert_eq!(gizmo.idle_rotation(), Quat::IDENTITY);
        let rotation = gizmo.rotation();
        gizmo.idle();
        assert_eq!(gizmo.rotation(), rotation);
    }
}
