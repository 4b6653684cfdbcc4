//! Scalar abstraction and arcball projection math.
//!
//! The trackball is generic over its scalar precision. [`GizmoFloat`] binds a
//! scalar (`f32` or `f64`) to the matching vector, quaternion and matrix types
//! from `bevy::math`, and exposes the handful of operations the trackball
//! needs as named functions.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use bevy::math::{DMat4, DQuat, DVec2, DVec3, Mat4, Quat, Vec2, Vec3};

/// Squared length below which a rotation axis is treated as degenerate.
const DEGENERATE_AXIS_EPSILON: f64 = 1e-12;

/// Scalar type usable by the trackball, together with its math types.
pub trait GizmoFloat:
    Copy
    + Debug
    + Default
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
{
    /// Two-component vector.
    type Vec2: Copy
        + Debug
        + PartialEq
        + Send
        + Sync
        + 'static
        + Add<Output = Self::Vec2>
        + Sub<Output = Self::Vec2>;
    /// Three-component vector.
    type Vec3: Copy
        + Debug
        + PartialEq
        + Send
        + Sync
        + 'static
        + Add<Output = Self::Vec3>
        + Sub<Output = Self::Vec3>
        + Mul<Output = Self::Vec3>
        + Mul<Self, Output = Self::Vec3>
        + Neg<Output = Self::Vec3>;
    /// Rotation quaternion.
    type Quat: Copy
        + Debug
        + PartialEq
        + Send
        + Sync
        + 'static
        + Mul<Output = Self::Quat>
        + Mul<Self::Vec3, Output = Self::Vec3>;
    /// 4x4 column-major matrix.
    type Mat4: Copy + Debug + PartialEq + Send + Sync + 'static + Mul<Output = Self::Mat4>;

    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// One half.
    const HALF: Self;
    /// Two.
    const TWO: Self;

    /// Converts from `f64`, rounding when narrowing.
    fn from_f64(value: f64) -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Arc cosine, in radians.
    fn acos(self) -> Self;
    /// `self` raised to `exponent`.
    fn powf(self, exponent: Self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Smaller of two values.
    fn min(self, other: Self) -> Self;
    /// Restricts to `[lo, hi]`.
    fn clamp(self, lo: Self, hi: Self) -> Self;
    /// Neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Builds a two-component vector.
    fn vec2(x: Self, y: Self) -> Self::Vec2;
    /// X component of a two-component vector.
    fn vec2_x(v: Self::Vec2) -> Self;
    /// Y component of a two-component vector.
    fn vec2_y(v: Self::Vec2) -> Self;

    /// Builds a three-component vector.
    fn vec3(x: Self, y: Self, z: Self) -> Self::Vec3;
    /// X component.
    fn vec3_x(v: Self::Vec3) -> Self;
    /// Y component.
    fn vec3_y(v: Self::Vec3) -> Self;
    /// Z component.
    fn vec3_z(v: Self::Vec3) -> Self;
    /// Dot product.
    fn dot(a: Self::Vec3, b: Self::Vec3) -> Self;
    /// Cross product.
    fn cross(a: Self::Vec3, b: Self::Vec3) -> Self::Vec3;
    /// Squared length.
    fn length_squared(v: Self::Vec3) -> Self;
    /// Unit vector in the direction of `v`, or zero when `v` has no direction.
    fn normalize_or_zero(v: Self::Vec3) -> Self::Vec3;

    /// The identity rotation.
    fn quat_identity() -> Self::Quat;
    /// Builds `(axis * sin(angle / 2), cos(angle / 2))` without normalizing `axis`.
    fn quat_from_axis_angle(axis: Self::Vec3, angle: Self) -> Self::Quat;
    /// Scales `q` to unit length.
    fn quat_normalize(q: Self::Quat) -> Self::Quat;
    /// Whether every component of `q` is finite.
    fn quat_is_finite(q: Self::Quat) -> bool;

    /// Translation matrix.
    fn mat4_from_translation(v: Self::Vec3) -> Self::Mat4;
    /// Rotation matrix of a unit quaternion.
    fn mat4_from_quat(q: Self::Quat) -> Self::Mat4;
}

macro_rules! impl_gizmo_float {
    ($t:ty, $v2:ty, $v3:ty, $q:ty, $m4:ty) => {
        impl GizmoFloat for $t {
            type Vec2 = $v2;
            type Vec3 = $v3;
            type Quat = $q;
            type Mat4 = $m4;

            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const HALF: Self = 0.5;
            const TWO: Self = 2.0;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }
            #[inline]
            fn acos(self) -> Self {
                <$t>::acos(self)
            }
            #[inline]
            fn powf(self, exponent: Self) -> Self {
                <$t>::powf(self, exponent)
            }
            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }
            #[inline]
            fn min(self, other: Self) -> Self {
                <$t>::min(self, other)
            }
            #[inline]
            fn clamp(self, lo: Self, hi: Self) -> Self {
                <$t>::clamp(self, lo, hi)
            }
            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            #[inline]
            fn vec2(x: Self, y: Self) -> $v2 {
                <$v2>::new(x, y)
            }
            #[inline]
            fn vec2_x(v: $v2) -> Self {
                v.x
            }
            #[inline]
            fn vec2_y(v: $v2) -> Self {
                v.y
            }

            #[inline]
            fn vec3(x: Self, y: Self, z: Self) -> $v3 {
                <$v3>::new(x, y, z)
            }
            #[inline]
            fn vec3_x(v: $v3) -> Self {
                v.x
            }
            #[inline]
            fn vec3_y(v: $v3) -> Self {
                v.y
            }
            #[inline]
            fn vec3_z(v: $v3) -> Self {
                v.z
            }
            #[inline]
            fn dot(a: $v3, b: $v3) -> Self {
                a.dot(b)
            }
            #[inline]
            fn cross(a: $v3, b: $v3) -> $v3 {
                a.cross(b)
            }
            #[inline]
            fn length_squared(v: $v3) -> Self {
                v.length_squared()
            }
            #[inline]
            fn normalize_or_zero(v: $v3) -> $v3 {
                v.normalize_or_zero()
            }

            #[inline]
            fn quat_identity() -> $q {
                <$q>::IDENTITY
            }
            #[inline]
            fn quat_from_axis_angle(axis: $v3, angle: Self) -> $q {
                let (s, c) = (angle * 0.5).sin_cos();
                let v = axis * s;
                <$q>::from_xyzw(v.x, v.y, v.z, c)
            }
            #[inline]
            fn quat_normalize(q: $q) -> $q {
                q.normalize()
            }
            #[inline]
            fn quat_is_finite(q: $q) -> bool {
                q.is_finite()
            }

            #[inline]
            fn mat4_from_translation(v: $v3) -> $m4 {
                <$m4>::from_translation(v)
            }
            #[inline]
            fn mat4_from_quat(q: $q) -> $m4 {
                <$m4>::from_quat(q)
            }
        }
    };
}

impl_gizmo_float!(f32, Vec2, Vec3, Quat, Mat4);
impl_gizmo_float!(f64, DVec2, DVec3, DQuat, DMat4);

/// Projects a viewport point onto the trackball hemisphere.
///
/// `x` and `y` are in the y-up convention. The point is centered on `center`
/// and divided by `min_dimension`, then lifted to `z = 2^(-0.5 * len)`, where
/// `len` is its planar distance from the center. Unlike the square-root
/// hemisphere this never leaves its domain, so points outside the unit disc
/// still map to a well-defined direction.
pub fn hemisphere_point<T: GizmoFloat>(x: T, y: T, center: T::Vec2, min_dimension: T) -> T::Vec3 {
    let scale = if min_dimension > T::ZERO {
        min_dimension
    } else {
        T::ONE
    };
    let u = (x - T::vec2_x(center)) / scale;
    let v = (y - T::vec2_y(center)) / scale;
    let len = (u * u + v * v).sqrt();
    let z = if len > T::ZERO {
        T::TWO.powf(-T::HALF * len)
    } else {
        T::ONE
    };
    T::normalize_or_zero(T::vec3(u, v, z))
}

/// Rotation carrying hemisphere point `from` onto `to`, as `(unit axis, angle)`.
///
/// Returns `None` when the two points coincide (or are antiparallel) and the
/// cross product has no usable direction.
pub fn arcball_delta<T: GizmoFloat>(from: T::Vec3, to: T::Vec3) -> Option<(T::Vec3, T)> {
    let axis = T::cross(from, to);
    // Written as a negated comparison so NaN lands in the degenerate branch.
    if !(T::length_squared(axis) > T::from_f64(DEGENERATE_AXIS_EPSILON)) {
        return None;
    }
    let angle = T::dot(from, to).clamp(-T::ONE, T::ONE).acos();
    Some((T::normalize_or_zero(axis), angle))
}

/// Whether the squared length of `v` is too small to serve as a rotation axis.
pub(crate) fn is_degenerate_axis<T: GizmoFloat>(v: T::Vec3) -> bool {
    !(T::length_squared(v) > T::from_f64(DEGENERATE_AXIS_EPSILON))
}

/// Build an orthonormal basis (t1, t2) in the plane perpendicular to `axis`.
pub fn axis_basis(axis: Vec3) -> (Vec3, Vec3) {
    let axis = axis.normalize_or_zero();
    if axis.length_squared() < 1e-6 {
        return (Vec3::X, Vec3::Y);
    }

    // Pick a helper vector that is not parallel to axis.
    let helper = if axis.abs().dot(Vec3::Y) < 0.9 {
        Vec3::Y
    } else {
        Vec3::X
    };

    let t1 = axis.cross(helper).normalize_or_zero();
    let t2 = axis.cross(t1).normalize_or_zero();
    (t1, t2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn center_maps_to_pole() {
        let p = hemisphere_point::<f32>(400.0, 300.0, Vec2::new(400.0, 300.0), 300.0);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(p.z, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn hemisphere_height_follows_exponential_falloff() {
        // One min-dimension to the right: len = 1, z = 2^-0.5 before normalizing.
        let p = hemisphere_point::<f64>(700.0, 300.0, DVec2::new(400.0, 300.0), 300.0);
        let z = 2f64.powf(-0.5);
        let n = (1.0 + z * z).sqrt();
        assert!((p.x - 1.0 / n).abs() < 1e-12);
        assert!((p.z - z / n).abs() < 1e-12);
    }

    #[test]
    fn far_points_stay_finite() {
        let p = hemisphere_point::<f32>(1.0e6, -1.0e6, Vec2::ZERO, 1.0);
        assert!(p.is_finite());
        assert_abs_diff_eq!(p.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn zero_min_dimension_does_not_divide_by_zero() {
        let p = hemisphere_point::<f32>(10.0, 5.0, Vec2::ZERO, 0.0);
        assert!(p.is_finite());
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let p = hemisphere_point::<f32>(120.0, 80.0, Vec2::new(100.0, 100.0), 100.0);
        assert!(arcball_delta::<f32>(p, p).is_none());
    }

    #[test]
    fn horizontal_drag_rotates_about_y() {
        let center = Vec2::new(400.0, 300.0);
        let a = hemisphere_point::<f32>(400.0, 300.0, center, 300.0);
        let b = hemisphere_point::<f32>(500.0, 300.0, center, 300.0);
        let (axis, angle) = arcball_delta::<f32>(a, b).expect("non-degenerate drag");
        assert_abs_diff_eq!(axis.y, 1.0, epsilon = EPSILON);
        assert!(angle > 0.0);
    }

    #[test]
    fn axis_angle_quat_keeps_unnormalized_axis() {
        // A short axis shrinks the effective angle once normalized.
        let q = <f32 as GizmoFloat>::quat_from_axis_angle(Vec3::new(0.5, 0.0, 0.0), 1.0);
        assert!(q.length() < 1.0);
        let (axis, angle) = q.normalize().to_axis_angle();
        assert_abs_diff_eq!(axis.x, 1.0, epsilon = EPSILON);
        assert!(angle < 1.0);
    }

    #[test]
    fn axis_basis_is_orthonormal() {
        for axis in [Vec3::X, Vec3::Y, Vec3::new(1.0, 2.0, 3.0)] {
            let (t1, t2) = axis_basis(axis);
            assert_abs_diff_eq!(t1.dot(axis.normalize()), 0.0, epsilon = EPSILON);
            assert_abs_diff_eq!(t2.dot(axis.normalize()), 0.0, epsilon = EPSILON);
            assert_abs_diff_eq!(t1.dot(t2), 0.0, epsilon = EPSILON);
        }
    }
}
