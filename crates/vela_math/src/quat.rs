use core::ops::*;
use std::fmt::Display;
use crate::*;

#[cfg(feature = "validation")]
use vela_logging::{log_warning, LogCategory};

#[cfg(feature = "validation")]
const LOG_CAT : LogCategory = LogCategory::new_with_sub("Math", "Quat");

/// When the absolute dot product of 2 quaternions is larger than this, slerp falls back to a linear blend
const SLERP_LINEAR_THRESHOLD : f32 = 0.9995;

/// Quaternion, `x`, `y` and `z` form the imaginary part and `w` the real part.
///
/// Quaternions are not normalized on construction, only unit quaternions represent rotations.
/// Quaternions are composed like matrices: `p * q` applies the rotation of `q` first, then the rotation of `p`.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Quat<T: Real> {
    pub x : T,
    pub y : T,
    pub z : T,
    pub w : T,
}

#[allow(non_camel_case_types)] pub type f32quat = Quat<f32>;
#[allow(non_camel_case_types)] pub type f64quat = Quat<f64>;

impl<T: Real> Quat<T> {
    /// Create a new quaternion
    #[inline(always)]
    #[must_use]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// Create an identity quaternion
    #[inline]
    #[must_use]
    pub fn identity() -> Self {
        let zero = T::zero();
        Self { x: zero, y: zero, z: zero, w: T::one() }
    }

    /// Create a new quaternion from an `imaginary` and `real` part
    #[inline]
    #[must_use]
    pub fn from_parts(imaginary: Vec3<T>, real: T) -> Self {
        Self { x: imaginary.x(), y: imaginary.y(), z: imaginary.z(), w: real }
    }

    /// Get the quaternion as an array, in the order x, y, z, w
    #[inline]
    #[must_use]
    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Get the real part of the quaternion
    #[inline(always)]
    #[must_use]
    pub fn real(self) -> T {
        self.w
    }

    /// Get the imaginary part of the quaternion
    #[inline(always)]
    #[must_use]
    pub fn imaginary(self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Calculate the squared norm of the quaternion
    #[inline]
    #[must_use]
    pub fn norm_sq(self) -> T {
        self.dot(self)
    }

    /// Calculate the norm (magnitude) of the quaternion
    #[inline]
    #[must_use]
    pub fn norm(self) -> T {
        self.norm_sq().sqrt()
    }

    /// Normalize the quaternion, the result is undefined for a zero quaternion
    #[inline]
    #[must_use]
    pub fn normalize(self) -> Self {
        self * self.norm_sq().rsqrt()
    }

    /// Check if the quaternion is normalized, given an `epsilon`
    #[inline]
    #[must_use]
    pub fn is_close_to_normalized(self, epsilon: T) -> bool {
        self.norm_sq().is_close_to(T::one(), epsilon)
    }

    /// Calculate the dot product of 2 quaternions
    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Get the conjugate of the quaternion, for unit quaternions this is the inverse rotation
    #[inline]
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self { x: -self.x, y: -self.y, z: -self.z, w: self.w }
    }

    /// Get the inverse of the quaternion, the result is undefined for a zero quaternion
    #[inline]
    #[must_use]
    pub fn inverse(self) -> Self {
        self.conjugate() / self.norm_sq()
    }

    /// Check if 2 quaternions represent the same rotation, i.e. `self == other` or `self == -other`, given an `epsilon`
    #[inline]
    #[must_use]
    pub fn is_same_rotation(self, other: Self, epsilon: T) -> bool {
        self.is_close_to(other, epsilon) || self.is_close_to(-other, epsilon)
    }

    //--------------------------------------------------------------

    /// Create a quaternion rotating `angle` radians around a normalized axis
    #[must_use]
    pub fn from_axis_angle(axis: Vec3<T>, angle: Radians<T>) -> Self {
        #[cfg(feature = "validation")]
        if !axis.is_close_to_normalized(T::from_f32(1e-4)) {
            log_warning!(LOG_CAT, "rotation axis {:?} is not normalized", axis.to_array());
        }

        let (sin, cos) = (angle / T::from_i32(2)).sin_cos();
        Self::from_parts(axis * sin, cos)
    }

    /// Get the rotation axis and angle of a unit quaternion, with the angle in the range (-pi, pi].
    ///
    /// A rotation of 0 radians returns the x-axis as its axis.
    #[must_use]
    pub fn to_axis_angle(self) -> (Vec3<T>, Radians<T>) {
        let imaginary = self.imaginary();
        let sin_half = imaginary.len();
        if sin_half.is_zero() {
            return (Vec3::unit_x(), Radians(T::zero()));
        }

        let mut angle = T::from_i32(2) * T::atan2(sin_half, self.w);
        if angle > T::PI {
            angle -= T::TWO_PI;
        }
        (imaginary / sin_half, Radians(angle))
    }

    /// Create a quaternion from an axis scaled by the rotation angle in radians
    #[must_use]
    pub fn from_scaled_axis(scaled_axis: Vec3<T>) -> Self {
        let angle = scaled_axis.len();
        if angle.is_zero() {
            Self::identity()
        } else {
            Self::from_axis_angle(scaled_axis / angle, Radians(angle))
        }
    }

    /// Get the rotation axis, scaled by the angle of rotation in the range (-pi, pi]
    #[inline]
    #[must_use]
    pub fn to_scaled_axis(self) -> Vec3<T> {
        let (axis, angle) = self.to_axis_angle();
        axis * angle.0
    }

    /// Get the angle of rotation of the quaternion, in the range [0, 2pi]
    #[inline]
    #[must_use]
    pub fn angle(self) -> Radians<T> {
        Radians(T::from_i32(2) * self.w.clamp(-T::one(), T::one()).acos())
    }

    /// Get the smallest angle needed to rotate from `self` to `other`
    #[inline]
    #[must_use]
    pub fn angle_between(self, other: Self) -> Radians<T> {
        Radians(T::from_i32(2) * self.dot(other).abs().min(T::one()).acos())
    }

    //--------------------------------------------------------------

    /// Create a quaternion from a rotation matrix
    #[must_use]
    pub fn from_matrix(mat: Mat3<T>) -> Self {
        let m = mat.to_rows();
        let one = T::one();
        let half = T::from_f32(0.5);

        // Pick the largest of 4w^2, 4x^2, 4y^2 and 4z^2 as the pivot, the other components are derived from it
        let trace = m[0][0] + m[1][1] + m[2][2];
        let (unscaled, pivot) = if trace > T::zero() {
            let pivot = trace + one;
            (Self::new(m[2][1] - m[1][2], m[0][2] - m[2][0], m[1][0] - m[0][1], pivot), pivot)
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let pivot = one + m[0][0] - m[1][1] - m[2][2];
            (Self::new(pivot, m[0][1] + m[1][0], m[0][2] + m[2][0], m[2][1] - m[1][2]), pivot)
        } else if m[1][1] > m[2][2] {
            let pivot = one + m[1][1] - m[0][0] - m[2][2];
            (Self::new(m[0][1] + m[1][0], pivot, m[1][2] + m[2][1], m[0][2] - m[2][0]), pivot)
        } else {
            let pivot = one + m[2][2] - m[0][0] - m[1][1];
            (Self::new(m[0][2] + m[2][0], m[1][2] + m[2][1], pivot, m[1][0] - m[0][1]), pivot)
        };

        unscaled * (half * pivot.rsqrt())
    }

    /// Create a quaternion from the rotation in the upper-left 3x3 part of a matrix
    #[inline]
    #[must_use]
    pub fn from_matrix4(mat: Mat4<T>) -> Self {
        Self::from_matrix(mat.to_mat3())
    }

    /// Convert a unit quaternion to a rotation matrix
    #[must_use]
    pub fn to_matrix3(self) -> Mat3<T> {
        #[cfg(feature = "validation")]
        if !self.is_close_to_normalized(T::from_f32(1e-4)) {
            log_warning!(LOG_CAT, "converting non-normalized quaternion {:?} to a matrix", self.to_array());
        }

        let one = T::one();
        let two = T::from_i32(2);
        let Self { x, y, z, w } = self;

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        Mat3::from_rows([[one - two * (yy + zz), two * (xy - wz)      , two * (xz + wy)      ],
                         [two * (xy + wz)      , one - two * (xx + zz), two * (yz - wx)      ],
                         [two * (xz - wy)      , two * (yz + wx)      , one - two * (xx + yy)]])
    }

    /// Convert a unit quaternion to a 4x4 rotation matrix
    #[inline]
    #[must_use]
    pub fn to_matrix4(self) -> Mat4<T> {
        Mat4::from_mat3(self.to_matrix3())
    }

    /// Create a quaternion from euler angles, applied in the order z, y, x
    #[inline]
    #[must_use]
    pub fn from_euler_xyz(angles: EulerAngles<T>) -> Self {
        Self::from_axis_angle(Vec3::unit_x(), angles.x) *
        Self::from_axis_angle(Vec3::unit_y(), angles.y) *
        Self::from_axis_angle(Vec3::unit_z(), angles.z)
    }

    /// Create a quaternion from euler angles, applied in the order y, z, x
    #[inline]
    #[must_use]
    pub fn from_euler_xzy(angles: EulerAngles<T>) -> Self {
        Self::from_axis_angle(Vec3::unit_x(), angles.x) *
        Self::from_axis_angle(Vec3::unit_z(), angles.z) *
        Self::from_axis_angle(Vec3::unit_y(), angles.y)
    }

    /// Extract euler angles in the order z, y, x, see [`Mat3::to_euler_xyz`]
    #[inline]
    #[must_use]
    pub fn to_euler_xyz(self) -> EulerDecomposition<T> {
        self.to_matrix3().to_euler_xyz()
    }

    /// Extract euler angles in the order y, z, x, see [`Mat3::to_euler_xzy`]
    #[inline]
    #[must_use]
    pub fn to_euler_xzy(self) -> EulerDecomposition<T> {
        self.to_matrix3().to_euler_xzy()
    }

    //--------------------------------------------------------------

    /// Rotate a vector by a unit quaternion
    #[inline]
    #[must_use]
    pub fn rotate(self, vec: Vec3<T>) -> Vec3<T> {
        let imaginary = self.imaginary();
        let t = imaginary.cross(vec) * T::from_i32(2);
        vec + t * self.w + imaginary.cross(t)
    }

    /// Linearly interpolate between 2 quaternions, the result is not normalized
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self * (T::one() - t) + other * t
    }

    /// Linearly interpolate between 2 quaternions and normalize the result
    #[inline]
    #[must_use]
    pub fn nlerp(self, other: Self, t: T) -> Self {
        self.lerp(other, t).normalize()
    }

    /// Spherically interpolate between 2 quaternions.
    ///
    /// When the quaternions are (nearly) parallel, this falls back to a linear blend.
    /// The interpolation follows the arc from `self` to `other` as given, which might be the longer path, use [`Quat::slerp_shortest`] to always take the shortest path.
    #[must_use]
    pub fn slerp(self, other: Self, t: T) -> Self {
        let dot = self.dot(other);
        if dot.abs() > T::from_f32(SLERP_LINEAR_THRESHOLD) {
            return self.lerp(other, t);
        }

        let theta = dot.clamp(-T::one(), T::one()).acos();
        let sin_theta = theta.sin();
        let scale_self = ((T::one() - t) * theta).sin() / sin_theta;
        let scale_other = (t * theta).sin() / sin_theta;
        self * scale_self + other * scale_other
    }

    /// Spherically interpolate between 2 quaternions, taking the shortest path
    #[inline]
    #[must_use]
    pub fn slerp_shortest(self, other: Self, t: T) -> Self {
        if self.dot(other) < T::zero() {
            self.slerp(-other, t)
        } else {
            self.slerp(other, t)
        }
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl<T: Real> Default for Quat<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Add for Quat<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z, w: self.w + rhs.w }
    }
}

impl<T: Real> AddAssign for Quat<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Real> Sub for Quat<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z, w: self.w - rhs.w }
    }
}

impl<T: Real> SubAssign for Quat<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Real> Neg for Quat<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { x: -self.x, y: -self.y, z: -self.z, w: -self.w }
    }
}

impl<T: Real> Mul<T> for Quat<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Self { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs, w: self.w * rhs }
    }
}

impl<T: Real> MulAssign<T> for Quat<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Real> Div<T> for Quat<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        Self { x: self.x / rhs, y: self.y / rhs, z: self.z / rhs, w: self.w / rhs }
    }
}

impl<T: Real> DivAssign<T> for Quat<T> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: Real> Mul for Quat<T> {
    type Output = Self;

    /// Hamilton product, the result applies `rhs` first
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl<T: Real> MulAssign for Quat<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Real> Mul<Vec3<T>> for Quat<T> {
    type Output = Vec3<T>;

    fn mul(self, rhs: Vec3<T>) -> Self::Output {
        self.rotate(rhs)
    }
}

impl<T: Real> Mat3<T> {
    /// Create a rotation matrix from a unit quaternion
    #[inline]
    #[must_use]
    pub fn from_quat(quat: Quat<T>) -> Self {
        quat.to_matrix3()
    }
}

impl<T: Real> Mat4<T> {
    /// Create a rotation matrix from a unit quaternion
    #[inline]
    #[must_use]
    pub fn from_quat(quat: Quat<T>) -> Self {
        quat.to_matrix4()
    }
}

impl<T: Real> From<Quat<T>> for Mat3<T> {
    fn from(quat: Quat<T>) -> Self {
        quat.to_matrix3()
    }
}

impl<T: Real> From<Quat<T>> for Mat4<T> {
    fn from(quat: Quat<T>) -> Self {
        quat.to_matrix4()
    }
}

impl<T: Real> ApproxEq for Quat<T> {
    type Epsilon = T;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.x.is_close_to(rhs.x, epsilon) &&
        self.y.is_close_to(rhs.y, epsilon) &&
        self.z.is_close_to(rhs.z, epsilon) &&
        self.w.is_close_to(rhs.w, epsilon)
    }
}

impl<T: Real + Display> Display for Quat<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {}, {}, {})", self.x, self.y, self.z, self.w))
    }
}
