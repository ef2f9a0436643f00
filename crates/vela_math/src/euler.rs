use crate::*;
use vela_logging::{log_debug, LogCategory};

const LOG_CAT : LogCategory = LogCategory::new_with_sub("Math", "Euler");

/// Once the sine of the middle angle gets this close to +-1, the decomposition is treated as being in gimbal lock
const GIMBAL_LOCK_THRESHOLD : f32 = 0.999_999;

impl<T: Real> Mat3<T> {
    /// Create a rotation matrix from euler angles, applied in the order z, y, x, i.e. `rot_x * rot_y * rot_z`
    #[inline]
    #[must_use]
    pub fn from_euler_xyz(angles: EulerAngles<T>) -> Self {
        Self::rotation_x(angles.x) * Self::rotation_y(angles.y) * Self::rotation_z(angles.z)
    }

    /// Create a rotation matrix from euler angles, applied in the order y, z, x, i.e. `rot_x * rot_z * rot_y`
    #[inline]
    #[must_use]
    pub fn from_euler_xzy(angles: EulerAngles<T>) -> Self {
        Self::rotation_x(angles.x) * Self::rotation_z(angles.z) * Self::rotation_y(angles.y)
    }

    /// Extract the euler angles of a rotation matrix created by [`Mat3::from_euler_xyz`].
    ///
    /// The y-angle is in the range [-pi/2, pi/2], the other angles in the range [-pi, pi].
    /// When the rotation is in gimbal lock, the z-angle is fixed to 0 and the x-angle holds the combined rotation.
    #[must_use]
    pub fn to_euler_xyz(&self) -> EulerDecomposition<T> {
        let m = self.to_rows();
        let sin_y = m[0][2].clamp(-T::one(), T::one());
        let y = sin_y.asin();

        if sin_y.abs() < T::from_f32(GIMBAL_LOCK_THRESHOLD) {
            let x = T::atan2(-m[1][2], m[2][2]);
            let z = T::atan2(-m[0][1], m[0][0]);
            EulerDecomposition { angles: EulerAngles::new(Radians(x), Radians(y), Radians(z)), unique: true }
        } else {
            log_debug!(LOG_CAT, "xyz decomposition is in gimbal lock (sin(y) = {:?})", sin_y);
            // x and z rotate around the same axis, so only their sum (or difference) is known
            let x = if sin_y > T::zero() {
                T::atan2(m[1][0], m[1][1])
            } else {
                T::atan2(-m[1][0], m[1][1])
            };
            EulerDecomposition { angles: EulerAngles::new(Radians(x), Radians(y), Radians(T::zero())), unique: false }
        }
    }

    /// Extract the euler angles of a rotation matrix created by [`Mat3::from_euler_xzy`].
    ///
    /// The z-angle is in the range [-pi/2, pi/2], the other angles in the range [-pi, pi].
    /// When the rotation is in gimbal lock, the y-angle is fixed to 0 and the x-angle holds the combined rotation.
    #[must_use]
    pub fn to_euler_xzy(&self) -> EulerDecomposition<T> {
        let m = self.to_rows();
        let sin_z = (-m[0][1]).clamp(-T::one(), T::one());
        let z = sin_z.asin();

        if sin_z.abs() < T::from_f32(GIMBAL_LOCK_THRESHOLD) {
            let x = T::atan2(m[2][1], m[1][1]);
            let y = T::atan2(m[0][2], m[0][0]);
            EulerDecomposition { angles: EulerAngles::new(Radians(x), Radians(y), Radians(z)), unique: true }
        } else {
            log_debug!(LOG_CAT, "xzy decomposition is in gimbal lock (sin(z) = {:?})", sin_z);
            let x = if sin_z > T::zero() {
                T::atan2(m[2][0], m[2][2])
            } else {
                T::atan2(-m[2][0], m[2][2])
            };
            EulerDecomposition { angles: EulerAngles::new(Radians(x), Radians(T::zero()), Radians(z)), unique: false }
        }
    }
}
