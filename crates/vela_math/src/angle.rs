use core::ops::*;
use std::fmt::Display;
use crate::{ApproxEq, MathConsts, Real, Zero};

macro_rules! angle_common {
    {$name:ident} => {
        impl<T: Copy + Add<Output = T>> Add for $name<T> {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl<T: Copy + AddAssign> AddAssign for $name<T> {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl<T: Copy + Sub<Output = T>> Sub for $name<T> {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl<T: Copy + SubAssign> SubAssign for $name<T> {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl<T: Copy + Mul<Output = T>> Mul<T> for $name<T> {
            type Output = Self;

            fn mul(self, rhs: T) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl<T: Copy + Div<Output = T>> Div<T> for $name<T> {
            type Output = Self;

            fn div(self, rhs: T) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl<T: Copy + Neg<Output = T>> Neg for $name<T> {
            type Output = Self;

            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl<T: Copy + ApproxEq> ApproxEq for $name<T> {
            type Epsilon = T::Epsilon;

            fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
                self.0.is_close_to(rhs.0, epsilon)
            }
        }

        impl<T: Copy + Zero> Zero for $name<T> {
            fn zero() -> Self {
                Self(T::zero())
            }
        }
    };
}

//------------------------------------------------------------------------------------------------------------------------------

/// An angle represented as degrees
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Degrees<T: Copy>(pub T);
angle_common!{Degrees}

impl<T: Real> Degrees<T> {
    /// Convert degrees to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> Radians<T> {
        Radians(self.0 * T::DEG_TO_RAD)
    }
}

impl<T: Real> From<Radians<T>> for Degrees<T> {
    fn from(rads: Radians<T>) -> Self {
        rads.to_degrees()
    }
}

impl<T: Real + Display> Display for Degrees<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}°", self.0))
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// An angle represented as radians
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Radians<T: Copy>(pub T);
angle_common!{Radians}

impl<T: Real> Radians<T> {
    /// Convert radians to degrees
    #[inline]
    #[must_use]
    pub fn to_degrees(self) -> Degrees<T> {
        Degrees(self.0 * T::RAD_TO_DEG)
    }

    /// Wrap the angle into the range (-pi, pi]
    #[must_use]
    pub fn wrap_pi(self) -> Self {
        let mut val = self.0;
        while val > T::PI {
            val -= T::TWO_PI;
        }
        while val <= -T::PI {
            val += T::TWO_PI;
        }
        Self(val)
    }

    #[inline]
    #[must_use]
    pub fn sin(self) -> T {
        self.0.sin()
    }

    #[inline]
    #[must_use]
    pub fn cos(self) -> T {
        self.0.cos()
    }

    /// Calculate the sine and cosine of the angle
    #[inline]
    #[must_use]
    pub fn sin_cos(self) -> (T, T) {
        self.0.sin_cos()
    }

    #[inline]
    #[must_use]
    pub fn tan(self) -> T {
        self.0.tan()
    }
}

impl<T: Real> From<Degrees<T>> for Radians<T> {
    fn from(degs: Degrees<T>) -> Self {
        degs.to_radians()
    }
}

impl<T: Real + Display> Display for Radians<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}rads", self.0))
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// Rotation represented as 3 euler angles, one per axis.
///
/// How the angles combine depends on the order they were extracted with or are applied in, e.g. `Mat3::to_euler_xyz`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EulerAngles<T: Real> {
    pub x : Radians<T>,
    pub y : Radians<T>,
    pub z : Radians<T>,
}

impl<T: Real> EulerAngles<T> {
    /// Create a set of euler angles in radians
    #[inline]
    #[must_use]
    pub fn new(x: Radians<T>, y: Radians<T>, z: Radians<T>) -> Self {
        Self { x, y, z }
    }

    /// Create a set of euler angles in degrees
    #[inline]
    #[must_use]
    pub fn from_degrees(x: Degrees<T>, y: Degrees<T>, z: Degrees<T>) -> Self {
        Self { x: x.to_radians(), y: y.to_radians(), z: z.to_radians() }
    }
}

impl<T: Real> ApproxEq for EulerAngles<T> {
    type Epsilon = T;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.x.is_close_to(rhs.x, epsilon) &&
        self.y.is_close_to(rhs.y, epsilon) &&
        self.z.is_close_to(rhs.z, epsilon)
    }
}

/// Result of extracting euler angles from a rotation matrix
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EulerDecomposition<T: Real> {
    /// Extracted angles
    pub angles : EulerAngles<T>,
    /// `false` when the rotation is in gimbal lock and `angles` is only one of infinitely many valid decompositions
    pub unique : bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_radian_conversion() {
        let rads : Radians<f32> = Degrees(180f32).into();
        assert!(rads.is_close_to(Radians(core::f32::consts::PI), 1e-6));

        let degs : Degrees<f64> = Radians(core::f64::consts::FRAC_PI_2).into();
        assert!(degs.is_close_to(Degrees(90.0), 1e-12));
    }

    #[test]
    fn wrap_pi() {
        let pi = core::f32::consts::PI;
        assert!(Radians(3.0 * pi).wrap_pi().is_close_to(Radians(pi), 1e-5));
        assert!(Radians(-pi).wrap_pi().is_close_to(Radians(pi), 1e-5));
        assert!(Radians(0.25f32).wrap_pi().is_close_to(Radians(0.25), 1e-6));
    }
}
