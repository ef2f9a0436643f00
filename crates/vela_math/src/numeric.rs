use core::fmt::Debug;
use core::ops::*;
use crate::MathConsts;

/// Defines a type which has a 0-value, i.e. the additive identity
pub trait Zero {
    fn zero() -> Self;
}

/// Defines a type which has a 1-value, i.e. the multiplicative identity
pub trait One {
    fn one() -> Self;
}

macro_rules! impl_identities {
    {$($ty:ty),*} => {
        $(
            impl Zero for $ty {
                #[inline(always)]
                fn zero() -> Self { 0 as $ty }
            }

            impl One for $ty {
                #[inline(always)]
                fn one() -> Self { 1 as $ty }
            }
        )*
    };
}
impl_identities!{ i8, i16, i32, i64, u8, u16, u32, u64, f32, f64 }

/// Defines a type that is a partial implementation of a `Numeric`
pub trait NumericBase : Sized + Clone + Copy + Debug + One + Zero + PartialEq + PartialOrd +
                        Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self> +
                        AddAssign + SubAssign + MulAssign + DivAssign
{
    /// Machine epsilon
    const EPSILON : Self;
    /// Smallest finite value
    const MIN : Self;
    /// Largest finite value
    const MAX : Self;

    /// Get the minimum of 2 `Numeric`s
    fn min(self, rhs: Self) -> Self;
    /// Get the maximum of 2 `Numeric`s
    fn max(self, rhs: Self) -> Self;

    /// Clamp a value between 2 values
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Calculate the absolute difference of 2 values
    fn abs_diff(self, rhs: Self) -> Self;
    /// Calculate the absolute value
    fn abs(self) -> Self;

    /// Create a numeric from an `i32`
    fn from_i32(val: i32) -> Self;
}

macro_rules! impl_numeric {
    {@int $($ty:ty),*} => {
        $(
            impl NumericBase for $ty {
                const EPSILON : Self = 0;
                const MIN : Self = <$ty>::MIN;
                const MAX : Self = <$ty>::MAX;

                fn min(self, rhs: Self) -> Self {
                    core::cmp::min(self, rhs)
                }

                fn max(self, rhs: Self) -> Self {
                    core::cmp::max(self, rhs)
                }

                fn abs_diff(self, rhs: Self) -> Self {
                    if self > rhs { self - rhs } else { rhs - self }
                }

                #[allow(unused_comparisons)]
                fn abs(self) -> Self {
                    if self < (0 as $ty) { (0 as $ty) - self } else { self }
                }

                fn from_i32(val: i32) -> Self {
                    val as $ty
                }
            }
        )*
    };
    {@fp $($ty:ty),*} => {
        $(
            impl NumericBase for $ty {
                const EPSILON : Self = <$ty>::EPSILON;
                const MIN : Self = <$ty>::MIN;
                const MAX : Self = <$ty>::MAX;

                fn min(self, rhs: Self) -> Self {
                    self.min(rhs)
                }

                fn max(self, rhs: Self) -> Self {
                    self.max(rhs)
                }

                fn abs_diff(self, rhs: Self) -> Self {
                    (self - rhs).abs()
                }

                fn abs(self) -> Self {
                    self.abs()
                }

                fn from_i32(val: i32) -> Self {
                    val as $ty
                }
            }
        )*
    };
}
impl_numeric!{ @int i8, i16, i32, i64, u8, u16, u32, u64 }
impl_numeric!{ @fp f32, f64 }

/// Defines a type that can check if it's approximately equal to another value
pub trait ApproxEq : Sized {
    type Epsilon : NumericBase;

    /// Check if `self` is approximately equal to another value, given an `epsilon`
    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool;

    /// Check if `self` is approximately equal to another, using the machine epsilon
    fn is_approx_eq(self, rhs: Self) -> bool {
        self.is_close_to(rhs, Self::Epsilon::EPSILON)
    }
}

/// Defines a type that can check if it's approximately equal to it's zero identity
pub trait ApproxZero : Sized {
    type Epsilon : NumericBase;

    /// Check if `self` is approximately equal to 0, given an `epsilon`
    fn is_close_to_zero(self, epsilon: Self::Epsilon) -> bool;

    /// Check if `self` is approximately equal to 0, using the machine epsilon
    fn is_zero(self) -> bool {
        self.is_close_to_zero(Self::Epsilon::EPSILON)
    }
}

macro_rules! impl_approx {
    {$($ty:ty),*} => {
        $(
            impl ApproxEq for $ty {
                type Epsilon = $ty;

                fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
                    NumericBase::abs_diff(self, rhs) <= epsilon
                }
            }

            impl ApproxZero for $ty {
                type Epsilon = $ty;

                fn is_close_to_zero(self, epsilon: Self::Epsilon) -> bool {
                    NumericBase::abs(self) <= epsilon
                }
            }
        )*
    };
}
impl_approx!{ i8, i16, i32, i64, u8, u16, u32, u64, f32, f64 }

/// Defines a type that is numeric
pub trait Numeric : NumericBase + ApproxEq<Epsilon = Self> + ApproxZero<Epsilon = Self> {}

impl Numeric for i8 {}
impl Numeric for i16 {}
impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for u8 {}
impl Numeric for u16 {}
impl Numeric for u32 {}
impl Numeric for u64 {}
impl Numeric for f32 {}
impl Numeric for f64 {}

/// Arithmatic type representing a signed number
pub trait Signed : Numeric + Neg<Output = Self> {}

impl Signed for i8 {}
impl Signed for i16 {}
impl Signed for i32 {}
impl Signed for i64 {}
impl Signed for f32 {}
impl Signed for f64 {}

/// Arithmatic type representing a real number
pub trait Real : Signed + MathConsts {
    /// Calculate the square root of a value
    fn sqrt(self) -> Self;
    /// Calculate the reciprocal of the square root of the value
    fn rsqrt(self) -> Self {
        Self::one() / self.sqrt()
    }
    /// Calculate the reciprocal of the value
    fn rcp(self) -> Self {
        Self::one() / self
    }

    /// Calculate the sine of the value
    fn sin(self) -> Self;
    /// Calculate the cosine of the value
    fn cos(self) -> Self;
    /// Calculate the sine and cosine simultaniously
    fn sin_cos(self) -> (Self, Self);
    /// Calculate the tangent of the value
    fn tan(self) -> Self;
    /// Calculate the arcsine of the value
    fn asin(self) -> Self;
    /// Calculate the arccosine of the value
    fn acos(self) -> Self;
    /// Calculate the arctangent of the value, from a given x and y coordinate
    fn atan2(y: Self, x: Self) -> Self;

    /// Check if the value is neither infinite nor NaN
    fn is_finite(self) -> bool;

    /// Create a numeric from an f32
    fn from_f32(val: f32) -> Self;
    /// Create a numeric from an f64
    fn from_f64(val: f64) -> Self;
    /// Widen the value to an f64
    fn to_f64(self) -> f64;
}

macro_rules! impl_real {
    {$($ty:ty),*} => {
        $(
            impl Real for $ty {
                fn sqrt(self) -> Self {
                    self.sqrt()
                }

                fn sin(self) -> Self {
                    self.sin()
                }

                fn cos(self) -> Self {
                    self.cos()
                }

                fn sin_cos(self) -> (Self, Self) {
                    self.sin_cos()
                }

                fn tan(self) -> Self {
                    self.tan()
                }

                fn asin(self) -> Self {
                    self.asin()
                }

                fn acos(self) -> Self {
                    self.acos()
                }

                fn atan2(y: Self, x: Self) -> Self {
                    <$ty>::atan2(y, x)
                }

                fn is_finite(self) -> bool {
                    self.is_finite()
                }

                fn from_f32(val: f32) -> Self {
                    val as $ty
                }

                fn from_f64(val: f64) -> Self {
                    val as $ty
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}
impl_real!{ f32, f64 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_abs_diff_is_symmetric() {
        assert_eq!(NumericBase::abs_diff(3u8, 7u8), 4);
        assert_eq!(NumericBase::abs_diff(7u8, 3u8), 4);
        assert_eq!(NumericBase::abs(-5i32), 5);
    }

    #[test]
    fn approx_eq() {
        assert!(1.0f32.is_close_to(1.0 + 1e-6, 1e-5));
        assert!(!1.0f32.is_close_to(1.1, 1e-5));
        assert!(!1e-9f64.is_zero());
        assert!(1e-9f64.is_close_to_zero(1e-8));
        assert!(4i32.is_approx_eq(4));
    }

    #[test]
    fn clamp() {
        assert_eq!(NumericBase::clamp(5.0f32, 0.0, 1.0), 1.0);
        assert_eq!(NumericBase::clamp(-5i32, 0, 3), 0);
    }
}
