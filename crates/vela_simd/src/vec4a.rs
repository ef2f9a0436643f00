use core::ops::*;
use std::fmt::Display;

use vela_math::{ApproxEq, MathError, Real, Vec4, error};

use crate::arch;

/// 16-byte aligned 4 component `f32` column vector.
///
/// This has the same element layout as `Vec4<f32>`, converting between them is lossless.
#[repr(C, align(16))]
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec4A {
    vals : [f32; 4],
}
static_assertions::assert_eq_size!(Vec4A, [f32; 4]);
static_assertions::const_assert_eq!(core::mem::align_of::<Vec4A>(), 16);

impl Vec4A {
    /// Create a new vector
    #[inline(always)]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { vals: [x, y, z, w] }
    }

    #[inline(always)]
    #[must_use]
    pub const fn from_array(vals: [f32; 4]) -> Self {
        Self { vals }
    }

    /// Create a vector with all components set to `val`
    #[inline(always)]
    #[must_use]
    pub const fn splat(val: f32) -> Self {
        Self { vals: [val; 4] }
    }

    #[inline(always)]
    #[must_use]
    pub const fn zero() -> Self {
        Self::splat(0.0)
    }

    #[inline(always)]
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        self.vals
    }

    /// Get the components as an array, e.g. to upload them
    #[inline(always)]
    #[must_use]
    pub const fn as_array(&self) -> &[f32; 4] {
        &self.vals
    }

    /// Get a pointer to the first component, the pointer is 16-byte aligned
    #[inline(always)]
    #[must_use]
    pub const fn as_ptr(&self) -> *const f32 {
        self.vals.as_ptr()
    }

    /// Get a mutable pointer to the first component, the pointer is 16-byte aligned
    #[inline(always)]
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut f32 {
        self.vals.as_mut_ptr()
    }

    #[inline(always)]
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.vals[0]
    }

    #[inline(always)]
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.vals[1]
    }

    #[inline(always)]
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.vals[2]
    }

    #[inline(always)]
    #[must_use]
    pub const fn w(&self) -> f32 {
        self.vals[3]
    }

    /// Calculate the dot product of 2 vectors
    #[inline]
    #[must_use]
    pub fn dot(self, rhs: Self) -> f32 {
        arch::vec_dot(&self, &rhs)
    }

    /// Calculate the squared length of the vector
    #[inline]
    #[must_use]
    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    /// Calculate the length of the vector
    #[inline]
    #[must_use]
    pub fn len(self) -> f32 {
        self.len_sq().sqrt()
    }

    /// Calculate the distance between 2 vectors
    #[inline]
    #[must_use]
    pub fn dist(self, other: Self) -> f32 {
        (other - self).len()
    }

    /// Normalize the vector, the result is undefined (non-finite) for a zero-length vector
    #[inline]
    #[must_use]
    pub fn normalize(self) -> Self {
        self * self.len_sq().rsqrt()
    }

    /// Normalize the vector, fails when the length is not larger than `epsilon`
    #[inline]
    pub fn try_normalize(self, epsilon: f32) -> error::Result<Self> {
        let len = self.len();
        if len > epsilon {
            Ok(self / len)
        } else {
            Err(MathError::ZeroLengthVector { length: len as f64 })
        }
    }

    /// Check if the vector is normalized, given an `epsilon`
    #[inline]
    #[must_use]
    pub fn is_close_to_normalized(self, epsilon: f32) -> bool {
        self.len_sq().is_close_to(1.0, epsilon)
    }

    /// Get the component-wise minimum of 2 vectors
    #[inline]
    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        arch::vec_min(&self, &rhs)
    }

    /// Get the component-wise maximum of 2 vectors
    #[inline]
    #[must_use]
    pub fn max(self, rhs: Self) -> Self {
        arch::vec_max(&self, &rhs)
    }

    /// Clamp each component between the corresponding components of `min` and `max`
    #[inline]
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Multiply each component with the corresponding component of `rhs`
    #[inline]
    #[must_use]
    pub fn mul_elem(self, rhs: Self) -> Self {
        arch::vec_mul(&self, &rhs)
    }

    /// Linearly interpolate between 2 vectors: `self + t * (other - self)`
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Index<usize> for Vec4A {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vals[index]
    }
}

impl IndexMut<usize> for Vec4A {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.vals[index]
    }
}

impl Add for Vec4A {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        arch::vec_add(&self, &rhs)
    }
}

impl AddAssign for Vec4A {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec4A {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        arch::vec_sub(&self, &rhs)
    }
}

impl SubAssign for Vec4A {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vec4A {
    type Output = Self;

    fn neg(self) -> Self::Output {
        arch::vec_scale(&self, -1.0)
    }
}

impl Mul<f32> for Vec4A {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        arch::vec_scale(&self, rhs)
    }
}

impl Mul<Vec4A> for f32 {
    type Output = Vec4A;

    fn mul(self, rhs: Vec4A) -> Self::Output {
        arch::vec_scale(&rhs, self)
    }
}

impl MulAssign<f32> for Vec4A {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Vec4A {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        arch::vec_scale(&self, rhs.recip())
    }
}

impl DivAssign<f32> for Vec4A {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl From<[f32; 4]> for Vec4A {
    fn from(vals: [f32; 4]) -> Self {
        Self { vals }
    }
}

impl From<Vec4A> for [f32; 4] {
    fn from(vec: Vec4A) -> Self {
        vec.vals
    }
}

impl From<Vec4<f32>> for Vec4A {
    fn from(vec: Vec4<f32>) -> Self {
        Self { vals: vec.to_array() }
    }
}

impl From<Vec4A> for Vec4<f32> {
    fn from(vec: Vec4A) -> Self {
        Vec4::from_array(vec.vals)
    }
}

impl ApproxEq for Vec4A {
    type Epsilon = f32;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.vals.iter().zip(rhs.vals.iter()).all(|(a, b)| a.is_close_to(*b, epsilon))
    }
}

impl Display for Vec4A {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {}, {}, {})", self.vals[0], self.vals[1], self.vals[2], self.vals[3]))
    }
}
