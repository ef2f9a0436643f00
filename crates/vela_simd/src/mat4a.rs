use core::ops::*;
use std::fmt::Display;

use vela_logging::{log_verbose, LogCategory};
use vela_math::{ApproxEq, MathError, Mat4, error};

use crate::{arch, Vec4A};

const LOG_CAT : LogCategory = LogCategory::new_with_sub("Simd", "Mat4A");

/// 64-byte aligned 4x4 `f32` matrix, stored row-major.
///
/// This has the same element layout as `Mat4<f32>`, converting between them is lossless.
/// Like `Mat4`, the matrix acts on column vectors, with the translation in the last column.
#[repr(C, align(64))]
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Mat4A {
    pub(crate) rows : [Vec4A; 4],
}
static_assertions::assert_eq_size!(Mat4A, [f32; 16]);
static_assertions::const_assert_eq!(core::mem::align_of::<Mat4A>(), 64);

impl Mat4A {
    /// Create a matrix from its rows
    #[inline(always)]
    #[must_use]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows: [
            Vec4A::from_array(rows[0]),
            Vec4A::from_array(rows[1]),
            Vec4A::from_array(rows[2]),
            Vec4A::from_array(rows[3]),
        ] }
    }

    /// Create a matrix from its row vectors
    #[inline(always)]
    #[must_use]
    pub const fn from_row_vectors(rows: [Vec4A; 4]) -> Self {
        Self { rows }
    }

    #[inline(always)]
    #[must_use]
    pub const fn zero() -> Self {
        Self { rows: [Vec4A::zero(); 4] }
    }

    #[inline]
    #[must_use]
    pub const fn identity() -> Self {
        Self::from_rows([[1.0, 0.0, 0.0, 0.0],
                         [0.0, 1.0, 0.0, 0.0],
                         [0.0, 0.0, 1.0, 0.0],
                         [0.0, 0.0, 0.0, 1.0]])
    }

    #[inline]
    #[must_use]
    pub fn to_rows(self) -> [[f32; 4]; 4] {
        self.rows.map(Vec4A::to_array)
    }

    /// Get a row of the matrix
    #[inline(always)]
    #[must_use]
    pub fn row(&self, row: usize) -> Vec4A {
        self.rows[row]
    }

    /// Set a row of the matrix
    #[inline(always)]
    pub fn set_row(&mut self, row: usize, vals: Vec4A) {
        self.rows[row] = vals;
    }

    /// Get a column of the matrix
    #[inline]
    #[must_use]
    pub fn column(&self, column: usize) -> Vec4A {
        Vec4A::new(self.rows[0][column], self.rows[1][column], self.rows[2][column], self.rows[3][column])
    }

    /// Get the elements as a row-major array, e.g. to upload them
    #[inline(always)]
    #[must_use]
    pub fn as_array(&self) -> &[f32; 16] {
        // SAFETY: `Mat4A` consists of 16 consecutive `f32`s without padding
        unsafe { &*(self as *const Self).cast::<[f32; 16]>() }
    }

    /// Get a pointer to the first element, the pointer is 64-byte aligned and valid for 16 elements
    #[inline(always)]
    #[must_use]
    pub fn as_ptr(&self) -> *const f32 {
        (self as *const Self).cast()
    }

    /// Get a mutable pointer to the first element, the pointer is 64-byte aligned and valid for 16 elements
    #[inline(always)]
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut f32 {
        (self as *mut Self).cast()
    }

    #[inline]
    #[must_use]
    pub fn transpose(self) -> Self {
        arch::mat_transpose(&self)
    }

    /// Calculate the adjugate, i.e. the transposed cofactor matrix
    #[inline]
    #[must_use]
    pub fn adjugate(&self) -> Self {
        arch::mat_adjugate(self).0
    }

    /// Calculate the determinant
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> f32 {
        arch::mat_adjugate(self).1
    }

    /// Calculate the inverse of the matrix.
    ///
    /// The result is undefined when the matrix is singular, use [`Mat4A::try_inverse`] if that can happen.
    #[inline]
    #[must_use]
    pub fn inverse(&self) -> Self {
        let (adjugate, det) = arch::mat_adjugate(self);
        adjugate * det.recip()
    }

    /// Calculate the inverse of the matrix, fails if the absolute value of the determinant is not larger than `epsilon`
    pub fn try_inverse(&self, epsilon: f32) -> error::Result<Self> {
        let (adjugate, det) = arch::mat_adjugate(self);
        if det.abs() > epsilon {
            Ok(adjugate * det.recip())
        } else {
            log_verbose!(LOG_CAT, "matrix with determinant {det} is not invertible (epsilon {epsilon})");
            Err(MathError::SingularMatrix { determinant: det as f64, epsilon: epsilon as f64 })
        }
    }

    /// Invert the matrix in place.
    ///
    /// If the absolute value of the determinant is not larger than `epsilon`, an error is returned and the matrix is left untouched.
    pub fn try_invert(&mut self, epsilon: f32) -> error::Result<()> {
        *self = self.try_inverse(epsilon)?;
        Ok(())
    }

    /// Linearly interpolate between 2 matrices: `self + t * (other - self)`
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Get the element-wise minimum of 2 matrices
    #[inline]
    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        self.zip_rows(&rhs, arch::vec_min)
    }

    /// Get the element-wise maximum of 2 matrices
    #[inline]
    #[must_use]
    pub fn max(self, rhs: Self) -> Self {
        self.zip_rows(&rhs, arch::vec_max)
    }

    /// Clamp each element of the matrix between the elements of `min` and `max`
    #[inline]
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Check if the matrix is the identity matrix, given an `epsilon`
    #[inline]
    #[must_use]
    pub fn is_close_to_identity(&self, epsilon: f32) -> bool {
        self.is_close_to(Self::identity(), epsilon)
    }

    #[inline]
    fn map_rows<F: Fn(&Vec4A) -> Vec4A>(&self, f: F) -> Self {
        Self { rows: [f(&self.rows[0]), f(&self.rows[1]), f(&self.rows[2]), f(&self.rows[3])] }
    }

    #[inline]
    fn zip_rows<F: Fn(&Vec4A, &Vec4A) -> Vec4A>(&self, other: &Self, f: F) -> Self {
        Self { rows: [
            f(&self.rows[0], &other.rows[0]),
            f(&self.rows[1], &other.rows[1]),
            f(&self.rows[2], &other.rows[2]),
            f(&self.rows[3], &other.rows[3]),
        ] }
    }
}

impl Index<(usize, usize)> for Mat4A {
    type Output = f32;

    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        &self.rows[row][column]
    }
}

impl IndexMut<(usize, usize)> for Mat4A {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[row][column]
    }
}

impl Add for Mat4A {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_rows(&rhs, arch::vec_add)
    }
}

impl AddAssign for Mat4A {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Mat4A {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_rows(&rhs, arch::vec_sub)
    }
}

impl SubAssign for Mat4A {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Mat4A {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl Mul<f32> for Mat4A {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        self.map_rows(|row| arch::vec_scale(row, rhs))
    }
}

impl Mul<Mat4A> for f32 {
    type Output = Mat4A;

    fn mul(self, rhs: Mat4A) -> Self::Output {
        rhs * self
    }
}

impl MulAssign<f32> for Mat4A {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Mat4A {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        self * rhs.recip()
    }
}

impl DivAssign<f32> for Mat4A {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl Mul for Mat4A {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        arch::mat_mul(&self, &rhs)
    }
}

impl MulAssign for Mat4A {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec4A> for Mat4A {
    type Output = Vec4A;

    fn mul(self, rhs: Vec4A) -> Self::Output {
        arch::mat_mul_vec(&self, &rhs)
    }
}

impl From<[[f32; 4]; 4]> for Mat4A {
    fn from(rows: [[f32; 4]; 4]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Mat4<f32>> for Mat4A {
    fn from(mat: Mat4<f32>) -> Self {
        Self::from_rows(mat.to_rows())
    }
}

impl From<Mat4A> for Mat4<f32> {
    fn from(mat: Mat4A) -> Self {
        Mat4::from_rows(mat.to_rows())
    }
}

impl ApproxEq for Mat4A {
    type Epsilon = f32;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.rows.iter().zip(rhs.rows.iter()).all(|(a, b)| a.is_close_to(*b, epsilon))
    }
}

impl Display for Mat4A {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[{}, {}, {}, {}]", self.rows[0], self.rows[1], self.rows[2], self.rows[3]))
    }
}
