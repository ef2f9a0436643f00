use crate::*;

use core::{
    fmt::Display,
    ops::*,
};

mod vector;
pub use vector::*;

mod square;
pub use square::*;

/// Row-major matrix with `N` rows and `M` columns.
///
/// Vectors are the `N x 1` (column, [`Vector`]) and `1 x N` (row, [`RowVector`]) cases of a matrix. Column and row vectors
/// are different types, so using one where the other is expected requires an explicit [`Matrix::transpose`].
///
/// All elements are stored contiguously, row after row.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Matrix<T: Copy, const N: usize, const M: usize> {
    rows : [[T; M]; N]
}

/// Column vector with `N` components
pub type Vector<T, const N: usize> = Matrix<T, N, 1>;
/// Row vector with `N` components
pub type RowVector<T, const N: usize> = Matrix<T, 1, N>;

pub type Vec2<T> = Vector<T, 2>;
pub type Vec3<T> = Vector<T, 3>;
pub type Vec4<T> = Vector<T, 4>;

pub type RowVec2<T> = RowVector<T, 2>;
pub type RowVec3<T> = RowVector<T, 3>;
pub type RowVec4<T> = RowVector<T, 4>;

pub type Mat2<T> = Matrix<T, 2, 2>;
pub type Mat3<T> = Matrix<T, 3, 3>;
pub type Mat4<T> = Matrix<T, 4, 4>;

#[allow(non_camel_case_types)] pub type f32v2 = Vec2<f32>;
#[allow(non_camel_case_types)] pub type f32v3 = Vec3<f32>;
#[allow(non_camel_case_types)] pub type f32v4 = Vec4<f32>;
#[allow(non_camel_case_types)] pub type f64v2 = Vec2<f64>;
#[allow(non_camel_case_types)] pub type f64v3 = Vec3<f64>;
#[allow(non_camel_case_types)] pub type f64v4 = Vec4<f64>;
#[allow(non_camel_case_types)] pub type i32v2 = Vec2<i32>;
#[allow(non_camel_case_types)] pub type i32v3 = Vec3<i32>;
#[allow(non_camel_case_types)] pub type f32m3 = Mat3<f32>;
#[allow(non_camel_case_types)] pub type f32m4 = Mat4<f32>;
#[allow(non_camel_case_types)] pub type f64m3 = Mat3<f64>;
#[allow(non_camel_case_types)] pub type f64m4 = Mat4<f64>;

static_assertions::assert_eq_size!(f32m4, [f32; 16]);
static_assertions::assert_eq_size!(f32v3, [f32; 3]);

impl<T: Copy, const N: usize, const M: usize> Matrix<T, N, M> {
    /// Number of rows
    pub const ROWS : usize = N;
    /// Number of columns
    pub const COLUMNS : usize = M;

    /// Create a matrix from its rows
    #[inline(always)]
    #[must_use]
    pub const fn from_rows(rows: [[T; M]; N]) -> Self {
        Self { rows }
    }

    /// Create a matrix from its columns
    #[inline]
    #[must_use]
    pub fn from_columns(columns: [[T; N]; M]) -> Self {
        Self::from_fn(|row, column| columns[column][row])
    }

    /// Create a matrix by calling `f(row, column)` for each element
    #[inline]
    #[must_use]
    pub fn from_fn<F: FnMut(usize, usize) -> T>(mut f: F) -> Self {
        Self { rows: core::array::from_fn(|row| core::array::from_fn(|column| f(row, column))) }
    }

    /// Create a matrix from a slice in row-major order.
    ///
    /// The slice needs to contain exactly `N * M` elements.
    #[inline]
    #[must_use]
    pub fn from_slice(vals: &[T]) -> Self {
        assert_eq!(vals.len(), N * M, "Matrix::from_slice expects {} elements", N * M);
        Self::from_fn(|row, column| vals[row * M + column])
    }

    /// Create a matrix with all elements set to `val`
    #[inline(always)]
    #[must_use]
    pub fn splat(val: T) -> Self {
        Self { rows: [[val; M]; N] }
    }

    /// Get the rows of the matrix
    #[inline(always)]
    #[must_use]
    pub fn to_rows(self) -> [[T; M]; N] {
        self.rows
    }

    /// Get the elements of the matrix as a row-major slice
    #[inline(always)]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.rows.as_flattened()
    }

    /// Get the elements of the matrix as a mutable row-major slice
    #[inline(always)]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.rows.as_flattened_mut()
    }

    /// Get a row of the matrix
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> RowVector<T, M> {
        RowVector::from_rows([self.rows[row]])
    }

    /// Get a column of the matrix
    #[inline]
    #[must_use]
    pub fn column(&self, column: usize) -> Vector<T, N> {
        Vector::from_fn(|row, _| self.rows[row][column])
    }

    /// Overwrite a row of the matrix
    #[inline]
    pub fn set_row(&mut self, row: usize, vals: RowVector<T, M>) {
        self.rows[row] = vals.rows[0];
    }

    /// Overwrite a column of the matrix
    #[inline]
    pub fn set_column(&mut self, column: usize, vals: Vector<T, N>) {
        for row in 0..N {
            self.rows[row][column] = vals.rows[row][0];
        }
    }

    /// Transpose the matrix
    #[inline]
    #[must_use]
    pub fn transpose(self) -> Matrix<T, M, N> {
        Matrix::from_fn(|row, column| self.rows[column][row])
    }

    /// Apply a function to each element
    #[inline]
    #[must_use]
    pub fn map<U: Copy, F: FnMut(T) -> U>(self, mut f: F) -> Matrix<U, N, M> {
        Matrix::from_fn(|row, column| f(self.rows[row][column]))
    }

    /// Combine the elements of 2 matrices with a function
    #[inline]
    #[must_use]
    pub fn zip_map<U: Copy, V: Copy, F: FnMut(T, U) -> V>(self, other: Matrix<U, N, M>, mut f: F) -> Matrix<V, N, M> {
        Matrix::from_fn(|row, column| f(self.rows[row][column], other.rows[row][column]))
    }
}

impl<T: Numeric, const N: usize, const M: usize> Matrix<T, N, M> {
    /// Create a matrix with all elements set to 0
    #[inline(always)]
    #[must_use]
    pub fn zero() -> Self {
        Self::splat(T::zero())
    }

    /// Get the component-wise minimum of 2 matrices
    #[inline]
    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a.min(b))
    }

    /// Get the component-wise maximum of 2 matrices
    #[inline]
    #[must_use]
    pub fn max(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a.max(b))
    }

    /// Clamp each component between the corresponding components of `min` and `max`
    #[inline]
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Clamp each component between 2 scalars
    #[inline]
    #[must_use]
    pub fn clamp_scalar(self, min: T, max: T) -> Self {
        self.map(|val| val.clamp(min, max))
    }

    /// Smallest component of the matrix
    #[inline]
    #[must_use]
    pub fn min_component(self) -> T {
        self.as_slice().iter().fold(T::MAX, |acc, &val| acc.min(val))
    }

    /// Largest component of the matrix
    #[inline]
    #[must_use]
    pub fn max_component(self) -> T {
        self.as_slice().iter().fold(T::MIN, |acc, &val| acc.max(val))
    }

    /// Linearly interpolate between 2 matrices: `self + t * (other - self)`
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }

    /// Multiply each component with the corresponding component of `rhs` (hadamard product)
    #[inline]
    #[must_use]
    pub fn mul_elem(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a * b)
    }

    /// Sum of the products of all corresponding components.
    ///
    /// For vectors this is the dot product.
    #[inline]
    #[must_use]
    pub fn dot(self, rhs: Self) -> T {
        let mut res = T::zero();
        for (a, b) in self.as_slice().iter().zip(rhs.as_slice()) {
            res += *a * *b;
        }
        res
    }

    /// Calculate the squared length (squared euclidean/frobenius norm)
    #[inline]
    #[must_use]
    pub fn len_sq(self) -> T {
        self.dot(self)
    }

    /// Calculate the squared distance between 2 vectors
    #[inline]
    #[must_use]
    pub fn dist_sq(self, other: Self) -> T {
        (other - self).len_sq()
    }
}

impl<T: Real, const N: usize, const M: usize> Matrix<T, N, M> {
    /// Calculate the length (euclidean/frobenius norm)
    #[inline]
    #[must_use]
    pub fn len(self) -> T {
        self.len_sq().sqrt()
    }

    /// Calculate the distance between 2 vectors
    #[inline]
    #[must_use]
    pub fn dist(self, other: Self) -> T {
        (other - self).len()
    }

    /// Normalize the vector.
    ///
    /// The result is undefined (non-finite) for a zero-length vector, use [`Matrix::try_normalize`] or [`Matrix::normalize_or`] when the length is not known to be non-zero.
    #[inline]
    #[must_use]
    pub fn normalize(self) -> Self {
        self * self.len_sq().rsqrt()
    }

    /// Normalize the vector, or return `or` if the length is 0
    #[inline]
    #[must_use]
    pub fn normalize_or(self, or: Self) -> Self {
        let len_sq = self.len_sq();
        if len_sq.is_zero() { or } else { self * len_sq.rsqrt() }
    }

    /// Normalize the vector, fails when the length is not larger than `epsilon`
    #[inline]
    pub fn try_normalize(self, epsilon: T) -> error::Result<Self> {
        let len = self.len();
        if len > epsilon {
            Ok(self / len)
        } else {
            Err(MathError::ZeroLengthVector { length: len.to_f64() })
        }
    }

    /// Check if the vector is normalized, given an `epsilon`
    #[inline]
    #[must_use]
    pub fn is_close_to_normalized(self, epsilon: T) -> bool {
        self.len_sq().is_close_to(T::one(), epsilon)
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl<T: Copy, const N: usize, const M: usize> Index<usize> for Matrix<T, N, M> {
    type Output = T;

    /// Index into the matrix, with the index in row-major order
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T: Copy, const N: usize, const M: usize> IndexMut<usize> for Matrix<T, N, M> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Copy, const N: usize, const M: usize> Index<(usize, usize)> for Matrix<T, N, M> {
    type Output = T;

    /// Index into the matrix, using `(row, column)`
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.rows[index.0][index.1]
    }
}

impl<T: Copy, const N: usize, const M: usize> IndexMut<(usize, usize)> for Matrix<T, N, M> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.rows[index.0][index.1]
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl<T: Signed, const N: usize, const M: usize> Neg for Matrix<T, N, M> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.map(|val| -val)
    }
}

impl<T: Numeric, const N: usize, const M: usize> Add for Matrix<T, N, M> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl<T: Numeric, const N: usize, const M: usize> AddAssign for Matrix<T, N, M> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Numeric, const N: usize, const M: usize> Sub for Matrix<T, N, M> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl<T: Numeric, const N: usize, const M: usize> SubAssign for Matrix<T, N, M> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

//--------------------------------------------------------------

impl<T: Numeric, const N: usize, const M: usize> Mul<T> for Matrix<T, N, M> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|val| val * rhs)
    }
}

impl<T: Numeric, const N: usize, const M: usize> MulAssign<T> for Matrix<T, N, M> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Numeric, const N: usize, const M: usize> Div<T> for Matrix<T, N, M> {
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        self.map(|val| val / rhs)
    }
}

impl<T: Numeric, const N: usize, const M: usize> DivAssign<T> for Matrix<T, N, M> {
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

macro_rules! matrix_pre_multiplication {
    {$($ty:ty),*} => {
        $(
            impl<const N: usize, const M: usize> Mul<Matrix<$ty, N, M>> for $ty {
                type Output = Matrix<$ty, N, M>;

                fn mul(self, rhs: Matrix<$ty, N, M>) -> Self::Output {
                    rhs * self
                }
            }
        )*
    };
}
matrix_pre_multiplication!{ i32, f32, f64 }

//--------------------------------------------------------------

impl<T: Numeric, const N: usize, const M: usize, const P: usize> Mul<Matrix<T, M, P>> for Matrix<T, N, M> {
    type Output = Matrix<T, N, P>;

    fn mul(self, rhs: Matrix<T, M, P>) -> Self::Output {
        Matrix::from_fn(|row, column| {
            let mut sum = T::zero();
            for k in 0..M {
                sum += self.rows[row][k] * rhs.rows[k][column];
            }
            sum
        })
    }
}

impl<T: Numeric, const N: usize, const M: usize> MulAssign<Matrix<T, M, M>> for Matrix<T, N, M> {
    fn mul_assign(&mut self, rhs: Matrix<T, M, M>) {
        *self = *self * rhs;
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl<T: Numeric, const N: usize, const M: usize> Default for Matrix<T, N, M> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Copy, const N: usize, const M: usize> From<[[T; M]; N]> for Matrix<T, N, M> {
    fn from(rows: [[T; M]; N]) -> Self {
        Self::from_rows(rows)
    }
}

impl<T: Copy, const N: usize, const M: usize> From<Matrix<T, N, M>> for [[T; M]; N] {
    fn from(mat: Matrix<T, N, M>) -> Self {
        mat.rows
    }
}

impl<T: Numeric, const N: usize, const M: usize> ApproxEq for Matrix<T, N, M> {
    type Epsilon = T;

    fn is_close_to(self, rhs: Self, epsilon: Self::Epsilon) -> bool {
        self.as_slice().iter().zip(rhs.as_slice()).all(|(a, b)| a.is_close_to(*b, epsilon))
    }
}

impl<T: Numeric, const N: usize, const M: usize> ApproxZero for Matrix<T, N, M> {
    type Epsilon = T;

    fn is_close_to_zero(self, epsilon: Self::Epsilon) -> bool {
        self.as_slice().iter().all(|val| val.is_close_to_zero(epsilon))
    }
}

impl<T: Copy + Display, const N: usize, const M: usize> Display for Matrix<T, N, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (row_idx, row) in self.rows.iter().enumerate() {
            if row_idx != 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (idx, val) in row.iter().enumerate() {
                if idx != 0 {
                    f.write_str(", ")?;
                }
                val.fmt(f)?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<f32, 2, 3> {
        Matrix::from_rows([[1.0, 2.0, 3.0],
                           [4.0, 5.0, 6.0]])
    }

    #[test]
    fn row_major_indexing() {
        let mat = sample();
        assert_eq!(mat[4], 5.0);
        assert_eq!(mat[(1, 1)], 5.0);
        assert_eq!(mat[2], mat[(0, 2)]);
        assert_eq!(mat.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(Matrix::<f32, 2, 3>::from_slice(mat.as_slice()), mat);
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_panics() {
        let mat = sample();
        let _ = mat[6];
    }

    #[test]
    fn rows_and_columns() {
        let mut mat = sample();
        assert_eq!(mat.row(1), RowVec3::new(4.0, 5.0, 6.0));
        assert_eq!(mat.column(2), Vec2::new(3.0, 6.0));

        mat.set_column(0, Vec2::new(-1.0, -4.0));
        mat.set_row(0, RowVec3::new(7.0, 8.0, 9.0));
        assert_eq!(mat, Matrix::from_rows([[7.0, 8.0, 9.0], [-4.0, 5.0, 6.0]]));
        assert_eq!(Matrix::from_columns([[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]]), sample());
    }

    #[test]
    fn transpose_twice_is_identity() {
        let mat = sample();
        let transposed : Matrix<f32, 3, 2> = mat.transpose();
        assert_eq!(transposed[(2, 1)], 6.0);
        assert_eq!(transposed.transpose(), mat);
    }

    #[test]
    fn element_wise_arithmetic() {
        let a = sample();
        let b = Matrix::splat(1.0f32);
        assert_eq!(a + b - b, a);
        assert_eq!((a * 2.0)[5], 12.0);
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!((a / 2.0)[0], 0.5);
        assert_eq!(-a + a, Matrix::zero());

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
        c *= 3.0;
        c /= 3.0;
        assert_eq!(c, b);
    }

    #[test]
    fn matrix_product() {
        let a = sample();
        let b : Matrix<f32, 3, 2> = Matrix::from_rows([[7.0, 8.0],
                                                       [9.0, 10.0],
                                                       [11.0, 12.0]]);
        let res : Mat2<f32> = a * b;
        assert_eq!(res, Mat2::from_rows([[58.0, 64.0], [139.0, 154.0]]));

        let v = Vec3::new(1.0, 0.0, -1.0);
        assert_eq!(a * v, Vec2::new(-2.0, -2.0));

        let row = RowVec2::new(1.0, 1.0);
        assert_eq!(row * a, RowVec3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn integer_matrices() {
        let a = Mat2::from_rows([[1i32, 2], [3, 4]]);
        assert_eq!(a * Mat2::identity(), a);
        assert_eq!(a * a, Mat2::from_rows([[7, 10], [15, 22]]));
        assert_eq!(a.determinant(), -2);
    }

    #[test]
    fn min_max_clamp_lerp() {
        let a = Vec3::new(1.0f32, 5.0, -2.0);
        let b = Vec3::new(3.0f32, 0.0, -1.0);
        assert_eq!(a.min(b), Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(a.max(b), Vec3::new(3.0, 5.0, -1.0));
        assert_eq!(a.clamp(Vec3::splat(0.0), Vec3::splat(2.0)), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(a.clamp_scalar(-1.0, 1.0), Vec3::new(1.0, 1.0, -1.0));
        assert_eq!(a.lerp(b, 0.5), Vec3::new(2.0, 2.5, -1.5));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.min_component(), -2.0);
        assert_eq!(a.max_component(), 5.0);
    }

    #[test]
    fn normalize() {
        let v = Vec3::new(3.0f32, 0.0, 4.0);
        assert!(v.normalize().is_close_to(Vec3::new(0.6, 0.0, 0.8), 1e-6));
        assert_eq!(Vec3::<f32>::zero().normalize_or(Vec3::unit_y()), Vec3::unit_y());
        assert!(Vec3::<f32>::zero().try_normalize(1e-6).is_err());
        assert!(v.try_normalize(1e-6).unwrap().is_close_to_normalized(1e-6));
    }

    #[test]
    fn display() {
        let mat = Mat2::from_rows([[1, 2], [3, 4]]);
        assert_eq!(format!("{mat}"), "[[1, 2], [3, 4]]");
    }
}
