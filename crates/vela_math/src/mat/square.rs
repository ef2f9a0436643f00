use crate::*;
use vela_logging::{log_verbose, LogCategory};

const LOG_CAT : LogCategory = LogCategory::new_with_sub("Math", "Inverse");

impl<T: Numeric, const N: usize> Matrix<T, N, N> {
    /// Create an identity matrix
    #[inline]
    #[must_use]
    pub fn identity() -> Self {
        Self::from_fn(|row, column| if row == column { T::one() } else { T::zero() })
    }

    /// Create a matrix with `diagonal` on its diagonal and 0 everywhere else
    #[inline]
    #[must_use]
    pub fn from_diagonal(diagonal: Vector<T, N>) -> Self {
        Self::from_fn(|row, column| if row == column { diagonal[row] } else { T::zero() })
    }

    /// Get the diagonal of the matrix
    #[inline]
    #[must_use]
    pub fn diagonal(&self) -> Vector<T, N> {
        Vector::from_fn(|row, _| self[(row, row)])
    }

    /// Calculate the sum of the elements on the diagonal
    #[inline]
    #[must_use]
    pub fn trace(&self) -> T {
        let mut res = T::zero();
        for i in 0..N {
            res += self[(i, i)];
        }
        res
    }

    /// Check if the matrix is an identity matrix, given an `epsilon`
    #[inline]
    #[must_use]
    pub fn is_close_to_identity(&self, epsilon: T) -> bool {
        self.is_close_to(Self::identity(), epsilon)
    }
}

/// Cofactor expansion shared by all square matrices that can be inverted.
///
/// The inverse is calculated as the transposed cofactor matrix (adjugate), scaled by 1 over the determinant, with the
/// determinant being the dot product of the first row and its cofactors.
pub trait CofactorInverse : Sized + Copy {
    type Scalar : Real;

    /// Calculate the matrix of cofactors
    fn cofactor(&self) -> Self;
    /// Transpose the matrix
    fn transposed(&self) -> Self;
    /// Dot product of the first row of `self` and the first row of `other`
    fn first_row_dot(&self, other: &Self) -> Self::Scalar;
    /// Scale all elements
    fn scaled(&self, scale: Self::Scalar) -> Self;

    /// Calculate the adjugate, i.e. the transposed cofactor matrix
    #[inline]
    #[must_use]
    fn adjugate(&self) -> Self {
        self.cofactor().transposed()
    }

    /// Calculate the inverse of the matrix.
    ///
    /// The result is undefined when the matrix is singular, use [`CofactorInverse::try_inverse`] if that can happen.
    #[inline]
    #[must_use]
    fn inverse(&self) -> Self {
        let cofactor = self.cofactor();
        let det = self.first_row_dot(&cofactor);
        cofactor.transposed().scaled(det.rcp())
    }

    /// Calculate the inverse of the matrix, fails if the absolute value of the determinant is not larger than `epsilon`
    fn try_inverse(&self, epsilon: Self::Scalar) -> error::Result<Self> {
        let cofactor = self.cofactor();
        let det = self.first_row_dot(&cofactor);
        if det.abs() > epsilon {
            Ok(cofactor.transposed().scaled(det.rcp()))
        } else {
            log_verbose!(LOG_CAT, "matrix with determinant {:?} is not invertible (epsilon {:?})", det, epsilon);
            Err(MathError::SingularMatrix { determinant: det.to_f64(), epsilon: epsilon.to_f64() })
        }
    }

    /// Invert the matrix in place.
    ///
    /// If the absolute value of the determinant is not larger than `epsilon`, an error is returned and the matrix is left untouched.
    fn try_invert(&mut self, epsilon: Self::Scalar) -> error::Result<()> {
        *self = self.try_inverse(epsilon)?;
        Ok(())
    }
}

macro_rules! impl_cofactor_inverse {
    {$($n:literal),*} => {
        $(
            impl<T: Real> CofactorInverse for Matrix<T, $n, $n> {
                type Scalar = T;

                #[inline]
                fn cofactor(&self) -> Self {
                    Matrix::<T, $n, $n>::cofactor(self)
                }

                #[inline]
                fn transposed(&self) -> Self {
                    self.transpose()
                }

                #[inline]
                fn first_row_dot(&self, other: &Self) -> T {
                    self.row(0).dot(other.row(0))
                }

                #[inline]
                fn scaled(&self, scale: T) -> Self {
                    *self * scale
                }
            }

            impl<T: Real> Matrix<T, $n, $n> {
                /// Calculate the adjugate, i.e. the transposed cofactor matrix
                #[inline]
                #[must_use]
                pub fn adjugate(&self) -> Self {
                    CofactorInverse::adjugate(self)
                }

                /// Calculate the inverse of the matrix.
                ///
                /// The result is undefined when the matrix is singular, use `try_inverse` if that can happen.
                #[inline]
                #[must_use]
                pub fn inverse(&self) -> Self {
                    CofactorInverse::inverse(self)
                }

                /// Calculate the inverse of the matrix, fails if the absolute value of the determinant is not larger than `epsilon`
                #[inline]
                pub fn try_inverse(&self, epsilon: T) -> error::Result<Self> {
                    CofactorInverse::try_inverse(self, epsilon)
                }

                /// Invert the matrix in place, leaving it untouched on failure
                #[inline]
                pub fn try_invert(&mut self, epsilon: T) -> error::Result<()> {
                    CofactorInverse::try_invert(self, epsilon)
                }
            }
        )*
    };
}
impl_cofactor_inverse!{ 2, 3, 4 }

//------------------------------------------------------------------------------------------------------------------------------

impl<T: Numeric> Mat2<T> {
    /// Calculate the determinant
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> T {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

impl<T: Signed> Mat2<T> {
    /// Calculate the matrix of cofactors
    #[inline]
    #[must_use]
    pub fn cofactor(&self) -> Self {
        Self::from_rows([[ self[(1, 1)], -self[(1, 0)]],
                         [-self[(0, 1)],  self[(0, 0)]]])
    }
}

//------------------------------------------------------------------------------------------------------------------------------

impl<T: Numeric> Mat3<T> {
    /// Calculate the determinant
    #[inline]
    #[must_use]
    pub fn determinant(&self) -> T {
        let m = &self.to_rows();
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) +
        m[0][1] * (m[1][2] * m[2][0] - m[1][0] * m[2][2]) +
        m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }
}

impl<T: Signed> Mat3<T> {
    /// Calculate the matrix of cofactors
    #[must_use]
    pub fn cofactor(&self) -> Self {
        let m = &self.to_rows();
        Self::from_rows([
            [
                m[1][1] * m[2][2] - m[1][2] * m[2][1],
              -(m[1][0] * m[2][2] - m[1][2] * m[2][0]),
                m[1][0] * m[2][1] - m[1][1] * m[2][0],
            ],
            [
              -(m[0][1] * m[2][2] - m[0][2] * m[2][1]),
                m[0][0] * m[2][2] - m[0][2] * m[2][0],
              -(m[0][0] * m[2][1] - m[0][1] * m[2][0]),
            ],
            [
                m[0][1] * m[1][2] - m[0][2] * m[1][1],
              -(m[0][0] * m[1][2] - m[0][2] * m[1][0]),
                m[0][0] * m[1][1] - m[0][1] * m[1][0],
            ],
        ])
    }
}

//------------------------------------------------------------------------------------------------------------------------------

/// 2x2 minors of 2 rows of a 4x4 matrix, `mij` being the minor of columns `i` and `j`
struct Minors4<T> {
    m01 : T,
    m02 : T,
    m03 : T,
    m12 : T,
    m13 : T,
    m23 : T,
}

impl<T: Numeric> Minors4<T> {
    fn new(top: &[T; 4], bottom: &[T; 4]) -> Self {
        let minor = |i: usize, j: usize| top[i] * bottom[j] - top[j] * bottom[i];
        Self {
            m01: minor(0, 1),
            m02: minor(0, 2),
            m03: minor(0, 3),
            m12: minor(1, 2),
            m13: minor(1, 3),
            m23: minor(2, 3),
        }
    }

    /// 3x3 determinants of `row` on top of the rows the minors were calculated from, one for each left out column
    fn expand(&self, row: &[T; 4]) -> [T; 4] {
        [
            row[1] * self.m23 - row[2] * self.m13 + row[3] * self.m12,
            row[0] * self.m23 - row[2] * self.m03 + row[3] * self.m02,
            row[0] * self.m13 - row[1] * self.m03 + row[3] * self.m01,
            row[0] * self.m12 - row[1] * self.m02 + row[2] * self.m01,
        ]
    }
}

impl<T: Numeric> Mat4<T> {
    /// Calculate the determinant
    #[must_use]
    pub fn determinant(&self) -> T {
        let m = &self.to_rows();
        let bottom = Minors4::new(&m[2], &m[3]);
        let [c0, c1, c2, c3] = bottom.expand(&m[1]);
        m[0][0] * c0 - m[0][1] * c1 + m[0][2] * c2 - m[0][3] * c3
    }
}

impl<T: Signed> Mat4<T> {
    /// Calculate the matrix of cofactors
    #[must_use]
    pub fn cofactor(&self) -> Self {
        let m = &self.to_rows();
        let top = Minors4::new(&m[0], &m[1]);
        let bottom = Minors4::new(&m[2], &m[3]);

        let signed = |vals: [T; 4], even_row: bool| {
            if even_row {
                [vals[0], -vals[1], vals[2], -vals[3]]
            } else {
                [-vals[0], vals[1], -vals[2], vals[3]]
            }
        };

        Self::from_rows([
            signed(bottom.expand(&m[1]), true),
            signed(bottom.expand(&m[0]), false),
            signed(top.expand(&m[3]), true),
            signed(top.expand(&m[2]), false),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample4() -> Mat4<f64> {
        Mat4::from_rows([[ 2.0, -1.0,  0.0,  3.0],
                         [ 1.0,  4.0, -2.0,  0.5],
                         [ 0.0,  1.0,  3.0, -1.0],
                         [-2.0,  0.0,  1.0,  1.0]])
    }

    #[test]
    fn identity_and_trace() {
        let id = Mat3::<f32>::identity();
        assert_eq!(id.trace(), 3.0);
        assert_eq!(id.diagonal(), Vec3::splat(1.0));
        assert_eq!(Mat3::from_diagonal(Vec3::new(1.0, 2.0, 3.0)).trace(), 6.0);
        assert!(id.is_close_to_identity(0.0));
    }

    #[test]
    fn determinants() {
        assert_eq!(Mat2::from_rows([[3.0, 8.0], [4.0, 6.0]]).determinant(), -14.0);
        assert_eq!(Mat3::from_rows([[6.0, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]]).determinant(), -306.0);
        assert_eq!(Mat4::<f32>::identity().determinant(), 1.0);
        assert_eq!(Mat4::<f32>::identity().cofactor(), Mat4::identity());

        // expanding along the first row has to agree with the cofactor matrix
        let m = sample4();
        assert!(m.determinant().is_close_to(m.row(0).dot(m.cofactor().row(0)), 1e-12));
        assert!((m.transpose().determinant()).is_close_to(m.determinant(), 1e-12));
    }

    #[test]
    fn duplicate_rows_are_singular() {
        let mut m = sample4();
        m.set_row(3, m.row(1));
        assert!(m.determinant().is_close_to_zero(1e-12));

        let before = m;
        let err = m.try_invert(1e-6).unwrap_err();
        assert!(matches!(err, MathError::SingularMatrix { .. }));
        assert_eq!(m, before);

        let m3 = Mat3::from_rows([[1.0f32, 2.0, 3.0], [1.0, 2.0, 3.0], [0.0, 1.0, 0.0]]);
        assert_eq!(m3.determinant(), 0.0);
        assert!(m3.try_inverse(1e-6).is_err());
    }

    #[test]
    fn inverse() {
        let m = sample4();
        assert!((m.inverse() * m).is_close_to_identity(1e-12));
        assert!((m * m.inverse()).is_close_to_identity(1e-12));
        assert_eq!(Mat4::<f32>::identity().inverse(), Mat4::identity());

        let m3 = Mat3::from_rows([[6.0, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]]);
        assert!((m3.try_inverse(1e-9).unwrap() * m3).is_close_to_identity(1e-12));

        let m2 = Mat2::from_rows([[3.0, 8.0], [4.0, 6.0]]);
        assert!((m2.inverse() * m2).is_close_to_identity(1e-12));

        let mut inplace = m;
        inplace.try_invert(1e-9).unwrap();
        assert_eq!(inplace, m.inverse());
        assert!((m.adjugate() / m.determinant()).is_close_to(m.inverse(), 1e-12));
    }
}
