//! Backend abstraction over the 4-wide `f32` kernels.
//!
//! Code written against [`Float4Kernel`] can be instantiated with either the generic `vela_math` types ([`ScalarKernel`]) or the
//! aligned types of this crate ([`SimdKernel`]), which is how the backends are compared in tests and benchmarks.
use core::fmt::Debug;

use vela_math::{error, Mat4, Vec4};

use crate::{BackendType, Mat4A, Vec4A, DEF_BACKEND_TYPE};

pub trait Float4Kernel {
    type Vector : Copy + Debug;
    type Matrix : Copy + Debug;

    /// Backend used to implement the operations
    const BACKEND : BackendType;

    fn vector(vals: [f32; 4]) -> Self::Vector;
    fn vector_to_array(vec: Self::Vector) -> [f32; 4];
    fn matrix(rows: [[f32; 4]; 4]) -> Self::Matrix;
    fn matrix_to_rows(mat: Self::Matrix) -> [[f32; 4]; 4];

    fn add(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector;
    fn sub(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector;
    fn scale(vec: Self::Vector, scale: f32) -> Self::Vector;
    fn dot(lhs: Self::Vector, rhs: Self::Vector) -> f32;
    fn min(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector;
    fn max(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector;
    fn lerp(from: Self::Vector, to: Self::Vector, t: f32) -> Self::Vector;

    fn mul(lhs: Self::Matrix, rhs: Self::Matrix) -> Self::Matrix;
    fn mul_vec(mat: Self::Matrix, vec: Self::Vector) -> Self::Vector;
    fn transpose(mat: Self::Matrix) -> Self::Matrix;
    fn mat_min(lhs: Self::Matrix, rhs: Self::Matrix) -> Self::Matrix;
    fn mat_max(lhs: Self::Matrix, rhs: Self::Matrix) -> Self::Matrix;
    fn mat_clamp(mat: Self::Matrix, min: Self::Matrix, max: Self::Matrix) -> Self::Matrix;
    fn determinant(mat: Self::Matrix) -> f32;
    fn inverse(mat: Self::Matrix) -> Self::Matrix;
    fn try_inverse(mat: Self::Matrix, epsilon: f32) -> error::Result<Self::Matrix>;
}

/// Kernel using `Vec4<f32>` and `Mat4<f32>`
pub struct ScalarKernel;

impl Float4Kernel for ScalarKernel {
    type Vector = Vec4<f32>;
    type Matrix = Mat4<f32>;

    const BACKEND : BackendType = BackendType::Scalar;

    fn vector(vals: [f32; 4]) -> Self::Vector { Vec4::from_array(vals) }
    fn vector_to_array(vec: Self::Vector) -> [f32; 4] { vec.to_array() }
    fn matrix(rows: [[f32; 4]; 4]) -> Self::Matrix { Mat4::from_rows(rows) }
    fn matrix_to_rows(mat: Self::Matrix) -> [[f32; 4]; 4] { mat.to_rows() }

    fn add(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector { lhs + rhs }
    fn sub(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector { lhs - rhs }
    fn scale(vec: Self::Vector, scale: f32) -> Self::Vector { vec * scale }
    fn dot(lhs: Self::Vector, rhs: Self::Vector) -> f32 { lhs.dot(rhs) }
    fn min(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector { lhs.min(rhs) }
    fn max(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector { lhs.max(rhs) }
    fn lerp(from: Self::Vector, to: Self::Vector, t: f32) -> Self::Vector { from.lerp(to, t) }

    fn mul(lhs: Self::Matrix, rhs: Self::Matrix) -> Self::Matrix { lhs * rhs }
    fn mul_vec(mat: Self::Matrix, vec: Self::Vector) -> Self::Vector { mat * vec }
    fn transpose(mat: Self::Matrix) -> Self::Matrix { mat.transpose() }
    fn mat_min(lhs: Self::Matrix, rhs: Self::Matrix) -> Self::Matrix { lhs.min(rhs) }
    fn mat_max(lhs: Self::Matrix, rhs: Self::Matrix) -> Self::Matrix { lhs.max(rhs) }
    fn mat_clamp(mat: Self::Matrix, min: Self::Matrix, max: Self::Matrix) -> Self::Matrix { mat.clamp(min, max) }
    fn determinant(mat: Self::Matrix) -> f32 { mat.determinant() }
    fn inverse(mat: Self::Matrix) -> Self::Matrix { mat.inverse() }
    fn try_inverse(mat: Self::Matrix, epsilon: f32) -> error::Result<Self::Matrix> { mat.try_inverse(epsilon) }
}

/// Kernel using [`Vec4A`] and [`Mat4A`], implemented with the strategies of [`DEF_BACKEND_TYPE`]
pub struct SimdKernel;

impl Float4Kernel for SimdKernel {
    type Vector = Vec4A;
    type Matrix = Mat4A;

    const BACKEND : BackendType = DEF_BACKEND_TYPE;

    fn vector(vals: [f32; 4]) -> Self::Vector { Vec4A::from_array(vals) }
    fn vector_to_array(vec: Self::Vector) -> [f32; 4] { vec.to_array() }
    fn matrix(rows: [[f32; 4]; 4]) -> Self::Matrix { Mat4A::from_rows(rows) }
    fn matrix_to_rows(mat: Self::Matrix) -> [[f32; 4]; 4] { mat.to_rows() }

    fn add(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector { lhs + rhs }
    fn sub(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector { lhs - rhs }
    fn scale(vec: Self::Vector, scale: f32) -> Self::Vector { vec * scale }
    fn dot(lhs: Self::Vector, rhs: Self::Vector) -> f32 { lhs.dot(rhs) }
    fn min(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector { lhs.min(rhs) }
    fn max(lhs: Self::Vector, rhs: Self::Vector) -> Self::Vector { lhs.max(rhs) }
    fn lerp(from: Self::Vector, to: Self::Vector, t: f32) -> Self::Vector { from.lerp(to, t) }

    fn mul(lhs: Self::Matrix, rhs: Self::Matrix) -> Self::Matrix { lhs * rhs }
    fn mul_vec(mat: Self::Matrix, vec: Self::Vector) -> Self::Vector { mat * vec }
    fn transpose(mat: Self::Matrix) -> Self::Matrix { mat.transpose() }
    fn mat_min(lhs: Self::Matrix, rhs: Self::Matrix) -> Self::Matrix { lhs.min(rhs) }
    fn mat_max(lhs: Self::Matrix, rhs: Self::Matrix) -> Self::Matrix { lhs.max(rhs) }
    fn mat_clamp(mat: Self::Matrix, min: Self::Matrix, max: Self::Matrix) -> Self::Matrix { mat.clamp(min, max) }
    fn determinant(mat: Self::Matrix) -> f32 { mat.determinant() }
    fn inverse(mat: Self::Matrix) -> Self::Matrix { mat.inverse() }
    fn try_inverse(mat: Self::Matrix, epsilon: f32) -> error::Result<Self::Matrix> { mat.try_inverse(epsilon) }
}
