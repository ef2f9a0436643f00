//! Portable fallback, forwarding to the generic `vela_math` kernel
use vela_math::{Mat4, Vec4};

use crate::{Vec4A, Mat4A};

#[inline]
pub fn vec_add(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    (Vec4::from(*lhs) + Vec4::from(*rhs)).into()
}

#[inline]
pub fn vec_sub(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    (Vec4::from(*lhs) - Vec4::from(*rhs)).into()
}

/// Component-wise multiply
#[inline]
pub fn vec_mul(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    Vec4::from(*lhs).mul_elem(Vec4::from(*rhs)).into()
}

#[inline]
pub fn vec_scale(vec: &Vec4A, scale: f32) -> Vec4A {
    (Vec4::from(*vec) * scale).into()
}

#[inline]
pub fn vec_min(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    Vec4::from(*lhs).min(Vec4::from(*rhs)).into()
}

#[inline]
pub fn vec_max(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    Vec4::from(*lhs).max(Vec4::from(*rhs)).into()
}

#[inline]
pub fn vec_dot(lhs: &Vec4A, rhs: &Vec4A) -> f32 {
    Vec4::from(*lhs).dot(Vec4::from(*rhs))
}

#[inline]
pub fn mat_transpose(mat: &Mat4A) -> Mat4A {
    Mat4::from(*mat).transpose().into()
}

#[inline]
pub fn mat_mul(lhs: &Mat4A, rhs: &Mat4A) -> Mat4A {
    (Mat4::from(*lhs) * Mat4::from(*rhs)).into()
}

#[inline]
pub fn mat_mul_vec(mat: &Mat4A, vec: &Vec4A) -> Vec4A {
    (Mat4::from(*mat) * Vec4::from(*vec)).into()
}

/// Calculate the adjugate and determinant of the matrix
#[inline]
pub fn mat_adjugate(mat: &Mat4A) -> (Mat4A, f32) {
    let mat = Mat4::from(*mat);
    let cofactor = mat.cofactor();
    let det = mat.row(0).dot(cofactor.row(0));
    (cofactor.transpose().into(), det)
}
