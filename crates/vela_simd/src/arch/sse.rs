//! 128-bit strategies, SSE2 is part of the x86-64 baseline, so these are always available
use core::arch::x86_64::*;
use super::_MM_SHUFFLE;

use crate::{Vec4A, Mat4A};

// Lane selections used by the cofactor expansion, see `minors`
const SEL_1000 : i32 = _MM_SHUFFLE(0, 0, 0, 1);
const SEL_2211 : i32 = _MM_SHUFFLE(1, 1, 2, 2);
const SEL_3332 : i32 = _MM_SHUFFLE(2, 3, 3, 3);

const SPLAT_0 : i32 = _MM_SHUFFLE(0, 0, 0, 0);
const SPLAT_1 : i32 = _MM_SHUFFLE(1, 1, 1, 1);
const SPLAT_2 : i32 = _MM_SHUFFLE(2, 2, 2, 2);
const SPLAT_3 : i32 = _MM_SHUFFLE(3, 3, 3, 3);

#[inline(always)]
pub(crate) fn load(vec: &Vec4A) -> __m128 {
    // SAFETY: `Vec4A` is 16-byte aligned
    unsafe { _mm_load_ps(vec.as_ptr()) }
}

#[inline(always)]
pub(crate) fn store(val: __m128) -> Vec4A {
    let mut res = Vec4A::zero();
    // SAFETY: `Vec4A` is 16-byte aligned
    unsafe { _mm_store_ps(res.as_mut_ptr(), val) };
    res
}

#[inline(always)]
pub(crate) fn load_rows(mat: &Mat4A) -> [__m128; 4] {
    [load(&mat.rows[0]), load(&mat.rows[1]), load(&mat.rows[2]), load(&mat.rows[3])]
}

#[inline(always)]
pub(crate) fn store_rows(rows: [__m128; 4]) -> Mat4A {
    Mat4A { rows: [store(rows[0]), store(rows[1]), store(rows[2]), store(rows[3])] }
}

/// Sum all 4 lanes
#[inline(always)]
pub(crate) fn horizontal_sum(val: __m128) -> f32 {
    unsafe {
        let high = _mm_movehl_ps(val, val);
        let sums = _mm_add_ps(val, high);
        let odd = _mm_shuffle_ps::<SPLAT_1>(sums, sums);
        _mm_cvtss_f32(_mm_add_ss(sums, odd))
    }
}

#[inline(always)]
pub(crate) fn transpose_rows([r0, r1, r2, r3]: [__m128; 4]) -> [__m128; 4] {
    unsafe {
        let t0 = _mm_unpacklo_ps(r0, r1);
        let t1 = _mm_unpacklo_ps(r2, r3);
        let t2 = _mm_unpackhi_ps(r0, r1);
        let t3 = _mm_unpackhi_ps(r2, r3);
        [
            _mm_movelh_ps(t0, t1),
            _mm_movehl_ps(t1, t0),
            _mm_movelh_ps(t2, t3),
            _mm_movehl_ps(t3, t2),
        ]
    }
}

/// 2x2 minors of the rows `top` and `bottom` needed to expand the 3x3 minors along a third row.
///
/// The lanes of the 3 results hold the minors of columns `(2,3), (2,3), (1,3), (1,2)`, `(1,3), (0,3), (0,3), (0,2)` and `(1,2), (0,2), (0,1), (0,1)`
#[inline(always)]
pub(crate) fn minors(top: __m128, bottom: __m128) -> [__m128; 3] {
    unsafe {
        let top_1000 = _mm_shuffle_ps::<SEL_1000>(top, top);
        let top_2211 = _mm_shuffle_ps::<SEL_2211>(top, top);
        let top_3332 = _mm_shuffle_ps::<SEL_3332>(top, top);
        let bottom_1000 = _mm_shuffle_ps::<SEL_1000>(bottom, bottom);
        let bottom_2211 = _mm_shuffle_ps::<SEL_2211>(bottom, bottom);
        let bottom_3332 = _mm_shuffle_ps::<SEL_3332>(bottom, bottom);

        [
            _mm_sub_ps(_mm_mul_ps(top_2211, bottom_3332), _mm_mul_ps(top_3332, bottom_2211)),
            _mm_sub_ps(_mm_mul_ps(top_1000, bottom_3332), _mm_mul_ps(top_3332, bottom_1000)),
            _mm_sub_ps(_mm_mul_ps(top_1000, bottom_2211), _mm_mul_ps(top_2211, bottom_1000)),
        ]
    }
}

/// Unsigned 3x3 minors of `row` and the 2 rows `minors` were calculated from, for each excluded column
#[inline(always)]
pub(crate) fn expand_minors(row: __m128, [m0, m1, m2]: [__m128; 3]) -> __m128 {
    unsafe {
        let row_1000 = _mm_shuffle_ps::<SEL_1000>(row, row);
        let row_2211 = _mm_shuffle_ps::<SEL_2211>(row, row);
        let row_3332 = _mm_shuffle_ps::<SEL_3332>(row, row);

        let res = _mm_sub_ps(_mm_mul_ps(row_1000, m0), _mm_mul_ps(row_2211, m1));
        _mm_add_ps(res, _mm_mul_ps(row_3332, m2))
    }
}

#[inline(always)]
pub(crate) fn even_signs() -> __m128 {
    unsafe { _mm_setr_ps(1.0, -1.0, 1.0, -1.0) }
}

#[inline(always)]
pub(crate) fn odd_signs() -> __m128 {
    unsafe { _mm_setr_ps(-1.0, 1.0, -1.0, 1.0) }
}

/// Turn the cofactor rows into the adjugate and determinant
#[inline(always)]
pub(crate) fn finish_adjugate(first_row: __m128, cofactors: [__m128; 4]) -> (Mat4A, f32) {
    let det = horizontal_sum(unsafe { _mm_mul_ps(first_row, cofactors[0]) });
    (store_rows(transpose_rows(cofactors)), det)
}

//------------------------------------------------------------------------------------------------------------------------------

#[inline]
pub fn vec_add(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    store(unsafe { _mm_add_ps(load(lhs), load(rhs)) })
}

#[inline]
pub fn vec_sub(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    store(unsafe { _mm_sub_ps(load(lhs), load(rhs)) })
}

/// Component-wise multiply
#[inline]
pub fn vec_mul(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    store(unsafe { _mm_mul_ps(load(lhs), load(rhs)) })
}

#[inline]
pub fn vec_scale(vec: &Vec4A, scale: f32) -> Vec4A {
    store(unsafe { _mm_mul_ps(load(vec), _mm_set1_ps(scale)) })
}

#[inline]
pub fn vec_min(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    store(unsafe { _mm_min_ps(load(lhs), load(rhs)) })
}

#[inline]
pub fn vec_max(lhs: &Vec4A, rhs: &Vec4A) -> Vec4A {
    store(unsafe { _mm_max_ps(load(lhs), load(rhs)) })
}

#[inline]
pub fn vec_dot(lhs: &Vec4A, rhs: &Vec4A) -> f32 {
    horizontal_sum(unsafe { _mm_mul_ps(load(lhs), load(rhs)) })
}

#[inline]
pub fn mat_transpose(mat: &Mat4A) -> Mat4A {
    store_rows(transpose_rows(load_rows(mat)))
}

/// Each row of the result is the sum of the rows of `rhs`, scaled by the elements of the corresponding row in `lhs`
#[inline]
pub fn mat_mul(lhs: &Mat4A, rhs: &Mat4A) -> Mat4A {
    let [b0, b1, b2, b3] = load_rows(rhs);
    let rows = load_rows(lhs).map(|row| unsafe {
        let res = _mm_mul_ps(_mm_shuffle_ps::<SPLAT_0>(row, row), b0);
        let res = _mm_add_ps(res, _mm_mul_ps(_mm_shuffle_ps::<SPLAT_1>(row, row), b1));
        let res = _mm_add_ps(res, _mm_mul_ps(_mm_shuffle_ps::<SPLAT_2>(row, row), b2));
        _mm_add_ps(res, _mm_mul_ps(_mm_shuffle_ps::<SPLAT_3>(row, row), b3))
    });
    store_rows(rows)
}

/// The result is the sum of the columns of `mat`, scaled by the elements of `vec`
#[inline]
pub fn mat_mul_vec(mat: &Mat4A, vec: &Vec4A) -> Vec4A {
    let [c0, c1, c2, c3] = transpose_rows(load_rows(mat));
    let v = load(vec);
    unsafe {
        let res = _mm_mul_ps(c0, _mm_shuffle_ps::<SPLAT_0>(v, v));
        let res = _mm_add_ps(res, _mm_mul_ps(c1, _mm_shuffle_ps::<SPLAT_1>(v, v)));
        let res = _mm_add_ps(res, _mm_mul_ps(c2, _mm_shuffle_ps::<SPLAT_2>(v, v)));
        store(_mm_add_ps(res, _mm_mul_ps(c3, _mm_shuffle_ps::<SPLAT_3>(v, v))))
    }
}

/// Calculate the adjugate and determinant of the matrix, using cofactor expansion
#[inline]
pub fn mat_adjugate(mat: &Mat4A) -> (Mat4A, f32) {
    let [m0, m1, m2, m3] = load_rows(mat);
    let lower = minors(m2, m3);
    let upper = minors(m0, m1);

    let cofactors = unsafe { [
        _mm_mul_ps(expand_minors(m1, lower), even_signs()),
        _mm_mul_ps(expand_minors(m0, lower), odd_signs()),
        _mm_mul_ps(expand_minors(m3, upper), even_signs()),
        _mm_mul_ps(expand_minors(m2, upper), odd_signs()),
    ] };
    finish_adjugate(m0, cofactors)
}
