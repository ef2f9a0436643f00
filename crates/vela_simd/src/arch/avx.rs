//! 256-bit strategies, processing 2 rows per instruction.
//!
//! All functions require AVX support of the CPU running them, either checked at runtime with [`has_intrin`](crate::has_intrin),
//! or guaranteed by building with the `avx` target feature enabled.
use core::arch::x86_64::*;
use super::_MM_SHUFFLE;

use crate::{Vec4A, Mat4A};
use super::sse;

const SPLAT_0 : i32 = _MM_SHUFFLE(0, 0, 0, 0);
const SPLAT_1 : i32 = _MM_SHUFFLE(1, 1, 1, 1);
const SPLAT_2 : i32 = _MM_SHUFFLE(2, 2, 2, 2);
const SPLAT_3 : i32 = _MM_SHUFFLE(3, 3, 3, 3);

const SEL_1000 : i32 = _MM_SHUFFLE(0, 0, 0, 1);
const SEL_2211 : i32 = _MM_SHUFFLE(1, 1, 2, 2);
const SEL_3332 : i32 = _MM_SHUFFLE(2, 3, 3, 3);

/// Load 2 consecutive rows, starting at `row`
#[inline]
#[target_feature(enable = "avx")]
unsafe fn load_row_pair(mat: &Mat4A, row: usize) -> __m256 {
    debug_assert!(row % 2 == 0 && row < 4);
    // `Mat4A` is 64-byte aligned, so each pair of rows is 32-byte aligned
    _mm256_load_ps(mat.as_ptr().add(row * 4))
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn store_row_pair(mat: &mut Mat4A, row: usize, val: __m256) {
    debug_assert!(row % 2 == 0 && row < 4);
    _mm256_store_ps(mat.as_mut_ptr().add(row * 4), val)
}

/// Combine 2 128-bit registers, with `low` in the lower half
#[inline]
#[target_feature(enable = "avx")]
unsafe fn combine(low: __m128, high: __m128) -> __m256 {
    _mm256_insertf128_ps::<1>(_mm256_castps128_ps256(low), high)
}

#[inline]
#[target_feature(enable = "avx")]
unsafe fn split(val: __m256) -> (__m128, __m128) {
    (_mm256_castps256_ps128(val), _mm256_extractf128_ps::<1>(val))
}

/// Multiply 2 matrices, calculating 2 rows of the result at a time.
///
/// # Safety
///
/// The CPU needs to support AVX.
#[target_feature(enable = "avx")]
pub unsafe fn mat_mul(lhs: &Mat4A, rhs: &Mat4A) -> Mat4A {
    let b0 = _mm256_broadcast_ps(&sse::load(&rhs.rows[0]));
    let b1 = _mm256_broadcast_ps(&sse::load(&rhs.rows[1]));
    let b2 = _mm256_broadcast_ps(&sse::load(&rhs.rows[2]));
    let b3 = _mm256_broadcast_ps(&sse::load(&rhs.rows[3]));

    let mut res = Mat4A::zero();
    for row in [0, 2] {
        let a = load_row_pair(lhs, row);
        let sum = _mm256_mul_ps(_mm256_permute_ps::<SPLAT_0>(a), b0);
        let sum = _mm256_add_ps(sum, _mm256_mul_ps(_mm256_permute_ps::<SPLAT_1>(a), b1));
        let sum = _mm256_add_ps(sum, _mm256_mul_ps(_mm256_permute_ps::<SPLAT_2>(a), b2));
        let sum = _mm256_add_ps(sum, _mm256_mul_ps(_mm256_permute_ps::<SPLAT_3>(a), b3));
        store_row_pair(&mut res, row, sum);
    }
    res
}

/// Multiply a matrix with a column vector, reducing the products of 2 rows at a time.
///
/// # Safety
///
/// The CPU needs to support AVX.
#[target_feature(enable = "avx")]
pub unsafe fn mat_mul_vec(mat: &Mat4A, vec: &Vec4A) -> Vec4A {
    let v = _mm256_broadcast_ps(&sse::load(vec));
    let prod01 = _mm256_mul_ps(load_row_pair(mat, 0), v);
    let prod23 = _mm256_mul_ps(load_row_pair(mat, 2), v);

    // lower half: [row0, row2, row0, row2], upper half: [row1, row3, row1, row3]
    let sums = _mm256_hadd_ps(prod01, prod23);
    let sums = _mm256_hadd_ps(sums, sums);

    let (even, odd) = split(sums);
    sse::store(_mm_unpacklo_ps(even, odd))
}

/// 2x2 minors of 2 pairs of rows at once, see [`sse::minors`]
#[inline]
#[target_feature(enable = "avx")]
unsafe fn minors(top: __m256, bottom: __m256) -> [__m256; 3] {
    let top_1000 = _mm256_permute_ps::<SEL_1000>(top);
    let top_2211 = _mm256_permute_ps::<SEL_2211>(top);
    let top_3332 = _mm256_permute_ps::<SEL_3332>(top);
    let bottom_1000 = _mm256_permute_ps::<SEL_1000>(bottom);
    let bottom_2211 = _mm256_permute_ps::<SEL_2211>(bottom);
    let bottom_3332 = _mm256_permute_ps::<SEL_3332>(bottom);

    [
        _mm256_sub_ps(_mm256_mul_ps(top_2211, bottom_3332), _mm256_mul_ps(top_3332, bottom_2211)),
        _mm256_sub_ps(_mm256_mul_ps(top_1000, bottom_3332), _mm256_mul_ps(top_3332, bottom_1000)),
        _mm256_sub_ps(_mm256_mul_ps(top_1000, bottom_2211), _mm256_mul_ps(top_2211, bottom_1000)),
    ]
}

/// Unsigned 3x3 minors of 2 rows at once, see [`sse::expand_minors`]
#[inline]
#[target_feature(enable = "avx")]
unsafe fn expand_minors(rows: __m256, [m0, m1, m2]: [__m256; 3]) -> __m256 {
    let rows_1000 = _mm256_permute_ps::<SEL_1000>(rows);
    let rows_2211 = _mm256_permute_ps::<SEL_2211>(rows);
    let rows_3332 = _mm256_permute_ps::<SEL_3332>(rows);

    let res = _mm256_sub_ps(_mm256_mul_ps(rows_1000, m0), _mm256_mul_ps(rows_2211, m1));
    _mm256_add_ps(res, _mm256_mul_ps(rows_3332, m2))
}

/// Calculate the adjugate and determinant of the matrix, expanding the cofactors of 2 rows at a time.
///
/// # Safety
///
/// The CPU needs to support AVX.
#[target_feature(enable = "avx")]
pub unsafe fn mat_adjugate(mat: &Mat4A) -> (Mat4A, f32) {
    let [m0, m1, m2, m3] = sse::load_rows(mat);

    // minors of rows 2 and 3 in the lower half, of rows 0 and 1 in the upper half
    let minors = minors(combine(m2, m0), combine(m3, m1));

    // rows 0 and 2 start with a positive sign, rows 1 and 3 with a negative sign
    let even = _mm256_mul_ps(expand_minors(combine(m1, m3), minors), _mm256_setr_ps(1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0));
    let odd = _mm256_mul_ps(expand_minors(combine(m0, m2), minors), _mm256_setr_ps(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0));

    let (c0, c2) = split(even);
    let (c1, c3) = split(odd);
    sse::finish_adjugate(m0, [c0, c1, c2, c3])
}
