//! Implementations of the 4-wide kernels per instruction set.
//!
//! [`Vec4A`] and [`Mat4A`] always use the strategy of [`DEF_BACKEND_TYPE`](crate::DEF_BACKEND_TYPE), these modules expose every
//! strategy that is available for the target, so they can be compared against each other.
#![allow(unused_unsafe)]

use cfg_if::cfg_if;

use crate::{Vec4A, Mat4A};

pub mod scalar;

/// Const-evaluable equivalent of `_MM_SHUFFLE`, which is not stable as a const fn
#[allow(dead_code, non_snake_case)]
pub(crate) const fn _MM_SHUFFLE(z: u32, y: u32, x: u32, w: u32) -> i32 {
    ((z << 6) | (y << 4) | (x << 2) | w) as i32
}

cfg_if! {
    if #[cfg(all(feature = "simd", target_arch = "x86_64"))] {
        pub mod sse;
        pub mod avx;

        pub(crate) use sse::{vec_add, vec_sub, vec_mul, vec_scale, vec_min, vec_max, vec_dot, mat_transpose};
    } else {
        pub(crate) use scalar::{vec_add, vec_sub, vec_mul, vec_scale, vec_min, vec_max, vec_dot, mat_transpose};
    }
}

cfg_if! {
    if #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx"))] {
        #[inline(always)]
        pub(crate) fn mat_mul(lhs: &Mat4A, rhs: &Mat4A) -> Mat4A {
            // SAFETY: the crate is built with avx enabled
            unsafe { avx::mat_mul(lhs, rhs) }
        }

        #[inline(always)]
        pub(crate) fn mat_mul_vec(mat: &Mat4A, vec: &Vec4A) -> Vec4A {
            // SAFETY: the crate is built with avx enabled
            unsafe { avx::mat_mul_vec(mat, vec) }
        }

        #[inline(always)]
        pub(crate) fn mat_adjugate(mat: &Mat4A) -> (Mat4A, f32) {
            // SAFETY: the crate is built with avx enabled
            unsafe { avx::mat_adjugate(mat) }
        }
    } else if #[cfg(all(feature = "simd", target_arch = "x86_64"))] {
        pub(crate) use sse::{mat_mul, mat_mul_vec, mat_adjugate};
    } else {
        pub(crate) use scalar::{mat_mul, mat_mul_vec, mat_adjugate};
    }
}
