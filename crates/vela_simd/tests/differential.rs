// The AVX strategies are only called after checking the CPU supports them
#![allow(unused_unsafe)]

use rand::{rngs::StdRng, Rng, SeedableRng};

use vela_math::{ApproxEq, Mat4, Vec4};
use vela_simd::*;

const ITERATIONS : usize = 256;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x7e1a_0002)
}

fn random_vec(rng: &mut StdRng) -> Vec4A {
    Vec4A::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0))
}

/// Random diagonally dominant matrix, which is always invertible
fn random_invertible(rng: &mut StdRng) -> Mat4A {
    let mut mat = Mat4A::zero();
    for row in 0..4 {
        for column in 0..4 {
            mat[(row, column)] = rng.gen_range(-1.0..1.0);
        }
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        mat[(row, row)] = sign * rng.gen_range(4.0..8.0);
    }
    mat
}

fn close(a: Mat4A, b: Mat4A, epsilon: f32) -> bool {
    a.is_close_to(b, epsilon)
}

#[test]
fn vectors_match_scalar() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let a = random_vec(&mut rng);
        let b = random_vec(&mut rng);
        let t = rng.gen_range(0.0..1.0);
        let sa = Vec4::from(a);
        let sb = Vec4::from(b);

        assert_eq!(Vec4::from(a + b), sa + sb);
        assert_eq!(Vec4::from(a - b), sa - sb);
        assert_eq!(Vec4::from(a * t), sa * t);
        assert_eq!(Vec4::from(a.min(b)), sa.min(sb));
        assert_eq!(Vec4::from(a.max(b)), sa.max(sb));
        assert_eq!(Vec4::from(a.mul_elem(b)), sa.mul_elem(sb));
        assert!(a.dot(b).is_close_to(sa.dot(sb), 1e-3));
        assert!(Vec4::from(a.lerp(b, t)).is_close_to(sa.lerp(sb, t), 1e-4));
    }
}

#[test]
fn matrices_match_scalar() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let a = random_invertible(&mut rng);
        let b = random_invertible(&mut rng);
        let v = random_vec(&mut rng);
        let sa = Mat4::from(a);
        let sb = Mat4::from(b);

        assert_eq!(Mat4::from(a + b), sa + sb);
        assert_eq!(Mat4::from(a.transpose()), sa.transpose());
        assert_eq!(Mat4::from(a.min(b)), sa.min(sb));
        assert_eq!(Mat4::from(a.max(b)), sa.max(sb));
        assert!(Mat4::from(a * b).is_close_to(sa * sb, 1e-3));
        assert!(Vec4::from(a * v).is_close_to(sa * Vec4::from(v), 1e-3));

        let det = a.determinant();
        let scalar_det = sa.determinant();
        assert!((det - scalar_det).abs() <= scalar_det.abs() * 1e-5);
        assert!(Mat4::from(a.inverse()).is_close_to(sa.inverse(), 1e-5));
        assert!((a * a.inverse()).is_close_to_identity(1e-4));
    }
}

#[test]
fn matrix_clamp_matches_scalar() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let mat = random_invertible(&mut rng);
        let bound = random_invertible(&mut rng);
        let lo = bound.min(-bound);
        let hi = bound.max(-bound);

        let simd = SimdKernel::mat_clamp(mat, lo, hi);
        let scalar = ScalarKernel::mat_clamp(Mat4::from(mat), Mat4::from(lo), Mat4::from(hi));
        assert_eq!(Mat4::from(simd), scalar);
        assert_eq!(Mat4::from(mat.clamp(lo, hi)), scalar);

        assert_eq!(Mat4::from(SimdKernel::mat_min(mat, bound)), ScalarKernel::mat_min(Mat4::from(mat), Mat4::from(bound)));
        assert_eq!(Mat4::from(SimdKernel::mat_max(mat, bound)), ScalarKernel::mat_max(Mat4::from(mat), Mat4::from(bound)));
    }
}

#[test]
fn singular_matrices_are_rejected() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let mut mat = random_invertible(&mut rng);
        mat.set_row(3, mat.row(1));
        assert!(mat.determinant().abs() < 1e-3);
        assert!(mat.try_inverse(1e-2).is_err());
    }
}

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
#[test]
fn strategies_agree() {
    let mut rng = rng();
    for _ in 0..ITERATIONS {
        let a = random_invertible(&mut rng);
        let b = random_invertible(&mut rng);
        let v = random_vec(&mut rng);

        let scalar_mul = arch::scalar::mat_mul(&a, &b);
        let sse_mul = arch::sse::mat_mul(&a, &b);
        assert!(close(scalar_mul, sse_mul, 1e-3));

        let (scalar_adj, scalar_det) = arch::scalar::mat_adjugate(&a);
        let (sse_adj, sse_det) = arch::sse::mat_adjugate(&a);
        assert!(close(scalar_adj, sse_adj, 1e-2));
        assert!((scalar_det - sse_det).abs() <= scalar_det.abs() * 1e-5);

        assert!(arch::scalar::mat_mul_vec(&a, &v).is_close_to(arch::sse::mat_mul_vec(&a, &v), 1e-3));

        if has_intrin(BackendType::AVX) {
            // SAFETY: the CPU supports AVX
            let (avx_mul, avx_mul_vec, (avx_adj, avx_det)) = unsafe {
                (arch::avx::mat_mul(&a, &b), arch::avx::mat_mul_vec(&a, &v), arch::avx::mat_adjugate(&a))
            };
            assert!(close(sse_mul, avx_mul, 1e-4));
            assert!(arch::sse::mat_mul_vec(&a, &v).is_close_to(avx_mul_vec, 1e-4));
            assert!(close(sse_adj, avx_adj, 1e-3));
            assert!((sse_det - avx_det).abs() <= sse_det.abs() * 1e-5);
        }
    }
}

#[test]
fn default_backend() {
    assert!(has_intrin(DEF_BACKEND_TYPE));
    assert_eq!(SimdKernel::BACKEND, DEF_BACKEND_TYPE);
    assert_eq!(ScalarKernel::BACKEND, BackendType::Scalar);
}
