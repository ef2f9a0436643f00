use criterion::{criterion_group, criterion_main, Criterion, black_box};

use vela_math::{Mat4, Radians, Vec4};
use vela_simd::*;

fn sample_matrix() -> Mat4<f32> {
    Mat4::perspective(Radians(1.2), 16.0 / 9.0, 0.1, 100.0) * Mat4::rotation_y(Radians(0.4)) * Mat4::translation(1.0, -2.0, 5.0)
}

fn mat_mul(c: &mut Criterion) {
    let a = sample_matrix();
    let b = a.transpose();
    let aa = Mat4A::from(a);
    let ab = Mat4A::from(b);

    c.bench_function("Mat4::mul", |bench| bench.iter(|| black_box(a) * black_box(b)));
    c.bench_function("Mat4A::mul", |bench| bench.iter(|| black_box(aa) * black_box(ab)));

    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        c.bench_function("sse::mat_mul", |bench| bench.iter(|| arch::sse::mat_mul(black_box(&aa), black_box(&ab))));
        if has_intrin(BackendType::AVX) {
            // SAFETY: the CPU supports AVX
            c.bench_function("avx::mat_mul", |bench| bench.iter(|| unsafe { arch::avx::mat_mul(black_box(&aa), black_box(&ab)) }));
        }
    }
}

fn mat_mul_vec(c: &mut Criterion) {
    let m = sample_matrix();
    let v = Vec4::new(1.0, 2.0, 3.0, 1.0);
    let am = Mat4A::from(m);
    let av = Vec4A::from(v);

    c.bench_function("Mat4::mul(Vec4)", |bench| bench.iter(|| black_box(m) * black_box(v)));
    c.bench_function("Mat4A::mul(Vec4A)", |bench| bench.iter(|| black_box(am) * black_box(av)));
}

fn mat_inverse(c: &mut Criterion) {
    let m = sample_matrix();
    let am = Mat4A::from(m);

    c.bench_function("Mat4::inverse", |bench| bench.iter(|| black_box(m).inverse()));
    c.bench_function("Mat4A::inverse", |bench| bench.iter(|| black_box(am).inverse()));
    c.bench_function("Mat4A::try_inverse", |bench| bench.iter(|| black_box(am).try_inverse(1e-6)));

    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    {
        c.bench_function("sse::mat_adjugate", |bench| bench.iter(|| arch::sse::mat_adjugate(black_box(&am))));
        if has_intrin(BackendType::AVX) {
            // SAFETY: the CPU supports AVX
            c.bench_function("avx::mat_adjugate", |bench| bench.iter(|| unsafe { arch::avx::mat_adjugate(black_box(&am)) }));
        }
    }
}

fn vec_dot(c: &mut Criterion) {
    let a = Vec4::new(1.0, -2.0, 3.0, 0.5);
    let b = Vec4::new(4.0, 1.0, -1.0, 2.0);
    let aa = Vec4A::from(a);
    let ab = Vec4A::from(b);

    c.bench_function("Vec4::dot", |bench| bench.iter(|| black_box(a).dot(black_box(b))));
    c.bench_function("Vec4A::dot", |bench| bench.iter(|| black_box(aa).dot(black_box(ab))));
}

criterion_group!(kernel, mat_mul, mat_mul_vec, mat_inverse, vec_dot);
criterion_main!(kernel);
