use criterion::{criterion_group, criterion_main, Criterion, black_box};

use vela_common::collections::AlignedArray;
use vela_simd::Mat4A;

fn aligned_array_new(c: &mut Criterion) {
    c.bench_function("AlignedArray::with_capacity(64)", |b| b.iter(|| {
        AlignedArray::<Mat4A>::with_capacity(black_box(64))
    }));
    c.bench_function("Vec::with_capacity(64)", |b| b.iter(|| {
        Vec::<Mat4A>::with_capacity(black_box(64))
    }));
}

fn aligned_array_push(c: &mut Criterion) {
    c.bench_function("AlignedArray::push(100) no reserve", |b| b.iter(|| {
        let mut arr = AlignedArray::<Mat4A>::new();
        for _ in 0..100 {
            arr.push(black_box(Mat4A::identity()));
        }
        arr
    }));
    c.bench_function("AlignedArray::push(100) reserve", |b| b.iter(|| {
        let mut arr = AlignedArray::<Mat4A>::new();
        arr.reserve(100);
        for _ in 0..100 {
            arr.push(black_box(Mat4A::identity()));
        }
        arr
    }));
    c.bench_function("Vec::push(100) no reserve", |b| b.iter(|| {
        let mut arr = Vec::<Mat4A>::new();
        for _ in 0..100 {
            arr.push(black_box(Mat4A::identity()));
        }
        arr
    }));
}

criterion_group!(aligned_array, aligned_array_new, aligned_array_push);
criterion_main!(aligned_array);
