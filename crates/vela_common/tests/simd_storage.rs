use vela_common::{alloc::is_aligned_to, prelude::*};
use vela_simd::{Mat4A, Vec4A};

#[test]
fn matrices_stay_aligned() {
    let mut arr = AlignedArray::<Mat4A>::new();
    for i in 0..33 {
        let mut mat = Mat4A::identity();
        mat[(0, 3)] = i as f32;
        arr.push(mat);
    }

    for (i, mat) in arr.iter().enumerate() {
        assert!(is_aligned_to(mat.as_ptr(), 64));
        assert_eq!(mat[(0, 3)], i as f32);
    }

    // Kernels load the rows with aligned loads, so this also exercises the alignment
    let product = arr.iter().fold(Mat4A::identity(), |acc, mat| acc * *mat);
    assert_eq!(product[(0, 3)], (0..33).sum::<i32>() as f32);
}

#[test]
fn vectors_stay_aligned_after_growing() {
    let mut arr : AlignedArray<Vec4A> = (0..7).map(|i| Vec4A::splat(i as f32)).collect();
    arr.extend_from_slice(&[Vec4A::splat(-1.0); 20]);

    assert_eq!(arr.len(), 27);
    assert!(is_aligned_to(arr.as_ptr(), UPLOAD_ALIGN));
    assert!(arr.iter().all(|vec| is_aligned_to(vec.as_ptr(), 16)));
    assert_eq!(arr[3].dot(Vec4A::splat(1.0)), 12.0);
}

#[test]
fn upload_buffer_of_floats() {
    let mut buffer = AlignedArray::<f32>::with_capacity(16);
    buffer.extend_from_slice(Mat4A::identity().as_array());
    assert!(is_aligned_to(buffer.as_ptr(), UPLOAD_ALIGN));
    assert_eq!(buffer.iter().sum::<f32>(), 4.0);
}
