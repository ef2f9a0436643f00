use core::fmt::Display;

use cfg_if::cfg_if;

/// Instruction set used to implement the 4-wide kernels
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BackendType {
    /// Portable fallback, implemented on top of the generic `vela_math` types
    Scalar,

    // x86-64
    /// 128-bit strategies, always available on x86-64
    SSE,
    /// 256-bit strategies for the matrix multiply, inverse and matrix-vector multiply
    AVX,
}

impl Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Scalar => f.write_str("scalar"),
            BackendType::SSE    => f.write_str("SSE"),
            BackendType::AVX    => f.write_str("AVX"),
        }
    }
}

cfg_if! {
    if #[cfg(all(feature = "simd", target_arch = "x86_64", target_feature = "avx"))] {
        /// Backend selected when building the crate
        pub const DEF_BACKEND_TYPE : BackendType = BackendType::AVX;
    } else if #[cfg(all(feature = "simd", target_arch = "x86_64"))] {
        /// Backend selected when building the crate
        pub const DEF_BACKEND_TYPE : BackendType = BackendType::SSE;
    } else {
        /// Backend selected when building the crate
        pub const DEF_BACKEND_TYPE : BackendType = BackendType::Scalar;
    }
}

/// Check if the current CPU can run the given backend.
///
/// This is a runtime check, the kernels used by [`Vec4A`](crate::Vec4A) and [`Mat4A`](crate::Mat4A) are always the ones of [`DEF_BACKEND_TYPE`].
pub fn has_intrin(backend: BackendType) -> bool {
    match backend {
        BackendType::Scalar => true,
        BackendType::SSE => cfg!(all(feature = "simd", target_arch = "x86_64")),
        BackendType::AVX => has_avx(),
    }
}

cfg_if! {
    if #[cfg(all(feature = "simd", target_arch = "x86_64"))] {
        fn has_avx() -> bool {
            std::is_x86_feature_detected!("avx")
        }
    } else {
        fn has_avx() -> bool {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backend_is_supported() {
        assert!(has_intrin(DEF_BACKEND_TYPE));
        assert!(has_intrin(BackendType::Scalar));
        assert_eq!(format!("{}", BackendType::AVX), "AVX");
    }
}
