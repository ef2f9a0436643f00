//! Accelerated 4-wide `f32` kernel.
//!
//! [`Vec4A`] and [`Mat4A`] are layout-identical to `Vec4<f32>` and `Mat4<f32>` from `vela_math`, but are aligned to 16 and 64 bytes
//! so they can be loaded directly into SIMD registers.
//!
//! No runtime dynamic dispatch is done, the instruction set is decided at compile time:
//! - with the `simd` feature on x86-64, the SSE strategies are used, and the AVX strategies for the matrix multiply, matrix-vector
//!   multiply and inverse when the crate is built with the `avx` target feature.
//! - otherwise a portable fallback on top of the `vela_math` types is used.
//!
//! All strategies available for the target are exposed in [`arch`], so they can be compared against each other.

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Only 64-bit architectures are supported");

mod backend;
pub mod arch;

mod vec4a;
mod mat4a;
mod kernel;

pub use backend::*;
pub use vec4a::*;
pub use mat4a::*;
pub use kernel::*;
