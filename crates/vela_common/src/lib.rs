//! Common engine utilities shared by the other crates.
//!
//! Currently this provides the aligned allocation primitive and [`AlignedArray`](collections::AlignedArray), used to build
//! collections of over-aligned values (e.g. `Mat4A`) and upload buffers.

pub mod alloc;
pub mod collections;

pub mod prelude;
