//! Fixed-size linear algebra for the vela engine
//!
//! All vectors and matrices are built on a single generic [`Matrix`] type, with vectors being the Nx1 (column) and 1xN (row) cases.
//! Matrices are stored row-major and act on column vectors, i.e. `mat * vec`, with the translation in the last column.
//!
//! Unchecked operations (e.g. [`Matrix::normalize`] or [`Mat4::inverse`]) are undefined for degenerate input,
//! use the checked variants ([`Matrix::try_normalize`], [`Mat4::try_inverse`]) when the input is not known to be valid.
//!
//! Features:
//! - `validation`: log a warning when a function is given input that breaks its preconditions, like a non-normalized rotation axis.

mod numeric;
pub use numeric::*;

mod constants;
pub use constants::*;

mod angle;
pub use angle::*;

pub mod error;
pub use error::MathError;

mod mat;
pub use mat::*;

mod transform;
mod euler;

mod quat;
pub use quat::*;

mod aabb;
pub use aabb::*;

mod sphere;
pub use sphere::*;

mod plane;
pub use plane::*;

mod ray;
pub use ray::*;

mod frustum;
pub use frustum::*;
