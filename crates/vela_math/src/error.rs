use thiserror::Error;

/// Math error
#[derive(Clone, Copy, PartialEq, Debug, Error)]
pub enum MathError {
    /// The matrix cannot be inverted, as its determinant is within the given epsilon of 0
    #[error("singular matrix: |determinant| ({determinant}) is not larger than {epsilon}")]
    SingularMatrix{ determinant: f64, epsilon: f64 },
    /// The vector is too short to be normalized
    #[error("cannot normalize a vector with a length of {length}")]
    ZeroLengthVector{ length: f64 },
}

/// Math result
pub type Result<T> = core::result::Result<T, MathError>;
