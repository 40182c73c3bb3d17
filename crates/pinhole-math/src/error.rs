//! Error types for vector, matrix and transform operations.

use thiserror::Error;

/// Errors raised by linear algebra operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Operand shapes or lengths do not match.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    Dimension {
        /// Shape the operation required.
        expected: String,
        /// Shape it was given.
        found: String,
    },

    /// Inverse requested on a matrix whose determinant is (near) zero.
    #[error("matrix is singular (determinant {determinant:e})")]
    Singular {
        /// Determinant or smallest pivot that triggered the failure.
        determinant: f64,
    },

    /// Normalization of a vector with zero length.
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
}

impl MathError {
    pub(crate) fn dimension(expected: impl ToString, found: impl ToString) -> Self {
        MathError::Dimension {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Errors raised while configuring an [`AffineTransform`](crate::AffineTransform).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The forward matrix cannot be inverted, e.g. a zero scale component.
    #[error("invalid transform: {0}")]
    InvalidTransform(#[source] MathError),

    /// A supplied backward matrix is not the inverse of the forward one.
    #[error("backward matrix is not the inverse of forward (off by {deviation:e})")]
    NotInverse {
        /// Largest entry of `forward * backward - identity`.
        deviation: f64,
    },

    /// Input matrices had the wrong shape.
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for linear algebra operations.
pub type Result<T> = std::result::Result<T, MathError>;
