#![warn(missing_docs)]

//! Math types for the pinhole ray tracer.
//!
//! Thin wrappers around nalgebra providing the fixed-size vectors and
//! matrices used on the hot path, dynamically sized checked variants for
//! general linear algebra, and the affine transform that maps points and
//! rays between object-local and world space.

mod error;
pub mod dynamic;
pub mod ray;
pub mod transform;

pub use dynamic::{MatrixN, VectorN};
pub use error::{MathError, Result, TransformError};
pub use ray::Ray;
pub use transform::{AffineTransform, Direction, MatrixDisplay};

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A homogeneous 4-vector.
pub type Vec4 = nalgebra::Vector4<f64>;

/// A 4x4 matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Tolerance used by [`close_enough`].
pub const EPSILON: f64 = 1e-9;

/// Pivots below this fraction of a matrix's largest entry are treated as zero.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Check if two scalars are equal within [`EPSILON`].
#[inline]
pub fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Invert a 4x4 matrix, failing instead of producing NaNs or infinities.
///
/// Singularity is judged per pivot relative to the matrix's largest entry,
/// so a uniformly small scale is still invertible.
pub fn invert(m: &Matrix4) -> Result<Matrix4> {
    MatrixN::from(*m).inverse()?.to_matrix4()
}

/// Normalize a vector, failing on zero length.
pub fn try_normalize(v: &Vec3) -> Result<Vec3> {
    v.try_normalize(0.0).ok_or(MathError::ZeroLength)
}
