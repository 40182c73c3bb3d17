//! Renderable primitives.
//!
//! Every primitive is a canonical shape in its own local space placed in the
//! world by an [`AffineTransform`]. Intersection tests map the incoming ray
//! into local space, solve against the canonical shape, and map the result
//! back out.

mod plane;
mod sphere;

pub use plane::Plane;
pub use sphere::Sphere;

use std::fmt;
use std::sync::Arc;

use pinhole_math::{AffineTransform, Point3, Ray, Vec3};

/// Linear RGB color. Channels are unbounded non-negative values.
pub type Color = Vec3;

/// A world-space ray hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Hit point in world space.
    pub point: Point3,
    /// Unit surface normal in world space.
    pub normal: Vec3,
    /// Surface color at the hit.
    pub color: Color,
}

/// Something a ray can hit.
///
/// A miss is `None`, never an error.
pub trait Primitive: Send + Sync + fmt::Debug {
    /// Test `ray` (world space) against this primitive.
    fn test_intersection(&self, ray: &Ray) -> Option<Intersection>;

    /// Local to world placement.
    fn transform(&self) -> &AffineTransform;

    /// Uniform surface color.
    fn base_color(&self) -> Color;
}

/// Shared, read-only primitive handle.
pub type PrimitiveHandle = Arc<dyn Primitive>;
