//! Ray representation.

use crate::{Point3, Vec3};

/// A ray defined by an origin and a second point it passes through.
///
/// The direction is `target - origin` and is deliberately left
/// unnormalized: mapping a ray through a scaling transform changes its
/// length, so consumers normalize via [`Ray::unit_direction`] before using
/// the direction algebraically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin of the ray.
    pub origin: Point3,
    /// Second point on the ray.
    pub target: Point3,
}

impl Ray {
    /// Create a ray from `origin` through `target`.
    pub fn new(origin: Point3, target: Point3) -> Self {
        Self { origin, target }
    }

    /// Create a ray from an origin and a direction (`target = origin + dir`).
    pub fn from_direction(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            target: origin + direction,
        }
    }

    /// `target - origin`, not normalized.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.target - self.origin
    }

    /// Normalized direction, or `None` for a degenerate ray.
    #[inline]
    pub fn unit_direction(&self) -> Option<Vec3> {
        self.direction().try_normalize(0.0)
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Point3::origin(), Point3::new(0.0, 0.0, 1.0))
    }
}
