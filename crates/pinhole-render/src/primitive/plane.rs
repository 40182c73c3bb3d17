//! Unit square in the local z = 0 plane.

use pinhole_math::{close_enough, AffineTransform, Direction, Ray, Vec3};

use super::{Color, Intersection, Primitive};

/// A square spanning `[-1, 1] x [-1, 1]` at local `z = 0`, facing `-z`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    transform: AffineTransform,
    color: Color,
}

impl Plane {
    /// A unit plane at the world origin, white.
    pub fn new() -> Self {
        Self {
            transform: AffineTransform::identity(),
            color: Color::new(1.0, 1.0, 1.0),
        }
    }

    /// Builder: set the placement.
    pub fn with_transform(mut self, transform: AffineTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: set the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Replace the placement.
    pub fn set_transform(&mut self, transform: AffineTransform) {
        self.transform = transform;
    }

    /// Replace the color.
    pub fn set_base_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::new()
    }
}

impl Primitive for Plane {
    fn test_intersection(&self, ray: &Ray) -> Option<Intersection> {
        let local = self.transform.apply_ray(ray, Direction::Backward);
        let d = local.unit_direction()?;

        // Parallel to the plane
        if close_enough(d.z, 0.0) {
            return None;
        }

        let t = -local.origin.z / d.z;
        if t <= 0.0 {
            return None;
        }

        let u = local.origin.x + d.x * t;
        let v = local.origin.y + d.y * t;
        if u.abs() >= 1.0 || v.abs() >= 1.0 {
            return None;
        }

        let local_point = local.origin + d * t;
        let point = self.transform.apply_point(&local_point, Direction::Forward);
        let normal = self
            .transform
            .apply_vector(&Vec3::new(0.0, 0.0, -1.0), Direction::Forward)
            .try_normalize(0.0)?;

        Some(Intersection {
            point,
            normal,
            color: self.color,
        })
    }

    fn transform(&self) -> &AffineTransform {
        &self.transform
    }

    fn base_color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinhole_math::Point3;
    use std::f64::consts::FRAC_PI_2;

    fn ray_down_z(x: f64, y: f64) -> Ray {
        Ray::from_direction(Point3::new(x, y, -5.0), Vec3::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn test_hit_inside_square() {
        let plane = Plane::new();
        let hit = plane.test_intersection(&ray_down_z(0.5, 0.5)).unwrap();
        assert!((hit.point - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-12);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_miss_outside_square() {
        let plane = Plane::new();
        assert!(plane.test_intersection(&ray_down_z(1.5, 0.0)).is_none());
        assert!(plane.test_intersection(&ray_down_z(0.0, -1.0)).is_none());
    }

    #[test]
    fn test_parallel_ray() {
        let plane = Plane::new();
        let ray = Ray::from_direction(Point3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(plane.test_intersection(&ray).is_none());
    }

    #[test]
    fn test_behind_origin() {
        let plane = Plane::new();
        let ray = Ray::from_direction(Point3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(plane.test_intersection(&ray).is_none());
    }

    #[test]
    fn test_normal_ignores_translation() {
        let transform = AffineTransform::from_components(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(-FRAC_PI_2, 0.0, 0.0),
            Vec3::new(4.0, 1.0, 4.0),
        )
        .unwrap();
        let plane = Plane::new().with_transform(transform);
        let ray = Ray::from_direction(Point3::new(1.0, -10.0, 1.0), Vec3::new(0.0, 1.0, 0.0));
        let hit = plane.test_intersection(&ray).unwrap();
        assert!((hit.point - Point3::new(1.0, 2.0, 1.0)).norm() < 1e-9);
        assert!((hit.normal - Vec3::new(0.0, -1.0, 0.0)).norm() < 1e-9);
    }
}
