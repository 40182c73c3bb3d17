//! Unit sphere (quadratic equation).

use pinhole_math::{AffineTransform, Direction, Point3, Ray};

use super::{Color, Intersection, Primitive};

/// A unit sphere centred on the local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    transform: AffineTransform,
    color: Color,
}

impl Sphere {
    /// A unit sphere at the world origin, white.
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

impl Default for Sphere {
    fn default() -> Self {
        Self::new()
    }
}

impl Primitive for Sphere {
    /// Rays starting inside the sphere (either root negative) report a miss.
    fn test_intersection(&self, ray: &Ray) -> Option<Intersection> {
        let local = self.transform.apply_ray(ray, Direction::Backward);
        let d = local.unit_direction()?;
        let o = local.origin.coords;

        // |o + t*d|^2 = 1 with |d| = 1
        let b = 2.0 * o.dot(&d);
        let c = o.dot(&o) - 1.0;

        let discriminant = b * b - 4.0 * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / 2.0;
        let t2 = (-b + sqrt_disc) / 2.0;
        if t1 < 0.0 || t2 < 0.0 {
            return None;
        }

        let local_point = local.origin + d * t1.min(t2);
        let point = self.transform.apply_point(&local_point, Direction::Forward);
        let center = self.transform.apply_point(&Point3::origin(), Direction::Forward);
        let normal = (point - center).try_normalize(0.0)?;

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
    use pinhole_math::Vec3;

    fn ray(origin: [f64; 3], dir: [f64; 3]) -> Ray {
        Ray::from_direction(Point3::from(origin), Vec3::from(dir))
    }

    #[test]
    fn test_canonical_hit() {
        let sphere = Sphere::new();
        let hit = sphere
            .test_intersection(&ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0]))
            .unwrap();
        assert!((hit.point - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_unnormalized_direction() {
        let sphere = Sphere::new();
        let hit = sphere
            .test_intersection(&ray([0.0, 0.0, -5.0], [0.0, 0.0, 10.0]))
            .unwrap();
        assert!((hit.point.z + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pointing_away_misses() {
        let sphere = Sphere::new();
        let hit = sphere.test_intersection(&ray([5.0, 5.0, 5.0], [1.0, 1.0, 1.0]));
        assert!(hit.is_none());
    }

    #[test]
    fn test_offset_miss() {
        let sphere = Sphere::new();
        let hit = sphere.test_intersection(&ray([0.0, 2.0, -5.0], [0.0, 0.0, 1.0]));
        assert!(hit.is_none());
    }

    #[test]
    fn test_tangent_is_miss() {
        let sphere = Sphere::new();
        let hit = sphere.test_intersection(&ray([1.0, 0.0, -5.0], [0.0, 0.0, 1.0]));
        assert!(hit.is_none());
    }

    #[test]
    fn test_origin_inside_is_miss() {
        let sphere = Sphere::new();
        let hit = sphere.test_intersection(&ray([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]));
        assert!(hit.is_none());
    }

    #[test]
    fn test_transformed_sphere() {
        let transform = AffineTransform::from_components(
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::zeros(),
            Vec3::new(2.0, 2.0, 2.0),
        )
        .unwrap();
        let sphere = Sphere::new()
            .with_transform(transform)
            .with_color(Color::new(255.0, 0.0, 0.0));
        let hit = sphere
            .test_intersection(&ray([3.0, 0.0, -10.0], [0.0, 0.0, 1.0]))
            .unwrap();
        assert!((hit.point - Point3::new(3.0, 0.0, -2.0)).norm() < 1e-9);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-9);
        assert_eq!(hit.color, Color::new(255.0, 0.0, 0.0));
    }
}
