//! Pinhole camera with a rectangular projection screen.

use pinhole_math::{Point3, Ray, Vec3};

use crate::error::{RenderError, Result};

/// A pinhole camera.
///
/// Setters only store their input; the projection screen is derived by
/// [`Camera::update_geometry`], which must be called again after any change.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3,
    look_at: Point3,
    up: Vec3,
    length: f64,
    horizontal_size: f64,
    aspect: f64,

    alignment: Vec3,
    screen_u: Vec3,
    screen_v: Vec3,
    screen_center: Point3,
}

impl Camera {
    /// Camera at `(0, -10, 0)` looking at the origin with `+z` up.
    pub fn new() -> Self {
        // Looking down +y: U is +x, V is +z, the screen one unit ahead.
        Self {
            position: Point3::new(0.0, -10.0, 0.0),
            look_at: Point3::origin(),
            up: Vec3::new(0.0, 0.0, 1.0),
            length: 1.0,
            horizontal_size: 1.0,
            aspect: 1.0,
            alignment: Vec3::new(0.0, 1.0, 0.0),
            screen_u: Vec3::new(1.0, 0.0, 0.0),
            screen_v: Vec3::new(0.0, 0.0, 1.0),
            screen_center: Point3::new(0.0, -9.0, 0.0),
        }
    }

    /// Set the eye position.
    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    /// Set the point the camera looks at.
    pub fn set_look_at(&mut self, look_at: Point3) {
        self.look_at = look_at;
    }

    /// Set the up vector.
    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    /// Set the distance from the eye to the projection screen.
    pub fn set_length(&mut self, length: f64) {
        self.length = length;
    }

    /// Set the half-width of the projection screen.
    pub fn set_horizontal_size(&mut self, size: f64) {
        self.horizontal_size = size;
    }

    /// Set the width / height ratio of the projection screen.
    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = aspect;
    }

    /// Eye position.
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Look-at target.
    pub fn look_at(&self) -> Point3 {
        self.look_at
    }

    /// Up vector.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Eye to screen distance.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Screen half-width.
    pub fn horizontal_size(&self) -> f64 {
        self.horizontal_size
    }

    /// Screen aspect ratio.
    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Unit viewing direction, as of the last geometry update.
    pub fn alignment(&self) -> Vec3 {
        self.alignment
    }

    /// Scaled horizontal screen axis.
    pub fn u(&self) -> Vec3 {
        self.screen_u
    }

    /// Scaled vertical screen axis.
    pub fn v(&self) -> Vec3 {
        self.screen_v
    }

    /// Centre of the projection screen.
    pub fn screen_center(&self) -> Point3 {
        self.screen_center
    }

    /// Derive the screen basis from position, look-at and up.
    ///
    /// Fails if the camera looks at its own position, the up vector is
    /// parallel to the view direction, or the aspect ratio is zero. Derived
    /// fields are left untouched on failure.
    pub fn update_geometry(&mut self) -> Result<()> {
        let alignment = (self.look_at - self.position)
            .try_normalize(0.0)
            .ok_or(RenderError::DegenerateCamera("look-at equals position"))?;
        let u = alignment
            .cross(&self.up)
            .try_normalize(0.0)
            .ok_or(RenderError::DegenerateCamera("up is parallel to view direction"))?;
        if self.aspect == 0.0 {
            return Err(RenderError::DegenerateCamera("aspect ratio is zero"));
        }
        // Unit length already: u and alignment are orthonormal.
        let v = u.cross(&alignment);

        self.alignment = alignment;
        self.screen_center = self.position + alignment * self.length;
        self.screen_u = u * self.horizontal_size;
        self.screen_v = v * (self.horizontal_size / self.aspect);
        Ok(())
    }

    /// Primary ray through screen coordinates `(x, y)`, each in `[-1, 1]`.
    pub fn generate_ray(&self, x: f64, y: f64) -> Ray {
        let target = self.screen_center + self.screen_u * x + self.screen_v * y;
        Ray::new(self.position, target)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        let mut camera = Camera::new();
        camera.set_position(Point3::origin());
        camera.set_look_at(Point3::new(0.0, 1.0, 0.0));
        camera.set_up(Vec3::new(0.0, 0.0, 1.0));
        camera.set_length(1.0);
        camera.set_horizontal_size(1.0);
        camera.set_aspect(1.0);
        camera.update_geometry().unwrap();
        camera
    }

    #[test]
    fn test_default_geometry_is_derived() {
        let camera = Camera::new();
        let mut updated = camera.clone();
        updated.update_geometry().unwrap();
        assert_eq!(camera, updated);
    }

    #[test]
    fn test_center_ray_hits_screen_center() {
        let camera = test_camera();
        let ray = camera.generate_ray(0.0, 0.0);
        assert_eq!(ray.origin, Point3::origin());
        assert!((ray.target - camera.screen_center()).norm() < 1e-12);
        assert!((camera.screen_center() - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_basis() {
        let camera = test_camera();
        assert!((camera.u() - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((camera.v() - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_corner_ray() {
        let camera = test_camera();
        let ray = camera.generate_ray(1.0, -1.0);
        assert!((ray.target - Point3::new(1.0, 1.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_aspect_scales_v() {
        let mut camera = test_camera();
        camera.set_horizontal_size(0.25);
        camera.set_aspect(16.0 / 9.0);
        camera.update_geometry().unwrap();
        assert!((camera.u().norm() - 0.25).abs() < 1e-12);
        assert!((camera.v().norm() - 0.25 * 9.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_geometry_stale_until_updated() {
        let mut camera = test_camera();
        camera.set_position(Point3::new(0.0, -5.0, 0.0));
        assert!((camera.screen_center() - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
        camera.update_geometry().unwrap();
        assert!((camera.screen_center() - Point3::new(0.0, -4.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_degenerate_up() {
        let mut camera = test_camera();
        camera.set_up(Vec3::new(0.0, 2.0, 0.0));
        assert!(matches!(
            camera.update_geometry(),
            Err(RenderError::DegenerateCamera(_))
        ));
    }
}
