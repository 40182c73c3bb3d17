//! Point light with hard shadows and linear angular falloff.

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use pinhole_math::{Point3, Ray, Vec3};

use super::{Illumination, Light};
use crate::primitive::{Color, PrimitiveHandle};

/// A light emitting from a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    location: Point3,
    color: Color,
    intensity: f64,
}

impl PointLight {
    /// White light of intensity 1 at the origin.
    pub fn new() -> Self {
        Self {
            location: Point3::origin(),
            color: Color::new(1.0, 1.0, 1.0),
            intensity: 1.0,
        }
    }

    /// Builder: set the location.
    pub fn at(mut self, location: Point3) -> Self {
        self.location = location;
        self
    }

    /// Builder: set the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder: set the intensity.
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    /// Move the light.
    pub fn set_location(&mut self, location: Point3) {
        self.location = location;
    }

    /// Replace the color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Replace the intensity.
    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = intensity;
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new()
    }
}

impl Light for PointLight {
    /// Any hit along the shadow ray occludes, including hits beyond the
    /// light itself.
    fn compute_illumination(
        &self,
        point: &Point3,
        normal: &Vec3,
        primitives: &[PrimitiveHandle],
        owner: Option<&PrimitiveHandle>,
    ) -> Illumination {
        let Some(light_dir) = (self.location - point).try_normalize(0.0) else {
            return Illumination::dark(self.color);
        };

        let shadow_ray = Ray::from_direction(*point, light_dir);
        let occluded = primitives
            .iter()
            .filter(|p| owner.map_or(true, |o| !Arc::ptr_eq(p, o)))
            .any(|p| p.test_intersection(&shadow_ray).is_some());
        if occluded {
            return Illumination::dark(self.color);
        }

        let angle = normal.dot(&light_dir).clamp(-1.0, 1.0).acos();
        if angle > FRAC_PI_2 {
            return Illumination::dark(self.color);
        }

        Illumination {
            color: self.color,
            intensity: self.intensity * (1.0 - angle / FRAC_PI_2),
            lit: true,
        }
    }

    fn color(&self) -> Color {
        self.color
    }

    fn intensity(&self) -> f64 {
        self.intensity
    }

    fn location(&self) -> Point3 {
        self.location
    }
}
