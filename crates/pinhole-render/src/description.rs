//! TOML scene descriptions.
//!
//! A [`SceneDescription`] is plain data: it can be parsed, edited and
//! written back without touching any render state. [`SceneDescription::build`]
//! turns it into a [`Scene`] ready to render.
//!
//! ```toml
//! [camera]
//! position = [0.0, -10.0, 0.0]
//! look_at = [0.0, 0.0, 0.0]
//! up = [0.0, 0.0, 1.0]
//! horizontal_size = 0.25
//! aspect = 1.7777777777777777
//!
//! [[primitive]]
//! kind = "sphere"
//! translation = [1.5, 0.0, 0.0]
//! scale = [0.75, 0.75, 0.75]
//! color = [255.0, 200.0, 0.0]
//!
//! [[light]]
//! location = [5.0, -10.0, -5.0]
//! color = [255.0, 255.0, 255.0]
//! ```

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use log::debug;
use pinhole_math::{AffineTransform, Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::SceneError;
use crate::light::{LightHandle, PointLight};
use crate::primitive::{Plane, PrimitiveHandle, Sphere};
use crate::scene::Scene;

/// Serializable scene: camera, primitives and lights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Camera settings.
    #[serde(default)]
    pub camera: CameraDescription,
    /// Primitives in insertion order.
    #[serde(default, rename = "primitive")]
    pub primitives: Vec<PrimitiveDescription>,
    /// Lights in evaluation order.
    #[serde(default, rename = "light")]
    pub lights: Vec<LightDescription>,
}

/// Camera settings. Missing fields take the [`Default`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    /// Eye position.
    pub position: [f64; 3],
    /// Point the camera looks at.
    pub look_at: [f64; 3],
    /// Up vector.
    pub up: [f64; 3],
    /// Distance from the eye to the projection screen.
    pub length: f64,
    /// Half-width of the projection screen.
    pub horizontal_size: f64,
    /// Width / height ratio of the projection screen.
    pub aspect: f64,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: [0.0, -10.0, 0.0],
            look_at: [0.0, 0.0, 0.0],
            up: [0.0, 0.0, 1.0],
            length: 1.0,
            horizontal_size: 0.25,
            aspect: 16.0 / 9.0,
        }
    }
}

/// Canonical shape of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Unit sphere at the local origin.
    Sphere,
    /// Unit square in the local `z = 0` plane.
    Plane,
}

/// A primitive and its placement.
///
/// Rotation angles are radians about x, y and z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveDescription {
    /// Canonical shape.
    pub kind: PrimitiveKind,
    /// World translation.
    #[serde(default)]
    pub translation: [f64; 3],
    /// Rotation about x, y and z in radians.
    #[serde(default)]
    pub rotation: [f64; 3],
    /// Per-axis scale.
    #[serde(default = "unit_scale")]
    pub scale: [f64; 3],
    /// Surface color.
    #[serde(default = "white")]
    pub color: [f64; 3],
}

/// A point light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    /// World position.
    pub location: [f64; 3],
    /// Light color.
    #[serde(default = "white")]
    pub color: [f64; 3],
    /// Scalar intensity.
    #[serde(default = "unit_intensity")]
    pub intensity: f64,
}

fn unit_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn white() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn unit_intensity() -> f64 {
    1.0
}

fn vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}

fn point3(v: [f64; 3]) -> Point3 {
    Point3::new(v[0], v[1], v[2])
}

impl SceneDescription {
    /// Parse a TOML scene description.
    pub fn from_toml(source: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(source)?)
    }

    /// Write this description as TOML.
    pub fn to_toml(&self) -> Result<String, SceneError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build a renderable scene with up-to-date camera geometry.
    pub fn build(&self) -> Result<Scene, SceneError> {
        let cam = &self.camera;
        let mut camera = Camera::new();
        camera.set_position(point3(cam.position));
        camera.set_look_at(point3(cam.look_at));
        camera.set_up(vec3(cam.up));
        camera.set_length(cam.length);
        camera.set_horizontal_size(cam.horizontal_size);
        camera.set_aspect(cam.aspect);
        camera.update_geometry()?;

        let mut scene = Scene::new(camera);
        for (index, desc) in self.primitives.iter().enumerate() {
            let transform = AffineTransform::from_components(
                vec3(desc.translation),
                vec3(desc.rotation),
                vec3(desc.scale),
            )
            .map_err(|source| SceneError::Transform { index, source })?;
            let color = vec3(desc.color);
            let primitive: PrimitiveHandle = match desc.kind {
                PrimitiveKind::Sphere => {
                    Arc::new(Sphere::new().with_transform(transform).with_color(color))
                }
                PrimitiveKind::Plane => {
                    Arc::new(Plane::new().with_transform(transform).with_color(color))
                }
            };
            scene.add_primitive(primitive);
        }

        for desc in &self.lights {
            let light: LightHandle = Arc::new(
                PointLight::new()
                    .at(point3(desc.location))
                    .with_color(vec3(desc.color))
                    .with_intensity(desc.intensity),
            );
            scene.add_light(light);
        }

        debug!(
            "Built scene: {} primitives, {} lights",
            scene.primitives().len(),
            scene.lights().len()
        );
        Ok(scene)
    }
}

impl Default for SceneDescription {
    /// Three spheres in front of a grey backdrop, lit from the upper left.
    fn default() -> Self {
        let sphere = |translation: [f64; 3], scale: [f64; 3], color: [f64; 3]| {
            PrimitiveDescription {
                kind: PrimitiveKind::Sphere,
                translation,
                rotation: [0.0; 3],
                scale,
                color,
            }
        };
        Self {
            camera: CameraDescription::default(),
            primitives: vec![
                sphere([-1.5, 0.0, 0.0], [0.5, 0.5, 0.75], [64.0, 128.0, 200.0]),
                sphere([0.0, 0.0, 0.0], [0.75, 0.5, 0.5], [255.0, 128.0, 0.0]),
                sphere([1.5, 0.0, 0.0], [0.75, 0.75, 0.75], [255.0, 200.0, 0.0]),
                // Upright square behind the spheres, facing the camera.
                PrimitiveDescription {
                    kind: PrimitiveKind::Plane,
                    translation: [0.0, 2.0, 0.0],
                    rotation: [-FRAC_PI_2, 0.0, 0.0],
                    scale: [4.0, 1.0, 4.0],
                    color: [200.0, 200.0, 200.0],
                },
            ],
            lights: vec![LightDescription {
                location: [5.0, -10.0, -5.0],
                color: [255.0, 255.0, 255.0],
                intensity: 1.0,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_description_uses_defaults() {
        let desc = SceneDescription::from_toml(
            r#"
            [[primitive]]
            kind = "plane"

            [[light]]
            location = [0.0, -5.0, 0.0]
            "#,
        )
        .unwrap();

        assert_eq!(desc.camera, CameraDescription::default());
        assert_eq!(desc.primitives.len(), 1);
        assert_eq!(desc.primitives[0].kind, PrimitiveKind::Plane);
        assert_eq!(desc.primitives[0].scale, [1.0, 1.0, 1.0]);
        assert_eq!(desc.primitives[0].color, [1.0, 1.0, 1.0]);
        assert_eq!(desc.lights[0].intensity, 1.0);
    }

    #[test]
    fn test_partial_camera() {
        let desc = SceneDescription::from_toml(
            r#"
            [camera]
            position = [0.0, -4.0, 0.0]
            aspect = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(desc.camera.position, [0.0, -4.0, 0.0]);
        assert_eq!(desc.camera.aspect, 1.0);
        assert_eq!(desc.camera.horizontal_size, 0.25);
        assert!(desc.primitives.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = SceneDescription::from_toml(
            r#"
            [[primitive]]
            kind = "cube"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::Parse(_)));
    }

    #[test]
    fn test_default_survives_toml() {
        let desc = SceneDescription::default();
        let text = desc.to_toml().unwrap();
        assert!(text.contains("[[primitive]]"));
        assert!(text.contains("kind = \"sphere\""));
        assert_eq!(SceneDescription::from_toml(&text).unwrap(), desc);
    }

    #[test]
    fn test_build_default() {
        let scene = SceneDescription::default().build().unwrap();
        assert_eq!(scene.primitives().len(), 4);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.camera().position(), Point3::new(0.0, -10.0, 0.0));
        assert!((scene.camera().u().norm() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_singular_transform_reports_index() {
        let mut desc = SceneDescription::default();
        desc.primitives[1].scale = [0.0, 1.0, 1.0];
        let err = desc.build().unwrap_err();
        assert!(matches!(err, SceneError::Transform { index: 1, .. }));
    }

    #[test]
    fn test_degenerate_camera() {
        let mut desc = SceneDescription::default();
        desc.camera.up = [0.0, 1.0, 0.0];
        assert!(matches!(desc.build(), Err(SceneError::Render(_))));
    }
}
