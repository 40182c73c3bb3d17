//! Light sources.

mod point;

pub use point::PointLight;

use std::fmt;
use std::sync::Arc;

use pinhole_math::{Point3, Vec3};

use crate::primitive::{Color, PrimitiveHandle};

/// Light arriving at a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    /// The light's base color, reported whether or not the point is lit.
    pub color: Color,
    /// Scalar intensity; zero when unlit.
    pub intensity: f64,
    /// True if the light reaches the point from its front side.
    pub lit: bool,
}

impl Illumination {
    /// No light from a source of the given color.
    pub fn dark(color: Color) -> Self {
        Self {
            color,
            intensity: 0.0,
            lit: false,
        }
    }
}

/// Something that illuminates surfaces.
pub trait Light: Send + Sync + fmt::Debug {
    /// Illumination at `point` with unit surface `normal`.
    ///
    /// `primitives` are tested for occlusion; `owner`, if given, is the
    /// primitive the point lies on and is skipped.
    fn compute_illumination(
        &self,
        point: &Point3,
        normal: &Vec3,
        primitives: &[PrimitiveHandle],
        owner: Option<&PrimitiveHandle>,
    ) -> Illumination;

    /// Base color.
    fn color(&self) -> Color;

    /// Base intensity.
    fn intensity(&self) -> f64;

    /// World position.
    fn location(&self) -> Point3;
}

/// Shared, read-only light handle.
pub type LightHandle = Arc<dyn Light>;
