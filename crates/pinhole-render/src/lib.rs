#![warn(missing_docs)]

//! Multi-threaded ray casting for the pinhole renderer.
//!
//! Primitives are canonical shapes placed in the world by an affine
//! transform; point lights illuminate the nearest hit with hard shadows and
//! a linear angular falloff. Pixels are rendered in parallel column chunks
//! into a [`FrameBuffer`], which normalizes to 8-bit on output.
//!
//! # Architecture
//!
//! - [`Primitive`] - Intersection capability, with [`Sphere`] and [`Plane`]
//! - [`Light`] - Illumination capability, with [`PointLight`]
//! - [`Camera`] - Projection screen and primary rays
//! - [`Scene`] - Camera, primitives and lights; drives the render
//! - [`FrameBuffer`] - Float RGB image sink
//! - [`SceneDescription`] - TOML scene files
//!
//! # Example
//!
//! ```ignore
//! use pinhole_render::{FrameBuffer, SceneDescription};
//!
//! let scene = SceneDescription::default().build()?;
//! let mut frame = FrameBuffer::new(1280, 720);
//! scene.render(&mut frame)?;
//! frame.to_rgb8().save("render.png")?;
//! ```

mod camera;
mod description;
mod error;
mod frame;
pub mod light;
pub mod primitive;
mod scene;

pub use camera::Camera;
pub use description::{
    CameraDescription, LightDescription, PrimitiveDescription, PrimitiveKind, SceneDescription,
};
pub use error::{RenderError, Result, SceneError};
pub use frame::FrameBuffer;
pub use light::{Illumination, Light, LightHandle, PointLight};
pub use primitive::{Color, Intersection, Plane, Primitive, PrimitiveHandle, Sphere};
pub use scene::{RenderStats, Scene};
