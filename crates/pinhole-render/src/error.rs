//! Error types for rendering and scene construction.

use pinhole_math::TransformError;
use thiserror::Error;

/// Errors that can occur while rendering.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The frame buffer has no pixels.
    #[error("frame buffer is empty ({width}x{height})")]
    EmptyFrame {
        /// Frame width.
        width: usize,
        /// Frame height.
        height: usize,
    },

    /// Rendering was requested with zero chunks.
    #[error("render needs at least one chunk")]
    NoChunks,

    /// A pixel write fell outside the frame.
    #[error("pixel ({x}, {y}) outside {width}x{height} frame")]
    PixelOutOfBounds {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// Frame width.
        width: usize,
        /// Frame height.
        height: usize,
    },

    /// Camera vectors do not span a projection plane.
    #[error("degenerate camera: {0}")]
    DegenerateCamera(&'static str),
}

/// Errors that can occur while building a scene from a description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A primitive transform could not be inverted.
    #[error("primitive {index}: {source}")]
    Transform {
        /// Position of the primitive in the description.
        index: usize,
        /// Underlying transform failure.
        #[source]
        source: TransformError,
    },

    /// Camera geometry could not be derived.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Scene file is not valid TOML for a scene description.
    #[error("invalid scene description: {0}")]
    Parse(#[from] toml::de::Error),

    /// Scene description could not be serialized.
    #[error("failed to serialize scene: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
