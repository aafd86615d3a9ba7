//! Error types for scene construction, configuration and image output.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a scene or writing an image.
#[derive(Error, Debug)]
pub enum Error {
    /// Sphere with a non-finite center or a non-positive radius
    #[error("invalid sphere: {reason}")]
    InvalidSphere {
        /// What was wrong with the sphere
        reason: String,
    },

    /// Camera parameter outside its valid range
    #[error("invalid camera: {reason}")]
    InvalidCamera {
        /// What was wrong with the camera
        reason: String,
    },

    /// Image size or sample count that cannot be rendered
    #[error("invalid render settings: {reason}")]
    InvalidSettings {
        /// What was wrong with the settings
        reason: String,
    },

    /// Scene file could not be parsed
    #[error("scene file parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// File or stream I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PNG encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding error
    #[error("EXR error: {0}")]
    Exr(#[from] exr::error::Error),

    /// Output path with an extension we cannot write
    #[error("unsupported output format '{0}' (expected .ppm, .png or .exr)")]
    UnsupportedOutput(String),
}
