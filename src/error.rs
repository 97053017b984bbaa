//! Error types for viewer setup and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while (re)initialising a viewer.
///
/// Zoom and gesture operations never fail; without a loaded image they are no-ops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewerError {
    /// The image reported a zero (or negative) intrinsic size
    #[error("Image has zero intrinsic dimensions: {width}x{height}")]
    ZeroImageDimensions {
        /// Reported intrinsic width
        width: f64,
        /// Reported intrinsic height
        height: f64,
    },

    /// The container has no usable size and there is no previous size to fall back to
    #[error("Viewport has no usable size: {width}x{height}")]
    InvalidViewport {
        /// Reported viewport width
        width: f64,
        /// Reported viewport height
        height: f64,
    },

    /// Configuration values are out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}

impl ViewerError {
    /// Create an invalid configuration error with a message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Errors that can occur while reading or writing a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error while reading or writing the file
    #[error("IO error on {path:?}: {source}")]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file was written by a newer version of the crate
    #[error("Config version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        /// Version found in the file
        file_version: u32,
        /// Highest version this build understands
        supported_version: u32,
    },

    /// The configuration parsed but failed validation
    #[error(transparent)]
    Invalid(#[from] ViewerError),
}
