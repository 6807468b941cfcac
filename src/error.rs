//! Error types for scene loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while loading a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The scene file could not be read.
    #[error("failed to read scene {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or has the wrong shape.
    #[error("malformed scene: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but describes something the core cannot simulate.
    #[error("invalid scene: {0}")]
    Invalid(String),
}

impl SceneError {
    /// Create an io error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid scene error.
    #[must_use]
    pub fn invalid(details: impl Into<String>) -> Self {
        Self::Invalid(details.into())
    }
}
