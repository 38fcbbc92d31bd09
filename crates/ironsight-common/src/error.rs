//! Error types for Ironsight.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading bundled assets (scene, input script).
///
/// Assets are fixed and bundled with the game, so every variant is fatal at
/// startup.
#[derive(Debug, Error)]
pub enum AssetError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// File contents were malformed
    #[error("failed to parse {what}: {message}")]
    Parse {
        /// Kind of asset being parsed
        what: &'static str,
        /// Parser message
        message: String,
    },

    /// A node the game depends on is absent from the scene
    #[error("scene has no node named {0:?}")]
    MissingNode(String),

    /// Two scene nodes share a name
    #[error("scene node name {0:?} is not unique")]
    DuplicateNode(String),
}
