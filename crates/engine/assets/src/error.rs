//! Error types for asset loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for asset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a model
#[derive(Debug, Error)]
pub enum Error {
    /// The model file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OBJ parser rejected the file
    #[error("OBJ parse error in {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    /// The loader thread ended without delivering a result
    #[error("Asset loader for {0} stopped before finishing")]
    LoaderDisconnected(PathBuf),
}
