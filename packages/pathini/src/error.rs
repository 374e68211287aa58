//! Error types for configuration tree operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::path::KeyPath;

/// Errors that can occur while reading, writing or addressing a [`ConfigTree`].
///
/// [`ConfigTree`]: crate::ConfigTree
#[derive(Debug, Error)]
pub enum Error {
    /// No node carrying a value exists at the path.
    #[error("key not found: {path}")]
    KeyNotFound { path: KeyPath },

    /// A lookup or update was given zero key segments.
    #[error("key path must contain at least one segment")]
    EmptyPath,

    /// `load` or `save` was called without a path and none was remembered.
    #[error("no source path given and none remembered")]
    NoSourcePath,

    /// The file could not be opened.
    ///
    /// Only returned when the tree is configured with [`OpenFailure::Report`].
    ///
    /// [`OpenFailure::Report`]: crate::OpenFailure::Report
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing failed after the file was opened.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for configuration tree operations.
pub type Result<T> = std::result::Result<T, Error>;
