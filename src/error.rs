//! Custom error types and result handling for Seihon operations.
//!
//! This module defines the error handling system used throughout Seihon.
//! All operations return a [`Result<T>`] which is a type alias for `std::result::Result<T, Error>`.
//!
use std::path::PathBuf;

/// Type alias for Results with Seihon errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all Seihon operations.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O errors from the standard library
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Image decoding errors
    #[error(transparent)]
    Image(#[from] image::ImageError),
    /// Async task join errors
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Semaphore(#[from] tokio::sync::AcquireError),
    #[error(transparent)]
    ConfigBuilder(#[from] crate::seihon::SeihonConfigBuilderError),
    /// A directory that must be readable for the run could not be read.
    /// Fatal: a failed scan has no partial-results recovery.
    #[error("Cannot read directory '{path}': {source}")]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An image file could not be probed for its pixel dimensions.
    #[error("Cannot read image dimensions of '{path}': {source}")]
    Probe {
        path: PathBuf,
        source: image::ImageError,
    },
    /// An image reported dimensions that cannot be laid out on a page.
    #[error("Image dimensions {width}x{height} cannot be placed on a page")]
    InvalidDimensions { width: u32, height: u32 },
    /// The digit string extracted from a name does not fit a 64-bit key.
    #[error("Numeric key in '{0}' overflows a 64-bit integer")]
    KeyOverflow(String),
    /// Error for invalid file or directory paths
    #[error("The given path '{0:?}' is invalid: {1}")]
    InvalidPath(PathBuf, String),
    /// Error for failed asynchronous tasks (e.g., Tokio JoinError)
    #[error("Asynchronous task failed: {0}")]
    AsyncTaskError(String),
    /// Error for resources that couldn't be found (e.g., source directory, image file)
    #[error("Not found: {0}")]
    NotFound(String),
    /// Other errors that don't fit into specific categories
    #[error("Other error: {0}")]
    Other(String),
}

// Basic From<String> conversion for convenience
impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Other(error)
    }
}

impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error::Other(error.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
