//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the gallery needs:
//! identify, resize, and write_blank.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use a recording mock.

use super::params::{BlankParams, ResizeParams};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Compress factor {0} must be strictly between 0 and 1")]
    InvalidScaleFactor(f64),
    #[error("Unreadable image {path}: {reason}")]
    UnreadableImage { path: PathBuf, reason: String },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

impl BackendError {
    pub(crate) fn unreadable(path: &Path, reason: impl ToString) -> Self {
        BackendError::UnreadableImage {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `Sync` so a single backend can be shared across rayon workers.
pub trait ImageBackend: Sync {
    /// Get image dimensions without decoding pixel data where possible.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source`, resize to exactly `width × height`, encode to `params.output`.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Write a solid-color image of exact dimensions.
    fn write_blank(&self, params: &BlankParams) -> Result<(), BackendError>;
}
