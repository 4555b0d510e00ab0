//! Photo directory listing.
//!
//! Two directories get listed during a build:
//!
//! - the **source** directory, whose photos are copied into `raw_photos/`
//! - `compressed_photos/`, whose files become the [`PhotoItem`]s the layout
//!   balances
//!
//! Both listings share one rule set:
//!
//! - only the top level is read; subdirectories are ignored
//! - hidden files (leading `.`) are skipped
//! - only supported image extensions are kept (case-insensitive)
//! - results are sorted by file name
//!
//! `compressed_photos/` additionally holds filler images
//! (`column_buffer_*`), which [`list_gallery_photos`] skips. Source photos are
//! never filtered by name.
//!
//! Dimensions come from the [`ImageBackend`], so a file with an image
//! extension that does not decode fails the scan instead of being dropped.

use crate::imaging::{BackendError, ImageBackend, is_supported_image};
use crate::naming::is_filler_name;
use crate::types::PhotoItem;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Photo directory does not exist: {0}")]
    MissingDir(PathBuf),
    #[error("Failed to identify {path}: {source}")]
    Identify {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// Supported photos directly inside `dir`, sorted by file name.
pub fn list_photos(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::MissingDir(dir.to_path_buf()));
    }

    let mut photos = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            continue;
        }
        if !is_supported_image(entry.path()) {
            debug!(file = %name, "Skipping unsupported file");
            continue;
        }
        photos.push(entry.into_path());
    }
    Ok(photos)
}

/// Like [`list_photos`], minus filler images.
pub fn list_gallery_photos(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut photos = list_photos(dir)?;
    photos.retain(|path| {
        !path
            .file_name()
            .is_some_and(|n| is_filler_name(&n.to_string_lossy()))
    });
    Ok(photos)
}

/// Identify every gallery photo in `dir` into a [`PhotoItem`] named by file name.
pub fn read_photo_items(
    backend: &impl ImageBackend,
    dir: &Path,
) -> Result<Vec<PhotoItem>, ScanError> {
    list_gallery_photos(dir)?
        .into_iter()
        .map(|path| {
            let dims = backend
                .identify(&path)
                .map_err(|source| ScanError::Identify {
                    path: path.clone(),
                    source,
                })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(PhotoItem::new(name, dims.width, dims.height))
        })
        .collect()
}
