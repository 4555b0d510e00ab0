//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::scaled_dimensions;
use super::params::{BlankParams, FillColor, Quality, ResizeParams, ScaleFactor};
use crate::layout::FillerItem;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Configuration for photo compression.
#[derive(Debug, Clone, Copy)]
pub struct CompressConfig {
    pub factor: ScaleFactor,
    pub quality: Quality,
}

/// Plan a compression without executing it.
pub fn plan_compression(
    source: &Path,
    output: &Path,
    original: (u32, u32),
    config: &CompressConfig,
) -> ResizeParams {
    let (width, height) = scaled_dimensions(original, config.factor.value());
    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

/// Write a copy of `source` scaled by the configured factor.
///
/// Returns the dimensions of the written image.
pub fn compress_photo(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &CompressConfig,
) -> Result<(u32, u32)> {
    let original = get_dimensions(backend, source)?;
    let params = plan_compression(source, output, original, config);
    backend.resize(&params)?;
    Ok((params.width, params.height))
}

/// Write the blank image for a filler into `output_dir`.
///
/// Returns the path of the written file.
pub fn write_filler(
    backend: &impl ImageBackend,
    filler: &FillerItem,
    output_dir: &Path,
    color: FillColor,
    quality: Quality,
) -> Result<PathBuf> {
    let output = output_dir.join(&filler.name);
    backend.write_blank(&BlankParams {
        output: output.clone(),
        width: filler.width,
        height: filler.height,
        color,
        quality,
    })?;
    Ok(output)
}
