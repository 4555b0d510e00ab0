//! Shared test utilities for the masonry-gal test suite.
//!
//! Provides synthetic image writers and photo-directory fixtures so tests
//! never depend on files checked into the repository.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let src = photo_dir(&[("b.jpg", 400, 300), ("a.jpg", 300, 400)]);
//! let items = scan::read_photo_items(&RustBackend::new(), src.path()).unwrap();
//! assert_eq!(photo_names(&items), vec!["a.jpg", "b.jpg"]);
//! ```

use crate::types::PhotoItem;
use image::{ImageEncoder, RgbImage};
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Synthetic images
// =========================================================================

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([128, (x % 256) as u8, (y % 256) as u8])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Temp directory holding one synthetic image per `(name, width, height)`.
///
/// `.png` names get PNGs, everything else gets JPEG bytes.
pub fn photo_dir(photos: &[(&str, u32, u32)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, width, height) in photos {
        let path = tmp.path().join(name);
        if name.ends_with(".png") {
            create_test_png(&path, *width, *height);
        } else {
            create_test_jpeg(&path, *width, *height);
        }
    }
    tmp
}

/// Sorted file names in a directory.
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Photo names in item order.
pub fn photo_names(items: &[PhotoItem]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}
