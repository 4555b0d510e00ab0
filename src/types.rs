//! Shared types passed between pipeline stages.
//!
//! [`PhotoItem`] is produced by the [`scan`](crate::scan) stage and consumed
//! by the [`layout`](crate::layout) stage. It is never mutated after it is read.
//! [`GalleryDirs`] names the directories every stage writes into.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Subdirectory holding full-size photos under sequence names.
pub const RAW_PHOTOS_DIR: &str = "raw_photos";

/// Subdirectory holding scaled photos and filler images.
pub const COMPRESSED_PHOTOS_DIR: &str = "compressed_photos";

/// A photo as seen by the layout stage: its file name and pixel dimensions.
///
/// The name is the file name inside `compressed_photos/` (e.g. `007.jpg`).
/// It is unique within a gallery and is the sort key for layout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoItem {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl PhotoItem {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

/// Output directory layout of a generated gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryDirs {
    pub root: PathBuf,
    pub raw: PathBuf,
    pub compressed: PathBuf,
}

impl GalleryDirs {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            raw: root.join(RAW_PHOTOS_DIR),
            compressed: root.join(COMPRESSED_PHOTOS_DIR),
        }
    }

    /// Create the root and both photo directories.
    pub fn create(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.raw)?;
        std::fs::create_dir_all(&self.compressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_dirs_are_under_root() {
        let dirs = GalleryDirs::new(Path::new("/out"));
        assert_eq!(dirs.raw, Path::new("/out/raw_photos"));
        assert_eq!(dirs.compressed, Path::new("/out/compressed_photos"));
    }

    #[test]
    fn create_makes_photo_dirs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dirs = GalleryDirs::new(&tmp.path().join("gallery"));
        dirs.create().unwrap();
        assert!(dirs.raw.is_dir());
        assert!(dirs.compressed.is_dir());
    }
}
