//! Raw photo copy and compression.
//!
//! The first two stages of a build:
//!
//! 1. **Copy**: source photos are copied into `raw_photos/`, renamed to their
//!    zero-padded sequence number (`001.jpg`, `002.png`, ...). Sequence
//!    order is file name order in the source directory.
//! 2. **Compress**: each raw photo is scaled by the compress factor into
//!    `compressed_photos/` under the same name.
//!
//! ## Output Structure
//!
//! ```text
//! gallery/
//! ├── .compress-cache.json
//! ├── raw_photos/
//! │   ├── 001.jpg
//! │   └── 002.png
//! └── compressed_photos/
//!     ├── 001.jpg
//!     └── 002.png
//! ```
//!
//! Photos left over from an earlier run with a larger source set are removed
//! from both directories so they never reach the layout.
//!
//! ## Parallel Processing
//!
//! Compression runs on the global [rayon](https://docs.rs/rayon) pool. The
//! first failure aborts the stage. Progress is reported through an optional
//! `mpsc` channel so the caller decides how to print it.

use crate::cache::{self, CacheManifest, CacheStats};
use crate::imaging::{BackendError, CompressConfig, ImageBackend, compress_photo};
use crate::naming::raw_photo_name;
use crate::scan::{self, ScanError};
use crate::types::GalleryDirs;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Failed to compress {path}: {source}")]
    Compress {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// A source photo and the name it was copied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPhoto {
    pub source: PathBuf,
    pub name: String,
}

/// Whether a compressed photo was reused or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressStatus {
    Cached,
    Compressed,
}

/// Progress events emitted during compression.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    /// Compression is about to start.
    Started { total: usize },
    /// A photo is in `compressed_photos/`.
    PhotoDone {
        name: String,
        source: PathBuf,
        status: CompressStatus,
    },
}

/// Result of the compression stage.
#[derive(Debug)]
pub struct ProcessResult {
    /// Names written to `compressed_photos/`, in sequence order.
    pub compressed: Vec<String>,
    pub cache_stats: CacheStats,
}

/// Copy supported photos from `src_dir` into `raw_dir` under sequence names.
pub fn copy_raw_photos(src_dir: &Path, raw_dir: &Path) -> Result<Vec<RawPhoto>, ProcessError> {
    let sources = scan::list_photos(src_dir)?;
    std::fs::create_dir_all(raw_dir)?;

    let total = sources.len();
    let mut copied = Vec::with_capacity(total);
    for (i, source) in sources.into_iter().enumerate() {
        let ext = source
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = raw_photo_name(i + 1, total, &ext);
        std::fs::copy(&source, raw_dir.join(&name))?;
        debug!(source = %source.display(), raw = %name, "Copied photo");
        copied.push(RawPhoto { source, name });
    }

    remove_stale_photos(raw_dir, copied.iter().map(|p| p.name.as_str()))?;
    Ok(copied)
}

/// Delete photos in `dir` whose names are not in `keep`.
///
/// Only files [`scan::list_gallery_photos`] would return are considered, so
/// fillers and unrelated files are left alone. Returns the number removed.
pub fn remove_stale_photos<'a>(
    dir: &Path,
    keep: impl IntoIterator<Item = &'a str>,
) -> Result<usize, ProcessError> {
    let keep: HashSet<&str> = keep.into_iter().collect();
    let mut removed = 0;
    for path in scan::list_gallery_photos(dir)? {
        let stale = path
            .file_name()
            .map(|n| !keep.contains(n.to_string_lossy().as_ref()))
            .unwrap_or(false);
        if stale {
            std::fs::remove_file(&path)?;
            debug!(path = %path.display(), "Removed stale photo");
            removed += 1;
        }
    }
    Ok(removed)
}

/// Compress every raw photo into `dirs.compressed`.
///
/// When `use_cache` is set, the manifest in `dirs.root` is consulted;
/// photos whose source and parameters are unchanged are skipped. The
/// manifest is rewritten either way.
pub fn compress_photos(
    backend: &impl ImageBackend,
    photos: &[RawPhoto],
    dirs: &GalleryDirs,
    config: &CompressConfig,
    use_cache: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let (raw_dir, compressed_dir) = (dirs.raw.as_path(), dirs.compressed.as_path());
    std::fs::create_dir_all(compressed_dir)?;

    let mut manifest = if use_cache {
        CacheManifest::load(&dirs.root)
    } else {
        CacheManifest::empty()
    };
    let params_hash = cache::hash_compress_params(config);

    if let Some(tx) = &events {
        tx.send(ProcessEvent::Started {
            total: photos.len(),
        })
        .ok();
    }

    let outcomes: Vec<(String, String, CompressStatus)> = photos
        .par_iter()
        .map(|photo| -> Result<_, ProcessError> {
            let raw_path = raw_dir.join(&photo.name);
            let source_hash = cache::hash_file(&raw_path)?;

            let status =
                if manifest.is_fresh(&photo.name, &source_hash, &params_hash, compressed_dir) {
                    CompressStatus::Cached
                } else {
                    compress_photo(backend, &raw_path, &compressed_dir.join(&photo.name), config)
                        .map_err(|source| ProcessError::Compress {
                            path: raw_path.clone(),
                            source,
                        })?;
                    CompressStatus::Compressed
                };

            if let Some(tx) = &events {
                tx.send(ProcessEvent::PhotoDone {
                    name: photo.name.clone(),
                    source: photo.source.clone(),
                    status,
                })
                .ok();
            }
            Ok((photo.name.clone(), source_hash, status))
        })
        .collect::<Result<_, _>>()?;

    let mut cache_stats = CacheStats::default();
    let mut compressed = Vec::with_capacity(outcomes.len());
    for (name, source_hash, status) in outcomes {
        match status {
            CompressStatus::Cached => cache_stats.hit(),
            CompressStatus::Compressed => cache_stats.miss(),
        }
        manifest.insert(name.clone(), source_hash, params_hash.clone());
        compressed.push(name);
    }

    remove_stale_photos(compressed_dir, compressed.iter().map(String::as_str))?;
    manifest.retain_names(compressed.iter().map(String::as_str));
    manifest.save(&dirs.root)?;

    Ok(ProcessResult {
        compressed,
        cache_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::{Quality, RustBackend, ScaleFactor};
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn half() -> CompressConfig {
        CompressConfig {
            factor: ScaleFactor::new(0.5).unwrap(),
            quality: Quality::new(85),
        }
    }

    struct Dirs {
        _tmp: TempDir,
        gallery: GalleryDirs,
    }

    impl Dirs {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let gallery = GalleryDirs::new(tmp.path());
            Self { _tmp: tmp, gallery }
        }
        fn root(&self) -> &Path {
            &self.gallery.root
        }
        fn raw(&self) -> PathBuf {
            self.gallery.raw.clone()
        }
        fn compressed(&self) -> PathBuf {
            self.gallery.compressed.clone()
        }
    }

    // =========================================================================
    // copy_raw_photos
    // =========================================================================

    #[test]
    fn copy_renames_in_file_name_order() {
        let src = TempDir::new().unwrap();
        for name in ["zebra.JPG", "apple.png", "mango.jpeg", "notes.txt"] {
            fs::write(src.path().join(name), name).unwrap();
        }
        let dirs = Dirs::new();

        let copied = copy_raw_photos(src.path(), &dirs.raw()).unwrap();

        let names: Vec<&str> = copied.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["001.png", "002.jpeg", "003.jpg"]);
        assert_eq!(copied[0].source, src.path().join("apple.png"));
        assert_eq!(dir_listing(&dirs.raw()), vec!["001.png", "002.jpeg", "003.jpg"]);
        assert_eq!(
            fs::read_to_string(dirs.raw().join("003.jpg")).unwrap(),
            "zebra.JPG"
        );
    }

    #[test]
    fn copy_includes_sources_named_like_fillers() {
        let src = TempDir::new().unwrap();
        for name in ["trip_column_buffer.jpg", "beach.jpg"] {
            fs::write(src.path().join(name), name).unwrap();
        }
        let dirs = Dirs::new();

        let copied = copy_raw_photos(src.path(), &dirs.raw()).unwrap();

        assert_eq!(copied.len(), 2);
        assert_eq!(copied[1].source, src.path().join("trip_column_buffer.jpg"));
        assert_eq!(dir_listing(&dirs.raw()), vec!["001.jpg", "002.jpg"]);
    }

    #[test]
    fn copy_removes_photos_from_larger_previous_run() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("a.jpg"), "a").unwrap();
        let dirs = Dirs::new();
        fs::create_dir_all(dirs.raw()).unwrap();
        fs::write(dirs.raw().join("002.jpg"), "old").unwrap();

        copy_raw_photos(src.path(), &dirs.raw()).unwrap();
        assert_eq!(dir_listing(&dirs.raw()), vec!["001.jpg"]);
    }

    #[test]
    fn copy_empty_source_is_ok() {
        let src = TempDir::new().unwrap();
        let dirs = Dirs::new();
        assert!(copy_raw_photos(src.path(), &dirs.raw()).unwrap().is_empty());
    }

    #[test]
    fn copy_missing_source_is_error() {
        let dirs = Dirs::new();
        let result = copy_raw_photos(&dirs.root().join("missing"), &dirs.raw());
        assert!(matches!(result, Err(ProcessError::Scan(_))));
    }

    // =========================================================================
    // remove_stale_photos
    // =========================================================================

    #[test]
    fn remove_stale_keeps_fillers_and_other_files() {
        let tmp = TempDir::new().unwrap();
        for name in ["001.jpg", "002.jpg", "column_buffer_1.png", "readme.txt"] {
            fs::write(tmp.path().join(name), "x").unwrap();
        }

        let removed = remove_stale_photos(tmp.path(), ["001.jpg"]).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(
            dir_listing(tmp.path()),
            vec!["001.jpg", "column_buffer_1.png", "readme.txt"]
        );
    }

    // =========================================================================
    // compress_photos with mock backend
    // =========================================================================

    fn raw_fixture(dirs: &Dirs, names: &[&str]) -> Vec<RawPhoto> {
        fs::create_dir_all(dirs.raw()).unwrap();
        names
            .iter()
            .map(|name| {
                fs::write(dirs.raw().join(name), format!("bytes of {name}")).unwrap();
                RawPhoto {
                    source: PathBuf::from(format!("/src/{name}")),
                    name: name.to_string(),
                }
            })
            .collect()
    }

    #[test]
    fn compress_resizes_each_photo_by_factor() {
        let dirs = Dirs::new();
        let photos = raw_fixture(&dirs, &["001.jpg", "002.jpg"]);
        let backend = MockBackend::with_dimensions(&[("001.jpg", 800, 600), ("002.jpg", 301, 401)]);

        let result = compress_photos(
            &backend,
            &photos,
            &dirs.gallery,
            &half(),
            true,
            None,
        )
        .unwrap();

        assert_eq!(result.compressed, vec!["001.jpg", "002.jpg"]);
        assert_eq!(result.cache_stats, CacheStats { hits: 0, misses: 2 });

        let mut resizes: Vec<(u32, u32)> = backend
            .get_operations()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Resize { width, height, .. } => Some((width, height)),
                _ => None,
            })
            .collect();
        resizes.sort();
        assert_eq!(resizes, vec![(150, 200), (400, 300)]);
    }

    #[test]
    fn compress_failure_aborts_stage() {
        let dirs = Dirs::new();
        let photos = raw_fixture(&dirs, &["001.jpg", "002.jpg"]);
        let backend = MockBackend::with_dimensions(&[("001.jpg", 800, 600)]);

        let result = compress_photos(
            &backend,
            &photos,
            &dirs.gallery,
            &half(),
            true,
            None,
        );
        assert!(
            matches!(result, Err(ProcessError::Compress { ref path, .. }) if path.ends_with("002.jpg"))
        );
    }

    #[test]
    fn compress_sends_events() {
        let dirs = Dirs::new();
        let photos = raw_fixture(&dirs, &["001.jpg"]);
        let backend = MockBackend::with_dimensions(&[("001.jpg", 10, 10)]);
        let (tx, rx) = std::sync::mpsc::channel();

        compress_photos(
            &backend,
            &photos,
            &dirs.gallery,
            &half(),
            true,
            Some(tx),
        )
        .unwrap();

        let events: Vec<ProcessEvent> = rx.iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ProcessEvent::Started { total: 1 }));
        assert!(matches!(
            &events[1],
            ProcessEvent::PhotoDone { name, status: CompressStatus::Compressed, .. } if name == "001.jpg"
        ));
    }

    // =========================================================================
    // compress_photos with real images + cache
    // =========================================================================

    fn real_fixture(dirs: &Dirs) -> Vec<RawPhoto> {
        let src = photo_dir(&[("a.jpg", 80, 60), ("b.png", 40, 90)]);
        copy_raw_photos(src.path(), &dirs.raw()).unwrap()
    }

    fn run(dirs: &Dirs, photos: &[RawPhoto], config: &CompressConfig, use_cache: bool) -> ProcessResult {
        compress_photos(
            &RustBackend::new(),
            photos,
            &dirs.gallery,
            config,
            use_cache,
            None,
        )
        .unwrap()
    }

    #[test]
    fn compress_writes_scaled_images() {
        let dirs = Dirs::new();
        let photos = real_fixture(&dirs);

        run(&dirs, &photos, &half(), true);

        assert_eq!(dir_listing(&dirs.compressed()), vec!["001.jpg", "002.png"]);
        let backend = RustBackend::new();
        let a = backend.identify(&dirs.compressed().join("001.jpg")).unwrap();
        let b = backend.identify(&dirs.compressed().join("002.png")).unwrap();
        assert_eq!((a.width, a.height), (40, 30));
        assert_eq!((b.width, b.height), (20, 45));
        assert!(cache::manifest_path(dirs.root()).exists());
    }

    #[test]
    fn second_run_hits_cache() {
        let dirs = Dirs::new();
        let photos = real_fixture(&dirs);

        run(&dirs, &photos, &half(), true);
        let second = run(&dirs, &photos, &half(), true);
        assert_eq!(second.cache_stats, CacheStats { hits: 2, misses: 0 });
    }

    #[test]
    fn changed_factor_misses_cache() {
        let dirs = Dirs::new();
        let photos = real_fixture(&dirs);

        run(&dirs, &photos, &half(), true);
        let quarter = CompressConfig {
            factor: ScaleFactor::new(0.25).unwrap(),
            quality: Quality::new(85),
        };
        let second = run(&dirs, &photos, &quarter, true);
        assert_eq!(second.cache_stats.misses, 2);
    }

    #[test]
    fn no_cache_recompresses_everything() {
        let dirs = Dirs::new();
        let photos = real_fixture(&dirs);

        run(&dirs, &photos, &half(), true);
        let second = run(&dirs, &photos, &half(), false);
        assert_eq!(second.cache_stats, CacheStats { hits: 0, misses: 2 });
    }

    #[test]
    fn deleted_output_is_recompressed() {
        let dirs = Dirs::new();
        let photos = real_fixture(&dirs);

        run(&dirs, &photos, &half(), true);
        fs::remove_file(dirs.compressed().join("001.jpg")).unwrap();
        let second = run(&dirs, &photos, &half(), true);
        assert_eq!(second.cache_stats, CacheStats { hits: 1, misses: 1 });
        assert!(dirs.compressed().join("001.jpg").exists());
    }
}
