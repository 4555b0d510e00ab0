//! Build orchestration.
//!
//! Runs the stages strictly in order and stops at the first failure:
//!
//! ```text
//! 1. Copy       src/          →  raw_photos/NNN.ext
//! 2. Compress   raw_photos/   →  compressed_photos/NNN.ext   (rayon, cached)
//! 3. Scan       compressed_photos/  →  Vec<PhotoItem>
//! 4. Layout     Vec<PhotoItem>      →  Layout                (pure)
//! 5. Generate   Layout        →  fillers, index.html, style.css, gallery.js
//! ```
//!
//! The scale factor is validated before anything touches the filesystem.
//! Files written by completed stages are left in place when a later stage
//! fails.

use crate::config::{self, ConfigError, GalleryConfig, ProcessingConfig};
use crate::generate::{self, GenerateError, GenerateReport, Templates};
use crate::imaging::{BackendError, CompressConfig, ImageBackend, Quality, RustBackend, ScaleFactor};
use crate::layout::{ColumnBalancer, Layout, LayoutError};
use crate::process::{self, ProcessError, ProcessEvent, ProcessResult, RawPhoto};
use crate::scan::{self, ScanError};
use crate::types::GalleryDirs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("File system error at {path}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Imaging(#[from] BackendError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Generate error: {0}")]
    Generate(#[from] GenerateError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn fs_error(path: &Path) -> impl FnOnce(std::io::Error) -> GalleryError + '_ {
    move |source| GalleryError::FileSystem {
        path: path.to_path_buf(),
        source,
    }
}

/// Inputs of one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub src_photos_dir: PathBuf,
    pub dest_gallery_dir: PathBuf,
    pub compress_factor: f64,
    /// Explicit `--config` file.
    pub config_path: Option<PathBuf>,
    pub use_cache: bool,
    /// Where to write the layout as JSON, if anywhere.
    pub layout_json: Option<PathBuf>,
}

impl BuildOptions {
    pub fn new(src: impl Into<PathBuf>, dest: impl Into<PathBuf>, compress_factor: f64) -> Self {
        Self {
            src_photos_dir: src.into(),
            dest_gallery_dir: dest.into(),
            compress_factor,
            config_path: None,
            use_cache: true,
            layout_json: None,
        }
    }
}

/// Everything a build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub config: GalleryConfig,
    pub copied: Vec<RawPhoto>,
    pub process: ProcessResult,
    pub layout: Layout,
    pub generate: GenerateReport,
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Only the first call in a
/// process takes effect.
pub fn init_thread_pool(processing: &ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Build a gallery with the pure-Rust image backend.
pub fn run(
    options: &BuildOptions,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BuildReport, GalleryError> {
    run_with_backend(&RustBackend::new(), options, events)
}

/// Build a gallery using a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    options: &BuildOptions,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BuildReport, GalleryError> {
    let factor = ScaleFactor::new(options.compress_factor)?;

    let config = config::load_config(options.config_path.as_deref(), &options.src_photos_dir)?;
    let templates = Templates::from_config(&config)?;
    let balancer = ColumnBalancer::new(config.layout.columns, config.layout.reference_width)?;
    init_thread_pool(&config.processing);

    let dirs = GalleryDirs::new(&options.dest_gallery_dir);
    dirs.create().map_err(fs_error(&dirs.root))?;

    info!(src = %options.src_photos_dir.display(), dest = %dirs.raw.display(), "Copying raw photos");
    let copied = process::copy_raw_photos(&options.src_photos_dir, &dirs.raw)?;

    info!(count = copied.len(), factor = %factor, "Compressing photos");
    let compress = CompressConfig {
        factor,
        quality: Quality::new(config.images.quality),
    };
    let processed =
        process::compress_photos(backend, &copied, &dirs, &compress, options.use_cache, events)?;
    info!(cache = %processed.cache_stats, "Compression finished");

    let items = scan::read_photo_items(backend, &dirs.compressed)?;
    let layout = balancer.balance(&items)?;
    for column in &layout.columns {
        debug!(
            column = column.index,
            height = column.height,
            entries = column.entries.len(),
            "Balanced column"
        );
    }

    if let Some(path) = &options.layout_json {
        write_layout_json(&layout, path)?;
    }

    info!(dest = %dirs.root.display(), "Generating gallery");
    let generated = generate::generate(backend, &layout, &dirs, &config, &templates)?;

    Ok(BuildReport {
        config,
        copied,
        process: processed,
        layout,
        generate: generated,
    })
}

/// Write `layout` to `path` as pretty JSON.
pub fn write_layout_json(layout: &Layout, path: &Path) -> Result<(), GalleryError> {
    let json = serde_json::to_string_pretty(layout)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(fs_error(parent))?;
    }
    std::fs::write(path, json).map_err(fs_error(path))?;
    debug!(path = %path.display(), "Wrote layout JSON");
    Ok(())
}
