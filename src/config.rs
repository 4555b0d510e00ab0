//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are overridden by an optional user file, so a gallery needs no config at
//! all to build.
//!
//! ## Config File Location
//!
//! The file is looked up in this order:
//!
//! 1. `--config <FILE>` on the command line
//! 2. `config.toml` inside the source photos directory
//! 3. stock defaults
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [layout]
//! columns = 3               # Number of masonry columns
//! reference_width = 100     # Width every photo is normalized to when balancing
//!
//! [filler]
//! color = "#ffffff"         # Fill color of the column spacer images
//!
//! [images]
//! quality = 90              # JPEG quality for compressed photos (1-100)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//!
//! [template]
//! dir = "my-template"       # Directory with index.html, style.css, gallery.js
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [layout]
//! columns = 4
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::FillColor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up inside the source photos directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Column balancing settings.
    pub layout: LayoutConfig,
    /// Filler image settings.
    pub filler: FillerConfig,
    /// Encoding settings for written images.
    pub images: ImagesConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
    /// Custom template location.
    pub template: TemplateConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.columns == 0 {
            return Err(ConfigError::Validation(
                "layout.columns must be at least 1".into(),
            ));
        }
        if self.layout.reference_width == 0 {
            return Err(ConfigError::Validation(
                "layout.reference_width must be at least 1".into(),
            ));
        }
        if self.images.quality == 0 || self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        if FillColor::parse(&self.filler.color).is_none() {
            return Err(ConfigError::Validation(format!(
                "filler.color must be #rgb or #rrggbb, got {:?}",
                self.filler.color
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parsed filler color. Falls back to white for an unvalidated config.
    pub fn fill_color(&self) -> FillColor {
        FillColor::parse(&self.filler.color).unwrap_or_default()
    }
}

/// Column balancing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Number of masonry columns.
    pub columns: usize,
    /// Width every photo is scaled to when comparing heights; also the
    /// width of filler images.
    pub reference_width: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: crate::layout::DEFAULT_COLUMNS,
            reference_width: crate::layout::DEFAULT_REFERENCE_WIDTH,
        }
    }
}

/// Filler image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FillerConfig {
    /// Fill color as `#rgb` or `#rrggbb`.
    pub color: String,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
        }
    }
}

/// Encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// JPEG quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel compression workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Custom template location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Directory holding `index.html`, `style.css` and `gallery.js`.
    /// Relative paths resolve against the config file's directory.
    pub dir: Option<PathBuf>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(GalleryConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the gallery config.
///
/// `explicit` is a `--config` path and must exist. Without it,
/// `config.toml` in `photos_dir` is used when present. A relative
/// `template.dir` is resolved against the directory holding the file.
pub fn load_config(
    explicit: Option<&Path>,
    photos_dir: &Path,
) -> Result<GalleryConfig, ConfigError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", path.display()),
                )));
            }
            path.to_path_buf()
        }
        None => photos_dir.join(CONFIG_FILENAME),
    };

    let mut config = resolve_config(load_raw_config(&path)?)?;
    if let Some(dir) = config.template.dir.take() {
        let base = path.parent().unwrap_or(Path::new("."));
        config.template.dir = Some(if dir.is_relative() {
            base.join(dir)
        } else {
            dir
        });
    }
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Printed by `masonry-gal --gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# masonry-gal configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at <src-photos-dir>/config.toml or pass --config <FILE>.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Column balancing
# ---------------------------------------------------------------------------
[layout]
# Number of masonry columns photos are distributed across.
columns = 3

# Every photo is scaled to this width before heights are compared.
# Filler images are also this wide.
reference_width = 100

# ---------------------------------------------------------------------------
# Filler images (blank spacers that even out column heights)
# ---------------------------------------------------------------------------
[filler]
# Fill color as #rgb or #rrggbb. Match your page background.
color = "#ffffff"

# ---------------------------------------------------------------------------
# Image encoding
# ---------------------------------------------------------------------------
[images]
# JPEG quality for compressed photos (1 = worst, 100 = best).
quality = 90

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel compression workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Template
# ---------------------------------------------------------------------------
[template]
# Directory containing index.html, style.css and gallery.js.
# index.html must contain the {{ photos }} placeholder.
# Omit to use the built-in template.
# dir = "template"
"##
}

/// Generate CSS custom properties from layout config.
pub fn generate_layout_css(layout: &LayoutConfig) -> String {
    format!(
        r#":root {{
    --column-count: {columns};
    --reference-width: {reference_width}px;
}}"#,
        columns = layout.columns,
        reference_width = layout.reference_width,
    )
}
