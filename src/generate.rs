//! Gallery page assembly.
//!
//! The last stage of a build. Takes the balanced [`Layout`] and writes:
//!
//! ```text
//! gallery/
//! ├── index.html                 # Template with the photo list substituted
//! ├── style.css                  # Layout variables + stylesheet asset
//! ├── gallery.js                 # Full-size viewer
//! └── compressed_photos/
//!     └── column_buffer_2.png    # Filler images for short columns
//! ```
//!
//! ## Templates
//!
//! The three assets are embedded at compile time from `static/`. A
//! `template.dir` in the config replaces all three; the directory must hold
//! `index.html`, `style.css` and `gallery.js`.
//!
//! `index.html` uses one placeholder, `{{ photos }}` (whitespace inside the
//! braces optional). Unknown placeholders are an error rather than being
//! left in the page.
//!
//! ## HTML Generation
//!
//! Photo tags are rendered with [maud](https://maud.lambda.xyz/), so file
//! names are escaped. Fillers carry `class="column-filler"` so the viewer
//! script skips them.

use crate::config::{self, GalleryConfig};
use crate::imaging::{BackendError, FillColor, ImageBackend, Quality, write_filler};
use crate::layout::{FillerItem, Layout, LayoutEntry};
use crate::naming::is_filler_name;
use crate::types::{COMPRESSED_PHOTOS_DIR, GalleryDirs};
use maud::{Markup, html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unknown template placeholder {{{{ {0} }}}}")]
    UnknownPlaceholder(String),
    #[error("Unterminated placeholder in template")]
    UnterminatedPlaceholder,
    #[error("Template has no {{{{ photos }}}} placeholder")]
    MissingPhotosPlaceholder,
    #[error("Failed to write filler {name}: {source}")]
    Filler {
        name: String,
        #[source]
        source: BackendError,
    },
}

pub const INDEX_FILENAME: &str = "index.html";
pub const STYLE_FILENAME: &str = "style.css";
pub const SCRIPT_FILENAME: &str = "gallery.js";

const INDEX_HTML: &str = include_str!("../static/index.html");
const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

/// Placeholder replaced by the photo list.
const PHOTOS_PLACEHOLDER: &str = "photos";

/// Page template and the two assets shipped next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub index: String,
    pub style: String,
    pub script: String,
}

impl Templates {
    /// Templates compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            index: INDEX_HTML.to_string(),
            style: CSS_STATIC.to_string(),
            script: JS.to_string(),
        }
    }

    /// Read all three templates from `dir`.
    pub fn load(dir: &Path) -> Result<Self, GenerateError> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| GenerateError::TemplateRead { path, source })
        };
        Ok(Self {
            index: read(INDEX_FILENAME)?,
            style: read(STYLE_FILENAME)?,
            script: read(SCRIPT_FILENAME)?,
        })
    }

    /// Templates from `template.dir` when set, built-ins otherwise.
    pub fn from_config(config: &GalleryConfig) -> Result<Self, GenerateError> {
        match &config.template.dir {
            Some(dir) => Self::load(dir),
            None => Ok(Self::builtin()),
        }
    }
}

/// Substitute `{{ photos }}` in `template` with `photos`.
///
/// Every occurrence is replaced. Any other placeholder name is rejected, as
/// is a template that never mentions `photos`.
pub fn render_template(template: &str, photos: &str) -> Result<String, GenerateError> {
    let mut out = String::with_capacity(template.len() + photos.len());
    let mut rest = template;
    let mut substituted = false;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or(GenerateError::UnterminatedPlaceholder)?;
        let name = after[..end].trim();
        if name != PHOTOS_PLACEHOLDER {
            return Err(GenerateError::UnknownPlaceholder(name.to_string()));
        }
        out.push_str(photos);
        substituted = true;
        rest = &after[end + 2..];
    }
    out.push_str(rest);

    if substituted {
        Ok(out)
    } else {
        Err(GenerateError::MissingPhotosPlaceholder)
    }
}

/// `<img>` tag for one layout entry.
pub fn render_entry(entry: &LayoutEntry) -> Markup {
    let src = format!("{}/{}", COMPRESSED_PHOTOS_DIR, entry.name());
    html! {
        @if entry.is_filler() {
            img.column-filler src=(src) alt="" loading="lazy";
        } @else {
            img src=(src) loading="lazy";
        }
    }
}

/// Photo list for the template: one tag per line in layout order.
pub fn render_photos(layout: &Layout) -> String {
    layout
        .entries()
        .map(|entry| format!("        {}\n", render_entry(entry).into_string()))
        .collect()
}

/// `style.css` contents: layout variables followed by the stylesheet asset.
pub fn generate_stylesheet(config: &GalleryConfig, asset: &str) -> String {
    format!("{}\n\n{}", config::generate_layout_css(&config.layout), asset)
}

/// Delete filler images in `dir` that `layout` does not reference.
///
/// Returns the number of files removed.
pub fn remove_stale_fillers(dir: &Path, layout: &Layout) -> Result<usize, GenerateError> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let current: HashSet<&str> = layout.fillers().map(|f| f.name.as_str()).collect();
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_filler_name(&name) && !current.contains(name.as_str()) {
            fs::remove_file(entry.path())?;
            debug!(file = %name, "Removed stale filler");
            removed += 1;
        }
    }
    Ok(removed)
}

/// Write one blank image per filler in `layout` into `dir`.
pub fn write_fillers(
    backend: &impl ImageBackend,
    layout: &Layout,
    dir: &Path,
    color: FillColor,
    quality: Quality,
) -> Result<Vec<FillerItem>, GenerateError> {
    layout
        .fillers()
        .map(|filler| {
            write_filler(backend, filler, dir, color, quality).map_err(|source| {
                GenerateError::Filler {
                    name: filler.name.clone(),
                    source,
                }
            })?;
            debug!(name = %filler.name, height = filler.height, "Wrote filler");
            Ok(filler.clone())
        })
        .collect()
}

/// Files written by [`generate`].
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub fillers: Vec<FillerItem>,
    pub removed_fillers: usize,
    pub pages: Vec<PathBuf>,
}

/// Write fillers and the three page files for `layout`.
pub fn generate(
    backend: &impl ImageBackend,
    layout: &Layout,
    dirs: &GalleryDirs,
    config: &GalleryConfig,
    templates: &Templates,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(&dirs.compressed)?;

    let removed_fillers = remove_stale_fillers(&dirs.compressed, layout)?;
    let fillers = write_fillers(
        backend,
        layout,
        &dirs.compressed,
        config.fill_color(),
        Quality::new(config.images.quality),
    )?;

    let index = render_template(&templates.index, &render_photos(layout))?;
    let style = generate_stylesheet(config, &templates.style);

    let mut pages = Vec::with_capacity(3);
    for (name, contents) in [
        (INDEX_FILENAME, index.as_str()),
        (STYLE_FILENAME, style.as_str()),
        (SCRIPT_FILENAME, templates.script.as_str()),
    ] {
        let path = dirs.root.join(name);
        fs::write(&path, contents)?;
        pages.push(path);
    }

    Ok(GenerateReport {
        fillers,
        removed_fillers,
        pages,
    })
}
