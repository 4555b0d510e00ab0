//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode JPEG | `image::codecs::jpeg::JpegEncoder` at the configured quality |
//! | Encode PNG / TIFF / WebP | `DynamicImage::save_with_format` (lossless) |
//! | Blank filler | `image::RgbImage::from_pixel` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{BlankParams, ResizeParams};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, Rgb, RgbImage};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Extensions whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Whether `path` has a supported image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| supported_input_extensions().contains(&e.as_str()))
}

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a decode-side `ImageError`: I/O failures stay I/O, the rest mean the
/// file is not an image we can read.
fn decode_error(path: &Path, err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(e) => BackendError::Io(e),
        other => BackendError::unreadable(path, other),
    }
}

/// Open a reader with the format guessed from content, not just extension.
fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, BackendError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?
        .decode()
        .map_err(|e| decode_error(path, e))
}

fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    ImageFormat::from_path(path).map_err(|_| {
        BackendError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            path.display()
        ))
    })
}

/// Save a DynamicImage to the given path, inferring format from extension.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    match output_format(path)? {
        ImageFormat::Jpeg => save_jpeg(img, path, quality),
        format => img.save_with_format(path, format).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
        }),
    }
}

/// Encode as JPEG. Alpha is dropped since JPEG has no alpha channel.
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100) as u8);
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    rgb.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        debug!(
            source = %params.source.display(),
            orig_w = img.width(),
            orig_h = img.height(),
            new_width = params.width,
            new_height = params.height,
            "Resizing photo"
        );
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.output, params.quality.value())
    }

    fn write_blank(&self, params: &BlankParams) -> Result<(), BackendError> {
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Blank image must be non-empty, got {}x{}",
                params.width, params.height
            )));
        }
        let img = RgbImage::from_pixel(params.width, params.height, Rgb(params.color.0));
        save_image(
            &DynamicImage::ImageRgb8(img),
            &params.output,
            params.quality.value(),
        )
    }
}
