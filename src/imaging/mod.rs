//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Compress** | Lanczos3 `resize_exact` + JPEG/PNG/TIFF/WebP encoders |
//! | **Filler** | solid `RgbImage` encoded as JPEG |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::scaled_dimensions;
pub use operations::{CompressConfig, compress_photo, get_dimensions, write_filler};
pub use params::{BlankParams, FillColor, Quality, ResizeParams, ScaleFactor};
pub use rust_backend::{RustBackend, is_supported_image, supported_input_extensions};
