//! File naming conventions for generated galleries.
//!
//! ## Raw Photo Names
//!
//! Source photos are copied into `raw_photos/` under a zero-padded sequence
//! number, keeping their (lowercased) extension:
//!
//! - `IMG_4411.JPG` → `001.jpg`
//! - `beach.png` → `002.png`
//!
//! The pad width is three digits, widened when a gallery holds 1000 or more
//! photos, so that lexicographic order always matches sequence order. The
//! full-size viewer script steps through photos by this number.
//!
//! ## Filler Names
//!
//! Filler images are named `column_buffer_<index>.png` after the 1-based
//! column they pad. They are PNG because a filler can be taller than the
//! 65535 pixels JPEG allows. Any file in `compressed_photos/` carrying the
//! `column_buffer` marker is excluded from layout input, so fillers from a
//! previous run never get balanced as photos.

/// Marker shared by every filler file name.
pub const FILLER_MARKER: &str = "column_buffer";

/// Minimum digits in a raw photo sequence number.
const MIN_PAD_WIDTH: usize = 3;

/// Digits needed to zero-pad sequence numbers for `total` photos.
pub fn pad_width(total: usize) -> usize {
    total.to_string().len().max(MIN_PAD_WIDTH)
}

/// Zero-pad a 1-based sequence number.
pub fn zero_pad(number: usize, width: usize) -> String {
    format!("{:0>width$}", number, width = width)
}

/// Name of the `number`-th raw photo in a gallery of `total` photos.
///
/// `extension` is lowercased; an empty extension yields a bare number.
pub fn raw_photo_name(number: usize, total: usize, extension: &str) -> String {
    let stem = zero_pad(number, pad_width(total));
    if extension.is_empty() {
        stem
    } else {
        format!("{}.{}", stem, extension.to_ascii_lowercase())
    }
}

/// File name of the filler image for a 1-based column index.
pub fn filler_name(column: usize) -> String {
    format!("{}_{}.png", FILLER_MARKER, column)
}

/// Whether a file name belongs to a filler image.
pub fn is_filler_name(name: &str) -> bool {
    name.contains(FILLER_MARKER)
}
