//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what images to create) and the [`backend`](super::backend)
//! (which does the actual pixel work). A mock backend can be swapped in for
//! tests without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`ScaleFactor`] — Compression factor in the open interval (0, 1). Rejected on construction.
//! - [`FillColor`] — Solid RGB color for filler images, parsed from `#rgb` / `#rrggbb`.
//! - [`ResizeParams`] — Source, output path, exact target dimensions, quality.
//! - [`BlankParams`] — Output path, dimensions, color and quality for a solid image.

use super::backend::BackendError;
use std::fmt;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Uniform scale factor applied when compressing photos.
///
/// Only values strictly between 0 and 1 are accepted; validation happens
/// here so a bad factor fails before any file is touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(value: f64) -> Result<Self, BackendError> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(BackendError::InvalidScaleFactor(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// RGB fill color for blank images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillColor(pub [u8; 3]);

impl FillColor {
    pub const WHITE: Self = Self([255, 255, 255]);

    /// Parse `#rrggbb` or `#rgb`. Returns `None` for anything else.
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self([
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ])),
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, c) in rgb.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 17;
                }
                Some(Self(rgb))
            }
            _ => None,
        }
    }
}

impl Default for FillColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Parameters for an exact-size resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

/// Parameters for writing a solid-color image.
#[derive(Debug, Clone, PartialEq)]
pub struct BlankParams {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub color: FillColor,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn scale_factor_accepts_open_interval() {
        assert_eq!(ScaleFactor::new(0.5).unwrap().value(), 0.5);
        assert!(ScaleFactor::new(0.001).is_ok());
        assert!(ScaleFactor::new(0.999).is_ok());
    }

    #[test]
    fn scale_factor_rejects_bounds_and_nan() {
        for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(ScaleFactor::new(bad), Err(BackendError::InvalidScaleFactor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn fill_color_parses_long_hex() {
        assert_eq!(FillColor::parse("#ffffff"), Some(FillColor::WHITE));
        assert_eq!(FillColor::parse("#102030"), Some(FillColor([16, 32, 48])));
    }

    #[test]
    fn fill_color_parses_short_hex() {
        assert_eq!(FillColor::parse("#fff"), Some(FillColor::WHITE));
        assert_eq!(FillColor::parse("#0a0"), Some(FillColor([0, 170, 0])));
    }

    #[test]
    fn fill_color_rejects_garbage() {
        assert_eq!(FillColor::parse("white"), None);
        assert_eq!(FillColor::parse("#ggg"), None);
        assert_eq!(FillColor::parse("#ffff"), None);
        assert_eq!(FillColor::parse("ffffff"), None);
    }
}
