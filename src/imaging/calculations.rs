//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Dimensions of an image uniformly scaled by `factor`.
///
/// Each edge is floored, matching how the compressed copies are sized, and
/// never drops below one pixel so tiny sources still encode.
///
/// # Examples
/// ```
/// # use masonry_gal::imaging::scaled_dimensions;
/// assert_eq!(scaled_dimensions((4000, 3000), 0.25), (1000, 750));
/// assert_eq!(scaled_dimensions((333, 101), 0.5), (166, 50));
/// ```
pub fn scaled_dimensions(original: (u32, u32), factor: f64) -> (u32, u32) {
    let (w, h) = original;
    let scale = |edge: u32| ((f64::from(edge) * factor).floor() as u32).max(1);
    (scale(w), scale(h))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // scaled_dimensions tests
    // =========================================================================

    #[test]
    fn scaled_halves_both_edges() {
        assert_eq!(scaled_dimensions((800, 600), 0.5), (400, 300));
    }

    #[test]
    fn scaled_floors_fractional_pixels() {
        // 333 * 0.3 = 99.9 → 99; 101 * 0.3 = 30.3 → 30
        assert_eq!(scaled_dimensions((333, 101), 0.3), (99, 30));
    }

    #[test]
    fn scaled_never_below_one_pixel() {
        assert_eq!(scaled_dimensions((3, 1), 0.1), (1, 1));
    }

    #[test]
    fn scaled_portrait_keeps_orientation() {
        assert_eq!(scaled_dimensions((3000, 4000), 0.1), (300, 400));
    }
}
