//! Filler insertion: square off every column against the tallest one.
//!
//! Heights are truncated to whole units before comparison. A deficit of 0 or
//! 1 is left alone, so two columns within one unit of the tallest stay
//! unpadded even when they are not pixel-identical.

use super::{Column, FillerItem, LayoutEntry};
use super::queue::ColumnKey;
use crate::naming::filler_name;

/// Deficits at or below this many units get no filler.
pub const FILLER_THRESHOLD: i64 = 1;

/// Truncated height difference between the tallest column and `other`.
pub fn deficit(largest: f64, other: f64) -> i64 {
    largest.floor() as i64 - other.floor() as i64
}

/// Append one filler to each non-tallest column whose deficit exceeds
/// [`FILLER_THRESHOLD`]. `ascending` is every column key ordered shortest
/// first; its last element is the tallest column.
pub(super) fn pad_columns(columns: &mut [Column], ascending: &[ColumnKey], reference_width: u32) {
    let Some((largest, others)) = ascending.split_last() else {
        return;
    };
    let largest_height = columns[largest.slot].height;

    for key in others {
        let column = &mut columns[key.slot];
        let missing = deficit(largest_height, column.height);
        if missing <= FILLER_THRESHOLD {
            continue;
        }
        let height = u32::try_from(missing).unwrap_or(u32::MAX);
        column.entries.push(LayoutEntry::Filler(FillerItem {
            name: filler_name(column.index),
            width: reference_width,
            height,
        }));
        column.height += f64::from(height);
    }
}
