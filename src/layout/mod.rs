//! Column balancing for the masonry layout.
//!
//! Given photos with known dimensions, assign each to one of `K` columns so
//! the columns' cumulative *rendered heights* come out as even as possible,
//! then pad the shorter columns with blank filler images.
//!
//! ## Algorithm
//!
//! Greedy shortest-column-first streaming placement:
//!
//! 1. Sort photos by name so repeated runs produce identical layouts.
//! 2. Scale every photo to the reference width `R`; its rendered height is
//!    `height * R / width`.
//! 3. Pop the shortest column (ties go to the lowest index), append the
//!    photo, add its rendered height, push the column back.
//! 4. Compare every other column with the tallest one on truncated heights
//!    and append a `R × deficit` filler where the deficit exceeds one unit.
//!
//! ## Output Contract
//!
//! [`Layout::ordered_names`] concatenates the columns in index order
//! (column 1's entries, then column 2's, …). The gallery page relies on
//! that order alone; CSS multi-column flow places each run of names into
//! its visual column.
//!
//! Everything here is pure: no I/O, no logging.

mod filler;
mod queue;

pub use filler::{FILLER_THRESHOLD, deficit};

use crate::types::PhotoItem;
use queue::ColumnQueue;
use serde::Serialize;
use thiserror::Error;

/// Column count used when none is configured.
pub const DEFAULT_COLUMNS: usize = 3;

/// Reference width used when none is configured. Matches the thumbnail
/// display width, so filler heights are in display pixels.
pub const DEFAULT_REFERENCE_WIDTH: u32 = 100;

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error("Invalid dimensions {width}x{height} for photo {name}")]
    InvalidDimensions {
        name: String,
        width: u32,
        height: u32,
    },
    #[error("Column count must be at least 1, got {0}")]
    InvalidColumnCount(usize),
    #[error("Reference width must be at least 1")]
    InvalidReferenceWidth,
}

/// A blank spacer image appended to the bottom of a short column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillerItem {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// One slot in a column: a photo (by name) or a filler.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutEntry {
    Photo { name: String },
    Filler(FillerItem),
}

impl LayoutEntry {
    pub fn name(&self) -> &str {
        match self {
            LayoutEntry::Photo { name } => name,
            LayoutEntry::Filler(filler) => &filler.name,
        }
    }

    pub fn is_filler(&self) -> bool {
        matches!(self, LayoutEntry::Filler(_))
    }
}

/// A vertical bucket of the masonry grid. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub index: usize,
    /// Cumulative rendered height, fillers included.
    pub height: f64,
    pub entries: Vec<LayoutEntry>,
}

impl Column {
    fn new(index: usize) -> Self {
        Self {
            index,
            height: 0.0,
            entries: Vec::new(),
        }
    }

    /// Names of the photos in this column, fillers excluded.
    pub fn photo_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| !e.is_filler())
            .map(LayoutEntry::name)
    }

    pub fn filler(&self) -> Option<&FillerItem> {
        self.entries.iter().find_map(|e| match e {
            LayoutEntry::Filler(f) => Some(f),
            LayoutEntry::Photo { .. } => None,
        })
    }
}

/// Result of balancing: columns in ascending index order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub reference_width: u32,
    pub columns: Vec<Column>,
}

impl Layout {
    /// Entry names in column-major order, fillers included.
    pub fn ordered_names(&self) -> Vec<&str> {
        self.entries().map(LayoutEntry::name).collect()
    }

    /// All entries in column-major order.
    pub fn entries(&self) -> impl Iterator<Item = &LayoutEntry> {
        self.columns.iter().flat_map(|c| c.entries.iter())
    }

    pub fn fillers(&self) -> impl Iterator<Item = &FillerItem> {
        self.columns.iter().filter_map(Column::filler)
    }

    pub fn photo_count(&self) -> usize {
        self.entries().filter(|e| !e.is_filler()).count()
    }

    /// Height of the tallest column.
    pub fn max_height(&self) -> f64 {
        self.columns
            .iter()
            .map(|c| c.height)
            .fold(0.0, f64::max)
    }
}

/// Height of `item` once uniformly scaled to `reference_width`.
pub fn rendered_height(item: &PhotoItem, reference_width: u32) -> Result<f64, LayoutError> {
    if item.width == 0 || item.height == 0 {
        return Err(LayoutError::InvalidDimensions {
            name: item.name.clone(),
            width: item.width,
            height: item.height,
        });
    }
    Ok(f64::from(item.height) * (f64::from(reference_width) / f64::from(item.width)))
}

/// Assigns photos to a fixed number of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBalancer {
    columns: usize,
    reference_width: u32,
}

impl Default for ColumnBalancer {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            reference_width: DEFAULT_REFERENCE_WIDTH,
        }
    }
}

impl ColumnBalancer {
    pub fn new(columns: usize, reference_width: u32) -> Result<Self, LayoutError> {
        if columns == 0 {
            return Err(LayoutError::InvalidColumnCount(columns));
        }
        if reference_width == 0 {
            return Err(LayoutError::InvalidReferenceWidth);
        }
        Ok(Self {
            columns,
            reference_width,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn reference_width(&self) -> u32 {
        self.reference_width
    }

    /// Balance `items` across the columns and pad the short ones.
    ///
    /// Every item is validated before any column is touched, so an
    /// `InvalidDimensions` error never leaves a partial layout behind.
    pub fn balance(&self, items: &[PhotoItem]) -> Result<Layout, LayoutError> {
        let mut placed: Vec<(&PhotoItem, f64)> = items
            .iter()
            .map(|item| Ok((item, rendered_height(item, self.reference_width)?)))
            .collect::<Result<_, LayoutError>>()?;
        placed.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));

        let mut columns: Vec<Column> = (1..=self.columns).map(Column::new).collect();
        let mut queue = ColumnQueue::with_columns(self.columns);

        for (item, height) in placed {
            // The queue always holds all columns between iterations
            let Some(mut key) = queue.pop_shortest() else {
                break;
            };
            let column = &mut columns[key.slot];
            column.entries.push(LayoutEntry::Photo {
                name: item.name.clone(),
            });
            column.height += height;
            key.height = column.height;
            queue.push(key);
        }

        let ascending = queue.into_ascending();
        filler::pad_columns(&mut columns, &ascending, self.reference_width);

        Ok(Layout {
            reference_width: self.reference_width,
            columns,
        })
    }
}

/// Convenience wrapper: build a balancer and run it once.
pub fn balance(
    items: &[PhotoItem],
    columns: usize,
    reference_width: u32,
) -> Result<Layout, LayoutError> {
    ColumnBalancer::new(columns, reference_width)?.balance(items)
}
