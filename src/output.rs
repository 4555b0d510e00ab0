//! CLI output formatting for every build stage.
//!
//! Output is for people, logs are for debugging: these lines go to stdout
//! regardless of `RUST_LOG`, while `tracing` events go to stderr.
//!
//! # Output Format
//!
//! ## Copy
//!
//! ```text
//! Photos (3)
//!     001.jpg
//!         Source: IMG_0012.JPG
//! ```
//!
//! ## Compress
//!
//! ```text
//! Compressing 3 photos
//!     001.jpg: cached
//!     002.png: compressed
//! Cache: 1 cached, 2 compressed (3 total)
//! ```
//!
//! ## Layout
//!
//! ```text
//! Column 1 (2 photos, height 400)
//!     001.jpg
//!     column_buffer_1.png (filler 100x37)
//! ```
//!
//! ## Generate
//!
//! ```text
//! index.html
//! style.css
//! gallery.js
//! Generated 12 photos in 3 columns, 2 fillers
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::cache::CacheStats;
use crate::generate::GenerateReport;
use crate::layout::{Layout, LayoutEntry};
use crate::process::{CompressStatus, ProcessEvent, RawPhoto};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// File name of `path`, or the whole path when it has none.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Copy output
// ============================================================================

/// Format the raw photo copy: each sequence name with its source file.
pub fn format_copy_output(photos: &[RawPhoto]) -> Vec<String> {
    let mut lines = vec![format!("Photos ({})", photos.len())];
    for photo in photos {
        lines.push(format!("{}{}", indent(1), photo.name));
        lines.push(format!("{}Source: {}", indent(2), display_name(&photo.source)));
    }
    lines
}

pub fn print_copy_output(photos: &[RawPhoto]) {
    print_lines(format_copy_output(photos));
}

// ============================================================================
// Compress output
// ============================================================================

/// Format a single compression progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started { total } => {
            vec![format!("Compressing {}", plural(*total, "photo", "photos"))]
        }
        ProcessEvent::PhotoDone { name, status, .. } => {
            let status_str = match status {
                CompressStatus::Cached => "cached",
                CompressStatus::Compressed => "compressed",
            };
            vec![format!("{}{}: {}", indent(1), name, status_str)]
        }
    }
}

pub fn format_cache_stats(stats: &CacheStats) -> String {
    format!("Cache: {}", stats)
}

// ============================================================================
// Layout output
// ============================================================================

/// Format the balanced layout: one header per column, entries indented.
pub fn format_layout_output(layout: &Layout) -> Vec<String> {
    let mut lines = Vec::new();
    for column in &layout.columns {
        let photos = column.photo_names().count();
        lines.push(format!(
            "Column {} ({}, height {})",
            column.index,
            plural(photos, "photo", "photos"),
            column.height.floor()
        ));
        for entry in &column.entries {
            match entry {
                LayoutEntry::Photo { name } => {
                    lines.push(format!("{}{}", indent(1), name));
                }
                LayoutEntry::Filler(filler) => lines.push(format!(
                    "{}{} (filler {}x{})",
                    indent(1),
                    filler.name,
                    filler.width,
                    filler.height
                )),
            }
        }
    }
    lines
}

pub fn print_layout_output(layout: &Layout) {
    print_lines(format_layout_output(layout));
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the generate stage: written pages, then a one-line summary.
pub fn format_generate_output(report: &GenerateReport, layout: &Layout) -> Vec<String> {
    let mut lines: Vec<String> = report.pages.iter().map(|p| display_name(p)).collect();
    if report.removed_fillers > 0 {
        lines.push(format!(
            "Removed {}",
            plural(report.removed_fillers, "stale filler", "stale fillers")
        ));
    }
    lines.push(format!(
        "Generated {} in {}, {}",
        plural(layout.photo_count(), "photo", "photos"),
        plural(layout.columns.len(), "column", "columns"),
        plural(report.fillers.len(), "filler", "fillers")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport, layout: &Layout) {
    print_lines(format_generate_output(report, layout));
}
