//! # Masonry Gal
//!
//! Turns a directory of photographs into a static, multi-column "masonry"
//! gallery page whose columns end at the same height.
//!
//! # Architecture: Staged Pipeline
//!
//! ```text
//! 1. Copy       src/               →  raw_photos/         (sequence-numbered originals)
//! 2. Compress   raw_photos/        →  compressed_photos/  (scaled by --compress-factor)
//! 3. Scan       compressed_photos/ →  Vec<PhotoItem>      (name + dimensions)
//! 4. Layout     Vec<PhotoItem>     →  Layout              (balanced columns + fillers)
//! 5. Generate   Layout             →  index.html, style.css, gallery.js
//! ```
//!
//! [`pipeline::run`] sequences the stages; each stage is also callable on its
//! own, and every stage that touches pixels goes through the
//! [`imaging::ImageBackend`] trait so tests can swap in a mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | Greedy shortest-column-first balancing and filler sizing. Pure. |
//! | [`imaging`] | Identify, resize and blank-image operations over the `image` crate |
//! | [`process`] | Stages 1–2: raw photo copy and parallel compression |
//! | [`cache`] | Content-hash cache that skips unchanged compressions |
//! | [`scan`] | Photo directory listing and dimension reads |
//! | [`generate`] | Stage 5: filler images, template substitution, asset emission |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`pipeline`] | Stage orchestration and the top-level error type |
//! | [`output`] | CLI output formatting |
//! | [`naming`] | Raw photo and filler file name conventions |
//! | [`types`] | Shared types (`PhotoItem`, `GalleryDirs`) |
//!
//! # Design Decisions
//!
//! ## Fillers Instead of Per-Column Markup
//!
//! The page is a single flat list of `<img>` tags laid out with CSS
//! multi-column flow. Column breaks fall where the content heights say, so
//! the layout pads every short column with a blank image of exactly the
//! missing height. Column *i*'s entries then fill visual column *i*.
//!
//! ## Deterministic Output
//!
//! Photos are sorted by name before balancing and ties between equal columns
//! go to the lowest index. The same photos always produce the same page,
//! byte for byte, which keeps the compression cache and diffs meaningful.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, Lanczos3 resampling and encoding use the `image` crate only. No
//! ImageMagick, no system libraries.

pub mod cache;
pub mod config;
pub mod generate;
pub mod imaging;
pub mod layout;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
