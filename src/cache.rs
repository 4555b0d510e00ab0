//! Compression cache for incremental builds.
//!
//! Re-running the generator over an unchanged photo set should not decode
//! and re-encode every photo again. This module lets the process stage skip
//! a photo when its source bytes and compression parameters match the last
//! run.
//!
//! ## Cache keys
//!
//! Entries are keyed by output file name (`001.jpg`) and hold two hashes:
//!
//! - **`source_hash`**: SHA-256 of the raw photo's bytes. Content-based
//!   rather than mtime-based, so copying the raw photos again on every run
//!   does not invalidate anything.
//! - **`params_hash`**: SHA-256 of (scale factor, quality). Changing
//!   `--compress-factor` or `images.quality` recompresses everything.
//!
//! A hit requires both hashes to match **and** the output file to still
//! exist in `compressed_photos/`.
//!
//! ## Storage
//!
//! The manifest is a JSON file at `<dest>/.compress-cache.json`. Unreadable,
//! corrupt or version-mismatched manifests load as empty. `--no-cache`
//! starts from an empty manifest; outputs are overwritten naturally.

use crate::imaging::CompressConfig;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the cache manifest file within the gallery directory.
const MANIFEST_FILENAME: &str = ".compress-cache.json";

/// Bump to invalidate all existing caches when the key computation changes.
const MANIFEST_VERSION: u32 = 1;

/// Hashes recorded for one compressed photo.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CacheEntry {
    pub source_hash: String,
    pub params_hash: String,
}

/// On-disk manifest mapping compressed file names to their cache entries.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    pub entries: HashMap<String, CacheEntry>,
}

impl CacheManifest {
    /// Create an empty manifest (used for `--no-cache` or first build).
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: HashMap::new(),
        }
    }

    /// Load from the gallery directory, falling back to an empty manifest.
    pub fn load(gallery_dir: &Path) -> Self {
        let content = match std::fs::read_to_string(manifest_path(gallery_dir)) {
            Ok(c) => c,
            Err(_) => return Self::empty(),
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(m) if m.version == MANIFEST_VERSION => m,
            _ => Self::empty(),
        }
    }

    /// Save to the gallery directory.
    pub fn save(&self, gallery_dir: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(manifest_path(gallery_dir), json)
    }

    /// Whether `output_name` in `output_dir` is up to date for these hashes.
    pub fn is_fresh(
        &self,
        output_name: &str,
        source_hash: &str,
        params_hash: &str,
        output_dir: &Path,
    ) -> bool {
        self.entries.get(output_name).is_some_and(|entry| {
            entry.source_hash == source_hash && entry.params_hash == params_hash
        }) && output_dir.join(output_name).exists()
    }

    /// Record the hashes an output file was written with.
    pub fn insert(&mut self, output_name: String, source_hash: String, params_hash: String) {
        self.entries.insert(
            output_name,
            CacheEntry {
                source_hash,
                params_hash,
            },
        );
    }

    /// Drop entries whose names are not in `keep`.
    ///
    /// Keeps the manifest from growing when the photo set shrinks.
    pub fn retain_names<'a>(&mut self, keep: impl IntoIterator<Item = &'a str>) {
        let keep: std::collections::HashSet<&str> = keep.into_iter().collect();
        self.entries.retain(|name, _| keep.contains(name.as_str()));
    }
}

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}

/// SHA-256 hash of the compression parameters.
pub fn hash_compress_params(config: &CompressConfig) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"compress\0");
    hasher.update(config.factor.value().to_le_bytes());
    hasher.update(config.quality.value().to_le_bytes());
    format!("{:x}", hasher.finalize())
}

/// Summary of cache performance for a build run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} compressed ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} compressed", self.misses)
        }
    }
}

/// Resolve the cache manifest path for a gallery directory.
pub fn manifest_path(gallery_dir: &Path) -> PathBuf {
    gallery_dir.join(MANIFEST_FILENAME)
}
