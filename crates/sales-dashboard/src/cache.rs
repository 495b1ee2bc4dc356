use std::path::{Path, PathBuf};
use std::time::SystemTime;

use dashboard_core::error::Result;
use dashboard_data::reader::{load_sales_data, LoadResult};
use tracing::debug;

/// Explicit presentation-owned cache of the loaded dataset.
///
/// Keyed by file path plus modification time: a changed key invalidates
/// the cached dataset and triggers a reload. The core never caches;
/// invalidation policy belongs here.
#[derive(Default)]
pub struct DatasetCache {
    entry: Option<CacheEntry>,
}

struct CacheEntry {
    path: PathBuf,
    modified: Option<SystemTime>,
    result: LoadResult,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, reloading when the path or
    /// its modification time has changed since the last load.
    pub fn load(&mut self, path: &Path) -> Result<LoadResult> {
        let modified = modification_time(path);

        let fresh = self
            .entry
            .as_ref()
            .map(|e| e.path == path && e.modified == modified)
            .unwrap_or(false);

        if !fresh {
            debug!("Dataset cache miss for {}", path.display());
            let result = load_sales_data(path)?;
            self.entry = Some(CacheEntry {
                path: path.to_path_buf(),
                modified,
                result,
            });
        } else {
            debug!("Dataset cache hit for {}", path.display());
        }

        match &self.entry {
            Some(entry) => Ok(entry.result.clone()),
            // Unreachable: a miss either populated the entry or returned
            // the load error above.
            None => load_sales_data(path),
        }
    }
}

/// Modification time of `path`, or `None` when unavailable (the cache
/// then reloads on every call rather than serving stale data).
fn modification_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
