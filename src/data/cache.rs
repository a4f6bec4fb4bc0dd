//! Memoized loading of normalized tables.
//!
//! Entries are keyed by path and validated against the file's signature
//! (modification time and length) on every lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::{LoadError, Result};
use super::loader;
use super::model::VehicleTable;

/// What we compare to decide whether a file changed since it was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSignature {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl FileSignature {
    pub fn of(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path).map_err(|e| LoadError::not_found(path, e))?;
        Ok(FileSignature {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

struct CachedTable {
    signature: FileSignature,
    table: Arc<VehicleTable>,
}

/// Load-once cache of normalized tables, owned by whoever runs the pipeline.
#[derive(Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CachedTable>,
    loads: usize,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the normalized table for `path`, reusing the cached one when the
    /// file's signature is unchanged.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<VehicleTable>> {
        let signature = FileSignature::of(path)?;

        if let Some(entry) = self.entries.get(path) {
            if entry.signature == signature {
                log::debug!("Cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.table));
            }
            log::info!("{} changed on disk, reloading", path.display());
        }

        let table = Arc::new(loader::normalize(path)?);
        self.loads += 1;
        self.entries.insert(
            path.to_path_buf(),
            CachedTable {
                signature,
                table: Arc::clone(&table),
            },
        );
        Ok(table)
    }

    /// Number of times a file was actually read and normalized.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Drop every cached table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
