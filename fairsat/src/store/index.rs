//! The on-disk cache index: one JSON file enumerating every course record.
//!
//! Persistence is whole-file read/replace: every mutation loads the full
//! record list, edits it in memory, and writes the full list back. The write
//! goes to a temporary sibling first and is moved into place with a rename,
//! so a crash mid-write leaves the previous index intact.

use std::fs;
use std::path::{Path, PathBuf};

use super::types::{CourseRecord, StoreError};

/// File name of the global index inside the cache root.
pub const INDEX_FILE_NAME: &str = "index.json";

/// Handle to the index file inside a cache root directory.
#[derive(Debug, Clone)]
pub struct IndexFile {
    path: PathBuf,
}

impl IndexFile {
    pub fn new(cache_root: &Path) -> Self {
        Self {
            path: cache_root.join(INDEX_FILE_NAME),
        }
    }

    /// Load all course records. A missing index file is an empty cache.
    pub fn load(&self) -> Result<Vec<CourseRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path)?;
        let records = serde_json::from_slice(&bytes)?;
        Ok(records)
    }

    /// Replace the index with the given record list.
    pub fn save(&self, records: &[CourseRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
