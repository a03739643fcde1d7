//! Cache maintenance helpers: disk usage statistics and full purge.

use std::fs;
use std::io;
use std::path::Path;

/// Result of clearing the cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurgeResult {
    /// Number of files removed.
    pub files_deleted: u64,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

/// Count the files and bytes stored under a cache root.
pub fn cache_stats(root: &Path) -> io::Result<(u64, u64)> {
    let mut files = 0;
    let mut bytes = 0;
    walk(root, &mut |metadata| {
        files += 1;
        bytes += metadata.len();
    })?;
    Ok((files, bytes))
}

/// Remove every course directory and the index file under a cache root.
///
/// The root directory itself is kept so the store can be reused.
pub fn clear_cache(root: &Path) -> io::Result<PurgeResult> {
    let mut result = PurgeResult::default();
    if !root.exists() {
        return Ok(result);
    }

    walk(root, &mut |metadata| {
        result.files_deleted += 1;
        result.bytes_freed += metadata.len();
    })?;

    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(result)
}

fn walk(dir: &Path, visit: &mut impl FnMut(&fs::Metadata)) -> io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, visit)?;
        } else {
            visit(&entry.metadata()?);
        }
    }
    Ok(())
}
