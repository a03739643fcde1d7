//! Cache management CLI commands.

use clap::Subcommand;
use fairsat::config::ConfigFile;
use fairsat::store::{cache_stats, clear_cache, CacheStore};

use crate::error::CliError;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Clear the cache, removing all cached imagery and the index
    Clear,
    /// Show cache statistics
    Stats,
}

/// Run a cache subcommand.
pub fn run(action: CacheAction) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let cache_dir = &config.cache.directory;

    match action {
        CacheAction::Clear => {
            println!("Clearing cache at: {}", cache_dir.display());

            match clear_cache(cache_dir) {
                Ok(result) => {
                    println!(
                        "Deleted {} files, freed {}",
                        result.files_deleted,
                        format_size(result.bytes_freed)
                    );
                    Ok(())
                }
                Err(e) => Err(CliError::Cache(e.to_string())),
            }
        }
        CacheAction::Stats => {
            println!("Cache: {}", cache_dir.display());

            match cache_stats(cache_dir) {
                Ok((files, bytes)) => {
                    println!("  Files: {}", files);
                    println!("  Size:  {}", format_size(bytes));
                    Ok(())
                }
                Err(e) => Err(CliError::Cache(e.to_string())),
            }
        }
    }
}

/// List the cached course records.
pub fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let store = CacheStore::open(&config.cache.directory)?;

    let records = store.list()?;
    if records.is_empty() {
        println!("Cache is empty");
        return Ok(());
    }

    for record in records {
        let name = if record.course_name.is_empty() {
            "(unnamed)"
        } else {
            record.course_name.as_str()
        };
        println!(
            "{}  {}  large={}  holes={}  updated={}",
            record.course_id,
            name,
            record.large_image.is_some(),
            record.images.len(),
            record.last_updated
        );
    }
    Ok(())
}

/// Delete one course's cached imagery and index record.
pub fn run_delete(course_id: &str) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let store = CacheStore::open(&config.cache.directory)?;

    store.delete(course_id)?;
    println!("Deleted cache for {}", course_id);
    Ok(())
}

/// Human-readable byte size.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
