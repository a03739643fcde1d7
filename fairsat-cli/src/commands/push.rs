//! Companion transfer command.

use std::sync::Arc;

use fairsat::config::ConfigFile;
use fairsat::link::SpoolLink;
use fairsat::store::CacheStore;
use fairsat::transfer::TransferOrchestrator;

use crate::error::CliError;

/// Push cached crops for a course into the companion outbox.
///
/// With `--hole` only that crop is pushed; otherwise every cached crop for
/// the course is pushed best-effort.
pub async fn run(course_id: &str, hole: Option<u8>) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let store = Arc::new(CacheStore::open(&config.cache.directory)?);
    let link = Arc::new(SpoolLink::new(&config.transfer.outbox));
    let orchestrator = TransferOrchestrator::new(store, link);

    let ok = match hole {
        Some(hole) => orchestrator.transfer_one(course_id, hole).await,
        None => orchestrator.transfer_all(course_id).await,
    };

    if !ok {
        return Err(CliError::Transfer(match hole {
            Some(hole) => format!("no cached crop for {} hole {}", course_id, hole),
            None => format!("no cache record for course {}", course_id),
        }));
    }

    println!(
        "Queued transfers for {} into {}",
        course_id,
        config.transfer.outbox.display()
    );
    Ok(())
}
