//! Crop distribution to the companion device.
//!
//! Pushes a course's cached crops through the companion channel's reliable
//! file-transfer primitive, one image at a time. `transfer_all` is
//! deliberately best-effort: a hole that fails to read or enqueue is logged
//! and skipped, and the sweep reports success once enumeration completes.
//! Exactly one image is in flight per invocation, which bounds peak memory
//! and keeps the transfer order reproducible for diagnosis.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::link::{CompanionLink, FileTransfer, LinkError};
use crate::store::{CacheStore, HoleImageMeta};

/// Per-item failure while handing one crop to the channel.
#[derive(Debug, Error)]
enum TransferError {
    #[error("crop file missing on disk")]
    MissingImage,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("metadata serialization failed: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Sequentially distributes cached crops to the companion device.
pub struct TransferOrchestrator {
    store: Arc<CacheStore>,
    link: Arc<dyn CompanionLink>,
}

impl TransferOrchestrator {
    pub fn new(store: Arc<CacheStore>, link: Arc<dyn CompanionLink>) -> Self {
        Self { store, link }
    }

    /// Push every cached crop for a course, in stored order.
    ///
    /// Returns `false` only when the course has no cache record at all.
    /// Individual failures are logged and the sweep continues; once the
    /// enumeration completes the result is `true` regardless of how many
    /// items failed. Concurrent sweeps for the *same* course are not
    /// guarded; callers serialize those.
    pub async fn transfer_all(&self, course_id: &str) -> bool {
        let record = match self.store.get(course_id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!(course_id, "no cache record to transfer");
                return false;
            }
            Err(e) => {
                warn!(course_id, error = %e, "failed to read cache record");
                return false;
            }
        };

        info!(course_id, images = record.images.len(), "pushing cached crops");
        for meta in &record.images {
            if let Err(e) = self.send_one(meta).await {
                warn!(
                    course_id,
                    hole = meta.hole_number,
                    error = %e,
                    "crop transfer failed, continuing with next"
                );
            }
        }
        true
    }

    /// Push one cached crop.
    ///
    /// Returns `false` if the hole's metadata or bytes are missing (no
    /// partial attempt is made) or if the channel handoff fails.
    pub async fn transfer_one(&self, course_id: &str, hole_number: u8) -> bool {
        let meta = match self.store.get(course_id) {
            Ok(Some(record)) => record.image_for_hole(hole_number).cloned(),
            _ => None,
        };
        let Some(meta) = meta else {
            warn!(course_id, hole = hole_number, "no cached crop to transfer");
            return false;
        };

        match self.send_one(&meta).await {
            Ok(()) => true,
            Err(e) => {
                warn!(course_id, hole = hole_number, error = %e, "crop transfer failed");
                false
            }
        }
    }

    async fn send_one(&self, meta: &HoleImageMeta) -> Result<(), TransferError> {
        let image = self
            .store
            .read_hole_image(meta)?
            .ok_or(TransferError::MissingImage)?;
        let metadata = serde_json::to_vec(meta)?;

        self.link
            .send_file(FileTransfer {
                course_id: meta.course_id.clone(),
                hole_number: meta.hole_number,
                metadata,
                image,
            })
            .await?;
        Ok(())
    }
}
