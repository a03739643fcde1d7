//! Outbox spool adapter for the companion channel.
//!
//! Hands transfers to the platform messaging daemon by dropping each
//! `(metadata, image)` pair into the daemon's outbox directory. The image
//! payload is written before its metadata record; the daemon treats the
//! metadata file's appearance as the signal that the pair is complete.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::{CompanionLink, FileTransfer, LinkError};
use crate::provider::BoxFuture;

/// [`CompanionLink`] writing transfers into an outbox spool directory.
pub struct SpoolLink {
    outbox: PathBuf,
}

impl SpoolLink {
    pub fn new(outbox: impl Into<PathBuf>) -> Self {
        Self {
            outbox: outbox.into(),
        }
    }

    fn item_stem(transfer: &FileTransfer) -> String {
        format!("{}_{:02}", transfer.course_id, transfer.hole_number)
    }
}

impl CompanionLink for SpoolLink {
    fn send_file(&self, transfer: FileTransfer) -> BoxFuture<'_, Result<(), LinkError>> {
        Box::pin(async move {
            fs::create_dir_all(&self.outbox)?;

            let stem = Self::item_stem(&transfer);
            fs::write(self.outbox.join(format!("{}.jpg", stem)), &transfer.image)?;
            fs::write(self.outbox.join(format!("{}.json", stem)), &transfer.metadata)?;

            debug!(
                course_id = %transfer.course_id,
                hole = transfer.hole_number,
                bytes = transfer.image.len(),
                "transfer spooled for companion delivery"
            );
            Ok(())
        })
    }
}
