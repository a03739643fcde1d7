//! Companion-device messaging channel interface.
//!
//! The phone↔companion channel itself (immediate delivery, durable
//! replication, retries) is platform infrastructure outside this crate. The
//! core only needs its reliable file-transfer primitive, modeled here as the
//! [`CompanionLink`] capability trait: hand over one metadata record plus
//! one image payload, keyed by course and hole, and let the channel decide
//! immediate-vs-queued delivery.

mod spool;

pub use spool::SpoolLink;

use thiserror::Error;

use crate::provider::BoxFuture;

/// Errors raised while handing a transfer to the channel.
#[derive(Debug, Error)]
pub enum LinkError {
    /// I/O failure while enqueueing the transfer.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The channel refused the transfer.
    #[error("channel rejected transfer: {0}")]
    Rejected(String),
}

/// One queued file transfer: a serialized metadata record plus the raw
/// image bytes it describes.
#[derive(Debug, Clone)]
pub struct FileTransfer {
    pub course_id: String,
    pub hole_number: u8,
    pub metadata: Vec<u8>,
    pub image: Vec<u8>,
}

/// Reliable file-transfer primitive of the companion messaging channel.
///
/// Implementations enqueue the pair for delivery to the companion device;
/// retry and ordering guarantees are the channel's own. A successful return
/// means the transfer was accepted for delivery, not that it arrived.
pub trait CompanionLink: Send + Sync {
    fn send_file(&self, transfer: FileTransfer) -> BoxFuture<'_, Result<(), LinkError>>;
}
