//! Application error types.

use thiserror::Error;

use crate::provider::ProviderError;
use crate::store::StoreError;

/// Errors that can occur during application startup.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failed to open the cache store.
    #[error("failed to open cache store: {0}")]
    Store(#[from] StoreError),

    /// Failed to construct the imagery provider.
    #[error("failed to create imagery provider: {0}")]
    Provider(#[from] ProviderError),
}
