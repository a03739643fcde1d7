//! CLI error types.

use std::fmt;

use fairsat::acquire::AcquireError;
use fairsat::app::AppError;
use fairsat::crop::CropError;
use fairsat::store::StoreError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line usage or configuration.
    Config(String),

    /// Application startup failed.
    App(AppError),

    /// Large-image download failed.
    Acquire(AcquireError),

    /// Crop derivation failed.
    Crop(CropError),

    /// Cache store access failed.
    Store(StoreError),

    /// Cache maintenance failed.
    Cache(String),

    /// Companion transfer failed.
    Transfer(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::App(e) => write!(f, "Failed to start services: {}", e),
            CliError::Acquire(e) => write!(f, "Download failed: {}", e),
            CliError::Crop(e) => write!(f, "Crop failed: {}", e),
            CliError::Store(e) => write!(f, "Cache store error: {}", e),
            CliError::Cache(msg) => write!(f, "Cache maintenance failed: {}", msg),
            CliError::Transfer(msg) => write!(f, "Transfer failed: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::App(e) => Some(e),
            CliError::Acquire(e) => Some(e),
            CliError::Crop(e) => Some(e),
            CliError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::App(e)
    }
}

impl From<AcquireError> for CliError {
    fn from(e: AcquireError) -> Self {
        CliError::Acquire(e)
    }
}

impl From<CropError> for CliError {
    fn from(e: CropError) -> Self {
        CliError::Crop(e)
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}
