//! Application configuration for the Fairsat services.

use std::path::PathBuf;

use crate::config::ConfigFile;

/// Default HTTP timeout for imagery requests, in seconds.
///
/// Large-image downloads are a couple of megabytes; 30 seconds covers slow
/// cellular links without hanging the UI forever.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration passed to [`super::App::start`].
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Root directory of the satellite image cache.
    pub cache_dir: PathBuf,

    /// Outbox spool directory of the companion messaging channel.
    pub outbox_dir: PathBuf,

    /// API key for the static-map imagery endpoint.
    pub api_key: Option<String>,

    /// HTTP timeout for imagery requests, in seconds.
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// Create a config rooted at the given cache directory.
    pub fn new(cache_dir: PathBuf, outbox_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            outbox_dir,
            api_key: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    /// Build application config from the user's config file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            cache_dir: config.cache.directory.clone(),
            outbox_dir: config.transfer.outbox.clone(),
            api_key: config.provider.api_key.clone(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    /// Set the provider API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the HTTP timeout.
    pub fn with_http_timeout_secs(mut self, secs: u64) -> Self {
        self.http_timeout_secs = secs;
        self
    }
}
