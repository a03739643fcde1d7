//! Application bootstrap.
//!
//! Constructs the cache store, imagery provider and core services once at
//! process start and hands out shared handles. There is no hidden global
//! state; everything downstream receives its collaborators by `Arc`.

mod config;
mod error;

pub use config::{AppConfig, DEFAULT_HTTP_TIMEOUT_SECS};
pub use error::AppError;

use std::sync::Arc;

use tracing::info;

use crate::acquire::AcquisitionService;
use crate::crop::CropEngine;
use crate::link::{CompanionLink, SpoolLink};
use crate::provider::{ImageryProvider, ReqwestFetch, StaticMapProvider};
use crate::store::CacheStore;
use crate::transfer::TransferOrchestrator;

/// The wired-up Fairsat services.
pub struct App {
    store: Arc<CacheStore>,
    acquisition: Arc<AcquisitionService>,
    crop: Arc<CropEngine>,
    transfer: Arc<TransferOrchestrator>,
}

impl App {
    /// Start the application with the real provider and channel adapter.
    ///
    /// Requires a provider API key in the config; acquisition cannot work
    /// without one.
    pub fn start(config: AppConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::Config("provider API key not configured".to_string()))?;

        let http = ReqwestFetch::with_timeout(config.http_timeout_secs)?;
        let provider: Arc<dyn ImageryProvider> = Arc::new(StaticMapProvider::new(http, api_key));
        let link: Arc<dyn CompanionLink> = Arc::new(SpoolLink::new(&config.outbox_dir));

        Self::with_collaborators(config, provider, link)
    }

    /// Start the application with injected collaborators.
    ///
    /// This is the seam used by tests and by hosts that bring their own
    /// provider or channel implementation.
    pub fn with_collaborators(
        config: AppConfig,
        provider: Arc<dyn ImageryProvider>,
        link: Arc<dyn CompanionLink>,
    ) -> Result<Self, AppError> {
        let store = Arc::new(CacheStore::open(&config.cache_dir)?);
        info!(
            cache_dir = %config.cache_dir.display(),
            provider = provider.name(),
            "starting Fairsat services"
        );

        let acquisition = Arc::new(AcquisitionService::new(provider, Arc::clone(&store)));
        let crop = Arc::new(CropEngine::new(Arc::clone(&store)));
        let transfer = Arc::new(TransferOrchestrator::new(Arc::clone(&store), link));

        Ok(Self {
            store,
            acquisition,
            crop,
            transfer,
        })
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        &self.store
    }

    pub fn acquisition(&self) -> &Arc<AcquisitionService> {
        &self.acquisition
    }

    pub fn crop(&self) -> &Arc<CropEngine> {
        &self.crop
    }

    pub fn transfer(&self) -> &Arc<TransferOrchestrator> {
        &self.transfer
    }
}
