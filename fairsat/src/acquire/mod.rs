//! Large-image acquisition service.
//!
//! Requests one wide-area satellite image per course from the imagery
//! provider, re-encodes it to the cache's JPEG format and persists both the
//! bytes and the [`LargeImageMeta`] index record. Acquisition geometry is
//! fixed: a 2000 m square (1000 m radius) rendered at 2000×2000 pixels.
//!
//! Nothing is retried here; every failure is surfaced to the caller, who may
//! simply invoke the download again.

mod progress;

pub use progress::{DownloadProgress, DownloadState};

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::coord::Coordinate;
use crate::imaging::encode_jpeg;
use crate::provider::{ImageryProvider, ProviderError, RegionRequest};
use crate::store::{
    CacheStore, LargeImageMeta, StoreError, LARGE_IMAGE_PIXEL_SIZE, LARGE_IMAGE_RADIUS_METERS,
};

/// Errors surfaced by [`AcquisitionService::download_large_image`].
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The imagery provider failed (network, status, empty result).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The provider's payload was not a decodable image.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Re-encoding to cache JPEG failed.
    #[error("image encode failed: {0}")]
    Encode(String),

    /// Writing the image file or updating the index failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Downloads and caches one large satellite image per course.
pub struct AcquisitionService {
    provider: Arc<dyn ImageryProvider>,
    store: Arc<CacheStore>,
    progress: DownloadProgress,
}

impl AcquisitionService {
    pub fn new(provider: Arc<dyn ImageryProvider>, store: Arc<CacheStore>) -> Self {
        Self {
            provider,
            store,
            progress: DownloadProgress::new(),
        }
    }

    /// Download, encode and cache the large image for a course.
    ///
    /// Exactly one terminal progress transition happens per call: the
    /// course's state goes in-progress at 0.0 before the provider request
    /// and leaves in-progress at completion, reaching 1.0 only on success.
    /// The index record is created if absent, with an empty course name for
    /// the caller to fill in later.
    pub async fn download_large_image(
        &self,
        course_id: &str,
        center: Coordinate,
    ) -> Result<LargeImageMeta, AcquireError> {
        self.progress.started(course_id);
        info!(
            course_id,
            lat = center.latitude,
            lon = center.longitude,
            provider = self.provider.name(),
            "downloading large course image"
        );

        let result = self.acquire(course_id, center).await;
        match &result {
            Ok(_) => {
                self.progress.finished(course_id, true);
                info!(course_id, "large course image cached");
            }
            Err(e) => {
                self.progress.finished(course_id, false);
                warn!(course_id, error = %e, "large course image download failed");
            }
        }
        result
    }

    async fn acquire(
        &self,
        course_id: &str,
        center: Coordinate,
    ) -> Result<LargeImageMeta, AcquireError> {
        let request = RegionRequest {
            center,
            radius_meters: LARGE_IMAGE_RADIUS_METERS,
            pixel_size: LARGE_IMAGE_PIXEL_SIZE,
        };

        let bytes = self.provider.fetch_region(request).await?;
        if bytes.is_empty() {
            return Err(ProviderError::EmptyResult.into());
        }

        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| AcquireError::Decode(e.to_string()))?;
        let jpeg = encode_jpeg(&decoded).map_err(|e| AcquireError::Encode(e.to_string()))?;

        self.store
            .write_large_image(course_id, &jpeg)
            .map_err(StoreError::from)?;

        let meta = LargeImageMeta::for_center(center);
        self.store.upsert(course_id, Some(meta.clone()), Vec::new())?;
        Ok(meta)
    }

    /// Download state for a course, if a download was ever recorded.
    pub fn progress(&self, course_id: &str) -> Option<DownloadState> {
        self.progress.snapshot(course_id)
    }
}
