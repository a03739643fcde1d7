//! Provider trait and shared types.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::coord::Coordinate;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors that can occur while acquiring imagery from a provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// HTTP transport failure or non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider responded but returned no image data.
    #[error("provider returned no image data")]
    EmptyResult,

    /// The requested region cannot be rendered by this provider.
    #[error("invalid region: {0}")]
    InvalidRegion(String),
}

/// A square ground region to render as satellite imagery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionRequest {
    /// Geographic center of the region.
    pub center: Coordinate,
    /// Half of the region's edge length, in meters.
    pub radius_meters: f64,
    /// Edge length of the rendered image, in pixels.
    pub pixel_size: u32,
}

impl RegionRequest {
    /// Ground resolution the rendered image should have.
    pub fn meters_per_pixel(&self) -> f64 {
        (self.radius_meters * 2.0) / self.pixel_size as f64
    }
}

/// Capability interface for map-imagery acquisition.
///
/// Implementations render one satellite-style image covering the requested
/// region, with points-of-interest and building overlays suppressed, and
/// return the encoded image bytes. Implementations must be `Send + Sync`;
/// the async method is boxed so the trait stays object-safe behind
/// `Arc<dyn ImageryProvider>`.
pub trait ImageryProvider: Send + Sync {
    /// Fetch one rendered image for the region.
    fn fetch_region(&self, request: RegionRequest)
        -> BoxFuture<'_, Result<Vec<u8>, ProviderError>>;

    /// Human-readable provider name for logs.
    fn name(&self) -> &str;
}
