//! Static-map satellite imagery provider.
//!
//! Renders one wide-area image per request through a keyed static-map HTTP
//! endpoint. The request asks for a satellite basemap with points-of-interest
//! and man-made overlay layers switched off, so the cached image shows bare
//! terrain.
//!
//! The endpoint takes an integer Web Mercator zoom level rather than a
//! ground resolution, so the provider picks the zoom whose resolution at the
//! request latitude is closest to the requested meters-per-pixel.

use super::types::{BoxFuture, ImageryProvider, ProviderError, RegionRequest};
use super::HttpFetch;

/// Web Mercator ground resolution at zoom 0 on the equator, meters per pixel.
const ZOOM0_METERS_PER_PIXEL: f64 = 156_543.033_92;

/// Highest zoom level the imagery endpoint serves.
const MAX_ZOOM: u8 = 21;

/// Satellite imagery provider backed by a static-map HTTP endpoint.
pub struct StaticMapProvider<F: HttpFetch> {
    http: F,
    api_key: String,
    base_url: String,
}

impl<F: HttpFetch> StaticMapProvider<F> {
    /// Creates a provider using the standard endpoint.
    pub fn new(http: F, api_key: String) -> Self {
        Self::with_base_url(
            http,
            api_key,
            "https://maps.googleapis.com/maps/api/staticmap".to_string(),
        )
    }

    /// Creates a provider against a custom endpoint (testing, proxies).
    pub fn with_base_url(http: F, api_key: String, base_url: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
        }
    }

    /// Integer zoom whose resolution at `latitude` best matches `meters_per_pixel`.
    fn zoom_for(&self, latitude: f64, meters_per_pixel: f64) -> u8 {
        let resolution_at_zoom0 = ZOOM0_METERS_PER_PIXEL * latitude.to_radians().cos();
        let zoom = (resolution_at_zoom0 / meters_per_pixel).log2().round();
        zoom.clamp(0.0, MAX_ZOOM as f64) as u8
    }

    /// Builds the request URL for the given region.
    fn build_url(&self, request: &RegionRequest) -> String {
        let zoom = self.zoom_for(request.center.latitude, request.meters_per_pixel());
        format!(
            "{}?center={:.6},{:.6}&zoom={}&size={}x{}&maptype=satellite\
             &style=feature:poi|visibility:off&style=feature:landscape.man_made|visibility:off\
             &key={}",
            self.base_url,
            request.center.latitude,
            request.center.longitude,
            zoom,
            request.pixel_size,
            request.pixel_size,
            self.api_key
        )
    }
}

impl<F: HttpFetch> ImageryProvider for StaticMapProvider<F> {
    fn fetch_region(
        &self,
        request: RegionRequest,
    ) -> BoxFuture<'_, Result<Vec<u8>, ProviderError>> {
        Box::pin(async move {
            if request.pixel_size == 0 {
                return Err(ProviderError::InvalidRegion(
                    "pixel size must be positive".to_string(),
                ));
            }
            if request.radius_meters <= 0.0 {
                return Err(ProviderError::InvalidRegion(format!(
                    "radius must be positive, got {}",
                    request.radius_meters
                )));
            }

            let url = self.build_url(&request);
            let bytes = self.http.get(&url).await?;
            if bytes.is_empty() {
                return Err(ProviderError::EmptyResult);
            }
            Ok(bytes)
        })
    }

    fn name(&self) -> &str {
        "Static Maps"
    }
}
