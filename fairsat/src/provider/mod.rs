//! Satellite imagery provider abstraction
//!
//! This module provides traits and implementations for acquiring wide-area
//! satellite imagery by ground region. The core depends only on the
//! [`ImageryProvider`] capability trait so it can be tested with fakes.

mod http;
mod static_maps;
mod types;

pub use http::{HttpFetch, ReqwestFetch};
pub use static_maps::StaticMapProvider;
pub use types::{BoxFuture, ImageryProvider, ProviderError, RegionRequest};

#[cfg(test)]
pub use http::tests::MockHttpFetch;
#[cfg(test)]
pub use types::tests::MockImageryProvider;
