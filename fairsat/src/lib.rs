//! Fairsat - per-course satellite imagery caching and companion sync
//!
//! This library maintains a cache of satellite-derived imagery for golf
//! courses and distributes per-hole crops to a companion device:
//!
//! - [`acquire`] downloads one wide-area image per course from an imagery
//!   provider and persists it.
//! - [`coord`] projects geographic coordinates to and from pixel space
//!   within a cached image.
//! - [`crop`] derives clamped per-hole crops from the cached large image.
//! - [`store`] owns the on-disk index and image files.
//! - [`transfer`] pushes cached crops through the companion messaging
//!   channel, best-effort and strictly sequential.
//!
//! The imagery provider and the messaging channel are capability traits
//! ([`provider::ImageryProvider`], [`link::CompanionLink`]) so every piece
//! can be exercised with fakes. [`app::App`] wires the real implementations
//! together.

pub mod acquire;
pub mod app;
pub mod config;
pub mod coord;
pub mod crop;
pub(crate) mod imaging;
pub mod link;
pub mod provider;
pub mod store;
pub mod transfer;

pub use app::{App, AppConfig};
