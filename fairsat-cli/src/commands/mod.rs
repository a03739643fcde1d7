//! CLI command implementations.

pub mod cache;
pub mod crop;
pub mod fetch;
pub mod push;
