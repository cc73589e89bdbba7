//! Upstream video-platform API
//!
//! Covers the two listing endpoints the client consumes:
//!
//! - `videos` - popular listing, item id is a plain string
//! - `search` - keyword search, item id is nested under an object
//!
//! Both response shapes are normalized into [`crate::types::Video`] at this
//! boundary; nothing above this module sees the upstream inconsistency.

mod client;
mod wire;

pub use client::{ApiClientConfig, ApiClientConfigBuilder, PopularQuery, SearchQuery, VideoApi};
pub use wire::ListingResponse;
