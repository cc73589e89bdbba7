//! Page sources
//!
//! A `PageSource` is a source descriptor bound to a client: it knows how to
//! turn a continuation cursor into one page of results. The controller
//! depends only on this trait, never on a concrete endpoint.

use crate::api::{PopularQuery, SearchQuery, VideoApi};
use crate::error::Result;
use crate::types::Page;
use async_trait::async_trait;

/// An opaque paginated source of video pages
///
/// The cursor has no semantic meaning here: whatever the previous response
/// carried is passed back verbatim, and an absent cursor requests the
/// first page.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    /// Fetch one page
    async fn fetch(&self, cursor: Option<&str>) -> Result<Page>;
}

/// Popular-listing source (home and category feeds)
#[derive(Debug, Clone)]
pub struct PopularSource {
    api: VideoApi,
    query: PopularQuery,
}

impl PopularSource {
    /// Create a source for the popular listing
    pub fn new(api: VideoApi, query: PopularQuery) -> Self {
        Self { api, query }
    }
}

#[async_trait]
impl PageSource for PopularSource {
    async fn fetch(&self, cursor: Option<&str>) -> Result<Page> {
        self.api.popular(&self.query, cursor).await
    }
}

/// Search source (search feed and shorts)
#[derive(Debug, Clone)]
pub struct SearchSource {
    api: VideoApi,
    query: SearchQuery,
}

impl SearchSource {
    /// Create a source for keyword search
    pub fn new(api: VideoApi, query: SearchQuery) -> Self {
        Self { api, query }
    }
}

#[async_trait]
impl PageSource for SearchSource {
    async fn fetch(&self, cursor: Option<&str>) -> Result<Page> {
        self.api.search(&self.query, cursor).await
    }
}
