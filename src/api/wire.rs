//! Wire-format types for upstream responses
//!
//! The upstream uses different item shapes per endpoint: the listing
//! endpoint carries the video id as a plain string, the search endpoint
//! nests it under an `id` object. `RawId` absorbs both.

use crate::error::{Error, Result};
use crate::types::{Page, Video};
use serde::Deserialize;

/// Top-level listing/search response
///
/// A response without an `items` key is a failure regardless of any
/// accompanying error payload.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub items: Option<Vec<RawItem>>,

    #[serde(rename = "nextPageToken", default)]
    pub next_page_token: Option<String>,

    #[serde(default)]
    pub error: Option<ErrorBody>,
}

/// Upstream-reported error payload
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// A single raw item before normalization
#[derive(Debug, Deserialize)]
pub struct RawItem {
    pub id: RawId,
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

/// Video id in either endpoint shape
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Listing endpoint: `"id": "abc123"`
    Plain(String),
    /// Search endpoint: `"id": { "videoId": "abc123", ... }`
    Nested {
        #[serde(rename = "videoId", default)]
        video_id: Option<String>,
    },
}

impl RawId {
    fn into_video_id(self) -> Option<String> {
        match self {
            RawId::Plain(id) => Some(id),
            RawId::Nested { video_id } => video_id,
        }
    }
}

/// Item metadata
#[derive(Debug, Deserialize)]
pub struct Snippet {
    pub title: String,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Thumbnail resolution buckets
#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub high: Option<Thumbnail>,
    #[serde(default)]
    pub medium: Option<Thumbnail>,
    #[serde(rename = "default", default)]
    pub fallback: Option<Thumbnail>,
}

impl Thumbnails {
    /// Best available thumbnail URL, preferring the high bucket
    fn best_url(self) -> Option<String> {
        self.high
            .or(self.medium)
            .or(self.fallback)
            .map(|t| t.url)
    }
}

/// A single thumbnail entry
#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl RawItem {
    /// Normalize into a `Video`, or `None` if the item is missing its id
    /// or snippet (search results can include non-video items)
    pub fn normalize(self) -> Option<Video> {
        let id = self.id.into_video_id()?;
        let snippet = self.snippet?;
        let thumbnail_url = snippet
            .thumbnails
            .best_url()
            .unwrap_or_else(|| crate::types::fallback_thumbnail(&id));
        Some(Video {
            id,
            title: snippet.title,
            channel: snippet.channel_title,
            thumbnail_url,
        })
    }
}

impl ListingResponse {
    /// The upstream error message, if the payload carried one
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref()?.message.as_deref()
    }

    /// Normalize into a `Page`, failing if the items collection is absent
    pub fn into_page(self) -> Result<Page> {
        let message = self
            .error_message()
            .unwrap_or("no items in response")
            .to_string();
        let Some(items) = self.items else {
            return Err(Error::api(message));
        };
        let items = items.into_iter().filter_map(RawItem::normalize).collect();
        Ok(Page::new(items, self.next_page_token))
    }
}
