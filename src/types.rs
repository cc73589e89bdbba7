//! Common types shared across the crate

use serde::{Deserialize, Serialize};

/// A normalized video item
///
/// Both upstream endpoints (listing and search) are normalized into this
/// single shape at the API boundary. Identity is `id`: two items with the
/// same id are the same logical video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Upstream video identifier
    pub id: String,
    /// Video title
    pub title: String,
    /// Channel (author) name
    pub channel: String,
    /// Thumbnail URL, from the high-resolution bucket
    pub thumbnail_url: String,
}

impl Video {
    /// URL of the embedded player for this video
    pub fn embed_url(&self) -> String {
        embed_url(&self.id)
    }
}

/// Embedded-player URL for a video id
pub fn embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}")
}

/// Fallback thumbnail URL for a video id when no metadata is available
pub fn fallback_thumbnail(id: &str) -> String {
    format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")
}

/// One page of results from a paginated source
///
/// An absent `next_cursor` signals the terminal page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Items in upstream order
    pub items: Vec<Video>,
    /// Opaque continuation cursor for the next page, if any
    pub next_cursor: Option<String>,
}

impl Page {
    /// Create a page with a continuation cursor
    pub fn new(items: Vec<Video>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }

    /// True if this is the last page the source will return
    pub fn is_terminal(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// Feed categories offered by the browsing client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Most popular videos, no category filter
    Trending,
    /// Music videos
    Music,
    /// Gaming videos
    Gaming,
    /// News videos
    News,
    /// Short-form videos (served by the search endpoint)
    Shorts,
}

impl Category {
    /// Upstream category id for the listing endpoint, if the category
    /// maps to one
    pub fn listing_id(&self) -> Option<&'static str> {
        match self {
            Category::Music => Some("10"),
            Category::Gaming => Some("20"),
            Category::News => Some("25"),
            Category::Trending | Category::Shorts => None,
        }
    }

    /// Whether this category is served by the search endpoint instead of
    /// the listing endpoint
    pub fn uses_search(&self) -> bool {
        matches!(self, Category::Shorts)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Trending => "trending",
            Category::Music => "music",
            Category::Gaming => "gaming",
            Category::News => "news",
            Category::Shorts => "shorts",
        };
        write!(f, "{name}")
    }
}
