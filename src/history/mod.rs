//! Locally persisted watch history
//!
//! The history list depends only on the [`KvStore`] capability, not on a
//! specific storage mechanism. Entries are kept newest first, duplicate
//! ids collapse to their most recent occurrence, and the list is capped
//! at [`HISTORY_LIMIT`] entries.

mod store;

pub use store::{FileStore, KvStore, MemoryStore};

use crate::error::Result;
use crate::types::Video;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fixed storage key for the watch-history list
pub const HISTORY_KEY: &str = "watch_history";

/// Maximum number of retained entries
pub const HISTORY_LIMIT: usize = 50;

/// One recorded watch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Video id
    pub id: String,
    /// Video title
    pub title: String,
    /// Channel name
    pub channel: String,
    /// Thumbnail URL
    pub thumbnail_url: String,
    /// When the video was opened
    pub watched_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Entry for a video with known metadata
    pub fn from_video(video: &Video) -> Self {
        Self {
            id: video.id.clone(),
            title: video.title.clone(),
            channel: video.channel.clone(),
            thumbnail_url: video.thumbnail_url.clone(),
            watched_at: Utc::now(),
        }
    }

    /// Entry for a bare video id, with derived fallbacks for the metadata
    pub fn from_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: "Unknown Title".to_string(),
            channel: String::new(),
            thumbnail_url: crate::types::fallback_thumbnail(id),
            watched_at: Utc::now(),
        }
    }
}

/// Watch-history list over a key-value store
#[derive(Debug, Clone)]
pub struct WatchHistory<S> {
    store: S,
}

impl<S: KvStore> WatchHistory<S> {
    /// Create a history over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All recorded entries, newest first
    ///
    /// Missing or unparseable stored data reads as an empty list.
    pub fn entries(&self) -> Result<Vec<HistoryEntry>> {
        let Some(raw) = self.store.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                debug!(error = %e, "stored history is unparseable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Record a watch
    ///
    /// An existing entry with the same id is removed first, so a rewatch
    /// moves the video to the front without growing the list.
    pub fn record(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.entries()?;
        entries.retain(|e| e.id != entry.id);
        entries.insert(0, entry);
        entries.truncate(HISTORY_LIMIT);
        self.store.set(HISTORY_KEY, &serde_json::to_string(&entries)?)
    }

    /// Remove all recorded entries
    pub fn clear(&self) -> Result<()> {
        self.store.remove(HISTORY_KEY)
    }
}
