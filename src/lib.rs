//! # tubefeed
//!
//! A client for browsing a paginated video platform: cursor-paginated
//! feeds, keyword search, and a locally persisted watch history.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tubefeed::api::{ApiClientConfig, PopularQuery, VideoApi};
//! use tubefeed::feed::{FeedController, FeedMode, PopularSource};
//!
//! #[tokio::main]
//! async fn main() -> tubefeed::Result<()> {
//!     let api = VideoApi::new(
//!         ApiClientConfig::builder().api_key("...").build(),
//!     )?;
//!     let query = PopularQuery {
//!         region: "US".to_string(),
//!         category: None,
//!         max_results: 12,
//!     };
//!
//!     let feed = FeedController::new(PopularSource::new(api, query), FeedMode::Append);
//!     feed.fetch_initial().await?;
//!     feed.fetch_next().await?;
//!
//!     for video in feed.snapshot().await.items {
//!         println!("{}  {}", video.id, video.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     FeedController                       │
//! │  reset  fetch_initial  fetch_next  fetch_previous        │
//! │  { items, cursor, has_more, in_flight, history }         │
//! └──────────────────────────────────────────────────────────┘
//!          │                  │                   │
//! ┌────────┴──────┐  ┌────────┴───────┐  ┌────────┴────────┐
//! │  PageSource   │  │  ScrollWatcher │  │  WatchHistory   │
//! │  listing      │  │  sentinel      │  │  KvStore        │
//! │  search       │  │  signals       │  │  50-entry cap   │
//! └───────────────┘  └────────────────┘  └─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types
pub mod types;

/// Application configuration
pub mod config;

/// Upstream video-platform API
pub mod api;

/// Paginated feed handling
pub mod feed;

/// Infinite-scroll trigger capability
pub mod scroll;

/// Locally persisted watch history
pub mod history;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{Category, Page, Video};

pub use feed::{FeedController, FeedMode, FeedSnapshot, FetchOutcome, PageSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
