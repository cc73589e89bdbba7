//! Paginated feed handling
//!
//! # Overview
//!
//! The feed module provides the cursor-pagination controller at the heart
//! of the client:
//!
//! - `PageSource` - an opaque paginated source of video pages
//! - `FeedController` - tracks the continuation cursor, guards against
//!   overlapping fetches, and accumulates or replaces the visible items
//!   depending on the consumption mode
//! - `page_stream` - a stream of successive pages for batch consumers
//!
//! Three mutually exclusive consumption modes exist, selected at
//! construction: replace-per-page, append (infinite scroll), and stacked
//! (replace with a back/forward cursor stack).

mod controller;
mod source;

pub use controller::{FeedController, FeedMode, FeedSnapshot, FetchOutcome};
pub use source::{PageSource, PopularSource, SearchSource};

use crate::error::Result;
use crate::types::Page;
use futures::Stream;

/// Walk a source page by page as a stream
///
/// Each item is one fetched page; the stream ends after the terminal page
/// or on the first error.
pub fn page_stream<S: PageSource>(source: S) -> impl Stream<Item = Result<Page>> {
    // Outer None ends the stream; the inner option is the cursor itself,
    // where None requests the first page.
    futures::stream::try_unfold((source, Some(None::<String>)), |(source, pending)| async move {
        let Some(cursor) = pending else {
            return Ok(None);
        };
        let page = source.fetch(cursor.as_deref()).await?;
        let next = page.next_cursor.clone().map(Some);
        Ok(Some((page, (source, next))))
    })
}

#[cfg(test)]
mod tests;
