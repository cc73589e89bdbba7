//! The pagination cursor controller
//!
//! Tracks the opaque continuation cursor across fetches, prevents
//! overlapping in-flight requests, and applies each successful page to the
//! visible item list according to the consumption mode.
//!
//! State lives behind an `Arc<RwLock<_>>` so a controller clone can be
//! handed to a scroll watcher or a rendering task; clones share state.

use super::source::PageSource;
use crate::error::Result;
use crate::types::Video;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// How successful pages are applied to the visible item list
///
/// Fixed at construction; the controller never switches modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Each page replaces the visible list
    Replace,
    /// Pages are concatenated in arrival order (infinite scroll)
    Append,
    /// Replace, with a back/forward stack of prior-page cursors
    Stacked,
}

/// Outcome of a fetch operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched and applied
    Fetched,
    /// Conditional no-op: already in flight, feed exhausted, or nothing
    /// to fetch
    Skipped,
    /// The response arrived after a reset and was discarded
    Stale,
}

impl FetchOutcome {
    /// True if a page was applied
    pub fn fetched(&self) -> bool {
        matches!(self, Self::Fetched)
    }
}

/// What to do with the cursor stack once a fetch succeeds
///
/// History is only mutated on success so a failed page turn leaves the
/// stack exactly as it was.
#[derive(Debug, Clone, Copy)]
enum HistoryOp {
    None,
    Push,
    Pop,
}

/// Which operation initiated a fetch
#[derive(Debug, Clone, Copy)]
enum FetchIntent {
    Initial,
    Next,
    Previous,
}

/// Mutable controller state
#[derive(Debug)]
struct FeedState {
    /// Visible items, mode-dependent (replaced or appended)
    items: Vec<Video>,
    /// Cursor to use for the next fetch
    cursor: Option<String>,
    /// Cursor that produced the currently visible page (stacked mode)
    current_cursor: Option<String>,
    /// False once a response arrives without a continuation cursor
    has_more: bool,
    /// Guard against overlapping fetches
    in_flight: bool,
    /// Cursors of previously visited pages, oldest first; `None` is the
    /// first-page sentinel
    history: Vec<Option<String>>,
    /// Last fetch error, cleared when a new fetch starts
    error: Option<String>,
    /// Bumped by reset; responses from an older generation are discarded
    generation: u64,
}

impl FeedState {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            current_cursor: None,
            has_more: true,
            in_flight: false,
            history: Vec::new(),
            error: None,
            generation: 0,
        }
    }

    fn reset(&mut self) {
        let generation = self.generation;
        *self = Self::new();
        self.generation = generation + 1;
    }
}

/// Read-only view of the controller for the rendering layer
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Current visible items
    pub items: Vec<Video>,
    /// A fetch is in flight
    pub loading: bool,
    /// Last fetch error, if any
    pub error: Option<String>,
    /// More pages are available
    pub has_more: bool,
    /// A previous page exists (stacked mode)
    pub has_previous: bool,
}

/// Pagination cursor controller over a page source
pub struct FeedController<S> {
    source: Arc<S>,
    mode: FeedMode,
    state: Arc<RwLock<FeedState>>,
}

impl<S> Clone for FeedController<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            mode: self.mode,
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: PageSource> FeedController<S> {
    /// Create a controller over a source, in the given mode
    pub fn new(source: S, mode: FeedMode) -> Self {
        Self {
            source: Arc::new(source),
            mode,
            state: Arc::new(RwLock::new(FeedState::new())),
        }
    }

    /// The consumption mode this controller was built with
    pub fn mode(&self) -> FeedMode {
        self.mode
    }

    /// Clear items, cursor, and history back to the initial state
    ///
    /// Does not itself fetch. A response still outstanding when reset is
    /// called will be discarded on arrival.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.reset();
    }

    /// Fetch the first page
    pub async fn fetch_initial(&self) -> Result<FetchOutcome> {
        self.fetch_page(FetchIntent::Initial).await
    }

    /// Fetch the next page using the stored cursor
    ///
    /// A no-op when a fetch is already in flight, when the feed is
    /// exhausted, or when no cursor is available yet.
    pub async fn fetch_next(&self) -> Result<FetchOutcome> {
        self.fetch_page(FetchIntent::Next).await
    }

    /// Refetch the previous page (stacked mode)
    ///
    /// A no-op when the history stack is empty. The popped cursor may be
    /// the first-page sentinel.
    pub async fn fetch_previous(&self) -> Result<FetchOutcome> {
        self.fetch_page(FetchIntent::Previous).await
    }

    /// Snapshot of the current state for rendering
    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.read().await;
        FeedSnapshot {
            items: state.items.clone(),
            loading: state.in_flight,
            error: state.error.clone(),
            has_more: state.has_more,
            has_previous: !state.history.is_empty(),
        }
    }

    async fn fetch_page(&self, intent: FetchIntent) -> Result<FetchOutcome> {
        // Decide whether to fetch and claim the in-flight guard under a
        // single write lock, before any await on the source.
        let (cursor, generation, history_op) = {
            let mut state = self.state.write().await;
            if state.in_flight {
                debug!(?intent, "fetch already in flight, skipping");
                return Ok(FetchOutcome::Skipped);
            }
            let (cursor, history_op) = match intent {
                FetchIntent::Initial => (None, HistoryOp::None),
                FetchIntent::Next => {
                    if !state.has_more {
                        debug!("feed exhausted, skipping");
                        return Ok(FetchOutcome::Skipped);
                    }
                    let Some(cursor) = state.cursor.clone() else {
                        return Ok(FetchOutcome::Skipped);
                    };
                    let op = match self.mode {
                        FeedMode::Stacked => HistoryOp::Push,
                        FeedMode::Replace | FeedMode::Append => HistoryOp::None,
                    };
                    (Some(cursor), op)
                }
                FetchIntent::Previous => {
                    let Some(cursor) = state.history.last().cloned() else {
                        return Ok(FetchOutcome::Skipped);
                    };
                    (cursor, HistoryOp::Pop)
                }
            };
            state.in_flight = true;
            state.error = None;
            (cursor, state.generation, history_op)
        };

        let result = self.source.fetch(cursor.as_deref()).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            // Reset happened while the request was outstanding. The reset
            // already released the guard, so leave state alone.
            debug!("discarding response from a previous generation");
            return Ok(FetchOutcome::Stale);
        }

        match result {
            Ok(page) => {
                match self.mode {
                    FeedMode::Append => state.items.extend(page.items),
                    FeedMode::Replace | FeedMode::Stacked => state.items = page.items,
                }
                match history_op {
                    HistoryOp::Push => {
                        let prev = state.current_cursor.take();
                        state.history.push(prev);
                    }
                    HistoryOp::Pop => {
                        state.history.pop();
                    }
                    HistoryOp::None => {}
                }
                state.current_cursor = cursor;
                state.has_more = page.next_cursor.is_some();
                state.cursor = page.next_cursor;
                state.in_flight = false;
                Ok(FetchOutcome::Fetched)
            }
            Err(e) => {
                // Items, cursor, has_more, and history stay as they were.
                warn!(error = %e, "page fetch failed");
                state.error = Some(e.to_string());
                state.in_flight = false;
                Err(e)
            }
        }
    }
}

impl<S> std::fmt::Debug for FeedController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedController")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
