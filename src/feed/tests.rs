//! Tests for the feed controller

use super::*;
use crate::error::Error;
use crate::types::{Page, Video};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

fn vids(prefix: &str, count: usize) -> Vec<Video> {
    (0..count)
        .map(|i| Video {
            id: format!("{prefix}{i}"),
            title: format!("Video {prefix}{i}"),
            channel: "Channel".to_string(),
            thumbnail_url: format!("https://img.example/{prefix}{i}.jpg"),
        })
        .collect()
}

/// Scripted page source keyed by cursor ("" is the first page)
#[derive(Clone, Default)]
struct FakeSource {
    pages: HashMap<String, Page>,
    fail_on: HashSet<String>,
    calls: Arc<Mutex<Vec<String>>>,
    /// When set, every fetch consumes a permit before responding
    hold: Option<Arc<Semaphore>>,
}

impl FakeSource {
    fn new() -> Self {
        Self::default()
    }

    fn page(mut self, cursor: &str, items: Vec<Video>, next: Option<&str>) -> Self {
        self.pages.insert(
            cursor.to_string(),
            Page::new(items, next.map(ToString::to_string)),
        );
        self
    }

    fn fail_on(mut self, cursor: &str) -> Self {
        self.fail_on.insert(cursor.to_string());
        self
    }

    fn held(mut self, sem: Arc<Semaphore>) -> Self {
        self.hold = Some(sem);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn fetch(&self, cursor: Option<&str>) -> crate::error::Result<Page> {
        let key = cursor.unwrap_or("").to_string();
        self.calls.lock().unwrap().push(key.clone());
        if let Some(sem) = &self.hold {
            sem.acquire().await.unwrap().forget();
        }
        if self.fail_on.contains(&key) {
            return Err(Error::api("upstream failure"));
        }
        self.pages
            .get(&key)
            .cloned()
            .ok_or_else(|| Error::api("no items in response"))
    }
}

// ============================================================================
// Append mode
// ============================================================================

#[tokio::test]
async fn test_append_accumulates_pages_in_order() {
    let source = FakeSource::new()
        .page("", vids("a", 12), Some("T1"))
        .page("T1", vids("b", 12), None);
    let controller = FeedController::new(source.clone(), FeedMode::Append);

    assert!(controller.fetch_initial().await.unwrap().fetched());
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 12);
    assert!(snapshot.has_more);

    assert!(controller.fetch_next().await.unwrap().fetched());
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 24);
    assert_eq!(snapshot.items[0].id, "a0");
    assert_eq!(snapshot.items[12].id, "b0");
    assert!(!snapshot.has_more);

    // Exhausted feed: further calls are no-ops
    assert_eq!(controller.fetch_next().await.unwrap(), FetchOutcome::Skipped);
    assert_eq!(controller.snapshot().await.items.len(), 24);
    assert_eq!(source.calls(), vec!["", "T1"]);
}

#[tokio::test]
async fn test_append_preserves_duplicate_ids() {
    let dup = Video {
        id: "dup".to_string(),
        title: "Duplicate".to_string(),
        channel: "Channel".to_string(),
        thumbnail_url: "https://img.example/dup.jpg".to_string(),
    };
    let source = FakeSource::new()
        .page("", vec![dup.clone()], Some("T1"))
        .page("T1", vec![dup], None);
    let controller = FeedController::new(source, FeedMode::Append);

    controller.fetch_initial().await.unwrap();
    controller.fetch_next().await.unwrap();

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.items[0].id, "dup");
    assert_eq!(snapshot.items[1].id, "dup");
}

// ============================================================================
// In-flight guard
// ============================================================================

#[tokio::test]
async fn test_fetch_next_noop_while_in_flight() {
    let sem = Arc::new(Semaphore::new(1));
    let source = FakeSource::new()
        .page("", vids("a", 3), Some("T1"))
        .page("T1", vids("b", 3), None)
        .held(Arc::clone(&sem));
    let controller = FeedController::new(source.clone(), FeedMode::Append);

    // First page completes normally (one permit available)
    controller.fetch_initial().await.unwrap();

    // Next fetch blocks on the source; a second fetch_next while it is
    // outstanding must not reach the source at all.
    let blocked = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.fetch_next().await })
    };
    tokio::task::yield_now().await;

    assert_eq!(controller.fetch_next().await.unwrap(), FetchOutcome::Skipped);
    assert_eq!(source.calls().len(), 2);

    sem.add_permits(1);
    assert!(blocked.await.unwrap().unwrap().fetched());
    assert_eq!(controller.snapshot().await.items.len(), 6);
}

#[tokio::test]
async fn test_fetch_next_noop_without_cursor() {
    let source = FakeSource::new().page("", vids("a", 3), Some("T1"));
    let controller = FeedController::new(source.clone(), FeedMode::Append);

    // No initial fetch has happened, so there is no cursor to use
    assert_eq!(controller.fetch_next().await.unwrap(), FetchOutcome::Skipped);
    assert!(source.calls().is_empty());
}

// ============================================================================
// Replace mode
// ============================================================================

#[tokio::test]
async fn test_replace_mode_swaps_items() {
    let source = FakeSource::new()
        .page("", vids("a", 12), Some("T1"))
        .page("T1", vids("b", 5), None);
    let controller = FeedController::new(source, FeedMode::Replace);

    controller.fetch_initial().await.unwrap();
    assert_eq!(controller.snapshot().await.items.len(), 12);

    controller.fetch_next().await.unwrap();
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 5);
    assert_eq!(snapshot.items[0].id, "b0");
}

// ============================================================================
// Stacked mode (back/forward)
// ============================================================================

#[tokio::test]
async fn test_stacked_previous_then_next_reproduces_cursor() {
    let source = FakeSource::new()
        .page("", vids("a", 2), Some("T1"))
        .page("T1", vids("b", 2), Some("T2"))
        .page("T2", vids("c", 2), Some("T3"));
    let controller = FeedController::new(source.clone(), FeedMode::Stacked);

    controller.fetch_initial().await.unwrap();
    controller.fetch_next().await.unwrap(); // now on page T1
    controller.fetch_next().await.unwrap(); // now on page T2

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.items[0].id, "c0");
    assert!(snapshot.has_previous);

    // Back to page T1, then forward again: the forward fetch must reuse
    // the cursor that was active before going back.
    assert!(controller.fetch_previous().await.unwrap().fetched());
    assert_eq!(controller.snapshot().await.items[0].id, "b0");
    assert!(controller.fetch_next().await.unwrap().fetched());
    assert_eq!(controller.snapshot().await.items[0].id, "c0");

    assert_eq!(source.calls(), vec!["", "T1", "T2", "T1", "T2"]);
}

#[tokio::test]
async fn test_stacked_previous_reaches_first_page_sentinel() {
    let source = FakeSource::new()
        .page("", vids("a", 2), Some("T1"))
        .page("T1", vids("b", 2), Some("T2"));
    let controller = FeedController::new(source.clone(), FeedMode::Stacked);

    controller.fetch_initial().await.unwrap();
    controller.fetch_next().await.unwrap();

    // Going back refetches the first page with the empty-cursor sentinel
    assert!(controller.fetch_previous().await.unwrap().fetched());
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.items[0].id, "a0");
    assert!(!snapshot.has_previous);
    assert_eq!(source.calls(), vec!["", "T1", ""]);
}

#[tokio::test]
async fn test_fetch_previous_noop_on_empty_history() {
    let source = FakeSource::new().page("", vids("a", 2), Some("T1"));
    let controller = FeedController::new(source.clone(), FeedMode::Stacked);

    controller.fetch_initial().await.unwrap();
    assert_eq!(
        controller.fetch_previous().await.unwrap(),
        FetchOutcome::Skipped
    );
    assert_eq!(source.calls(), vec![""]);
}

#[tokio::test]
async fn test_stacked_failed_page_turn_rolls_back_history() {
    let source = FakeSource::new()
        .page("", vids("a", 2), Some("T1"))
        .fail_on("T1");
    let controller = FeedController::new(source, FeedMode::Stacked);

    controller.fetch_initial().await.unwrap();
    assert!(controller.fetch_next().await.is_err());

    // The failed turn must not leave a phantom history entry
    let snapshot = controller.snapshot().await;
    assert!(!snapshot.has_previous);
    assert_eq!(snapshot.items[0].id, "a0");
}

// ============================================================================
// Error handling
// ============================================================================

#[tokio::test]
async fn test_error_on_next_keeps_accumulated_items() {
    let source = FakeSource::new()
        .page("", vids("a", 12), Some("T1"))
        .fail_on("T1");
    let controller = FeedController::new(source.clone(), FeedMode::Append);

    controller.fetch_initial().await.unwrap();
    assert!(controller.fetch_next().await.is_err());

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 12);
    assert!(snapshot.has_more);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error.as_deref(), Some("upstream failure"));

    // Guard was released, so a manual retry reaches the source again
    assert!(controller.fetch_next().await.is_err());
    assert_eq!(source.calls(), vec!["", "T1", "T1"]);
}

#[tokio::test]
async fn test_initial_fetch_error_state() {
    let source = FakeSource::new().fail_on("");
    let controller = FeedController::new(source, FeedMode::Append);

    assert!(controller.fetch_initial().await.is_err());

    let snapshot = controller.snapshot().await;
    assert!(snapshot.items.is_empty());
    assert!(!snapshot.loading);
    assert!(snapshot.error.is_some());
}

#[tokio::test]
async fn test_error_cleared_when_new_fetch_starts() {
    let source = FakeSource::new()
        .page("", vids("a", 2), Some("T1"))
        .fail_on("T1");
    let controller = FeedController::new(source, FeedMode::Append);

    controller.fetch_initial().await.unwrap();
    assert!(controller.fetch_next().await.is_err());
    assert!(controller.snapshot().await.error.is_some());

    controller.reset().await;
    controller.fetch_initial().await.unwrap();
    assert!(controller.snapshot().await.error.is_none());
}

// ============================================================================
// Reset and stale responses
// ============================================================================

#[tokio::test]
async fn test_reset_restores_has_more() {
    let source = FakeSource::new().page("", vids("a", 3), None);
    let controller = FeedController::new(source, FeedMode::Append);

    controller.fetch_initial().await.unwrap();
    assert!(!controller.snapshot().await.has_more);

    controller.reset().await;
    let snapshot = controller.snapshot().await;
    assert!(snapshot.has_more);
    assert!(snapshot.items.is_empty());

    controller.fetch_initial().await.unwrap();
    assert_eq!(controller.snapshot().await.items.len(), 3);
}

#[tokio::test]
async fn test_reset_discards_outstanding_response() {
    let sem = Arc::new(Semaphore::new(0));
    let source = FakeSource::new()
        .page("", vids("a", 5), Some("T1"))
        .held(Arc::clone(&sem));
    let controller = FeedController::new(source, FeedMode::Append);

    let outstanding = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.fetch_initial().await })
    };
    tokio::task::yield_now().await;

    controller.reset().await;
    sem.add_permits(1);

    assert_eq!(outstanding.await.unwrap().unwrap(), FetchOutcome::Stale);
    let snapshot = controller.snapshot().await;
    assert!(snapshot.items.is_empty());
    assert!(!snapshot.loading);
}

// ============================================================================
// Page stream
// ============================================================================

#[tokio::test]
async fn test_page_stream_walks_to_terminal_page() {
    use futures::TryStreamExt;

    let source = FakeSource::new()
        .page("", vids("a", 2), Some("T1"))
        .page("T1", vids("b", 2), Some("T2"))
        .page("T2", vids("c", 1), None);

    let pages: Vec<Page> = page_stream(source).try_collect().await.unwrap();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].items[0].id, "a0");
    assert_eq!(pages[2].items[0].id, "c0");
    assert!(pages[2].is_terminal());
}

#[tokio::test]
async fn test_page_stream_propagates_errors() {
    use futures::TryStreamExt;

    let source = FakeSource::new()
        .page("", vids("a", 2), Some("T1"))
        .fail_on("T1");

    let result: crate::error::Result<Vec<Page>> = page_stream(source).try_collect().await;
    assert!(result.is_err());
}
