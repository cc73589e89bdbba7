//! Infinite-scroll trigger capability
//!
//! The rendering layer owns a sentinel element at the bottom of the list;
//! whatever visibility mechanism it uses, it reports "the sentinel became
//! visible" through a [`SentinelHandle`]. A [`ScrollWatcher`] turns those
//! signals into `fetch_next` calls and relies entirely on the controller's
//! no-op checks, so redundant signals while a fetch is in flight or after
//! the feed is exhausted cost nothing.

use crate::feed::{FeedController, PageSource};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Create a connected sentinel handle and signal receiver
pub fn sentinel() -> (SentinelHandle, SentinelSignal) {
    // Capacity 1: signals fired while one is already pending collapse
    // into it, mirroring how the controller would no-op them anyway.
    let (tx, rx) = mpsc::channel(1);
    (SentinelHandle { tx }, SentinelSignal { rx })
}

/// Sender half held by the rendering layer
#[derive(Debug, Clone)]
pub struct SentinelHandle {
    tx: mpsc::Sender<()>,
}

impl SentinelHandle {
    /// Report that the sentinel became visible
    pub fn visible(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Receiver half consumed by a watcher
#[derive(Debug)]
pub struct SentinelSignal {
    rx: mpsc::Receiver<()>,
}

/// Drives a feed controller from visibility signals
pub struct ScrollWatcher<S> {
    controller: FeedController<S>,
    signal: SentinelSignal,
}

impl<S: PageSource> ScrollWatcher<S> {
    /// Create a watcher over a controller clone
    pub fn new(controller: FeedController<S>, signal: SentinelSignal) -> Self {
        Self { controller, signal }
    }

    /// Run until every handle is dropped or the feed is exhausted
    ///
    /// A failed fetch leaves the watcher listening: the next visibility
    /// signal acts as the externally initiated retry.
    pub async fn run(mut self) {
        while self.signal.rx.recv().await.is_some() {
            match self.controller.fetch_next().await {
                Ok(outcome) => {
                    debug!(?outcome, "visibility-triggered fetch");
                    let snapshot = self.controller.snapshot().await;
                    if !snapshot.has_more && !snapshot.loading {
                        debug!("feed exhausted, watcher stopping");
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "visibility-triggered fetch failed");
                }
            }
        }
    }
}
