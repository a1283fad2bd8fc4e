//! Crawl frontier shared by all workers
//!
//! The frontier owns the queue of to-be-crawled URLs and the set of every
//! URL ever accepted. Enqueueing is idempotent over the serialized URL, so
//! a URL is delivered to exactly one worker across the whole crawl.
//!
//! Termination accounts for work still in flight: a worker blocked on an
//! empty queue is not released while a sibling is mid-page, because that
//! sibling may still enqueue more links. Only when the queue is empty and
//! nothing is in flight does `next` resolve to `None`.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::Notify;
use url::Url;

/// Shared work queue with exhaustion detection
pub struct Frontier {
    state: Mutex<FrontierState>,
    notify: Notify,
}

#[derive(Default)]
struct FrontierState {
    pending: VecDeque<Url>,
    seen: HashSet<String>,
    in_flight: usize,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            notify: Notify::new(),
        }
    }

    /// Adds a URL to the queue unless it was ever enqueued before
    ///
    /// # Returns
    ///
    /// * `true` - The URL was accepted and will be delivered once
    /// * `false` - The URL was already seen; no-op
    pub fn enqueue(&self, url: Url) -> bool {
        let mut state = self.state.lock().unwrap();
        if !state.seen.insert(url.as_str().to_string()) {
            return false;
        }
        state.pending.push_back(url);
        drop(state);

        self.notify.notify_waiters();
        true
    }

    /// Takes the next URL to crawl, waiting while siblings are mid-page
    ///
    /// Returns `None` only when the queue is empty and no URL is in flight;
    /// at that point the crawl is exhausted and the calling worker should
    /// terminate.
    pub async fn next(&self) -> Option<Url> {
        loop {
            // Arm the wakeup before inspecting state so a notification
            // arriving between the check and the await is not lost.
            let notified = self.notify.notified();

            {
                let mut state = self.state.lock().unwrap();
                if let Some(url) = state.pending.pop_front() {
                    state.in_flight += 1;
                    return Some(url);
                }
                if state.in_flight == 0 {
                    drop(state);
                    // Wake every blocked sibling so all workers observe
                    // exhaustion and shut down.
                    self.notify.notify_waiters();
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Records that a previously delivered URL finished processing
    ///
    /// Wakes blocked workers so they can re-check for newly enqueued work
    /// or for exhaustion.
    pub fn mark_complete(&self, url: &Url) {
        let mut state = self.state.lock().unwrap();
        state.in_flight = state.in_flight.saturating_sub(1);
        drop(state);

        tracing::trace!("Completed {}", url);
        self.notify.notify_waiters();
    }

    /// Number of URLs ever accepted into the frontier
    pub fn seen_count(&self) -> usize {
        self.state.lock().unwrap().seen.len()
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}
