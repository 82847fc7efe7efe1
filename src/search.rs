//! Debounced directory search
//!
//! Typing schedules a query; each new schedule cancels the pending timer so
//! only the last term in a burst hits the network. Every scheduled query gets
//! a generation number and completions carry it back, so the store can
//! ignore anything but the latest.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{DirectoryError, RadioBrowserClient};
use crate::models::Station;

/// Quiet period before a typed term is sent
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A finished directory query
#[derive(Debug)]
pub struct SearchCompletion {
    pub generation: u64,
    pub term: String,
    pub page: u32,
    pub result: Result<Vec<Station>, DirectoryError>,
}

/// Where the store sends directory queries
pub trait SearchPort {
    /// Query after the quiet period, superseding anything pending.
    /// Returns the generation of the new query.
    fn schedule(&mut self, term: &str, page: u32) -> u64;

    /// Query right away, superseding anything pending
    fn dispatch_now(&mut self, term: &str, page: u32) -> u64;

    /// Generation of the most recent query
    fn latest(&self) -> u64;

    fn is_current(&self, generation: u64) -> bool {
        generation == self.latest()
    }
}

/// Debouncing scheduler on top of [`RadioBrowserClient`].
///
/// Needs a tokio runtime. Completions arrive on the receiver returned by
/// [`SearchScheduler::new`].
pub struct SearchScheduler {
    client: RadioBrowserClient,
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<SearchCompletion>,
}

impl SearchScheduler {
    pub fn new(
        client: RadioBrowserClient,
        delay: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            client,
            delay,
            generation: 0,
            pending: None,
            tx,
        };
        (scheduler, rx)
    }

    fn start(&mut self, term: &str, page: u32, delay: Duration) -> u64 {
        self.generation += 1;
        if let Some(handle) = self.pending.take() {
            // Only the timer dies here; a request already sent runs to
            // completion and is dropped by generation.
            handle.abort();
        }

        let generation = self.generation;
        let request = self.request(generation, term.to_string(), page);

        if delay.is_zero() {
            tokio::spawn(request);
        } else {
            self.pending = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                tokio::spawn(request);
            }));
        }

        generation
    }

    fn request(
        &self,
        generation: u64,
        term: String,
        page: u32,
    ) -> impl std::future::Future<Output = ()> + Send + 'static {
        let client = self.client.clone();
        let tx = self.tx.clone();
        async move {
            debug!(generation, term = %term, page, "dispatching search");
            let result = client.search(&term, page).await;
            let _ = tx.send(SearchCompletion {
                generation,
                term,
                page,
                result,
            });
        }
    }
}

impl SearchPort for SearchScheduler {
    fn schedule(&mut self, term: &str, page: u32) -> u64 {
        let delay = self.delay;
        self.start(term, page, delay)
    }

    fn dispatch_now(&mut self, term: &str, page: u32) -> u64 {
        self.start(term, page, Duration::ZERO)
    }

    fn latest(&self) -> u64 {
        self.generation
    }
}

impl Drop for SearchScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
