// Fetch worker - resolves loader tickets on tokio tasks
//
// Each ticket becomes one task: sleep for the simulated latency, query the
// catalog, send the epoch-stamped outcome back to the event loop. The worker
// never touches load state; staleness is decided by the loader when the
// outcome is applied.

use crate::catalog::CatalogSource;
use crate::loader::{FetchOutcome, FetchTicket};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Buffer size for the outcome channel
/// Only one fetch per epoch is in flight, so this only fills up if the user
/// changes the filter faster than the event loop drains outcomes.
const OUTCOME_BUFFER: usize = 64;

/// Spawns fetch tasks and delivers their outcomes over a channel
#[derive(Clone)]
pub struct Fetcher {
    catalog: Arc<dyn CatalogSource>,
    delay: Duration,
    tx: mpsc::Sender<FetchOutcome>,
}

impl Fetcher {
    /// Create a fetcher and the receiver its outcomes arrive on
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        delay: Duration,
    ) -> (Self, mpsc::Receiver<FetchOutcome>) {
        let (tx, rx) = mpsc::channel(OUTCOME_BUFFER);
        (Self { catalog, delay, tx }, rx)
    }

    /// Resolve `ticket` in the background
    pub fn spawn(&self, ticket: FetchTicket) -> JoinHandle<()> {
        let catalog = self.catalog.clone();
        let delay = self.delay;
        let tx = self.tx.clone();

        tracing::debug!(epoch = %ticket.epoch, page = ticket.page, "fetch started");

        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let outcome = ticket.resolve(catalog.as_ref());
            let epoch = outcome.epoch();
            // Receiver gone means the UI has shut down
            if tx.send(outcome).await.is_err() {
                tracing::debug!(epoch = %epoch, "fetch outcome dropped, receiver closed");
            }
        })
    }
}
