//! Background worker that turns click events into counter increments.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;
use crate::error::StoreError;

/// Retry attempts per increment on transient store errors.
const MAX_RETRIES: usize = 3;

/// Base delay for the exponential backoff between retries.
const BACKOFF_BASE_MS: u64 = 50;

/// Consumes click events and applies one atomic increment per event.
///
/// Runs until the sending side of the channel is closed and the queue is
/// drained. Transient store errors (pool timeouts, lost connections) are
/// retried with jittered exponential backoff; anything else fails the
/// event immediately. Failed events are logged and counted, never
/// re-queued: each event is one real visit, and the redirect that
/// produced it has already been served.
///
/// An increment that affects zero rows means the link vanished or was
/// disabled after the resolver's read. That is a no-op, not an error.
pub async fn run_click_worker<R: UrlRepository>(mut rx: mpsc::Receiver<ClickEvent>, repo: Arc<R>) {
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(BACKOFF_BASE_MS)
            .map(jitter)
            .take(MAX_RETRIES);

        let result = RetryIf::spawn(
            strategy,
            || repo.increment_clicks(&event.code),
            |e: &StoreError| e.is_transient(),
        )
        .await;

        match result {
            Ok(1) => {
                metrics::counter!("shortlink_clicks_recorded_total").increment(1);
            }
            Ok(_) => {
                metrics::counter!("shortlink_clicks_noop_total").increment(1);
                debug!(code = %event.code, "click ignored: link missing or disabled");
            }
            Err(e) => {
                metrics::counter!("shortlink_clicks_failed_total").increment(1);
                warn!(code = %event.code, error = %e, "failed to record click");
            }
        }
    }
}
