//! Code resolution and fire-and-forget click dispatch.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Service resolving a short code to its target URL.
///
/// On a successful resolution the service enqueues a [`ClickEvent`] for
/// the background worker. The send is non-blocking and its failure is
/// invisible to the caller: a full queue or a stopped worker must never
/// fail or delay a redirect. Dropped events are counted and logged at
/// debug level.
pub struct RedirectService<R: UrlRepository> {
    repository: Arc<R>,
    click_tx: mpsc::Sender<ClickEvent>,
}

impl<R: UrlRepository> RedirectService<R> {
    /// Creates a redirect service over a repository and the click channel.
    pub fn new(repository: Arc<R>, click_tx: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            repository,
            click_tx,
        }
    }

    /// Resolves a code to its target URL.
    ///
    /// Disabled links never resolve and never enqueue a click event.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link matches the code
    /// - [`AppError::Disabled`] if the link is disabled; a transport layer
    ///   may collapse this to not-found if it prefers not to reveal
    ///   disabled links
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound)?;

        if link.disabled {
            return Err(AppError::Disabled);
        }

        if let Err(e) = self.click_tx.try_send(ClickEvent::new(link.code)) {
            metrics::counter!("shortlink_clicks_dropped_total").increment(1);
            debug!(code, error = %e, "click queue full, dropping click event");
        }

        Ok(link.target_url)
    }
}
