//! Click event model for asynchronous click counting.

use chrono::{DateTime, Utc};

/// The in-process message carrying a resolved code from the redirect path
/// to the background click worker.
///
/// Sent over a bounded channel with `try_send`, so a full queue drops the
/// event instead of delaying the redirect. The worker turns each event
/// into one atomic counter increment against the store.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub requested_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    pub fn new(code: String) -> Self {
        Self {
            code,
            requested_at: Utc::now(),
        }
    }
}
