//! Short link entity mapping a code to its target URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A short link with its visit counter and lifecycle flag.
///
/// The lifecycle is created-once, read-many, counter-incremented-many,
/// optionally disabled. `code` and `target_url` never change after
/// creation, and `click_count` is mutated only by the atomic increment
/// in the store.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ShortLink {
    /// Store-assigned identifier, immutable.
    pub id: i64,
    /// The creating principal, immutable.
    pub owner_id: i64,
    /// The original long URL, immutable after creation.
    pub target_url: String,
    /// Fixed-length base62 code, globally unique, immutable once assigned.
    pub code: String,
    /// Monotonically non-decreasing visit counter.
    pub click_count: i64,
    /// Once true, the link never resolves or increments again.
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortLink {
    /// Returns true if the link may still resolve and accumulate clicks.
    pub fn is_active(&self) -> bool {
        !self.disabled
    }
}

/// Input data for creating a new short link.
///
/// `id`, `click_count`, `disabled`, and the timestamps are assigned by
/// the store on insert.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub owner_id: i64,
    pub target_url: String,
    pub code: String,
}
