//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::StoreError;
use async_trait::async_trait;

/// Storage contract for short links.
///
/// Correctness of the allocation loop depends on the store enforcing code
/// uniqueness itself: when two concurrent inserts carry the same code,
/// exactly one succeeds and the other fails with
/// [`StoreError::CodeTaken`]. A check-then-insert implementation would be
/// racy and does not satisfy this contract.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - in-memory,
///   used by tests and embedded deployments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new short link, enforcing code uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CodeTaken`] if the code is already assigned
    /// to another link; other [`StoreError`] variants on persistence
    /// failures.
    async fn insert_unique(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Finds a link by its exact code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found (disabled links included)
    /// - `Ok(None)` if no row matches
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Lists an owner's links, newest first (descending id).
    async fn list_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ShortLink>, StoreError>;

    /// Atomically adds one to the link's click counter.
    ///
    /// Executed as a single indivisible store operation guarded by
    /// `disabled = false`, never as a read-modify-write pair, so
    /// concurrent increments are never lost and no increment lands on a
    /// link disabled after the caller's read.
    ///
    /// # Returns
    ///
    /// The number of affected rows: `1` on success, `0` (not an error)
    /// when the code does not exist or the link is disabled.
    async fn increment_clicks(&self, code: &str) -> Result<u64, StoreError>;
}
