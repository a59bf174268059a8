//! Owner entity: the principal a short link belongs to.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered owner of short links.
///
/// Authentication is handled outside this crate; the owner record only
/// carries identity, keyed by a store-unique email.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Owner {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for registering a new owner.
#[derive(Debug, Clone)]
pub struct NewOwner {
    pub email: String,
}
