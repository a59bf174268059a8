//! Error taxonomy for the allocation and redirect-counting engine.
//!
//! Three layers of errors mirror the component boundaries:
//!
//! - [`CodeGenError`] - failures producing a random short code
//! - [`StoreError`] - failures of the persistence collaborator
//! - [`AppError`] - what the service layer surfaces to its callers
//!
//! Collision handling is the only case absorbed internally: the allocator
//! retries on [`StoreError::CodeTaken`] and never shows it to its caller
//! unless attempts are exhausted. Every other error propagates with its
//! classification intact so a transport layer can map it to a response.

use thiserror::Error;

/// Errors from short code generation.
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// The OS entropy source failed or is unavailable. Fatal to generation,
    /// never retried.
    #[error("random source unavailable: {0}")]
    RandomSource(#[from] getrandom::Error),

    /// A zero-length code was requested. A zero-length code could never
    /// resolve, so this is rejected explicitly rather than silently
    /// returning an empty string.
    #[error("requested code length must be at least 1")]
    ZeroLength,
}

/// Errors from the persistence collaborator.
///
/// `CodeTaken` and `EmailTaken` are the classified unique-constraint
/// violations the services react to; the remaining variants carry
/// unclassified persistence failures unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The short code is already assigned to another link.
    #[error("short code already taken")]
    CodeTaken,

    /// The email is already registered to another owner.
    #[error("email already registered")]
    EmailTaken,

    /// The store cannot be reached (connection refused, pool closed, TLS).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A store operation exceeded its deadline.
    #[error("store operation timed out: {0}")]
    Timeout(String),

    /// The query itself failed for an unclassified reason.
    #[error("store query failed: {0}")]
    Query(String),

    /// A row came back in a shape the entity mapping cannot decode.
    #[error("row decoding failed: {0}")]
    Row(String),
}

impl StoreError {
    /// Returns true for failures that may succeed on a later attempt.
    ///
    /// Used by the click worker to decide whether an increment is worth
    /// retrying. Constraint violations and decode failures are permanent.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout(_))
    }
}

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Every generated candidate code collided. The caller may retry with
    /// different parameters or alert.
    #[error("could not allocate a unique code after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },

    /// No link matches the requested code.
    #[error("short link not found")]
    NotFound,

    /// The link exists but has been disabled and must never resolve.
    #[error("short link is disabled")]
    Disabled,

    /// The target URL failed validation before any store call.
    #[error("invalid target URL: {0}")]
    InvalidTargetUrl(String),

    /// Code generation failed (entropy source or contract violation).
    #[error(transparent)]
    CodeGen(#[from] CodeGenError),

    /// An unclassified persistence failure, propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Classifies an sqlx error into the [`StoreError`] taxonomy.
///
/// Unique-constraint violations are classified by constraint name at the
/// call site (see the Postgres repositories); this function handles the
/// remaining transport and decode failures.
pub fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_) => StoreError::Row(message),
        _ => StoreError::Query(message),
    }
}

/// Returns true if the error is a unique violation on the named constraint.
pub fn is_unique_violation_on(err: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = err.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
