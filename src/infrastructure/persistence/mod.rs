//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - PostgreSQL short link storage
//! - [`PgOwnerRepository`] - PostgreSQL owner registry
//! - [`MemoryUrlRepository`] - in-memory short link storage for tests and
//!   embedded use
//!
//! The Postgres repositories use runtime-bound queries (`sqlx::query_as`
//! with `bind`), so the crate builds without a live database.

pub mod memory_url_repository;
pub mod pg_owner_repository;
pub mod pg_url_repository;

pub use memory_url_repository::MemoryUrlRepository;
pub use pg_owner_repository::PgOwnerRepository;
pub use pg_url_repository::PgUrlRepository;
