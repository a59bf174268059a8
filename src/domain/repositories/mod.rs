//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the persistence collaborator. Implementations
//! live in `crate::infrastructure::persistence`; mocks are auto-generated
//! via `mockall` for service unit tests.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - Short link storage and atomic click counting
//! - [`OwnerRepository`] - Owner registry
//!
//! Backing stores must offer at least read-committed isolation and a true
//! uniqueness constraint on the short code; an eventually consistent
//! uniqueness check would make concurrent allocations racy.

pub mod owner_repository;
pub mod url_repository;

pub use owner_repository::OwnerRepository;
pub use url_repository::UrlRepository;

#[cfg(test)]
pub use owner_repository::MockOwnerRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
