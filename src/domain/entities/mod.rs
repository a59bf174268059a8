//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Each entity
//! has a companion `New*` struct for creation, carrying only the fields a
//! caller supplies; ids and timestamps are assigned by the store.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A short code mapped to a target URL
//! - [`Owner`] - The principal a link belongs to

pub mod owner;
pub mod short_link;

pub use owner::{NewOwner, Owner};
pub use short_link::{NewShortLink, ShortLink};
