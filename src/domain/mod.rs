//! Domain layer: entities, repository contracts, and click processing.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click counting event model
//! - [`click_worker`] - Asynchronous click counting worker
//!
//! The domain layer has no dependency on infrastructure; repository traits
//! are implemented in [`crate::infrastructure::persistence`].
//!
//! # Click Counting Flow
//!
//! 1. The redirect service resolves a code
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] applies one atomic increment per
//!    event, with retry on transient store errors
//!
//! The channel decouples the redirect response from the counter write: a
//! full queue or failing store never slows down or fails a redirect.

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
