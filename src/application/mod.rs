//! Application layer services implementing the engine's business logic.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link allocation with
//!   collision retry, plus owner listings
//! - [`services::redirect_service::RedirectService`] - Code resolution
//!   and fire-and-forget click dispatch

pub mod services;
