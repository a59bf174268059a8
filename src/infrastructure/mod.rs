//! Infrastructure layer: concrete persistence implementations.

pub mod persistence;
