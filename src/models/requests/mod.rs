//! Request payload models.

pub mod auth;

pub use auth::*;
