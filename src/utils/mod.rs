//! Shared utilities.

pub mod log_sanitizer;

pub use log_sanitizer::*;
