//! Validation helpers.

pub mod common;

pub use common::*;
