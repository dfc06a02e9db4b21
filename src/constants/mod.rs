//! Application constants module.
//!
//! This module centralizes all constant strings used throughout the application,
//! including error messages, success messages, role keys, and portal paths.

pub mod errors;
pub mod messages;
pub mod paths;
pub mod roles;

pub use errors::*;
pub use messages::*;
pub use paths::*;
pub use roles::*;
