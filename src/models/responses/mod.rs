//! Response payload models.

pub mod api;
pub mod portal;

pub use api::*;
pub use portal::*;
