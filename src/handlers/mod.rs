//! HTTP request handlers organized by domain.

pub mod impersonation_handler;
pub mod portal_handler;
pub mod session_handler;
pub mod shell_handler;

pub use impersonation_handler::*;
pub use portal_handler::*;
pub use session_handler::*;
pub use shell_handler::*;
