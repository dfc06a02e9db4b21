//! Services organized by domain concern.

pub mod auth_client;
pub mod impersonation;
pub mod session_store;
pub mod shell_cache;

pub use auth_client::{AuthApi, BackendAuthClient, LoginOutcome};
pub use impersonation::{HandshakeState, ImpersonationHandshake, ImpersonationMessage};
pub use session_store::{GuardVerdict, SessionStore};
pub use shell_cache::{ShellCache, ShellFetch};
