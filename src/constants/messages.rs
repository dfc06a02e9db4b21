//! Success message constants used throughout the application.

// Session messages
pub const MSG_LOGIN_SUCCESS: &str = "Login successful";
pub const MSG_LOGOUT_SUCCESS: &str = "Logout successful";

// Impersonation messages
pub const MSG_IMPERSONATION_OFFERED: &str = "Impersonation handshake offered";
pub const MSG_IMPERSONATION_RECEIVED: &str = "Impersonation login received";
pub const MSG_IMPERSONATION_APPLIED: &str = "Impersonation session applied";
