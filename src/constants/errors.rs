//! Error message constants used throughout the application.

// Authentication errors
pub const ERR_AUTH_REQUIRED: &str = "Authentication required";
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid identifier or password";
pub const ERR_MALFORMED_TOKEN: &str = "Session token is malformed";
pub const ERR_BACKEND_UNREACHABLE: &str = "Authentication service is unreachable";
pub const ERR_BACKEND_BAD_TOKEN: &str = "Authentication service returned an unusable token";

// Authorization errors
pub const ERR_ROLE_NOT_ALLOWED: &str = "Your role does not grant access to this area";

// Impersonation errors
pub const ERR_HANDSHAKE_NOT_OFFERED: &str = "Impersonation handshake has not been offered";
pub const ERR_HANDSHAKE_NO_LOGIN: &str = "No impersonation login has been received";
pub const ERR_HANDSHAKE_ALREADY_DONE: &str = "Impersonation handshake already completed";

// Shell cache errors
pub const ERR_SHELL_UNAVAILABLE: &str = "Portal shell is temporarily unavailable";
