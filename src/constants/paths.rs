//! Portal path constants.

/// Where unauthenticated visitors are sent.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Where authenticated but role-mismatched visitors are sent.
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Request path prefix that always bypasses the shell cache.
pub const API_PREFIX: &str = "/api";

/// Shell assets precached at startup for offline fallback.
pub const SHELL_ASSETS: [&str; 4] = [
    "/index.html",
    "/manifest.json",
    "/static/app.js",
    "/static/app.css",
];
