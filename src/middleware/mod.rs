//! Middleware for protecting portal areas and shaping request context.

pub mod rate_limiter;
pub mod request_ext;
pub mod route_guard;

pub use rate_limiter::create_login_rate_limiter_config;
pub use request_ext::RequestExt;
pub use route_guard::RouteGuard;
