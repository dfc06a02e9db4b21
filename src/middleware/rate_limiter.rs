//! Rate limiting middleware for the login endpoint.
//!
//! Protects against brute-force attempts on the session login route.

use actix_governor::{GovernorConfig, GovernorConfigBuilder};

/// Create rate limiter configuration for the login endpoint.
///
/// Allows a burst of 5 requests with 1 request replenished every 6 seconds
/// (10 per minute).
pub fn create_login_rate_limiter_config() -> GovernorConfig<
    actix_governor::PeerIpKeyExtractor,
    actix_governor::governor::middleware::NoOpMiddleware<
        actix_governor::governor::clock::QuantaInstant,
    >,
> {
    GovernorConfigBuilder::default()
        .seconds_per_request(6)
        .burst_size(5)
        .finish()
        .expect("Failed to create login rate limiter config")
}
