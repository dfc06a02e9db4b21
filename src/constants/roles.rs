//! Role keys shared across claim resolution and guarding.

/// Default role when token claims carry no resolvable role. A
/// fallback-on-ambiguity policy, not a privilege boundary.
pub const ROLE_DEALER: &str = "dealer";

/// Normalized role keys that bypass every per-route allow-list.
///
/// This is the operator override carried over from the portal: admin and
/// superuser sessions render any guarded area, whatever the route declares.
pub const OPERATOR_KEYS: [&str; 2] = ["admin", "superuser"];
