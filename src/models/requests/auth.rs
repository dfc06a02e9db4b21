//! Authentication request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for portal login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Dealer code or email used to identify the account
    #[validate(length(min = 1, message = "Identifier is required"))]
    #[schema(example = "dealer-0042")]
    pub identifier: String,
    /// Account password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "s3cret")]
    pub secret: String,
}

/// Request payload delivering an impersonation token to the handshake
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImpersonationLoginRequest {
    /// Bearer token minted by the backend for the impersonated account
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}
