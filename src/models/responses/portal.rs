//! Session and portal-area response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::session::Session;

/// Response for a successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Whether the request was successful
    pub success: bool,
    /// Response message
    pub message: String,
    /// Bearer token issued by the backend
    #[schema(example = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ1LTEifQ.c2ln")]
    pub token: String,
    /// Normalized role key derived from the token claims
    #[schema(example = "agente")]
    pub role: String,
    /// Role-prefixed portal area the caller should navigate to
    #[schema(example = "/portal/agent")]
    pub landing_path: String,
    /// Raw user record as returned by the backend, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

/// Current session as exposed to the portal shell
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}

/// Descriptor for a guarded portal area
#[derive(Debug, Serialize, ToSchema)]
pub struct PortalAreaResponse {
    /// Area key, matching the route prefix
    #[schema(example = "dealer")]
    pub area: String,
    /// Display title for the area shell
    #[schema(example = "Dealer dashboard")]
    pub title: String,
    /// Feature panels available in this area
    pub features: Vec<String>,
}
