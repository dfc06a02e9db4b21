//! The in-memory representation of the authenticated portal user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::models::claims::{resolve_claims, ResolvedClaims};
use crate::models::role::normalize_role;
use crate::token::decode_claims;

/// Current portal session, derived from token claims.
///
/// Owned exclusively by the session store: replaced wholesale on login,
/// cleared on logout, never mutated field-by-field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Session {
    /// Backend user id
    #[schema(example = "u-1041")]
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Normalized role key (e.g. "agente", "dealer", "admin")
    #[schema(example = "agente")]
    pub role: String,
    pub permissions: HashSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Prepaid credit balance shown in the portal header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<f64>,
    pub established_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a token, or `None` when the token is malformed.
    pub fn from_token(token: &str) -> Option<Self> {
        let claims = decode_claims(token)?;
        resolve_claims(&claims).map(Session::from)
    }
}

impl From<ResolvedClaims> for Session {
    fn from(claims: ResolvedClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            name: claims.name,
            role: normalize_role(&claims.role),
            permissions: claims.permissions.into_iter().collect(),
            agent_name: claims.agent_name,
            dealer_name: claims.dealer_name,
            group_id: claims.group_id,
            credit: claims.credit,
            established_at: Utc::now(),
        }
    }
}
