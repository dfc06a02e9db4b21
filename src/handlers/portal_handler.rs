//! Guarded portal area handlers and the public login/unauthorized views.
//!
//! Each area handler returns the descriptor the portal shell renders for that
//! role; the route guard has already decided access before these run.

use actix_web::{HttpRequest, HttpResponse};

use crate::constants::{ERR_AUTH_REQUIRED, ERR_ROLE_NOT_ALLOWED};
use crate::errors::ApiError;
use crate::middleware::RequestExt;
use crate::models::PortalAreaResponse;

fn area_response(
    req: &HttpRequest,
    area: &str,
    title: &str,
    features: &[&str],
) -> Result<HttpResponse, ApiError> {
    // Guarded routes always carry a session; its absence is a wiring bug.
    let _session = req
        .get_session()
        .ok_or_else(|| ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string()))?;

    Ok(HttpResponse::Ok().json(PortalAreaResponse {
        area: area.to_string(),
        title: title.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
    }))
}

/// Dealer area shell
#[utoipa::path(
    get,
    path = "/portal/dealer",
    tag = "Portal",
    responses(
        (status = 200, description = "Dealer area", body = PortalAreaResponse),
        (status = 302, description = "Redirect to login or unauthorized view")
    )
)]
pub async fn dealer_area(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    area_response(
        &req,
        "dealer",
        "Dealer dashboard",
        &["catalog", "cart", "activations", "incentive-plans"],
    )
}

/// Agent area shell
#[utoipa::path(
    get,
    path = "/portal/agent",
    tag = "Portal",
    responses(
        (status = 200, description = "Agent area", body = PortalAreaResponse),
        (status = 302, description = "Redirect to login or unauthorized view")
    )
)]
pub async fn agent_area(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    area_response(
        &req,
        "agent",
        "Agent dashboard",
        &["dealer-overview", "activations", "incentive-plans", "reports"],
    )
}

/// Master area shell (masters and product masters)
#[utoipa::path(
    get,
    path = "/portal/master",
    tag = "Portal",
    responses(
        (status = 200, description = "Master area", body = PortalAreaResponse),
        (status = 302, description = "Redirect to login or unauthorized view")
    )
)]
pub async fn master_area(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    area_response(
        &req,
        "master",
        "Master dashboard",
        &["network-overview", "commissions", "product-catalog", "reports"],
    )
}

/// Super master area shell
#[utoipa::path(
    get,
    path = "/portal/supermaster",
    tag = "Portal",
    responses(
        (status = 200, description = "Super master area", body = PortalAreaResponse),
        (status = 302, description = "Redirect to login or unauthorized view")
    )
)]
pub async fn super_master_area(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    area_response(
        &req,
        "supermaster",
        "Super master dashboard",
        &["network-overview", "commission-tiers", "reports"],
    )
}

/// Admin area shell
#[utoipa::path(
    get,
    path = "/portal/admin",
    tag = "Portal",
    responses(
        (status = 200, description = "Admin area", body = PortalAreaResponse),
        (status = 302, description = "Redirect to login view")
    )
)]
pub async fn admin_area(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    area_response(
        &req,
        "admin",
        "Administration",
        &["users", "impersonation", "incentive-plan-editor", "reports"],
    )
}

/// Account area shell, open to every authenticated role
#[utoipa::path(
    get,
    path = "/portal/account",
    tag = "Portal",
    responses(
        (status = 200, description = "Account area", body = PortalAreaResponse),
        (status = 302, description = "Redirect to login view")
    )
)]
pub async fn account_area(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    area_response(
        &req,
        "account",
        "My account",
        &["profile", "credentials", "notifications"],
    )
}

/// Public login view the guard redirects unauthenticated visitors to
#[utoipa::path(
    get,
    path = "/login",
    tag = "Portal",
    responses((status = 200, description = "Login view"))
)]
pub async fn login_view() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "view": "login",
        "message": "Sign in with your dealer code or email"
    }))
}

/// Public view for authenticated but role-mismatched visitors
#[utoipa::path(
    get,
    path = "/unauthorized",
    tag = "Portal",
    responses((status = 200, description = "Unauthorized view"))
)]
pub async fn unauthorized_view() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "view": "unauthorized",
        "message": ERR_ROLE_NOT_ALLOWED
    }))
}
