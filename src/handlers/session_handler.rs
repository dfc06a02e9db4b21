//! Session handlers: login, logout, and current-session lookup.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::constants::{ERR_AUTH_REQUIRED, MSG_LOGIN_SUCCESS, MSG_LOGOUT_SUCCESS};
use crate::errors::ApiError;
use crate::models::{ApiResponse, LoginRequest, LoginResponse, Role, SessionResponse};
use crate::services::SessionStore;
use crate::validators::validation_errors_to_api_error;

/// Authenticate against the reseller backend and open a portal session
///
/// On success the response carries the normalized role and the role-prefixed
/// landing path, which the portal shell uses to decide where to navigate.
#[utoipa::path(
    post,
    path = "/api/session/login",
    tag = "Session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::models::ErrorResponse),
        (status = 502, description = "Authentication service unavailable", body = crate::models::ErrorResponse)
    )
)]
pub async fn login(
    store: web::Data<SessionStore>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    let outcome = store.login(&body.identifier, &body.secret).await?;

    // The session swap happened inside login, before it returned.
    let session = store
        .current()
        .ok_or_else(|| ApiError::InternalServerError("Session missing after login".to_string()))?;
    let landing_path = Role::from_raw(&session.role).area_path().to_string();

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: MSG_LOGIN_SUCCESS.to_string(),
        token: outcome.token,
        role: session.role,
        landing_path,
        user: outcome.user,
    }))
}

/// Close the current session
///
/// The backend invalidation is best-effort: local state is cleared even when
/// the backend cannot be reached, so this endpoint always succeeds.
#[utoipa::path(
    post,
    path = "/api/session/logout",
    tag = "Session",
    responses(
        (status = 200, description = "Logout successful")
    )
)]
pub async fn logout(store: web::Data<SessionStore>) -> HttpResponse {
    store.logout().await;
    HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_LOGOUT_SUCCESS))
}

/// Current session, if any
#[utoipa::path(
    get,
    path = "/api/session",
    tag = "Session",
    responses(
        (status = 200, description = "Session active", body = SessionResponse),
        (status = 401, description = "Not authenticated", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_session(store: web::Data<SessionStore>) -> Result<HttpResponse, ApiError> {
    if !store.is_authenticated() {
        return Err(ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string()));
    }

    Ok(HttpResponse::Ok().json(SessionResponse {
        authenticated: true,
        session: store.current(),
    }))
}
