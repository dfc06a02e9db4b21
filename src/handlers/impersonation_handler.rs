//! HTTP surface of the impersonation handshake.
//!
//! The admin console and the portal frame drive the handshake through these
//! endpoints: offer, deliver the impersonated login, apply it.

use actix_web::{web, HttpResponse};
use std::sync::Mutex;
use validator::Validate;

use crate::constants::{
    MSG_IMPERSONATION_APPLIED, MSG_IMPERSONATION_OFFERED, MSG_IMPERSONATION_RECEIVED,
};
use crate::errors::ApiError;
use crate::models::{ApiResponse, ImpersonationLoginRequest};
use crate::services::{ImpersonationHandshake, ImpersonationMessage, SessionStore};
use crate::validators::validation_errors_to_api_error;

type SharedHandshake = web::Data<Mutex<ImpersonationHandshake>>;

fn lock(handshake: &SharedHandshake) -> Result<std::sync::MutexGuard<'_, ImpersonationHandshake>, ApiError> {
    handshake
        .lock()
        .map_err(|_| ApiError::InternalServerError("Impersonation state poisoned".to_string()))
}

/// Start the handshake and emit the acknowledgement
#[utoipa::path(
    post,
    path = "/api/impersonation/offer",
    tag = "Impersonation",
    responses(
        (status = 200, description = "Handshake offered", body = ImpersonationMessage),
        (status = 400, description = "Handshake already completed", body = crate::models::ErrorResponse)
    )
)]
pub async fn impersonation_offer(handshake: SharedHandshake) -> Result<HttpResponse, ApiError> {
    let ack = lock(&handshake)?.offer()?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_IMPERSONATION_OFFERED, ack)))
}

/// Deliver the impersonated account's token
#[utoipa::path(
    post,
    path = "/api/impersonation/login",
    tag = "Impersonation",
    request_body = ImpersonationLoginRequest,
    responses(
        (status = 200, description = "Login received"),
        (status = 400, description = "Handshake not offered or invalid payload", body = crate::models::ErrorResponse)
    )
)]
pub async fn impersonation_login(
    handshake: SharedHandshake,
    body: web::Json<ImpersonationLoginRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(validation_errors_to_api_error)?;

    lock(&handshake)?.receive(ImpersonationMessage::Login {
        token: body.into_inner().token,
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_IMPERSONATION_RECEIVED)))
}

/// Apply the received login, replacing the portal session
#[utoipa::path(
    post,
    path = "/api/impersonation/apply",
    tag = "Impersonation",
    responses(
        (status = 200, description = "Impersonated session applied", body = ImpersonationMessage),
        (status = 400, description = "No login received or token malformed", body = crate::models::ErrorResponse)
    )
)]
pub async fn impersonation_apply(
    handshake: SharedHandshake,
    store: web::Data<SessionStore>,
) -> Result<HttpResponse, ApiError> {
    let (_, confirmation) = lock(&handshake)?.apply(&store)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_IMPERSONATION_APPLIED, confirmation)))
}
