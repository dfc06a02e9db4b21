//! Shell asset handler backed by the offline cache.

use actix_web::{web, HttpRequest, HttpResponse};

use crate::constants::ERR_SHELL_UNAVAILABLE;
use crate::models::ErrorResponse;
use crate::services::{ShellCache, ShellFetch};

/// Serve a portal shell asset, network-first with cache fallback
///
/// When neither the network nor the cache can answer, a 503 placeholder is
/// returned so the shell can show its offline screen.
#[utoipa::path(
    get,
    path = "/shell/{asset}",
    tag = "Shell",
    params(("asset" = String, Path, description = "Shell asset path")),
    responses(
        (status = 200, description = "Asset served from network or cache"),
        (status = 503, description = "Asset unavailable", body = ErrorResponse)
    )
)]
pub async fn shell_asset(
    cache: web::Data<ShellCache>,
    req: HttpRequest,
    asset: web::Path<String>,
) -> HttpResponse {
    let path = format!("/{}", asset.into_inner());

    match cache.fetch(req.method().as_str(), &path).await {
        ShellFetch::Fresh(asset) | ShellFetch::Stale(asset) => HttpResponse::Ok()
            .content_type(asset.content_type)
            .body(asset.body),
        ShellFetch::Unavailable => HttpResponse::ServiceUnavailable().json(ErrorResponse {
            success: false,
            message: ERR_SHELL_UNAVAILABLE.to_string(),
            errors: None,
        }),
        // API-prefixed paths never answer from the shell mount.
        ShellFetch::Bypass => HttpResponse::NotFound().finish(),
    }
}
