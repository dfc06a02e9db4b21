use actix_governor::Governor;
use actix_web::web;

use crate::config::CONFIG;
use crate::handlers;
use crate::middleware::{create_login_rate_limiter_config, RouteGuard};
use crate::models::Role;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let login_limiter = create_login_rate_limiter_config();

    cfg.service(
        web::scope("/api")
            // Health check
            .route("/health", web::get().to(health_check))
            // Session endpoints (public; login is rate-limited)
            .service(
                web::scope("/session")
                    .service(
                        web::resource("/login")
                            .wrap(Governor::new(&login_limiter))
                            .route(web::post().to(handlers::login)),
                    )
                    .route("/logout", web::post().to(handlers::logout))
                    .route("", web::get().to(handlers::get_session)),
            )
            // Impersonation handshake endpoints
            .service(
                web::scope("/impersonation")
                    .route("/offer", web::post().to(handlers::impersonation_offer))
                    .route("/login", web::post().to(handlers::impersonation_login))
                    .route("/apply", web::post().to(handlers::impersonation_apply)),
            ),
    )
    // Guarded portal areas; allow-lists are fixed here at construction time
    .service(
        web::scope("/portal")
            .service(
                web::scope("/dealer")
                    .wrap(RouteGuard::allow(&[Role::Dealer]))
                    .route("", web::get().to(handlers::dealer_area)),
            )
            .service(
                web::scope("/agent")
                    .wrap(RouteGuard::allow(&[Role::Agent]))
                    .route("", web::get().to(handlers::agent_area)),
            )
            .service(
                web::scope("/master")
                    .wrap(RouteGuard::allow(&[Role::Master, Role::MasterProducts]))
                    .route("", web::get().to(handlers::master_area)),
            )
            .service(
                web::scope("/supermaster")
                    .wrap(RouteGuard::allow(&[Role::SuperMaster]))
                    .route("", web::get().to(handlers::super_master_area)),
            )
            .service(
                web::scope("/admin")
                    .wrap(RouteGuard::allow(&[Role::Admin]))
                    .route("", web::get().to(handlers::admin_area)),
            )
            // Any authenticated role may manage its own account
            .service(
                web::scope("/account")
                    .wrap(RouteGuard::authenticated_only())
                    .route("", web::get().to(handlers::account_area)),
            ),
    )
    // Redirect targets (public views)
    .route(&CONFIG.login_path, web::get().to(handlers::login_view))
    .route(
        &CONFIG.unauthorized_path,
        web::get().to(handlers::unauthorized_view),
    )
    // Offline-cached shell assets
    .route("/shell/{asset:.*}", web::get().to(handlers::shell_asset));
}

/// Gateway liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Gateway is running", body = crate::models::HealthResponse))
)]
pub async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "message": "Gateway is running"
    }))
}
