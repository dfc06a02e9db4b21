use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    ErrorResponse, HealthResponse, ImpersonationLoginRequest, LoginRequest, LoginResponse,
    PortalAreaResponse, Role, Session, SessionResponse,
};
use crate::services::{HandshakeState, ImpersonationMessage};

/// OpenAPI documentation for the Portal Gateway
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reseller Portal Gateway",
        version = "0.1.0",
        description = "Session and role-authorization gateway for the reseller portal: login, role-guarded portal areas, impersonation handshake, and the offline shell cache.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Session", description = "Login, logout, and session lookup"),
        (name = "Impersonation", description = "Admin impersonation handshake"),
        (name = "Portal", description = "Role-guarded portal areas and public views"),
        (name = "Shell", description = "Offline-cached shell assets")
    ),
    paths(
        crate::handlers::login,
        crate::handlers::logout,
        crate::handlers::get_session,
        crate::handlers::impersonation_offer,
        crate::handlers::impersonation_login,
        crate::handlers::impersonation_apply,
        crate::handlers::dealer_area,
        crate::handlers::agent_area,
        crate::handlers::master_area,
        crate::handlers::super_master_area,
        crate::handlers::admin_area,
        crate::handlers::account_area,
        crate::handlers::login_view,
        crate::handlers::unauthorized_view,
        crate::handlers::shell_asset,
        crate::routes::health_check
    ),
    components(
        schemas(
            LoginRequest,
            ImpersonationLoginRequest,
            LoginResponse,
            SessionResponse,
            PortalAreaResponse,
            Session,
            Role,
            ImpersonationMessage,
            HandshakeState,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security configuration for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Bearer token issued by the backend at /api/session/login",
                        ))
                        .build(),
                ),
            );
        }
    }
}
