//! End-to-end guard behavior: login, redirects, operator override,
//! impersonation, and logout, exercised through the actix test service.

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App, Error};
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use portal_gateway::errors::ApiError;
use portal_gateway::routes;
use portal_gateway::services::{
    AuthApi, ImpersonationHandshake, LoginOutcome, SessionStore, ShellCache,
};
use portal_gateway::storage::TokenStore;

fn token_for(payload: &str) -> String {
    format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload))
}

fn peer() -> SocketAddr {
    "127.0.0.1:12345".parse().unwrap()
}

/// Backend double: every login yields the configured token, invalidation
/// optionally fails.
struct FakeBackend {
    token: String,
    invalidate_fails: bool,
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn login(&self, _identifier: &str, _secret: &str) -> Result<LoginOutcome, ApiError> {
        Ok(LoginOutcome {
            token: self.token.clone(),
            user: None,
        })
    }

    async fn invalidate(&self, _token: &str) -> Result<(), ApiError> {
        if self.invalidate_fails {
            Err(ApiError::BadGateway("backend down".into()))
        } else {
            Ok(())
        }
    }
}

fn store_for(backend: FakeBackend, dir: &TempDir) -> SessionStore {
    SessionStore::new(
        Arc::new(backend),
        TokenStore::new(dir.path().to_str().unwrap()),
    )
}

async fn spawn(
    store: SessionStore,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(store))
            .app_data(web::Data::new(ShellCache::new("http://127.0.0.1:1", 1)))
            .app_data(web::Data::new(Mutex::new(ImpersonationHandshake::new())))
            .configure(routes::configure_routes),
    )
    .await
}

fn location(res: &ServiceResponse<impl MessageBody>) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn unauthenticated_portal_requests_redirect_to_login() {
    let dir = TempDir::new().unwrap();
    let backend = FakeBackend {
        token: token_for(r#"{"sub":"u-1","role":"dealer"}"#),
        invalidate_fails: false,
    };
    let app = spawn(store_for(backend, &dir)).await;

    for path in ["/portal/dealer", "/portal/agent", "/portal/admin"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND, "path {}", path);
        assert_eq!(location(&res), "/login");
    }
}

#[actix_web::test]
async fn login_normalizes_role_and_opens_agent_area() {
    let dir = TempDir::new().unwrap();
    let backend = FakeBackend {
        token: token_for(r#"{"sub":"u-7","role":"AGENTE"}"#),
        invalidate_fails: false,
    };
    let app = spawn(store_for(backend, &dir)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/session/login")
            .peer_addr(peer())
            .set_json(serde_json::json!({ "identifier": "dealer-1", "secret": "pw" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["role"], "agente");
    assert_eq!(body["landing_path"], "/portal/agent");

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/portal/agent").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["area"], "agent");

    // An agent is not a master.
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/portal/master").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/unauthorized");
}

#[actix_web::test]
async fn dealer_is_redirected_from_master_area() {
    let dir = TempDir::new().unwrap();
    let backend = FakeBackend {
        token: token_for(r#"{"sub":"u-2","role":"dealer"}"#),
        invalidate_fails: false,
    };
    let store = store_for(backend, &dir);
    store
        .adopt_token(&token_for(r#"{"sub":"u-2","role":"dealer"}"#))
        .unwrap();
    let app = spawn(store).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/portal/master").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/unauthorized");

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/portal/dealer").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn superuser_renders_every_area_despite_allow_lists() {
    let dir = TempDir::new().unwrap();
    let backend = FakeBackend {
        token: token_for(r#"{"sub":"op-1","role":"superuser"}"#),
        invalidate_fails: false,
    };
    let store = store_for(backend, &dir);
    store
        .adopt_token(&token_for(r#"{"sub":"op-1","role":"superuser"}"#))
        .unwrap();
    let app = spawn(store).await;

    for path in [
        "/portal/dealer",
        "/portal/agent",
        "/portal/master",
        "/portal/supermaster",
        "/portal/admin",
    ] {
        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "path {}", path);
    }
}

#[actix_web::test]
async fn account_area_admits_any_authenticated_role() {
    let dir = TempDir::new().unwrap();
    let token = token_for(r#"{"sub":"u-4","role":"dealer"}"#);
    let backend = FakeBackend {
        token: token.clone(),
        invalidate_fails: false,
    };
    let store = store_for(backend, &dir);
    let app = spawn(store.clone()).await;

    // Signed out: the account area redirects like any guarded route.
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/portal/account").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/login");

    // Any role gets in once authenticated, even the lowest one.
    store.adopt_token(&token).unwrap();
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/portal/account").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["area"], "account");
}

#[actix_web::test]
async fn logout_clears_session_even_when_backend_fails() {
    let dir = TempDir::new().unwrap();
    let token = token_for(r#"{"sub":"u-3","role":"dealer"}"#);
    let backend = FakeBackend {
        token: token.clone(),
        invalidate_fails: true,
    };
    let store = store_for(backend, &dir);
    store.adopt_token(&token).unwrap();
    let app = spawn(store).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/session/logout")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/session").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/portal/dealer").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/login");
}

#[actix_web::test]
async fn impersonation_handshake_swaps_the_session() {
    let dir = TempDir::new().unwrap();
    let admin_token = token_for(r#"{"sub":"op-1","role":"admin"}"#);
    let backend = FakeBackend {
        token: admin_token.clone(),
        invalidate_fails: false,
    };
    let store = store_for(backend, &dir);
    store.adopt_token(&admin_token).unwrap();
    let app = spawn(store).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/impersonation/offer")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["type"], "ack");

    let dealer_token = token_for(r#"{"sub":"u-9","role":"dealer"}"#);
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/impersonation/login")
            .set_json(serde_json::json!({ "token": dealer_token }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/impersonation/apply")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["data"]["type"], "applied");
    assert_eq!(body["data"]["payload"]["user_id"], "u-9");

    // Now a dealer: dealer area renders, admin area redirects.
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/portal/dealer").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/portal/admin").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/unauthorized");
}

#[actix_web::test]
async fn session_endpoint_reports_current_session() {
    let dir = TempDir::new().unwrap();
    let token = token_for(r#"{"sub":"u-5","role":"master","permissions":["reports.view"]}"#);
    let backend = FakeBackend {
        token: token.clone(),
        invalidate_fails: false,
    };
    let store = store_for(backend, &dir);
    store.adopt_token(&token).unwrap();
    let app = spawn(store).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/session").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["session"]["role"], "master");
    assert_eq!(body["session"]["user_id"], "u-5");
}

#[actix_web::test]
async fn health_check_is_public() {
    let dir = TempDir::new().unwrap();
    let backend = FakeBackend {
        token: token_for(r#"{"sub":"u-1"}"#),
        invalidate_fails: false,
    };
    let app = spawn(store_for(backend, &dir)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}
