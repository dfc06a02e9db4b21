use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::sync::{Arc, Mutex};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use portal_gateway::config::CONFIG;
use portal_gateway::openapi::ApiDoc;
use portal_gateway::routes;
use portal_gateway::services::{
    BackendAuthClient, ImpersonationHandshake, SessionStore, ShellCache,
};
use portal_gateway::storage::TokenStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Resolve the persisted session, if any, before accepting requests
    let auth_api = Arc::new(BackendAuthClient::new(
        &CONFIG.backend_api_url,
        CONFIG.backend_timeout_secs,
    ));
    let session_store = SessionStore::new(auth_api, TokenStore::new(&CONFIG.state_dir));
    session_store.init().await;
    if session_store.is_authenticated() {
        info!("Restored persisted session");
    }

    // Warm the offline shell cache
    let shell_cache = ShellCache::new(&CONFIG.shell_origin, CONFIG.backend_timeout_secs);
    shell_cache.precache().await;

    let session_data = web::Data::new(session_store);
    let cache_data = web::Data::new(shell_cache);
    let handshake_data = web::Data::new(Mutex::new(ImpersonationHandshake::new()));

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting portal gateway at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(session_data.clone())
            .app_data(cache_data.clone())
            .app_data(handshake_data.clone())
            .configure(routes::configure_routes)
            .service(
                SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(&server_addr)?
    .run()
    .await
}
