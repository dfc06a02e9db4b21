use std::env;

use lazy_static::lazy_static;

use crate::constants::{DEFAULT_LOGIN_PATH, DEFAULT_UNAUTHORIZED_PATH};

lazy_static! {
    pub static ref CONFIG: Config = Config::from_env();
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Base URL of the reseller backend REST API (auth, dashboards, orders).
    pub backend_api_url: String,
    /// Origin serving the portal shell assets.
    pub shell_origin: String,
    /// Directory holding the persisted session token slot.
    pub state_dir: String,
    pub login_path: String,
    pub unauthorized_path: String,
    pub backend_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid number"),
            backend_api_url: env::var("BACKEND_API_URL")
                .unwrap_or_else(|_| "http://localhost:9000/api".to_string()),
            shell_origin: env::var("SHELL_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:9000".to_string()),
            state_dir: env::var("STATE_DIR").unwrap_or_else(|_| "./state".to_string()),
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| DEFAULT_LOGIN_PATH.to_string()),
            unauthorized_path: env::var("UNAUTHORIZED_PATH")
                .unwrap_or_else(|_| DEFAULT_UNAUTHORIZED_PATH.to_string()),
            backend_timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("BACKEND_TIMEOUT_SECS must be a valid number"),
        }
    }
}
