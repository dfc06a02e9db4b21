//! HTTP client for the reseller backend's authentication endpoints.

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

use crate::constants::{ERR_BACKEND_BAD_TOKEN, ERR_BACKEND_UNREACHABLE, ERR_INVALID_CREDENTIALS};
use crate::errors::ApiError;

/// Accepted spellings for the token field in the login response, newest first.
const TOKEN_FIELDS: [&str; 4] = ["token", "accessToken", "access_token", "jwt"];

/// Successful login as reported by the backend.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    /// Raw user record, forwarded untouched to the portal shell.
    pub user: Option<Value>,
}

/// Backend authentication operations, behind a trait so the session store can
/// be exercised without a live backend.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, identifier: &str, secret: &str) -> Result<LoginOutcome, ApiError>;

    /// Invalidate a token server-side. Callers treat failures as best-effort.
    async fn invalidate(&self, token: &str) -> Result<(), ApiError>;
}

/// Production [`AuthApi`] over the backend REST API.
pub struct BackendAuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendAuthClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AuthApi for BackendAuthClient {
    async fn login(&self, identifier: &str, secret: &str) -> Result<LoginOutcome, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/auth/login"))
            .json(&serde_json::json!({
                "identifier": identifier,
                "secret": secret,
            }))
            .send()
            .await
            .map_err(|err| {
                debug!("Login call failed: {}", err);
                ApiError::BadGateway(ERR_BACKEND_UNREACHABLE.to_string())
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ApiError::Unauthorized(ERR_INVALID_CREDENTIALS.to_string()));
            }
            status if !status.is_success() => {
                return Err(ApiError::BadGateway(format!(
                    "Authentication service responded with {}",
                    status
                )));
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|_| ApiError::BadGateway(ERR_BACKEND_BAD_TOKEN.to_string()))?;

        let token = TOKEN_FIELDS
            .iter()
            .find_map(|field| body.get(*field).and_then(Value::as_str))
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadGateway(ERR_BACKEND_BAD_TOKEN.to_string()))?;

        Ok(LoginOutcome {
            token,
            user: body.get("user").cloned(),
        })
    }

    async fn invalidate(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("/auth/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|_| ApiError::BadGateway(ERR_BACKEND_UNREACHABLE.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::BadGateway(format!(
                "Logout call responded with {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_login_extracts_token_and_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_partial_json(
                serde_json::json!({ "identifier": "dealer-1" }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "a.b.c",
                "user": { "name": "Anna" }
            })))
            .mount(&server)
            .await;

        let client = BackendAuthClient::new(&server.uri(), 5);
        let outcome = client.login("dealer-1", "pw").await.unwrap();
        assert_eq!(outcome.token, "a.b.c");
        assert_eq!(outcome.user.unwrap()["name"], "Anna");
    }

    #[tokio::test]
    async fn test_login_accepts_legacy_token_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "accessToken": "x.y.z" })),
            )
            .mount(&server)
            .await;

        let client = BackendAuthClient::new(&server.uri(), 5);
        let outcome = client.login("d", "pw").await.unwrap();
        assert_eq!(outcome.token, "x.y.z");
        assert!(outcome.user.is_none());
    }

    #[tokio::test]
    async fn test_login_rejected_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = BackendAuthClient::new(&server.uri(), 5);
        let err = client.login("d", "wrong").await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized(ERR_INVALID_CREDENTIALS.to_string()));
    }

    #[tokio::test]
    async fn test_login_missing_token_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = BackendAuthClient::new(&server.uri(), 5);
        let err = client.login("d", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::BadGateway(_)));
    }

    #[tokio::test]
    async fn test_invalidate_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .and(header("Authorization", "Bearer a.b.c"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = BackendAuthClient::new(&server.uri(), 5);
        client.invalidate("a.b.c").await.unwrap();
    }
}
