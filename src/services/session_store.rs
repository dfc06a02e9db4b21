//! Session lifecycle: login, logout, reload-persistence, and access checks.
//!
//! The store is the sole owner of the [`Session`] and the only writer of the
//! persisted token slot. Guards and handlers read already-resolved state
//! synchronously; only `login`, `logout`, and `init` touch the network or the
//! slot.

use log::{info, warn};
use std::sync::{Arc, RwLock};

use crate::constants::{ERR_BACKEND_BAD_TOKEN, ERR_MALFORMED_TOKEN};
use crate::errors::ApiError;
use crate::models::role::{is_operator_key, normalize_role, Role};
use crate::models::session::Session;
use crate::services::auth_client::{AuthApi, LoginOutcome};
use crate::storage::TokenStore;
use crate::utils::mask_identifier;

/// Outcome of a route-guard authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    /// Render the protected content.
    Render,
    /// No token or no resolved user: redirect to the login view.
    RedirectLogin,
    /// Authenticated but the role is not in the allow-list: redirect to the
    /// unauthorized view.
    RedirectUnauthorized,
}

#[derive(Debug, Default)]
struct SessionState {
    session: Option<Session>,
    loading: bool,
    error: Option<String>,
}

/// Application-wide session store.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    tokens: TokenStore,
    api: Arc<dyn AuthApi>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn AuthApi>, tokens: TokenStore) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState {
                session: None,
                loading: true,
                error: None,
            })),
            tokens,
            api,
        }
    }

    /// Resolve a session from the persisted token, without a network call.
    ///
    /// A present but undecodable token forces a logout; the store never stays
    /// in an ambiguous half-authenticated state.
    pub async fn init(&self) {
        self.tokens.load();

        if let Some(token) = self.tokens.get() {
            match Session::from_token(&token) {
                Some(session) => {
                    info!("Restored session for user {}", session.user_id);
                    let mut state = self.state.write().unwrap();
                    state.session = Some(session);
                    state.error = None;
                }
                None => {
                    warn!("Persisted token is malformed, forcing logout");
                    self.logout().await;
                }
            }
        }

        self.state.write().unwrap().loading = false;
    }

    /// Authenticate against the backend and derive a new session.
    ///
    /// On success the session is replaced wholesale before the outcome is
    /// returned, so callers can read the resulting role for navigation. On
    /// failure a human-readable message lands in the error slot and the error
    /// propagates. Overlapping calls are last-writer-wins: the later state
    /// swap replaces the earlier one entirely.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<LoginOutcome, ApiError> {
        let outcome = match self.api.login(identifier, secret).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Login failed for {}: {}", mask_identifier(identifier), err);
                let mut state = self.state.write().unwrap();
                state.session = None;
                state.error = Some(err.to_string());
                state.loading = false;
                return Err(err);
            }
        };

        let session = Session::from_token(&outcome.token).ok_or_else(|| {
            let mut state = self.state.write().unwrap();
            state.session = None;
            state.error = Some(ERR_BACKEND_BAD_TOKEN.to_string());
            state.loading = false;
            ApiError::BadGateway(ERR_BACKEND_BAD_TOKEN.to_string())
        })?;

        info!(
            "Login succeeded for {} with role {}",
            mask_identifier(identifier),
            session.role
        );

        self.tokens.set(&outcome.token);
        let mut state = self.state.write().unwrap();
        state.session = Some(session);
        state.error = None;
        state.loading = false;

        Ok(outcome)
    }

    /// Invalidate the token best-effort and clear local state unconditionally.
    ///
    /// A failed backend call is logged and swallowed: local consistency wins
    /// over confirmed server-side revocation.
    pub async fn logout(&self) {
        if let Some(token) = self.tokens.get() {
            if let Err(err) = self.api.invalidate(&token).await {
                warn!("Backend token invalidation failed: {}", err);
            }
        }

        self.tokens.clear();
        let mut state = self.state.write().unwrap();
        state.session = None;
        state.error = None;
    }

    /// Replace the session from an externally supplied token (impersonation).
    pub fn adopt_token(&self, token: &str) -> Result<Session, ApiError> {
        let session = Session::from_token(token)
            .ok_or_else(|| ApiError::BadRequest(ERR_MALFORMED_TOKEN.to_string()))?;

        self.tokens.set(token);
        let mut state = self.state.write().unwrap();
        state.session = Some(session.clone());
        state.error = None;
        Ok(session)
    }

    /// Authenticated means both a token and a resolved user are present.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.get().is_some() && self.state.read().unwrap().session.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().loading
    }

    pub fn current(&self) -> Option<Session> {
        self.state.read().unwrap().session.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().unwrap().error.clone()
    }

    /// Pure lookup; false when no session exists.
    pub fn check_permission(&self, permission: &str) -> bool {
        self.state
            .read()
            .unwrap()
            .session
            .as_ref()
            .map(|s| s.permissions.contains(permission))
            .unwrap_or(false)
    }

    /// Pure role comparison through the normalizer; false when no session.
    /// Operator roles pass any requirement.
    pub fn check_role_access(&self, required: Role) -> bool {
        let state = self.state.read().unwrap();
        let Some(session) = state.session.as_ref() else {
            return false;
        };

        let role = Role::from_raw(&session.role);
        role.is_operator() || role == required
    }

    /// Guard decision for a route with the given allow-list.
    ///
    /// Synchronous and network-free: only already-resolved state is read.
    /// Fails closed: any ambiguity redirects rather than renders.
    pub fn authorize(&self, allowed: &[Role]) -> GuardVerdict {
        if self.tokens.get().is_none() {
            return GuardVerdict::RedirectLogin;
        }

        let state = self.state.read().unwrap();
        let Some(session) = state.session.as_ref() else {
            return GuardVerdict::RedirectLogin;
        };

        // Universal operator override: admin and superuser sessions render
        // every guarded area regardless of the declared allow-list. Carried
        // over intact from the portal, where it is applied on every route.
        if is_operator_key(&normalize_role(&session.role)) {
            return GuardVerdict::Render;
        }

        if !allowed.is_empty() && !allowed.contains(&Role::from_raw(&session.role)) {
            return GuardVerdict::RedirectUnauthorized;
        }

        GuardVerdict::Render
    }
}
