//! Impersonation handshake between the admin console and the portal frame.
//!
//! The browser portal drove this with ad hoc `postMessage` flags; here it is
//! an explicit typed channel with an acknowledged state machine:
//!
//! ```text
//! Idle -> AckSent -> LoginReceived -> Applied
//! ```
//!
//! Every transition is validated; a malformed impersonation token resets the
//! handshake to `Idle` instead of leaving it half-applied.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{
    ERR_HANDSHAKE_ALREADY_DONE, ERR_HANDSHAKE_NOT_OFFERED, ERR_HANDSHAKE_NO_LOGIN,
};
use crate::errors::ApiError;
use crate::models::session::Session;
use crate::services::session_store::SessionStore;

/// Messages exchanged over the impersonation channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ImpersonationMessage {
    /// Portal acknowledges it is ready to receive an impersonated login.
    Ack,
    /// Admin console delivers the impersonated account's token.
    Login { token: String },
    /// Portal confirms the impersonated session is active.
    Applied { user_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HandshakeState {
    Idle,
    AckSent,
    LoginReceived,
    Applied,
}

/// One impersonation handshake, driven by the HTTP surface.
#[derive(Debug)]
pub struct ImpersonationHandshake {
    state: HandshakeState,
    pending_token: Option<String>,
}

impl ImpersonationHandshake {
    pub fn new() -> Self {
        Self {
            state: HandshakeState::Idle,
            pending_token: None,
        }
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// `Idle -> AckSent`; emits the ack the admin console waits for.
    pub fn offer(&mut self) -> Result<ImpersonationMessage, ApiError> {
        match self.state {
            HandshakeState::Idle => {
                self.state = HandshakeState::AckSent;
                Ok(ImpersonationMessage::Ack)
            }
            HandshakeState::Applied => {
                Err(ApiError::BadRequest(ERR_HANDSHAKE_ALREADY_DONE.to_string()))
            }
            _ => {
                // Re-offering mid-handshake restarts it.
                self.pending_token = None;
                self.state = HandshakeState::AckSent;
                Ok(ImpersonationMessage::Ack)
            }
        }
    }

    /// `AckSent -> LoginReceived` on a `Login` message; anything else is an
    /// invalid transition.
    pub fn receive(&mut self, message: ImpersonationMessage) -> Result<(), ApiError> {
        if self.state != HandshakeState::AckSent {
            return Err(ApiError::BadRequest(ERR_HANDSHAKE_NOT_OFFERED.to_string()));
        }

        match message {
            ImpersonationMessage::Login { token } => {
                self.pending_token = Some(token);
                self.state = HandshakeState::LoginReceived;
                Ok(())
            }
            other => {
                warn!("Unexpected impersonation message: {:?}", other);
                Err(ApiError::BadRequest(ERR_HANDSHAKE_NOT_OFFERED.to_string()))
            }
        }
    }

    /// `LoginReceived -> Applied`: swap the portal session to the
    /// impersonated account and emit the confirmation message.
    ///
    /// A malformed token resets the handshake to `Idle` (fail closed).
    pub fn apply(
        &mut self,
        store: &SessionStore,
    ) -> Result<(Session, ImpersonationMessage), ApiError> {
        if self.state != HandshakeState::LoginReceived {
            return Err(ApiError::BadRequest(ERR_HANDSHAKE_NO_LOGIN.to_string()));
        }

        let token = self
            .pending_token
            .take()
            .ok_or_else(|| ApiError::BadRequest(ERR_HANDSHAKE_NO_LOGIN.to_string()))?;

        match store.adopt_token(&token) {
            Ok(session) => {
                info!("Impersonation applied for user {}", session.user_id);
                self.state = HandshakeState::Applied;
                let confirmation = ImpersonationMessage::Applied {
                    user_id: session.user_id.clone(),
                };
                Ok((session, confirmation))
            }
            Err(err) => {
                warn!("Impersonation token rejected: {}", err);
                self.reset();
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = HandshakeState::Idle;
        self.pending_token = None;
    }
}

impl Default for ImpersonationHandshake {
    fn default() -> Self {
        Self::new()
    }
}
