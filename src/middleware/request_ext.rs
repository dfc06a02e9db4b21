//! Request extension trait for reading the guarded session.

use actix_web::HttpMessage;

use crate::models::session::Session;

/// Extension trait for the session the route guard attached to the request.
pub trait RequestExt {
    /// Get the session from the request extensions.
    ///
    /// Returns `Some(Session)` behind a guarded route, `None` otherwise.
    fn get_session(&self) -> Option<Session>;
}

impl RequestExt for actix_web::HttpRequest {
    fn get_session(&self) -> Option<Session> {
        self.extensions().get::<Session>().cloned()
    }
}
