//! Role-based route guard for protected portal areas.
//!
//! Wraps a scope with a static allow-list fixed at router-construction time.
//! The decision itself is synchronous and network-free: the guard only reads
//! the already-resolved session state. Unauthenticated requests are redirected
//! to the login view, role-mismatched ones to the unauthorized view, and
//! operator sessions (admin/superuser) render everything.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::warn;
use std::rc::Rc;

use crate::config::CONFIG;
use crate::models::role::Role;
use crate::services::session_store::{GuardVerdict, SessionStore};

/// Guard middleware carrying the route's allowed roles.
pub struct RouteGuard {
    allowed: Rc<Vec<Role>>,
}

impl RouteGuard {
    /// Guard a route with an explicit allow-list.
    pub fn allow(allowed: &[Role]) -> Self {
        Self {
            allowed: Rc::new(allowed.to_vec()),
        }
    }

    /// Guard a route that any authenticated role may enter.
    pub fn authenticated_only() -> Self {
        Self::allow(&[])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RouteGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RouteGuardService {
            service: Rc::new(service),
            allowed: Rc::clone(&self.allowed),
        })
    }
}

pub struct RouteGuardService<S> {
    service: Rc<S>,
    allowed: Rc<Vec<Role>>,
}

impl<S, B> Service<ServiceRequest> for RouteGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let allowed = Rc::clone(&self.allowed);

        Box::pin(async move {
            // Missing store means the app was wired wrong; fail closed.
            let verdict = match req.app_data::<web::Data<SessionStore>>() {
                Some(store) => {
                    let verdict = store.authorize(&allowed);
                    if verdict == GuardVerdict::Render {
                        if let Some(session) = store.current() {
                            req.extensions_mut().insert(session);
                        }
                    }
                    verdict
                }
                None => {
                    warn!("Session store missing from app data, redirecting to login");
                    GuardVerdict::RedirectLogin
                }
            };

            match verdict {
                GuardVerdict::Render => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                GuardVerdict::RedirectLogin => Ok(redirect(req, &CONFIG.login_path)),
                GuardVerdict::RedirectUnauthorized => {
                    Ok(redirect(req, &CONFIG.unauthorized_path))
                }
            }
        })
    }
}

fn redirect<B>(req: ServiceRequest, location: &str) -> ServiceResponse<EitherBody<B>> {
    let (request, _) = req.into_parts();
    let response = HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
        .map_into_right_body();
    ServiceResponse::new(request, response)
}
