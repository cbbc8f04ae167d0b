//! Authentication stage: resolve the request to a principal.
//!
//! This middleware never rejects a request. A missing header, a
//! malformed scheme or a failed verification all resolve to
//! `Principal::Anonymous`; the route guard downstream is the only
//! rejection point. That keeps public routes reachable even with a
//! garbage token while protected routes still get denied.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::jwt::verify_access_token;
use crate::auth::principal::{Identity, Principal};
use crate::state::app_state::AppState;

pub struct AuthResolve;

impl<S, B> Transform<S, ServiceRequest> for AuthResolve
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthResolveMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthResolveMiddleware { service }))
    }
}

pub struct AuthResolveMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthResolveMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = resolve_principal(&req);
        req.extensions_mut().insert(principal);

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

fn resolve_principal(req: &ServiceRequest) -> Principal {
    let token = match bearer_token(req) {
        Some(token) => token,
        None => return Principal::Anonymous,
    };

    let app_state = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state,
        None => {
            debug!("AppState not available; resolving request as anonymous");
            return Principal::Anonymous;
        }
    };

    match verify_access_token(&token, &app_state.security) {
        Ok(claims) => match Identity::from_claims(&claims) {
            Some(identity) => Principal::Identified(identity),
            None => {
                debug!("token verified but claims did not form an identity");
                Principal::Anonymous
            }
        },
        Err(e) => {
            // Soft failure by design; the subtype is still logged so
            // expired vs tampered tokens can be told apart.
            debug!(reason = %e, "token verification failed");
            Principal::Anonymous
        }
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header_value = req.headers().get(header::AUTHORIZATION)?;
    let auth_str = header_value.to_str().ok()?;
    let rest = auth_str.strip_prefix("Bearer ")?;
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}
