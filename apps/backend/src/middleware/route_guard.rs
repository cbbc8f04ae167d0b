//! Authorization stage: enforce the route-role matrix.
//!
//! Reads the principal the authentication stage attached and asks the
//! policy for a verdict on the request path. This is the sole rejection
//! point of the two-stage pipeline: `Unauthenticated` becomes 401 and
//! `Forbidden` becomes 403, both rendered as Problem Details here so
//! rejected requests never reach a handler.

use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::policy::{AuthorizationPolicy, Verdict};
use crate::auth::principal::Principal;
use crate::error::AppError;

pub struct RouteGuard {
    policy: Arc<AuthorizationPolicy>,
}

impl RouteGuard {
    pub fn new(policy: AuthorizationPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardMiddleware {
            service,
            policy: Arc::clone(&self.policy),
        }))
    }
}

pub struct RouteGuardMiddleware<S> {
    service: S,
    policy: Arc<AuthorizationPolicy>,
}

impl<S, B> Service<ServiceRequest> for RouteGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = req
            .extensions()
            .get::<Principal>()
            .cloned()
            .unwrap_or(Principal::Anonymous);

        match self.policy.authorize(&principal, req.path()) {
            Verdict::Allow => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Verdict::Unauthenticated => Box::pin(reject(req, AppError::unauthorized())),
            Verdict::Forbidden => Box::pin(reject(req, AppError::forbidden())),
        }
    }
}

/// Render the rejection in place. Runs inside the trace scope, so the
/// Problem Details body carries the request's trace id.
async fn reject<B>(
    req: ServiceRequest,
    error: AppError,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let (req, _payload) = req.into_parts();
    let res = error.error_response().map_into_right_body();
    Ok(ServiceResponse::new(req, res))
}
