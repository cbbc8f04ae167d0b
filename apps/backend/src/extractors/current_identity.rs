//! Handler-side access to the identity resolved by the auth pipeline.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::principal::{Identity, Principal};
use crate::error::AppError;

/// The authenticated identity of the current request, taken from the
/// principal the authentication stage stored in request extensions.
///
/// Handlers using this extractor sit behind the route guard, so an
/// anonymous principal here means a wiring mistake; it still maps to a
/// clean 401 rather than a panic.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl CurrentIdentity {
    pub fn into_inner(self) -> Identity {
        self.0
    }
}

impl FromRequest for CurrentIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .extensions()
            .get::<Principal>()
            .and_then(|principal| principal.identity().cloned());

        ready(identity.map(CurrentIdentity).ok_or_else(AppError::unauthorized))
    }
}
