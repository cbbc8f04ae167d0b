//! Stateless access-token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-lifetime key from
//! `SecurityConfig`. There is no session store and no revocation list;
//! a token is good until `exp`.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::domain::Role;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Fixed token lifetime: 24 hours.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Why a token failed verification. The boundary collapses all of these
/// to an unauthenticated outcome, but the subtypes stay distinct so
/// logs and tests can tell them apart.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token signature mismatch")]
    SignatureMismatch,
    #[error("token expired")]
    Expired,
}

/// Mint an HS256 access token for the given identity.
pub fn mint_access_token(
    subject_id: Uuid,
    email: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("failed to get current time"))?
        .as_secs() as i64;
    let exp = iat + ACCESS_TOKEN_TTL_SECS;

    let claims = Claims {
        sub: subject_id.to_string(),
        email: email.to_string(),
        role: role.as_claim(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("failed to encode token: {e}")))
}

/// Verify a token and return its claims.
///
/// Claims are only ever taken from the verified payload. Expiry is
/// checked with zero leeway so `exp <= now` fails for any margin.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::SignatureMismatch,
        _ => TokenError::Malformed,
    })
}
