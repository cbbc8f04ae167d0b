//! Wire-format claims carried inside access tokens.

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Payload of an access token. Only ever constructed from a payload
/// whose signature has been verified.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the user's id
    pub sub: String,
    pub email: String,
    /// `ROLE_`-prefixed role name, e.g. `ROLE_ADMIN`
    pub role: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// Decoded role, or `None` for an unknown claim value (fail closed).
    pub fn role(&self) -> Option<Role> {
        Role::from_claim(&self.role)
    }
}
