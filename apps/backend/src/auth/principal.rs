//! Request principals produced by the authentication stage.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::domain::Role;

/// A verified identity. Produced only from verified token claims or by
/// the registration/login flow; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub subject_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Identity {
    /// Build an identity from verified claims. `None` when the subject
    /// id or role claim does not parse — callers treat that as
    /// anonymous rather than guessing a role.
    pub fn from_claims(claims: &Claims) -> Option<Identity> {
        let subject_id = Uuid::parse_str(&claims.sub).ok()?;
        let role = claims.role()?;
        Some(Identity {
            subject_id,
            email: claims.email.clone(),
            role,
        })
    }
}

/// What the authentication stage resolved for this request. Anonymous is
/// a normal outcome, not an error; rejection is the policy stage's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    Identified(Identity),
}

impl Principal {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Principal::Anonymous => None,
            Principal::Identified(identity) => Some(identity),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Principal::Anonymous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, role: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "a@x".to_string(),
            role: role.to_string(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn identity_from_valid_claims() {
        let id = Uuid::new_v4();
        let identity = Identity::from_claims(&claims(&id.to_string(), "ROLE_ADMIN")).unwrap();
        assert_eq!(identity.subject_id, id);
        assert_eq!(identity.email, "a@x");
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn unknown_role_yields_no_identity() {
        let id = Uuid::new_v4().to_string();
        assert_eq!(Identity::from_claims(&claims(&id, "ROLE_SUPERUSER")), None);
        assert_eq!(Identity::from_claims(&claims(&id, "")), None);
    }

    #[test]
    fn bad_subject_yields_no_identity() {
        assert_eq!(
            Identity::from_claims(&claims("not-a-uuid", "ROLE_USER")),
            None
        );
    }
}
