use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The two principal roles. Stored as strings in the database and
/// carried in tokens as `ROLE_`-prefixed claims.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Claim form carried in tokens, e.g. `ROLE_ADMIN`.
    pub fn as_claim(&self) -> String {
        format!("ROLE_{}", self.name())
    }

    /// Parse the token claim form. Anything unknown is `None` so callers
    /// fail closed instead of defaulting to either role.
    pub fn from_claim(claim: &str) -> Option<Role> {
        match claim {
            "ROLE_USER" => Some(Role::User),
            "ROLE_ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}
