//! User registration, login and role management.

use std::time::SystemTime;

use sea_orm::{ConnectionTrait, Set};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::jwt::mint_access_token;
use crate::domain::Role;
use crate::entities::users;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users as users_repo;
use crate::state::security_config::SecurityConfig;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Public view of a user; never exposes the password hash.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl From<&users::Model> for UserResponse {
    fn from(user: &users::Model) -> Self {
        Self {
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Register a new USER account. Duplicate emails conflict; passwords
/// shorter than [`MIN_PASSWORD_LEN`] are rejected before hashing.
pub async fn register_user<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<UserResponse, AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation(
            ErrorCode::InvalidEmail,
            "Email cannot be empty.",
        ));
    }
    if users_repo::exists_by_email(conn, email).await? {
        return Err(AppError::conflict(
            ErrorCode::UniqueEmail,
            "The user with this email already exists.",
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(
            ErrorCode::ShortPassword,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
        ));
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("failed to hash password: {e}")))?;

    let now = time::OffsetDateTime::now_utc();
    let user = users_repo::insert(
        conn,
        users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            last_name: Set(last_name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            role: Set(Role::User),
            created_at: Set(now),
            updated_at: Set(now),
        },
    )
    .await?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "registered new user");
    Ok(UserResponse::from(&user))
}

/// Verify credentials and issue an access token.
pub async fn login_user<C: ConnectionTrait>(
    conn: &C,
    security: &SecurityConfig,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = users_repo::find_by_email(conn, email)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found."))?;

    let matches = bcrypt::verify(password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("failed to verify password: {e}")))?;
    if !matches {
        info!(email = %Redacted(email), "login rejected: password mismatch");
        return Err(AppError::unauthorized_with(
            ErrorCode::InvalidCredentials,
            "Invalid email or password.",
        ));
    }

    mint_access_token(user.id, &user.email, user.role, SystemTime::now(), security)
}

/// Promote an existing user to ADMIN. Idempotent for users that are
/// already admins.
pub async fn promote_to_admin<C: ConnectionTrait>(conn: &C, email: &str) -> Result<(), AppError> {
    let user = users_repo::find_by_email(conn, email)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                ErrorCode::UserNotFound,
                "The user with this email does not exist.",
            )
        })?;

    let mut active: users::ActiveModel = user.into();
    active.role = Set(Role::Admin);
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    let user = users_repo::update(conn, active).await?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "promoted user to admin");
    Ok(())
}

/// Look a user up by email, 404 when absent.
pub async fn find_by_email_required<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<users::Model, AppError> {
    users_repo::find_by_email(conn, email)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found."))
}

pub async fn list_users<C: ConnectionTrait>(conn: &C) -> Result<Vec<UserResponse>, AppError> {
    let users = users_repo::find_all(conn).await?;
    Ok(users.iter().map(UserResponse::from).collect())
}
