//! Shared setup for integration tests: an in-memory SQLite database
//! with the full schema applied, plus user and token helpers.
#![allow(dead_code)] // not every test binary uses every helper

use std::time::{Duration, SystemTime};

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

use taskboard::auth::jwt::mint_access_token;
use taskboard::domain::Role;
use taskboard::entities::users;
use taskboard::repos::users as users_repo;
use taskboard::services::users as users_service;
use taskboard::state::app_state::AppState;
use taskboard::state::security_config::SecurityConfig;

pub const TEST_JWT_SECRET: &[u8] = b"integration-test-secret-not-for-production";
pub const TEST_ADMIN_KEY: &str = "integration-test-admin-key";
pub const TEST_PASSWORD: &str = "password123";

#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::test_logging::init();
}

/// Fresh in-memory database with the schema applied. A single pooled
/// connection keeps every statement on the same in-memory instance.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("failed to apply migrations");
    db
}

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET).with_admin_key(TEST_ADMIN_KEY)
}

pub async fn setup_state() -> AppState {
    AppState::new(setup_db().await, test_security())
}

/// Register a user through the real registration path and return the
/// stored row. Admins are promoted after registration.
pub async fn create_user(db: &DatabaseConnection, prefix: &str, role: Role) -> users::Model {
    let email = backend_test_support::unique_helpers::unique_email(prefix);
    users_service::register_user(db, prefix, "Tester", &email, TEST_PASSWORD)
        .await
        .expect("registration should succeed");
    if role == Role::Admin {
        users_service::promote_to_admin(db, &email)
            .await
            .expect("promotion should succeed");
    }
    users_repo::find_by_email(db, &email)
        .await
        .expect("lookup should succeed")
        .expect("registered user should exist")
}

/// A valid bearer token for the given user.
pub fn token_for(state: &AppState, user: &users::Model) -> String {
    mint_access_token(
        user.id,
        &user.email,
        user.role,
        SystemTime::now(),
        &state.security,
    )
    .expect("token minting should succeed")
}

/// A token for an identity that never existed; it verifies fine but the
/// subject resolves to nobody in the database.
pub fn token_for_ghost(state: &AppState, role: Role) -> String {
    mint_access_token(
        Uuid::new_v4(),
        "ghost@example.test",
        role,
        SystemTime::now(),
        &state.security,
    )
    .expect("token minting should succeed")
}

/// A token that expired long before the request.
pub fn expired_token_for(state: &AppState, user: &users::Model) -> String {
    let past = SystemTime::now() - Duration::from_secs(25 * 60 * 60);
    mint_access_token(user.id, &user.email, user.role, past, &state.security)
        .expect("token minting should succeed")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
