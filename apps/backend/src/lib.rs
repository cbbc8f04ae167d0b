#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::jwt::{mint_access_token, verify_access_token, TokenError};
pub use auth::policy::AuthorizationPolicy;
pub use auth::principal::{Identity, Principal};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::CurrentIdentity;
pub use infra::db::{connect_db, connect_to};
pub use middleware::{cors_middleware, AuthResolve, RequestTrace, RouteGuard};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::test_logging::init();
}
