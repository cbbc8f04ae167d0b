use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional so auth-only tests can skip it)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including token settings
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
        }
    }

    pub fn without_db(security: SecurityConfig) -> Self {
        Self { db: None, security }
    }

    /// Pooled connection, or a config error when the state was built
    /// without one.
    pub fn require_db(&self) -> Result<&DatabaseConnection, crate::error::AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| crate::error::AppError::config("database connection not available"))
    }
}
