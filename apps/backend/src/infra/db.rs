use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::db::db_url;
use crate::error::AppError;

/// Connect to the configured database. Does not run migrations.
pub async fn connect_db() -> Result<DatabaseConnection, AppError> {
    let database_url = db_url()?;
    connect_to(&database_url).await
}

/// Connect to an explicit URL. Statement logging stays off; query noise
/// goes through the `sea_orm` tracing target filter instead.
pub async fn connect_to(database_url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let conn = Database::connect(options).await?;
    Ok(conn)
}
