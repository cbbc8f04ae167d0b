use std::env;

use crate::error::AppError;

/// Database URL from the runtime environment.
///
/// `DATABASE_URL` is the single source of truth so the same binary runs
/// against Postgres in production and SQLite in local smoke setups.
pub fn db_url() -> Result<String, AppError> {
    must_var("DATABASE_URL")
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::config(format!("{name} must be set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_is_a_config_error() {
        let err = must_var("TASKBOARD_TEST_UNSET_VAR")
            .expect_err("unset variable should be a config error");
        assert!(err.to_string().contains("TASKBOARD_TEST_UNSET_VAR"));
    }
}
