//! Helpers for generating unique test data
//!
//! Unique suffixes keep tests isolated when several of them share one
//! database.

use uuid::Uuid;

/// Generate a unique string in the format `{prefix}-{uuid}`.
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Generate a unique email address in the format
/// `{prefix}-{uuid}@example.test`.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Uuid::new_v4().simple())
}
