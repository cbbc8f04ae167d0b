//! Error codes for the Taskboard backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Taskboard backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Email/password pair did not match
    InvalidCredentials,
    /// Access denied
    Forbidden,
    /// Requester is neither the task's executor nor an admin
    AccessClosed,
    /// X-Admin-Key header missing or wrong
    InvalidAdminKey,

    // Request Validation
    /// General validation error
    ValidationError,
    /// Unknown task status literal
    InvalidStatus,
    /// Unknown task priority literal
    InvalidPriority,
    /// Comment body is blank
    EmptyComment,
    /// Password shorter than the minimum length
    ShortPassword,
    /// Invalid email address
    InvalidEmail,
    /// Page size must be positive
    InvalidPageSize,

    // Resource Not Found
    /// Task not found
    TaskNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Email already registered
    UniqueEmail,

    // System Errors
    /// Database error
    DbError,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical SCREAMING_SNAKE_CASE string for HTTP responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::AccessClosed => "ACCESS_CLOSED",
            ErrorCode::InvalidAdminKey => "INVALID_ADMIN_KEY",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidStatus => "INVALID_STATUS",
            ErrorCode::InvalidPriority => "INVALID_PRIORITY",
            ErrorCode::EmptyComment => "EMPTY_COMMENT",
            ErrorCode::ShortPassword => "SHORT_PASSWORD",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidPageSize => "INVALID_PAGE_SIZE",
            ErrorCode::TaskNotFound => "TASK_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::UniqueEmail => "UNIQUE_EMAIL",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_screaming_snake_case() {
        let samples = [
            ErrorCode::Unauthorized,
            ErrorCode::AccessClosed,
            ErrorCode::InvalidStatus,
            ErrorCode::UniqueEmail,
        ];
        for code in samples {
            let s = code.as_str();
            assert!(!s.is_empty());
            assert!(s
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_' || c.is_ascii_digit()));
        }
    }
}
