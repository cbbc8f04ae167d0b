//! Error handling for the Taskboard backend.

pub mod error_code;

pub use error_code::ErrorCode;
