//! Backend test support utilities
//!
//! Shared helpers for backend tests: unified logging initialization,
//! Problem Details assertions and unique test-data generators.

pub mod problem_details;
pub mod test_logging;
pub mod unique_helpers;
