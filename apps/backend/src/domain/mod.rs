//! Domain vocabulary shared across entities, services and the auth core.

pub mod role;
pub mod task;

pub use role::Role;
pub use task::{Priority, Status};
