pub mod comments;
pub mod tasks;
pub mod users;
