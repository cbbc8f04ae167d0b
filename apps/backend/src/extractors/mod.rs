pub mod current_identity;

pub use current_identity::CurrentIdentity;
