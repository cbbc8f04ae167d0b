//! Security core: token issuance/verification, principals, the ordered
//! route-role policy and the per-task ownership guard.

pub mod access;
pub mod claims;
pub mod jwt;
pub mod policy;
pub mod principal;
