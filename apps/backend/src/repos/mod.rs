//! Persistence collaborators: record lookup, save, delete and
//! predicate-based paginated search, generic over `ConnectionTrait` so
//! they run on a pooled connection or a transaction alike. Per-record
//! atomicity is the store's contract, not implemented here.

pub mod comments;
pub mod tasks;
pub mod users;

use serde::Serialize;

/// One page of a paginated result set.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index requested
    pub page: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
