//! statstore error type.

use crate::entry::EntryKey;
use thiserror::Error;

/// Errors surfaced by store operations.
///
/// "Not found" is never an error: fetch operations signal absence through
/// `Option` or an empty collection. Backend failures propagate unmodified;
/// the store performs no retries.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// An insert collided with an existing entry for the same composite key.
    ///
    /// Callers of `insert_or_update` / `insert_if_not_exists` may see this
    /// under contention as the benign outcome of a lost race.
    #[error("an entry already exists for key {0}")]
    DuplicateKey(EntryKey),

    /// The storage backend failed to execute the statement.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }
}
