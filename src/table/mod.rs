//! Storage backends for the counter table.
//!
//! The store talks to persistence exclusively through [`PersistentTable`].
//! A backend represents a single table with columns (entity_type, entity_id,
//! user_id, name, value, changed) and a composite uniqueness constraint on
//! (entity_type, entity_id, user_id, name).

pub mod memory;

use crate::entry::{Entry, EntryKey, Value};
use crate::error::StoreError;
use crate::query::{Record, SelectQuery};

pub use memory::MemoryTable;

/// Contract a storage backend must honor.
///
/// Concurrency control is the backend's responsibility; the store issues
/// one statement per call and adds no locking of its own.
pub trait PersistentTable: Send + Sync {
    /// Execute a select, returning rows shaped by the query's projection.
    ///
    /// Row order is the backend's natural order; callers must not rely on it.
    fn select(&self, query: &SelectQuery) -> Result<Vec<Record>, StoreError>;

    /// Insert a new row.
    ///
    /// Fails with [`StoreError::DuplicateKey`] when a row with the same
    /// composite key already exists.
    fn insert(&self, entry: Entry) -> Result<(), StoreError>;

    /// Set `value` and `changed` on the row matching the key.
    ///
    /// Returns the number of rows affected: 1, or 0 when no row matched.
    fn update(&self, key: &EntryKey, value: Value, changed: i64) -> Result<u64, StoreError>;

    /// Delete the row matching the key.
    ///
    /// Returns the number of rows affected: 1, or 0 when no row matched.
    fn delete(&self, key: &EntryKey) -> Result<u64, StoreError>;

    /// Atomic upsert with an arithmetic expression.
    ///
    /// When no row matches the key, inserts (key, `on_insert`, `changed`).
    /// When a row exists, applies `value := value + delta` and sets
    /// `changed`. The whole operation must be a single atomic statement so
    /// concurrent callers never lose updates.
    fn merge(
        &self,
        key: &EntryKey,
        on_insert: Value,
        delta: i64,
        changed: i64,
    ) -> Result<bool, StoreError>;
}
