//! Write operations.
//!
//! `increment`/`decrement` go through the backend's atomic merge and are
//! safe under arbitrary concurrent callers. `insert_or_update` and
//! `insert_if_not_exists` are read-then-write and are NOT atomic; see the
//! method docs for the race they carry.

use crate::clock::Clock;
use crate::entry::{Entry, EntryKey, Scope, Value};
use crate::error::StoreError;
use crate::store::read::ReadOps;
use crate::store::CounterStore;
use crate::table::PersistentTable;

/// Which branch [`WriteOps::insert_or_update`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entry existed; a new one was created.
    Inserted,
    /// An entry existed; carries the affected-row count of the update.
    Updated(u64),
}

/// Write operations trait.
pub trait WriteOps {
    /// Unconditionally create a new entry.
    ///
    /// Fails with [`StoreError::DuplicateKey`] when an entry with the same
    /// composite key already exists.
    fn insert(&self, name: &str, value: Value, scope: &Scope) -> Result<(), StoreError>;

    /// Set the value of the existing entry matching name and scope.
    ///
    /// Returns the affected-row count: 0 when no entry matched, which is
    /// not an error.
    fn update(&self, name: &str, value: Value, scope: &Scope) -> Result<u64, StoreError>;

    /// Insert the entry if absent, update its value otherwise.
    ///
    /// The existence check and the write are separate statements, so two
    /// concurrent callers can both observe absence and both attempt the
    /// insert; the loser gets [`StoreError::DuplicateKey`]. Callers should
    /// treat that failure as a lost race, not corruption, or use
    /// [`WriteOps::increment`] when the value is a plain counter.
    fn insert_or_update(
        &self,
        name: &str,
        value: Value,
        scope: &Scope,
    ) -> Result<UpsertOutcome, StoreError>;

    /// Insert the entry only when absent; no-op otherwise.
    ///
    /// Carries the same non-atomicity caveat as
    /// [`WriteOps::insert_or_update`].
    fn insert_if_not_exists(
        &self,
        name: &str,
        value: Value,
        scope: &Scope,
    ) -> Result<(), StoreError>;

    /// Delete the entry matching name and scope.
    ///
    /// Returns the affected-row count: 0 when no entry matched, which is
    /// not an error.
    fn delete(&self, name: &str, scope: &Scope) -> Result<u64, StoreError>;

    /// Atomically add 1 to the entry's value, creating it with value 1 when
    /// absent.
    fn increment(&self, name: &str, scope: &Scope) -> Result<bool, StoreError>;

    /// Atomically subtract 1 from the entry's value, creating it with value
    /// 0 when absent.
    fn decrement(&self, name: &str, scope: &Scope) -> Result<bool, StoreError>;
}

impl<T: PersistentTable, C: Clock> WriteOps for CounterStore<T, C> {
    fn insert(&self, name: &str, value: Value, scope: &Scope) -> Result<(), StoreError> {
        self.table().insert(Entry {
            key: EntryKey::new(name, scope.clone()),
            value,
            changed: self.now(),
        })
    }

    fn update(&self, name: &str, value: Value, scope: &Scope) -> Result<u64, StoreError> {
        let key = EntryKey::new(name, scope.clone());
        self.table().update(&key, value, self.now())
    }

    fn insert_or_update(
        &self,
        name: &str,
        value: Value,
        scope: &Scope,
    ) -> Result<UpsertOutcome, StoreError> {
        match self.fetch_value(name, scope)? {
            None => {
                self.insert(name, value, scope)?;
                Ok(UpsertOutcome::Inserted)
            }
            Some(_) => {
                let affected = self.update(name, value, scope)?;
                Ok(UpsertOutcome::Updated(affected))
            }
        }
    }

    fn insert_if_not_exists(
        &self,
        name: &str,
        value: Value,
        scope: &Scope,
    ) -> Result<(), StoreError> {
        if self.fetch_value(name, scope)?.is_none() {
            self.insert(name, value, scope)?;
        }
        Ok(())
    }

    fn delete(&self, name: &str, scope: &Scope) -> Result<u64, StoreError> {
        let key = EntryKey::new(name, scope.clone());
        self.table().delete(&key)
    }

    fn increment(&self, name: &str, scope: &Scope) -> Result<bool, StoreError> {
        let key = EntryKey::new(name, scope.clone());
        self.table().merge(&key, Value::Int(1), 1, self.now())
    }

    fn decrement(&self, name: &str, scope: &Scope) -> Result<bool, StoreError> {
        let key = EntryKey::new(name, scope.clone());
        self.table().merge(&key, Value::Int(0), -1, self.now())
    }
}
