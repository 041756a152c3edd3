//! In-process table backend.
//!
//! All rows live in a HashMap guarded by a single `parking_lot` RwLock.
//! `merge` performs its read-modify-write under one write-lock acquisition,
//! which is what makes increment/decrement safe under concurrent callers.

use crate::config::StoreConfig;
use crate::entry::{Entry, EntryKey, Value};
use crate::error::StoreError;
use crate::query::{Record, SelectQuery};
use crate::table::PersistentTable;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy)]
struct Row {
    value: Value,
    changed: i64,
}

/// HashMap-backed implementation of [`PersistentTable`].
///
/// Suitable for tests and for embedding where no external database is
/// wanted. The composite-key uniqueness constraint falls out of the map
/// keying.
pub struct MemoryTable {
    table: String,
    rows: RwLock<HashMap<EntryKey, Row>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        debug!(table = %config.table, "opening in-memory counter table");
        MemoryTable {
            table: config.table,
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Name of the table this backend stands in for.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl Default for MemoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistentTable for MemoryTable {
    fn select(&self, query: &SelectQuery) -> Result<Vec<Record>, StoreError> {
        let rows = self.rows.read();
        let records: Vec<Record> = rows
            .iter()
            .filter(|(key, _)| query.matches(key))
            .map(|(key, row)| {
                let entry = Entry {
                    key: key.clone(),
                    value: row.value,
                    changed: row.changed,
                };
                Record::project(entry, query.projection)
            })
            .collect();
        trace!(table = %self.table, rows = records.len(), "select");
        Ok(records)
    }

    fn insert(&self, entry: Entry) -> Result<(), StoreError> {
        let mut rows = self.rows.write();
        if rows.contains_key(&entry.key) {
            return Err(StoreError::DuplicateKey(entry.key));
        }
        trace!(table = %self.table, key = %entry.key, "insert");
        rows.insert(
            entry.key,
            Row {
                value: entry.value,
                changed: entry.changed,
            },
        );
        Ok(())
    }

    fn update(&self, key: &EntryKey, value: Value, changed: i64) -> Result<u64, StoreError> {
        let mut rows = self.rows.write();
        match rows.get_mut(key) {
            Some(row) => {
                row.value = value;
                row.changed = changed;
                trace!(table = %self.table, key = %key, "update");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete(&self, key: &EntryKey) -> Result<u64, StoreError> {
        let mut rows = self.rows.write();
        match rows.remove(key) {
            Some(_) => {
                trace!(table = %self.table, key = %key, "delete");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn merge(
        &self,
        key: &EntryKey,
        on_insert: Value,
        delta: i64,
        changed: i64,
    ) -> Result<bool, StoreError> {
        // One write-lock acquisition covers the whole read-modify-write.
        let mut rows = self.rows.write();
        match rows.get_mut(key) {
            Some(row) => {
                row.value = row.value.apply_delta(delta);
                row.changed = changed;
            }
            None => {
                rows.insert(
                    key.clone(),
                    Row {
                        value: on_insert,
                        changed,
                    },
                );
            }
        }
        trace!(table = %self.table, key = %key, delta, "merge");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Scope;
    use crate::query::Projection;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();
    }

    fn entry(name: &str, value: i64, changed: i64) -> Entry {
        Entry {
            key: EntryKey::new(name, Scope::global()),
            value: Value::Int(value),
            changed,
        }
    }

    #[test]
    fn test_insert_enforces_uniqueness() {
        init_tracing();
        let table = MemoryTable::new();
        table.insert(entry("views", 1, 10)).unwrap();

        let err = table.insert(entry("views", 2, 11)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_update_and_delete_counts() {
        let table = MemoryTable::new();
        let key = EntryKey::new("views", Scope::global());

        assert_eq!(table.update(&key, Value::Int(5), 10).unwrap(), 0);
        assert_eq!(table.delete(&key).unwrap(), 0);

        table.insert(entry("views", 1, 10)).unwrap();
        assert_eq!(table.update(&key, Value::Int(5), 20).unwrap(), 1);
        assert_eq!(table.delete(&key).unwrap(), 1);
        assert!(table.is_empty());
    }

    #[test]
    fn test_merge_inserts_then_applies_delta() {
        let table = MemoryTable::new();
        let key = EntryKey::new("c", Scope::global());

        assert!(table.merge(&key, Value::Int(1), 1, 10).unwrap());
        assert!(table.merge(&key, Value::Int(1), 1, 11).unwrap());

        let records = table
            .select(&SelectQuery::scoped(&Scope::global()).with_name("c"))
            .unwrap();
        assert_eq!(records.len(), 1);
        let entry = records.into_iter().next().unwrap().into_entry().unwrap();
        assert_eq!(entry.value, Value::Int(2));
        assert_eq!(entry.changed, 11);
    }

    #[test]
    fn test_select_projection() {
        let table = MemoryTable::new();
        table.insert(entry("views", 3, 10)).unwrap();

        let query = SelectQuery::scoped(&Scope::global())
            .with_name("views")
            .project(Projection::ValueOnly);
        let records = table.select(&query).unwrap();
        assert_eq!(records, vec![Record::Value(Value::Int(3))]);
    }

    #[test]
    fn test_select_scoping() {
        let table = MemoryTable::new();
        table
            .insert(Entry {
                key: EntryKey::new("views", Scope::entity("node", 1)),
                value: Value::Int(1),
                changed: 10,
            })
            .unwrap();
        table
            .insert(Entry {
                key: EntryKey::new("views", Scope::entity("node", 2)),
                value: Value::Int(2),
                changed: 10,
            })
            .unwrap();

        let records = table
            .select(&SelectQuery::scoped(&Scope::entity("node", 1)))
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_table_name_from_config() {
        let table = MemoryTable::with_config(StoreConfig {
            table: "site_counters".to_string(),
        });
        assert_eq!(table.table(), "site_counters");
    }
}
