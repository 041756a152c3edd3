//! statstore — a keyed numeric-counter store.
//!
//! Persists named numeric values scoped by an optional entity classification
//! (entity type + entity id) and an optional user id, so application code
//! can attach arbitrary counters to entities or users without a bespoke
//! schema per metric. The storage backend is pluggable behind the
//! [`PersistentTable`] trait; [`MemoryTable`] ships as an in-process
//! implementation.
//!
//! ```
//! use statstore::{CounterStore, MemoryTable, ReadOps, Scope, Value, WriteOps};
//!
//! let store = CounterStore::new(MemoryTable::new());
//! let scope = Scope::entity("node", 1);
//!
//! store.increment("views", &scope).unwrap();
//! store.increment("views", &scope).unwrap();
//! assert_eq!(store.fetch_value("views", &scope).unwrap(), Some(Value::Int(2)));
//! ```

pub mod clock;
pub mod config;
pub mod entry;
pub mod error;
pub mod query;
pub mod store;
pub mod table;

// Re-export main types and traits
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, StoreConfig};
pub use entry::{Entry, EntryKey, Scope, Value};
pub use error::StoreError;
pub use query::{Condition, Projection, Record, SelectQuery};
pub use store::{CounterStore, FetchValuesOptions, ReadOps, UpsertOutcome, WriteOps};
pub use table::{MemoryTable, PersistentTable};
