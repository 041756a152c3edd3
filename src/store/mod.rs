//! The counter store.
//!
//! [`CounterStore`] is a stateless façade over a [`PersistentTable`]: every
//! operation translates into one backend statement (two for the documented
//! non-atomic upserts) and shapes the result. Operations are split into
//! trait groups the way callers consume them: [`ReadOps`] and [`WriteOps`].

pub mod read;
pub mod write;

pub use read::{FetchValuesOptions, ReadOps};
pub use write::{UpsertOutcome, WriteOps};

use crate::clock::{Clock, SystemClock};
use crate::table::PersistentTable;

/// Keyed numeric-counter store over a pluggable table backend.
///
/// Holds no mutable state of its own; safe for concurrent use from multiple
/// threads, subject to the backend's own concurrency control.
pub struct CounterStore<T, C = SystemClock> {
    table: T,
    clock: C,
}

impl<T: PersistentTable> CounterStore<T> {
    /// Store over the given backend, stamping writes with wall-clock time.
    pub fn new(table: T) -> Self {
        CounterStore {
            table,
            clock: SystemClock,
        }
    }
}

impl<T: PersistentTable, C: Clock> CounterStore<T, C> {
    /// Store with an explicit time source.
    pub fn with_clock(table: T, clock: C) -> Self {
        CounterStore { table, clock }
    }

    /// The underlying backend.
    pub fn table(&self) -> &T {
        &self.table
    }

    /// The time source writes are stamped from.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub(crate) fn now(&self) -> i64 {
        self.clock.now()
    }
}
