//! Read operations.
//!
//! Single-entry lookups signal absence with `None`; bulk lookups return an
//! empty collection when nothing matches. The two are deliberately distinct.

use crate::clock::Clock;
use crate::entry::{Entry, Scope, Value};
use crate::error::StoreError;
use crate::query::{Projection, SelectQuery};
use crate::store::CounterStore;
use crate::table::PersistentTable;
use std::collections::HashMap;

/// Options for [`ReadOps::fetch_multiple_values`].
#[derive(Debug, Clone, Default)]
pub struct FetchValuesOptions {
    /// When set, every requested name missing from storage is added to the
    /// result with this value. When unset, missing names are simply absent.
    pub default_value: Option<Value>,
    /// Truncate every returned value to an integer.
    pub cast_to_integer: bool,
}

impl FetchValuesOptions {
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn cast_to_integer(mut self) -> Self {
        self.cast_to_integer = true;
        self
    }
}

/// Read operations trait.
pub trait ReadOps {
    /// Fetch the entry identified by name and scope.
    fn fetch(&self, name: &str, scope: &Scope) -> Result<Option<Entry>, StoreError>;

    /// Fetch only the value of the entry identified by name and scope.
    fn fetch_value(&self, name: &str, scope: &Scope) -> Result<Option<Value>, StoreError>;

    /// Fetch every entry in the scope whose name is in `names`.
    ///
    /// Result order is the backend's natural order.
    fn fetch_multiple(&self, names: &[&str], scope: &Scope) -> Result<Vec<Entry>, StoreError>;

    /// Fetch the values of the named entries as a name-to-value mapping.
    ///
    /// Returns an empty mapping when nothing matches and no default is
    /// configured.
    fn fetch_multiple_values(
        &self,
        names: &[&str],
        scope: &Scope,
        options: &FetchValuesOptions,
    ) -> Result<HashMap<String, Value>, StoreError>;

    /// Fetch every entry in the scope, regardless of name.
    fn fetch_all(&self, scope: &Scope) -> Result<Vec<Entry>, StoreError>;

    /// Fetch every entry in the scope as a name-to-value mapping.
    fn fetch_all_values(&self, scope: &Scope) -> Result<HashMap<String, Value>, StoreError>;
}

impl<T: PersistentTable, C: Clock> ReadOps for CounterStore<T, C> {
    fn fetch(&self, name: &str, scope: &Scope) -> Result<Option<Entry>, StoreError> {
        let query = SelectQuery::scoped(scope).with_name(name);
        let records = self.table().select(&query)?;
        Ok(records.into_iter().next().and_then(|r| r.into_entry()))
    }

    fn fetch_value(&self, name: &str, scope: &Scope) -> Result<Option<Value>, StoreError> {
        let query = SelectQuery::scoped(scope)
            .with_name(name)
            .project(Projection::ValueOnly);
        let records = self.table().select(&query)?;
        Ok(records.into_iter().next().and_then(|r| r.into_value()))
    }

    fn fetch_multiple(&self, names: &[&str], scope: &Scope) -> Result<Vec<Entry>, StoreError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let query = SelectQuery::scoped(scope).with_names(names);
        let records = self.table().select(&query)?;
        Ok(records.into_iter().filter_map(|r| r.into_entry()).collect())
    }

    fn fetch_multiple_values(
        &self,
        names: &[&str],
        scope: &Scope,
        options: &FetchValuesOptions,
    ) -> Result<HashMap<String, Value>, StoreError> {
        let mut values = HashMap::new();
        if !names.is_empty() {
            let query = SelectQuery::scoped(scope)
                .with_names(names)
                .project(Projection::NameValue);
            for record in self.table().select(&query)? {
                if let Some((name, value)) = record.into_name_value() {
                    let value = if options.cast_to_integer {
                        Value::Int(value.as_int())
                    } else {
                        value
                    };
                    values.insert(name, value);
                }
            }
        }

        if let Some(default) = options.default_value {
            for name in names {
                values.entry(name.to_string()).or_insert(default);
            }
        }

        Ok(values)
    }

    fn fetch_all(&self, scope: &Scope) -> Result<Vec<Entry>, StoreError> {
        let records = self.table().select(&SelectQuery::scoped(scope))?;
        Ok(records.into_iter().filter_map(|r| r.into_entry()).collect())
    }

    fn fetch_all_values(&self, scope: &Scope) -> Result<HashMap<String, Value>, StoreError> {
        let query = SelectQuery::scoped(scope).project(Projection::NameValue);
        let records = self.table().select(&query)?;
        Ok(records
            .into_iter()
            .filter_map(|r| r.into_name_value())
            .collect())
    }
}
