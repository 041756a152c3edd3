//! Data model for stored entries.
//!
//! An entry is a named numeric value addressed by a composite key: the
//! machine name of the metric plus a scope (entity type, entity id, user id).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The entity/user portion of an entry's key.
///
/// The defaults express decreasing specificity:
///
/// - a value unrelated to any entity or entity type leaves `entity_type`
///   as an empty string;
/// - a value tied to an entity type but not a specific entity keeps
///   `entity_id` at zero;
/// - a value not tied to a specific user keeps `user_id` at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: u64,
    #[serde(default)]
    pub user_id: u64,
}

impl Scope {
    /// Scope for a specific entity instance, with no user association.
    pub fn entity(entity_type: impl Into<String>, entity_id: u64) -> Self {
        Scope {
            entity_type: entity_type.into(),
            entity_id,
            user_id: 0,
        }
    }

    /// Scope for a specific entity instance and user.
    pub fn entity_user(entity_type: impl Into<String>, entity_id: u64, user_id: u64) -> Self {
        Scope {
            entity_type: entity_type.into(),
            entity_id,
            user_id,
        }
    }

    /// The fully-global scope: no entity type, no entity id, no user id.
    pub fn global() -> Self {
        Scope::default()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            if self.entity_type.is_empty() {
                "-"
            } else {
                &self.entity_type
            },
            self.entity_id,
            self.user_id
        )
    }
}

/// Composite primary key of an entry. At most one entry exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub scope: Scope,
    pub name: String,
}

impl EntryKey {
    pub fn new(name: impl Into<String>, scope: Scope) -> Self {
        EntryKey {
            scope,
            name: name.into(),
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.name)
    }
}

/// A stored numeric magnitude, integer or floating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    /// The value truncated to an integer.
    pub fn as_int(self) -> i64 {
        match self {
            Value::Int(n) => n,
            Value::Float(f) => f as i64,
        }
    }

    /// Apply a signed delta, preserving the numeric variant.
    ///
    /// Integer arithmetic saturates rather than wrapping on overflow.
    pub fn apply_delta(self, delta: i64) -> Self {
        match self {
            Value::Int(n) => Value::Int(n.saturating_add(delta)),
            Value::Float(f) => Value::Float(f + delta as f64),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

/// One stored record: key, value and the timestamp of the last write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub key: EntryKey,
    pub value: Value,
    /// Seconds since the Unix epoch at the time of the last write.
    pub changed: i64,
}
