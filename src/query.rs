//! Select-query composition.
//!
//! Read operations address the table through a [`SelectQuery`]: equality
//! conditions over the scope fields, an optional name filter (one equality
//! for a single name, an OR-group for several) and a field projection so
//! backends can skip columns the caller does not need.

use crate::entry::{Entry, EntryKey, Scope, Value};

/// One filter condition over the entry key columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Equality on the `entity_type` column.
    EntityType(String),
    /// Equality on the `entity_id` column.
    EntityId(u64),
    /// Equality on the `user_id` column.
    UserId(u64),
    /// Equality on the `name` column.
    Name(String),
    /// OR-group of equalities on the `name` column.
    AnyName(Vec<String>),
}

impl Condition {
    /// Whether the given key satisfies this condition.
    pub fn matches(&self, key: &EntryKey) -> bool {
        match self {
            Condition::EntityType(t) => key.scope.entity_type == *t,
            Condition::EntityId(id) => key.scope.entity_id == *id,
            Condition::UserId(id) => key.scope.user_id == *id,
            Condition::Name(name) => key.name == *name,
            Condition::AnyName(names) => names.iter().any(|n| key.name == *n),
        }
    }
}

/// Which columns a select should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Every column; records come back as full entries.
    #[default]
    Full,
    /// Only the `name` and `value` columns.
    NameValue,
    /// Only the `value` column.
    ValueOnly,
}

/// A composed select statement against the counter table.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub conditions: Vec<Condition>,
    pub projection: Projection,
}

impl SelectQuery {
    /// Query matching every entry in the given scope, full projection.
    pub fn scoped(scope: &Scope) -> Self {
        SelectQuery {
            conditions: vec![
                Condition::EntityType(scope.entity_type.clone()),
                Condition::EntityId(scope.entity_id),
                Condition::UserId(scope.user_id),
            ],
            projection: Projection::Full,
        }
    }

    /// Restrict to a single entry name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.conditions.push(Condition::Name(name.to_string()));
        self
    }

    /// Restrict to any of the given names.
    ///
    /// A one-element list collapses to a plain equality; longer lists become
    /// an OR-group. An empty list adds no condition.
    pub fn with_names(mut self, names: &[&str]) -> Self {
        match names {
            [] => {}
            [name] => self.conditions.push(Condition::Name(name.to_string())),
            _ => self.conditions.push(Condition::AnyName(
                names.iter().map(|n| n.to_string()).collect(),
            )),
        }
        self
    }

    /// Select which columns to fetch.
    pub fn project(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Whether the given key satisfies every condition.
    pub fn matches(&self, key: &EntryKey) -> bool {
        self.conditions.iter().all(|c| c.matches(key))
    }
}

/// A row returned by a select, shaped by the query's projection.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Entry(Entry),
    NameValue { name: String, value: Value },
    Value(Value),
}

impl Record {
    /// Project a full entry down to the requested column set.
    pub fn project(entry: Entry, projection: Projection) -> Self {
        match projection {
            Projection::Full => Record::Entry(entry),
            Projection::NameValue => Record::NameValue {
                name: entry.key.name,
                value: entry.value,
            },
            Projection::ValueOnly => Record::Value(entry.value),
        }
    }

    pub fn into_entry(self) -> Option<Entry> {
        match self {
            Record::Entry(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn into_name_value(self) -> Option<(String, Value)> {
        match self {
            Record::Entry(entry) => Some((entry.key.name, entry.value)),
            Record::NameValue { name, value } => Some((name, value)),
            Record::Value(_) => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Record::Entry(entry) => Some(entry.value),
            Record::NameValue { value, .. } => Some(value),
            Record::Value(value) => Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(entity_type: &str, entity_id: u64, user_id: u64, name: &str) -> EntryKey {
        EntryKey::new(name, Scope::entity_user(entity_type, entity_id, user_id))
    }

    #[test]
    fn test_scoped_conditions() {
        let query = SelectQuery::scoped(&Scope::entity("node", 3));
        assert_eq!(
            query.conditions,
            vec![
                Condition::EntityType("node".to_string()),
                Condition::EntityId(3),
                Condition::UserId(0),
            ]
        );

        assert!(query.matches(&key("node", 3, 0, "views")));
        assert!(query.matches(&key("node", 3, 0, "downloads")));
        assert!(!query.matches(&key("node", 4, 0, "views")));
        assert!(!query.matches(&key("user", 3, 0, "views")));
        assert!(!query.matches(&key("node", 3, 7, "views")));
    }

    #[test]
    fn test_single_name_collapses_to_equality() {
        let query = SelectQuery::scoped(&Scope::global()).with_names(&["views"]);
        assert_eq!(
            query.conditions.last(),
            Some(&Condition::Name("views".to_string()))
        );
    }

    #[test]
    fn test_multiple_names_build_or_group() {
        let query = SelectQuery::scoped(&Scope::global()).with_names(&["views", "downloads"]);
        assert_eq!(
            query.conditions.last(),
            Some(&Condition::AnyName(vec![
                "views".to_string(),
                "downloads".to_string()
            ]))
        );

        assert!(query.matches(&key("", 0, 0, "views")));
        assert!(query.matches(&key("", 0, 0, "downloads")));
        assert!(!query.matches(&key("", 0, 0, "visits")));
    }

    #[test]
    fn test_empty_name_list_adds_no_condition() {
        let query = SelectQuery::scoped(&Scope::global()).with_names(&[]);
        assert_eq!(query.conditions.len(), 3);
    }

    #[test]
    fn test_projection_shapes_records() {
        let entry = Entry {
            key: key("node", 1, 0, "views"),
            value: Value::Int(9),
            changed: 1000,
        };

        let full = Record::project(entry.clone(), Projection::Full);
        assert_eq!(full.clone().into_entry(), Some(entry.clone()));

        let nv = Record::project(entry.clone(), Projection::NameValue);
        assert_eq!(
            nv.into_name_value(),
            Some(("views".to_string(), Value::Int(9)))
        );

        let v = Record::project(entry, Projection::ValueOnly);
        assert_eq!(v.clone().into_value(), Some(Value::Int(9)));
        assert_eq!(v.into_name_value(), None);
    }
}
