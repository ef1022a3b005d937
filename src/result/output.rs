//! Materialized query output

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use super::errors::{MaterializeError, MaterializeResult};

/// Output of one query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Ordered elements
    Sequence(Vec<Value>),
    /// Key-ordered mapping
    Mapping(BTreeMap<String, Value>),
    /// A single value
    Scalar(Value),
}

impl QueryOutput {
    /// Shape name as used in logs
    pub fn shape(&self) -> &'static str {
        match self {
            QueryOutput::Sequence(_) => "sequence",
            QueryOutput::Mapping(_) => "mapping",
            QueryOutput::Scalar(_) => "scalar",
        }
    }

    /// Number of rows: elements, entries, or 1 for a scalar
    pub fn len(&self) -> usize {
        match self {
            QueryOutput::Sequence(items) => items.len(),
            QueryOutput::Mapping(entries) => entries.len(),
            QueryOutput::Scalar(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            QueryOutput::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            QueryOutput::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            QueryOutput::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Converts into a plain JSON value
    pub fn into_value(self) -> Value {
        match self {
            QueryOutput::Sequence(items) => Value::Array(items),
            QueryOutput::Mapping(entries) => Value::Object(entries.into_iter().collect()),
            QueryOutput::Scalar(value) => value,
        }
    }
}

/// Builds `QueryOutput` values
pub struct Materializer;

impl Materializer {
    /// Materializes elements in iteration order
    pub fn sequence<T: Serialize>(items: impl IntoIterator<Item = T>) -> MaterializeResult<QueryOutput> {
        let values = items
            .into_iter()
            .map(|item| serde_json::to_value(item).map_err(|e| MaterializeError::serialize("sequence", e)))
            .collect::<MaterializeResult<Vec<Value>>>()?;
        Ok(QueryOutput::Sequence(values))
    }

    /// Materializes key/value pairs, rendering keys with `Display`.
    ///
    /// Fails if two distinct keys render to the same string.
    pub fn mapping<K: Display, V: Serialize>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> MaterializeResult<QueryOutput> {
        let mut mapping = BTreeMap::new();
        for (key, value) in entries {
            let key = key.to_string();
            let value = serde_json::to_value(value).map_err(|e| MaterializeError::serialize("mapping", e))?;
            if mapping.insert(key.clone(), value).is_some() {
                return Err(MaterializeError::KeyCollision { key });
            }
        }
        Ok(QueryOutput::Mapping(mapping))
    }

    pub fn scalar<T: Serialize>(value: T) -> MaterializeResult<QueryOutput> {
        let value = serde_json::to_value(value).map_err(|e| MaterializeError::serialize("scalar", e))?;
        Ok(QueryOutput::Scalar(value))
    }
}
