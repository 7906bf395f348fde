//! Records: flat field-name to [`Value`] maps.
//!
//! A [`Record`] is the unit stored in a collection. Fields keep their
//! insertion order, so records serialize as flat JSON objects with the keys in
//! the order they were read or projected. Nested objects are outside the
//! [`Value`] type and fail to parse.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::Value;

static NULL: Value = Value::Null;

/// A single record: an insertion-ordered mapping from field name to value.
///
/// Equality ignores field order.
///
/// # Example
///
/// ```
/// use standout_query::{Record, Value};
///
/// let user = Record::new().with("id", 1).with("name", "Ada");
///
/// assert_eq!(user.get("name"), Some(&Value::from("Ada")));
/// assert_eq!(user.value("missing"), &Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Adds a field, returning the record for chaining.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets a field, returning the previous value if there was one.
    ///
    /// A new field goes last; an existing one keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Returns the field value, or `None` if the field is not present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, reading a missing field as [`Value::Null`].
    pub fn value(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Returns `true` if the field is present (even if it holds `Null`).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the field names in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates over `(field, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a new record holding only the listed fields, in list order.
    ///
    /// Fields missing from this record are omitted, not defaulted.
    pub fn project<S: AsRef<str>>(&self, fields: &[S]) -> Record {
        fields
            .iter()
            .filter_map(|field| {
                let field = field.as_ref();
                self.get(field).map(|v| (field.to_string(), v.clone()))
            })
            .collect()
    }

    /// Returns a shallow merge of this record with `patch`.
    ///
    /// Fields in `patch` override same-named fields; all other fields are kept.
    pub fn merged(&self, patch: &Record) -> Record {
        let mut merged = self.clone();
        merged.merge(patch);
        merged
    }

    /// Shallow-merges `patch` into this record in place.
    pub fn merge(&mut self, patch: &Record) {
        for (field, value) in &patch.fields {
            self.fields.insert(field.clone(), value.clone());
        }
    }

    /// Converts the record into a JSON object.
    ///
    /// `serde_json::Value` objects sort their keys; use [`to_json_array`] or
    /// `serde_json::to_string` on the record itself to keep field order.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = crate::error::QueryError;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(json)?)
    }
}

/// Parses a JSON array of flat objects into a collection.
///
/// ```
/// use standout_query::record::from_json_array;
///
/// let records = from_json_array(r#"[{"id": 1}, {"id": 2, "tag": "x"}]"#).unwrap();
/// assert_eq!(records.len(), 2);
/// ```
pub fn from_json_array(json: &str) -> Result<Vec<Record>> {
    Ok(serde_json::from_str(json)?)
}

/// Serializes a collection as a JSON array.
pub fn to_json_array(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}
