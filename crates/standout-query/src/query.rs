//! Query state and execution.
//!
//! A [`Query`] holds everything a read or mutation needs to know: the
//! predicate, projection, sort key, pagination and distinct key. It can be
//! executed against any slice of records and (de)serialized as JSON, so a
//! prepared query can be stored and applied later.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::condition::Condition;
use crate::error::Result;
use crate::ordering::OrderBy;
use crate::pipeline;
use crate::predicate::Predicate;
use crate::record::Record;

/// The complete state of a query.
///
/// # Example
///
/// ```
/// use standout_query::{Condition, Op, OrderBy, Query, Record, Value};
///
/// let mut query = Query::new();
/// query.predicate.and_where(Condition::new("age", Op::Gt, 28));
/// query.order = Some(OrderBy::desc("age"));
///
/// let rows = vec![
///     Record::new().with("id", 1).with("age", 30),
///     Record::new().with("id", 2).with("age", 25),
///     Record::new().with("id", 3).with("age", 35),
/// ];
///
/// let result = query.execute(&rows);
/// assert_eq!(result.len(), 2);
/// assert_eq!(result[0].value("id"), &Value::from(3));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    /// Filter predicate (OR of AND groups).
    #[serde(rename = "where")]
    pub predicate: Predicate,
    /// Fields to keep in each result; empty keeps every field.
    pub select: Vec<String>,
    /// Optional sort key.
    pub order: Option<OrderBy>,
    /// Maximum number of results; `None` is unlimited.
    pub limit: Option<usize>,
    /// Number of results to skip.
    pub offset: usize,
    /// Optional field used to drop records with an already-seen value.
    pub distinct: Option<String>,
}

impl Query {
    /// Creates a query in its default state: matches everything on read,
    /// nothing on mutation.
    pub fn new() -> Self {
        Query::default()
    }

    /// Parses a query description from JSON.
    ///
    /// ```
    /// use standout_query::Query;
    ///
    /// let query = Query::from_json(r#"{
    ///     "where": [[{"field": "age", "op": ">", "value": 28}]],
    ///     "order": {"field": "age", "dir": "DESC"},
    ///     "limit": 10
    /// }"#).unwrap();
    ///
    /// assert_eq!(query.limit, Some(10));
    /// assert_eq!(query.predicate.condition_count(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes this query description as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Appends a condition to the current AND group.
    pub fn and_where(&mut self, condition: Condition) {
        self.predicate.and_where(condition);
    }

    /// Starts a new OR group with this condition.
    pub fn or_where(&mut self, condition: Condition) {
        self.predicate.or_where(condition);
    }

    /// Tests if a single record matches this query's predicate.
    ///
    /// This is the mutation-side test: an empty predicate matches nothing.
    pub fn matches(&self, record: &Record) -> bool {
        self.predicate.matches(record)
    }

    /// Runs the read pipeline over `records`, returning new records.
    ///
    /// Stages run in a fixed order, each skipped when unconfigured:
    /// filter, sort, offset, limit, distinct, project. The input is never
    /// modified.
    pub fn execute(&self, records: &[Record]) -> Vec<Record> {
        let mut rows = pipeline::filter(records, &self.predicate);
        trace!(input = records.len(), kept = rows.len(), "filter");

        if let Some(order) = &self.order {
            rows = pipeline::sort(rows, order);
            trace!(field = %order.field, dir = %order.dir, "sort");
        }

        if self.offset > 0 {
            rows = pipeline::offset(rows, self.offset);
            trace!(offset = self.offset, kept = rows.len(), "offset");
        }

        if let Some(limit) = self.limit {
            rows = pipeline::limit(rows, limit);
            trace!(limit, kept = rows.len(), "limit");
        }

        if let Some(field) = &self.distinct {
            rows = pipeline::distinct(rows, field);
            trace!(field = %field, kept = rows.len(), "distinct");
        }

        pipeline::project(rows, &self.select)
    }
}
