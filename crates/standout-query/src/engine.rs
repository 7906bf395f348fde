//! The query engine: a fluent builder bound to a live collection.
//!
//! [`QueryEngine`] pairs a mutable borrow of a collection with a [`Query`]
//! state. Builder calls mutate the state and return the engine for chaining;
//! [`value`](QueryEngine::value) runs the read pipeline; `insert`, `update`
//! and `delete` change the collection itself.

use tracing::debug;

use crate::condition::Condition;
use crate::error::{QueryError, Result};
use crate::op::Op;
use crate::ordering::{Dir, OrderBy};
use crate::query::Query;
use crate::record::Record;
use crate::value::Value;

/// Fluent query builder and executor over a borrowed collection.
///
/// # Ownership
///
/// The engine holds `&mut Vec<Record>`: it does not copy the collection.
/// `insert`, `update` and `delete` act on the caller's vector, and the caller
/// observes those changes once the engine is dropped.
///
/// # Empty predicates
///
/// Reads and mutations treat a query with no conditions differently:
///
/// - [`value`](Self::value) returns **every** record.
/// - [`update`](Self::update) and [`delete`](Self::delete) touch **no**
///   record.
///
/// An unconstrained `delete()` is therefore a no-op rather than a wipe. Keep
/// this in mind when reusing the same chain for a read and a mutation.
///
/// # Example
///
/// ```
/// use standout_query::{Op, QueryEngine, Record};
///
/// let mut people = vec![
///     Record::new().with("id", 1).with("age", 30).with("department", "IT"),
///     Record::new().with("id", 2).with("age", 25).with("department", "HR"),
///     Record::new().with("id", 3).with("age", 30).with("department", "IT"),
///     Record::new().with("id", 4).with("age", 35).with("department", "Finance"),
/// ];
///
/// let mut engine = QueryEngine::new(&mut people);
///
/// let over_28 = engine.and_where("age", Op::Gt, 28).value();
/// assert_eq!(over_28.len(), 3);
///
/// engine.reset().and_where("department", Op::Eq, "HR").delete();
/// assert_eq!(engine.records().len(), 3);
/// drop(engine);
///
/// assert_eq!(people.len(), 3);
/// ```
#[derive(Debug)]
pub struct QueryEngine<'a> {
    records: &'a mut Vec<Record>,
    query: Query,
}

impl<'a> QueryEngine<'a> {
    /// Creates an engine over the caller's collection.
    ///
    /// The collection is borrowed, not copied: mutations made through the
    /// engine are visible in `records` after the engine is dropped.
    pub fn new(records: &'a mut Vec<Record>) -> Self {
        QueryEngine {
            records,
            query: Query::default(),
        }
    }

    // ========================================================================
    // Conditions
    // ========================================================================

    /// Adds a condition to the current AND group (`WHERE ... AND ...`).
    pub fn and_where(
        &mut self,
        field: impl Into<String>,
        op: Op,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.query.and_where(Condition::new(field, op, value));
        self
    }

    /// Starts a new OR group with this condition (`... OR ...`).
    ///
    /// As the first condition of a query it behaves like
    /// [`and_where`](Self::and_where).
    pub fn or_where(
        &mut self,
        field: impl Into<String>,
        op: Op,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.query.or_where(Condition::new(field, op, value));
        self
    }

    /// Adds an AND equality condition.
    pub fn and_eq(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.and_where(field, Op::Eq, value)
    }

    /// Adds an AND not-equal condition.
    pub fn and_ne(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.and_where(field, Op::Ne, value)
    }

    /// Adds an AND greater-than condition.
    pub fn and_gt(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.and_where(field, Op::Gt, value)
    }

    /// Adds an AND greater-than-or-equal condition.
    pub fn and_gte(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.and_where(field, Op::Gte, value)
    }

    /// Adds an AND less-than condition.
    pub fn and_lt(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.and_where(field, Op::Lt, value)
    }

    /// Adds an AND less-than-or-equal condition.
    pub fn and_lte(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.and_where(field, Op::Lte, value)
    }

    /// Adds an AND membership condition.
    pub fn and_in<I, T>(&mut self, field: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.and_where(field, Op::In, Value::list(values))
    }

    /// Starts an OR group with an equality condition.
    pub fn or_eq(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.or_where(field, Op::Eq, value)
    }

    /// Starts an OR group with a not-equal condition.
    pub fn or_ne(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.or_where(field, Op::Ne, value)
    }

    /// Starts an OR group with a greater-than condition.
    pub fn or_gt(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.or_where(field, Op::Gt, value)
    }

    /// Starts an OR group with a greater-than-or-equal condition.
    pub fn or_gte(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.or_where(field, Op::Gte, value)
    }

    /// Starts an OR group with a less-than condition.
    pub fn or_lt(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.or_where(field, Op::Lt, value)
    }

    /// Starts an OR group with a less-than-or-equal condition.
    pub fn or_lte(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.or_where(field, Op::Lte, value)
    }

    /// Starts an OR group with a membership condition.
    pub fn or_in<I, T>(&mut self, field: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.or_where(field, Op::In, Value::list(values))
    }

    // ========================================================================
    // Shape, ordering and pagination
    // ========================================================================

    /// Sets the projected fields.
    ///
    /// An empty list is a no-op: it leaves any earlier projection in place.
    pub fn select<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if !fields.is_empty() {
            self.query.select = fields;
        }
        self
    }

    /// Sets the sort key, replacing any previous one.
    pub fn order_by(&mut self, field: impl Into<String>, dir: Dir) -> &mut Self {
        self.query.order = Some(OrderBy::new(field, dir));
        self
    }

    /// Sorts ascending by a field.
    pub fn order_asc(&mut self, field: impl Into<String>) -> &mut Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sorts descending by a field.
    pub fn order_desc(&mut self, field: impl Into<String>) -> &mut Self {
        self.order_by(field, Dir::Desc)
    }

    /// Sets the maximum number of results.
    ///
    /// Returns [`QueryError::InvalidArgument`] for a negative count and leaves
    /// the current limit unchanged.
    pub fn limit(&mut self, n: i64) -> Result<&mut Self> {
        self.query.limit = Some(count_arg("limit", n)?);
        Ok(self)
    }

    /// Sets the number of results to skip.
    ///
    /// Returns [`QueryError::InvalidArgument`] for a negative count and leaves
    /// the current offset unchanged.
    pub fn offset(&mut self, n: i64) -> Result<&mut Self> {
        self.query.offset = count_arg("offset", n)?;
        Ok(self)
    }

    /// Keeps only the first record for each value of `field`.
    pub fn distinct(&mut self, field: impl Into<String>) -> &mut Self {
        self.query.distinct = Some(field.into());
        self
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Replaces the current query state with a prepared query.
    pub fn apply(&mut self, query: Query) -> &mut Self {
        self.query = query;
        self
    }

    /// Restores the default query state. The collection is untouched.
    pub fn reset(&mut self) -> &mut Self {
        self.query = Query::default();
        self
    }

    /// Returns the current query state.
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the live collection.
    pub fn records(&self) -> &[Record] {
        self.records.as_slice()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Runs the read pipeline and returns the materialized result.
    ///
    /// The collection and the query state are left unchanged, so calling this
    /// twice yields the same result.
    pub fn value(&self) -> Vec<Record> {
        let result = self.query.execute(self.records.as_slice());
        debug!(
            scanned = self.records.len(),
            returned = result.len(),
            "query executed"
        );
        result
    }

    /// Returns the number of records [`value`](Self::value) would return.
    pub fn count(&self) -> usize {
        self.value().len()
    }

    /// Returns the first record [`value`](Self::value) would return.
    pub fn first(&self) -> Option<Record> {
        self.value().into_iter().next()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Appends a record. The query state is not consulted or reset.
    pub fn insert(&mut self, record: Record) -> &mut Self {
        self.records.push(record);
        debug!(inserted = 1, total = self.records.len(), "records inserted");
        self
    }

    /// Appends records in order. The query state is not consulted or reset.
    pub fn insert_all<I>(&mut self, records: I) -> &mut Self
    where
        I: IntoIterator<Item = Record>,
    {
        let before = self.records.len();
        self.records.extend(records);
        debug!(
            inserted = self.records.len() - before,
            total = self.records.len(),
            "records inserted"
        );
        self
    }

    /// Shallow-merges `patch` into every matching record, then resets the
    /// query state.
    ///
    /// With no conditions configured, nothing is updated.
    pub fn update(&mut self, patch: Record) -> &mut Self {
        let mut updated = 0;
        for record in self.records.iter_mut() {
            if self.query.matches(record) {
                record.merge(&patch);
                updated += 1;
            }
        }
        debug!(updated, fields = patch.len(), "records updated");
        self.reset()
    }

    /// Removes every matching record, then resets the query state.
    ///
    /// With no conditions configured, nothing is deleted.
    pub fn delete(&mut self) -> &mut Self {
        let before = self.records.len();
        let query = &self.query;
        self.records.retain(|record| !query.matches(record));
        debug!(
            deleted = before - self.records.len(),
            remaining = self.records.len(),
            "records deleted"
        );
        self.reset()
    }
}

fn count_arg(name: &'static str, n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| QueryError::InvalidArgument { name, value: n })
}
