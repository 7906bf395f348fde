//! In-memory SQL-like query engine over collections of records.
//!
//! `standout-query` runs filter / sort / paginate / deduplicate / project
//! pipelines against a `Vec<Record>`, and inserts, updates and deletes
//! records with the same predicate evaluation. It supports:
//!
//! - A closed value type: null, booleans, numbers, strings and lists
//! - Operators `=`, `!=`, `>`, `<`, `>=`, `<=` and `IN`
//! - Predicates in disjunctive normal form (OR of AND groups)
//! - Single-field ordering with nulls always last
//! - Offset, limit, distinct and field projection
//! - JSON (de)serialization of records and query descriptions
//!
//! # Quick Start
//!
//! ```rust
//! use standout_query::{Op, QueryEngine, Record, Value};
//!
//! let mut people = vec![
//!     Record::new().with("id", 1).with("age", 30).with("department", "IT"),
//!     Record::new().with("id", 2).with("age", 25).with("department", "HR"),
//!     Record::new().with("id", 3).with("age", 30).with("department", "IT"),
//!     Record::new().with("id", 4).with("age", 35).with("department", "Finance"),
//! ];
//!
//! let mut engine = QueryEngine::new(&mut people);
//!
//! // age > 30 OR department = "HR"
//! let rows = engine
//!     .and_where("age", Op::Gt, 30)
//!     .or_where("department", Op::Eq, "HR")
//!     .select(["id"])
//!     .value();
//!
//! assert_eq!(rows, vec![
//!     Record::new().with("id", 2),
//!     Record::new().with("id", 4),
//! ]);
//!
//! // Mutations act on the borrowed collection and reset the query state
//! engine.reset().and_where("id", Op::Eq, 2).update(Record::new().with("age", 26));
//! drop(engine);
//! assert_eq!(people[1].value("age"), &Value::from(26));
//! ```
//!
//! # Query Semantics
//!
//! `and_where` adds a condition to the current group; `or_where` starts a new
//! group. A record matches when at least one group has all its conditions
//! true:
//!
//! ```text
//! match = (c00 ∧ c01 ∧ ...) ∨ (c10 ∧ c11 ∧ ...) ∨ ...
//! ```
//!
//! The first condition always seeds the first group, even through
//! `or_where`. An empty group never matches, which gives an asymmetry worth
//! knowing about:
//!
//! - **Reads** with no conditions return every record.
//! - **`update` / `delete`** with no conditions touch no record.
//!
//! # Pipeline
//!
//! [`QueryEngine::value`] runs the stages in a fixed order, skipping any that
//! is not configured:
//!
//! ```text
//! filter → sort → offset → limit → distinct → project
//! ```

mod condition;
mod engine;
mod error;
mod op;
mod ordering;
pub mod pipeline;
mod predicate;
mod query;
pub mod record;
mod value;

// Re-export public API
pub use condition::Condition;
pub use engine::QueryEngine;
pub use error::{QueryError, Result};
pub use op::Op;
pub use ordering::{compare_values, Dir, OrderBy};
pub use predicate::{ConditionGroup, Predicate};
pub use query::Query;
pub use record::Record;
pub use value::{Number, Value};
