//! Conditions: single-field predicates.
//!
//! A [`Condition`] is a field name, an operator, and a comparison value.

use serde::{Deserialize, Serialize};

use crate::op::Op;
use crate::record::Record;
use crate::value::Value;

/// A single filter predicate.
///
/// # Example
///
/// ```
/// use standout_query::{Condition, Op, Record};
///
/// let adult = Condition::new("age", Op::Gte, 18);
/// assert!(adult.matches_record(&Record::new().with("age", 30)));
/// assert!(!adult.matches_record(&Record::new().with("age", 12)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The field name to compare.
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub value: Value,
}

impl Condition {
    /// Creates a new condition.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Condition {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluates this condition against a record.
    ///
    /// A field missing from the record is evaluated as [`Value::Null`].
    pub fn matches_record(&self, record: &Record) -> bool {
        self.matches(record.value(&self.field))
    }

    /// Evaluates this condition against a field value.
    ///
    /// - `Eq` / `Ne` use structural equality (numbers compare across
    ///   representations, no other coercion); `Ne` is the negation of `Eq`.
    /// - Ordering operators hold only for two numbers, two strings or two
    ///   booleans; any other pairing is `false`.
    /// - `In` holds if the operand is a list containing an element equal to
    ///   the field value.
    pub fn matches(&self, field_value: &Value) -> bool {
        match self.op {
            Op::Eq => *field_value == self.value,
            Op::Ne => *field_value != self.value,
            Op::Gt | Op::Gte | Op::Lt | Op::Lte => field_value
                .compare(&self.value)
                .is_some_and(|ordering| self.op.eval_ordering(ordering)),
            Op::In => self
                .value
                .as_list()
                .is_some_and(|set| set.contains(field_value)),
        }
    }
}
