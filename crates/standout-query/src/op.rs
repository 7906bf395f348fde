//! Comparison operators for query conditions.
//!
//! The [`Op`] enum is the closed set of operators a [`Condition`] can use.
//! Operators have SQL-style symbols (`=`, `!=`, `>`, `<`, `>=`, `<=`, `IN`)
//! that they parse from and display as.
//!
//! [`Condition`]: crate::Condition

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Comparison operator for a condition.
///
/// - **Equality**: `Eq`, `Ne` - work on all types, no coercion
/// - **Ordering**: `Gt`, `Gte`, `Lt`, `Lte` - numbers, strings and booleans
/// - **Membership**: `In` - the operand is a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    /// Equal.
    #[serde(rename = "=")]
    Eq,
    /// Not equal.
    #[serde(rename = "!=")]
    Ne,
    /// Greater than.
    #[serde(rename = ">")]
    Gt,
    /// Less than.
    #[serde(rename = "<")]
    Lt,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    Gte,
    /// Less than or equal.
    #[serde(rename = "<=")]
    Lte,
    /// Value is one of the elements of a list.
    #[serde(rename = "IN")]
    In,
}

impl Op {
    /// Evaluates a comparison given an ordering result.
    ///
    /// `In` is not ordering-based and always returns `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            Op::In => false,
        }
    }

    /// Returns the SQL symbol of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::Gte => ">=",
            Op::Lte => "<=",
            Op::In => "IN",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Op {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(Op::Eq),
            "!=" => Ok(Op::Ne),
            ">" => Ok(Op::Gt),
            "<" => Ok(Op::Lt),
            ">=" => Ok(Op::Gte),
            "<=" => Ok(Op::Lte),
            other if other.eq_ignore_ascii_case("in") => Ok(Op::In),
            other => Err(QueryError::UnknownOperator(other.to_string())),
        }
    }
}
