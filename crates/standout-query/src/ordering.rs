//! Ordering types for query result sorting.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for field-based ordering.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::record::Record;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    /// Descending order (largest first).
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the SQL keyword for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "ASC",
            Dir::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("asc") {
            Ok(Dir::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Dir::Desc)
        } else {
            Err(QueryError::UnknownDirection(s.to_string()))
        }
    }
}

/// A sort key: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Compares two records by this ordering's field.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        compare_values(a.value(&self.field), b.value(&self.field), self.dir)
    }
}

/// Compares two field values for sorting in the given direction.
///
/// Null sorts after every non-null value in both directions; the direction
/// only reverses comparisons between non-null values.
pub fn compare_values(a: &Value, b: &Value, dir: Dir) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => dir.apply(a.total_cmp(b)),
    }
}
