//! Runtime value types for record fields.
//!
//! The [`Value`] enum is the closed set of types a record field can hold:
//! null, booleans, numbers, strings and lists. A field that is missing from a
//! record reads as [`Value::Null`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Value stored in a record field or used as a comparison operand.
///
/// # Example
///
/// ```
/// use standout_query::{Number, Value};
///
/// let age = Value::from(30);
/// assert_eq!(age, Value::Number(Number::I64(30)));
///
/// // Numbers compare across representations
/// assert_eq!(Value::from(30u8), Value::from(30.0));
///
/// // No coercion between strings and numbers
/// assert_ne!(Value::from("30"), Value::from(30));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null, or a field that is not present.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(String),
    /// List of values. Used as the operand of `IN`.
    List(Vec<Value>),
}

impl Value {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a `Bool` value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a `List` value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the list elements, if present.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the name of this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    /// Builds a list value from any iterator of convertible items.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Compares two values of the same scalar type.
    ///
    /// Numbers compare numerically, strings lexicographically and booleans
    /// with `false < true`. Returns `None` for any other pairing, including
    /// nulls, lists, mismatched types and NaN.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Number(a), Value::Number(b)) => a.compare(*b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total order over all values, used for sorting.
    ///
    /// Types rank `Bool < Number < String < List < Null`; values of the same
    /// type use their natural order, lists compare element by element and
    /// NaN sorts after every other number.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a
                .compare(*b)
                .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())),
            (Value::List(a), Value::List(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.total_cmp(y))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => match self.compare(other) {
                Some(ordering) => ordering,
                None => self.rank().cmp(&other.rank()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            Value::List(_) => 3,
            Value::Null => 4,
        }
    }
}

/// Numeric value.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons are exact across all three variants: an integer is never
/// rounded to `f64` to meet a float. Equality follows the same rules, so
/// `I64(1) == F64(1.0)` but `I64(2^53 + 1) != F64(2^53)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` if this is a NaN float.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            (Number::F64(a), b) => cmp_int_float(b.as_i128()?, a).map(Ordering::reverse),
            (a, Number::F64(b)) => cmp_int_float(a.as_i128()?, b),
            (a, b) => Some(a.as_i128()?.cmp(&b.as_i128()?)),
        }
    }

    fn as_i128(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(i128::from(n)),
            Number::U64(n) => Some(i128::from(n)),
            Number::F64(_) => None,
        }
    }
}

// Every i64 and u64 lies in [-2^63, 2^64).
const INT_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const INT_END_F64: f64 = 18_446_744_073_709_551_616.0;

/// Exact comparison of an integer against a float.
fn cmp_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= INT_END_F64 {
        return Some(Ordering::Less);
    }
    if float < INT_MIN_F64 {
        return Some(Ordering::Greater);
    }
    // In range, the truncated float is an integer that i128 holds exactly.
    let whole = float.trunc();
    Some(int.cmp(&(whole as i128)).then_with(|| {
        if float > whole {
            Ordering::Less
        } else if float < whole {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident: $target:ty => $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )+
    };
}

number_from!(I64: i64 => i8, i16, i32, i64, isize);
number_from!(U64: u64 => u8, u16, u32, u64, usize);
number_from!(F64: f64 => f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_checks() {
        assert!(Value::Null.is_null());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::Number(Number::I64(42)).is_number());
        assert!(Value::String("test".into()).is_string());
        assert!(Value::List(vec![]).is_list());
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::from(42).as_number(), Some(Number::I64(42)));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(vec![1, 2]).as_list().map(|l| l.len()), Some(2));

        // Wrong type returns None
        assert_eq!(Value::from("test").as_number(), None);
        assert_eq!(Value::from(1).as_str(), None);
        assert_eq!(Value::Null.as_bool(), None);
    }

    #[test]
    fn number_comparisons_same_type() {
        assert_eq!(
            Number::I64(5).compare(Number::I64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(10).compare(Number::U64(5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::F64(5.0).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(-1).compare(Number::U64(0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::I64(i64::MAX)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::U64(10).compare(Number::F64(5.5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn number_int_float_compare_is_exact() {
        let two_53 = 1i64 << 53;
        assert_eq!(
            Number::I64(two_53 + 1).compare(Number::F64(two_53 as f64)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Number::F64(two_53 as f64).compare(Number::I64(two_53 + 1)),
            Some(Ordering::Less)
        );
        assert_ne!(Number::I64(two_53 + 1), Number::F64(two_53 as f64));
        assert_eq!(Number::I64(two_53), Number::F64(two_53 as f64));
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::F64(u64::MAX as f64)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(i64::MIN).compare(Number::F64(i64::MIN as f64)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn number_int_float_fractions_and_infinities() {
        assert_eq!(Number::I64(2).compare(Number::F64(2.5)), Some(Ordering::Less));
        assert_eq!(Number::I64(3).compare(Number::F64(2.5)), Some(Ordering::Greater));
        assert_eq!(Number::I64(-2).compare(Number::F64(-2.5)), Some(Ordering::Greater));
        assert_eq!(Number::U64(0).compare(Number::F64(-0.5)), Some(Ordering::Greater));
        assert_eq!(Number::U64(0).compare(Number::F64(-0.0)), Some(Ordering::Equal));
        assert_eq!(
            Number::I64(i64::MAX).compare(Number::F64(f64::INFINITY)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(i64::MIN).compare(Number::F64(f64::NEG_INFINITY)),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::I64(1).compare(Number::F64(f64::NAN)), None);
    }

    #[test]
    fn number_nan_comparison() {
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
        assert_ne!(Number::F64(f64::NAN), Number::F64(f64::NAN));
    }

    #[test]
    fn number_equality_across_types() {
        assert_eq!(Number::I64(1), Number::U64(1));
        assert_eq!(Number::I64(1), Number::F64(1.0));
        assert_ne!(Number::I64(1), Number::F64(1.5));
    }

    #[test]
    fn value_equality_has_no_coercion() {
        assert_ne!(Value::from("1"), Value::from(1));
        assert_ne!(Value::from(true), Value::from(1));
        assert_ne!(Value::Null, Value::from(0));
        assert_eq!(Value::from(vec![1, 2]), Value::from(vec![1.0, 2.0]));
    }

    #[test]
    fn compare_rejects_mismatches() {
        assert_eq!(Value::from("a").compare(&Value::from("b")), Some(Ordering::Less));
        assert_eq!(Value::from(false).compare(&Value::from(true)), Some(Ordering::Less));
        assert_eq!(Value::from(1).compare(&Value::from("1")), None);
        assert_eq!(Value::Null.compare(&Value::Null), None);
        assert_eq!(Value::from(vec![1]).compare(&Value::from(vec![1])), None);
    }

    #[test]
    fn total_cmp_ranks_types() {
        assert_eq!(Value::from(true).total_cmp(&Value::from(0)), Ordering::Less);
        assert_eq!(Value::from(9).total_cmp(&Value::from("a")), Ordering::Less);
        assert_eq!(Value::from("z").total_cmp(&Value::from(vec![1])), Ordering::Less);
        assert_eq!(Value::from(vec![1]).total_cmp(&Value::Null), Ordering::Less);
        assert_eq!(Value::Null.total_cmp(&Value::Null), Ordering::Equal);
    }

    #[test]
    fn total_cmp_lists_and_nan() {
        assert_eq!(
            Value::from(vec![1, 2]).total_cmp(&Value::from(vec![1, 3])),
            Ordering::Less
        );
        assert_eq!(
            Value::from(vec![1, 2]).total_cmp(&Value::from(vec![1])),
            Ordering::Greater
        );
        assert_eq!(
            Value::from(f64::NAN).total_cmp(&Value::from(1.0)),
            Ordering::Greater
        );
        assert_eq!(
            Value::from(-f64::NAN).total_cmp(&Value::from(i64::MIN)),
            Ordering::Greater
        );
        assert_eq!(
            Value::from(f64::NAN).total_cmp(&Value::from(-f64::NAN)),
            Ordering::Equal
        );
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(42i32), Value::Number(Number::I64(42)));
        assert_eq!(Value::from(42u32), Value::Number(Number::U64(42)));
        assert_eq!(Value::from(42.5f64), Value::Number(Number::F64(42.5)));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn serde_roundtrip_shapes() {
        let v: Value = serde_json::from_str(r#"[1, "a", true, null, 2.5]"#).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::from(1),
                Value::from("a"),
                Value::from(true),
                Value::Null,
                Value::from(2.5),
            ])
        );
        assert_eq!(serde_json::to_string(&Value::from(7)).unwrap(), "7");
        assert!(serde_json::from_str::<Value>(r#"{"nested": 1}"#).is_err());
    }
}
