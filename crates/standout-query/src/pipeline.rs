//! Read pipeline stages.
//!
//! Each stage is a small pure function over borrowed records. [`Query::execute`]
//! runs them in a fixed order:
//!
//! ```text
//! filter → sort → offset → limit → distinct → project
//! ```
//!
//! Records are only cloned by the final projection stage.
//!
//! [`Query::execute`]: crate::Query::execute

use crate::ordering::OrderBy;
use crate::predicate::Predicate;
use crate::record::Record;
use crate::value::Value;

/// Keeps the records matching the predicate.
///
/// A predicate with no conditions passes every record through.
pub fn filter<'a>(records: &'a [Record], predicate: &Predicate) -> Vec<&'a Record> {
    if predicate.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| predicate.matches(r)).collect()
}

/// Stable sort by a single field.
pub fn sort<'a>(mut records: Vec<&'a Record>, order: &OrderBy) -> Vec<&'a Record> {
    records.sort_by(|a, b| order.compare(a, b));
    records
}

/// Drops the first `offset` records.
pub fn offset(records: Vec<&Record>, offset: usize) -> Vec<&Record> {
    if offset == 0 {
        return records;
    }
    records.into_iter().skip(offset).collect()
}

/// Keeps at most `limit` records.
pub fn limit(mut records: Vec<&Record>, limit: usize) -> Vec<&Record> {
    records.truncate(limit);
    records
}

/// Keeps the first record for each distinct value of `field`.
///
/// Values are compared with `==`, so `1` and `1.0` are the same key. Missing
/// fields share the `Null` key. Seen keys are scanned linearly, so this is
/// quadratic in the number of distinct keys.
pub fn distinct<'a>(records: Vec<&'a Record>, field: &str) -> Vec<&'a Record> {
    let mut seen: Vec<&Value> = Vec::new();
    records
        .into_iter()
        .filter(|&record| {
            let key = record.value(field);
            if seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        })
        .collect()
}

/// Materializes the records, keeping only `fields` when non-empty.
pub fn project(records: Vec<&Record>, fields: &[String]) -> Vec<Record> {
    if fields.is_empty() {
        return records.into_iter().cloned().collect();
    }
    records.into_iter().map(|r| r.project(fields)).collect()
}
