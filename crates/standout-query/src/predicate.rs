//! Predicates in disjunctive normal form.
//!
//! A [`Predicate`] is an OR of [`ConditionGroup`]s, each of which is an AND of
//! [`Condition`]s:
//!
//! ```text
//! match = group_0 ∨ group_1 ∨ ...
//! group = cond_0 ∧ cond_1 ∧ ...      (an empty group never matches)
//! ```
//!
//! The predicate always holds at least one group. Its initial state is a
//! single empty group, which matches nothing.

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::record::Record;

/// Conditions combined with AND.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionGroup {
    conditions: Vec<Condition>,
}

impl ConditionGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        ConditionGroup::default()
    }

    /// Appends a condition.
    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    /// Returns the conditions in this group.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns the number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns `true` if the group holds no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns `true` if every condition matches.
    ///
    /// An empty group never matches.
    pub fn matches(&self, record: &Record) -> bool {
        !self.conditions.is_empty() && self.conditions.iter().all(|c| c.matches_record(record))
    }
}

impl From<Vec<Condition>> for ConditionGroup {
    fn from(conditions: Vec<Condition>) -> Self {
        ConditionGroup { conditions }
    }
}

/// Condition groups combined with OR.
///
/// # Example
///
/// ```
/// use standout_query::{Condition, Op, Predicate, Record};
///
/// // age > 30 OR department = "HR"
/// let mut predicate = Predicate::new();
/// predicate.and_where(Condition::new("age", Op::Gt, 30));
/// predicate.or_where(Condition::new("department", Op::Eq, "HR"));
///
/// assert_eq!(predicate.groups().len(), 2);
/// assert!(predicate.matches(&Record::new().with("age", 25).with("department", "HR")));
/// assert!(!predicate.matches(&Record::new().with("age", 25).with("department", "IT")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ConditionGroup>", into = "Vec<ConditionGroup>")]
pub struct Predicate {
    groups: Vec<ConditionGroup>,
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate {
            groups: vec![ConditionGroup::new()],
        }
    }
}

impl Predicate {
    /// Creates a predicate in its initial state: one empty group.
    pub fn new() -> Self {
        Predicate::default()
    }

    /// Appends a condition to the last group.
    pub fn and_where(&mut self, condition: Condition) {
        match self.groups.last_mut() {
            Some(group) => group.push(condition),
            None => self.groups.push(ConditionGroup::from(vec![condition])),
        }
    }

    /// Starts a new group holding exactly this condition.
    ///
    /// In the initial state (one empty group) this behaves like
    /// [`and_where`](Self::and_where), so the first condition always seeds
    /// group 0 and no empty leading group is produced.
    pub fn or_where(&mut self, condition: Condition) {
        if self.is_initial() {
            self.and_where(condition);
        } else {
            self.groups.push(ConditionGroup::from(vec![condition]));
        }
    }

    /// Returns the groups in order.
    pub fn groups(&self) -> &[ConditionGroup] {
        &self.groups
    }

    /// Returns `true` if no condition has been configured in any group.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(ConditionGroup::is_empty)
    }

    /// Returns the total number of conditions across all groups.
    pub fn condition_count(&self) -> usize {
        self.groups.iter().map(ConditionGroup::len).sum()
    }

    /// Returns `true` if at least one group matches the record.
    ///
    /// Empty groups never match, so an empty predicate matches nothing.
    /// Read paths that want "no predicate means everything" check
    /// [`is_empty`](Self::is_empty) first.
    pub fn matches(&self, record: &Record) -> bool {
        self.groups.iter().any(|group| group.matches(record))
    }

    /// Restores the initial state.
    pub fn clear(&mut self) {
        *self = Predicate::default();
    }

    fn is_initial(&self) -> bool {
        self.groups.len() == 1 && self.groups[0].is_empty()
    }
}

impl From<Vec<ConditionGroup>> for Predicate {
    fn from(groups: Vec<ConditionGroup>) -> Self {
        if groups.is_empty() {
            Predicate::default()
        } else {
            Predicate { groups }
        }
    }
}

impl From<Predicate> for Vec<ConditionGroup> {
    fn from(predicate: Predicate) -> Self {
        predicate.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Op;

    fn person(age: i64, dept: &str) -> Record {
        Record::new().with("age", age).with("department", dept)
    }

    #[test]
    fn initial_state_is_one_empty_group() {
        let p = Predicate::new();
        assert_eq!(p.groups().len(), 1);
        assert!(p.groups()[0].is_empty());
        assert!(p.is_empty());
    }

    #[test]
    fn empty_predicate_matches_nothing() {
        let p = Predicate::new();
        assert!(!p.matches(&person(30, "IT")));
        assert!(!p.matches(&Record::new()));
    }

    #[test]
    fn and_where_accumulates_into_last_group() {
        let mut p = Predicate::new();
        p.and_where(Condition::new("age", Op::Gt, 20));
        p.and_where(Condition::new("department", Op::Eq, "IT"));

        assert_eq!(p.groups().len(), 1);
        assert_eq!(p.groups()[0].len(), 2);
        assert!(p.matches(&person(30, "IT")));
        assert!(!p.matches(&person(30, "HR")));
    }

    #[test]
    fn first_or_where_seeds_group_zero() {
        let mut p = Predicate::new();
        p.or_where(Condition::new("age", Op::Gt, 20));

        assert_eq!(p.groups().len(), 1);
        assert_eq!(p.groups()[0].len(), 1);
    }

    #[test]
    fn or_where_starts_new_group() {
        let mut p = Predicate::new();
        p.and_where(Condition::new("age", Op::Gt, 30));
        p.or_where(Condition::new("department", Op::Eq, "HR"));

        assert_eq!(p.groups().len(), 2);
        assert!(p.matches(&person(35, "IT")));
        assert!(p.matches(&person(25, "HR")));
        assert!(!p.matches(&person(25, "IT")));
    }

    #[test]
    fn and_where_after_or_where_extends_the_or_group() {
        // (age > 30) OR (department = HR AND age < 20)
        let mut p = Predicate::new();
        p.and_where(Condition::new("age", Op::Gt, 30));
        p.or_where(Condition::new("department", Op::Eq, "HR"));
        p.and_where(Condition::new("age", Op::Lt, 20));

        assert_eq!(p.groups()[0].len(), 1);
        assert_eq!(p.groups()[1].len(), 2);
        assert!(p.matches(&person(18, "HR")));
        assert!(!p.matches(&person(25, "HR")));
        assert!(p.matches(&person(40, "IT")));
    }

    #[test]
    fn clear_restores_initial_state() {
        let mut p = Predicate::new();
        p.and_where(Condition::new("age", Op::Gt, 30));
        p.or_where(Condition::new("age", Op::Lt, 10));
        p.clear();

        assert_eq!(p, Predicate::new());
        assert_eq!(p.condition_count(), 0);
    }

    #[test]
    fn empty_group_never_matches() {
        assert!(!ConditionGroup::new().matches(&person(1, "IT")));
    }

    #[test]
    fn serde_normalizes_empty_group_list() {
        let p: Predicate = serde_json::from_str("[]").unwrap();
        assert_eq!(p, Predicate::new());

        let p: Predicate =
            serde_json::from_str(r#"[[{"field": "age", "op": ">", "value": 30}]]"#).unwrap();
        assert_eq!(p.condition_count(), 1);
        assert!(p.matches(&person(31, "IT")));
    }
}
