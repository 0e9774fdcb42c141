//! Structured filter predicates

use crate::employee::{EmployeeRecord, Field, FieldValue};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Scalar operand of a comparison constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstraintValue {
    Number(i64),
    Date(DateTime<Utc>),
    Text(String),
}

/// Condition attached to one schema field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Constraint {
    Equals(ConstraintValue),
    /// Inclusive lower bound
    AtLeast(ConstraintValue),
    /// Inclusive upper bound
    AtMost(ConstraintValue),
    /// Exclusive upper bound
    LessThan(ConstraintValue),
    /// Case-insensitive substring match of the literal text
    MatchesPattern(String),
    /// Value (or any element of a list) is a member, case-insensitively
    OneOf(BTreeSet<String>),
}

impl Constraint {
    /// Evaluates the constraint against a record value
    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Constraint::MatchesPattern(pattern), FieldValue::Text(text)) => {
                text.to_lowercase().contains(&pattern.to_lowercase())
            }
            (Constraint::MatchesPattern(pattern), FieldValue::List(items)) => {
                let pattern = pattern.to_lowercase();
                items.iter().any(|i| i.to_lowercase().contains(&pattern))
            }
            (Constraint::OneOf(set), FieldValue::Text(text)) => {
                set.iter().any(|s| s.eq_ignore_ascii_case(text))
            }
            (Constraint::OneOf(set), FieldValue::List(items)) => items
                .iter()
                .any(|i| set.iter().any(|s| s.eq_ignore_ascii_case(i))),
            (Constraint::Equals(expected), actual) => {
                compare(actual, expected) == Some(std::cmp::Ordering::Equal)
            }
            (Constraint::AtLeast(bound), actual) => {
                compare(actual, bound).is_some_and(|o| o.is_ge())
            }
            (Constraint::AtMost(bound), actual) => {
                compare(actual, bound).is_some_and(|o| o.is_le())
            }
            (Constraint::LessThan(bound), actual) => {
                compare(actual, bound).is_some_and(|o| o.is_lt())
            }
            _ => false,
        }
    }
}

/// Orders a record value against a constraint operand; `None` on type mismatch
fn compare(actual: FieldValue<'_>, expected: &ConstraintValue) -> Option<std::cmp::Ordering> {
    match (actual, expected) {
        (FieldValue::Number(a), ConstraintValue::Number(b)) => a.partial_cmp(&(*b as f64)),
        (FieldValue::Date(a), ConstraintValue::Date(b)) => Some(a.cmp(b)),
        (FieldValue::Text(a), ConstraintValue::Text(b)) => {
            Some(a.to_lowercase().cmp(&b.to_lowercase()))
        }
        _ => None,
    }
}

/// Conjunction of per-field constraints; absent fields are unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterPredicate {
    constraints: BTreeMap<Field, Constraint>,
}

impl FilterPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&Constraint> {
        self.constraints.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &Constraint)> {
        self.constraints.iter().map(|(field, c)| (*field, c))
    }

    /// Whether `record` satisfies every constraint
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        self.constraints
            .iter()
            .all(|(field, constraint)| constraint.matches(record.field_value(*field)))
    }
}

/// Merges extractor output into a [`FilterPredicate`], enforcing that no
/// field is constrained twice
#[derive(Debug, Default)]
pub struct PredicateBuilder {
    constraints: BTreeMap<Field, (Constraint, &'static str)>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a constraint produced by the stage named `stage`
    pub fn insert(&mut self, stage: &'static str, field: Field, constraint: Constraint) -> Result<()> {
        if let Some((_, owner)) = self.constraints.get(&field) {
            debug_assert!(false, "field {} constrained by {} and {}", field, owner, stage);
            return Err(Error::Internal(format!(
                "field {} constrained by both {} and {}",
                field, owner, stage
            )));
        }
        self.constraints.insert(field, (constraint, stage));
        Ok(())
    }

    pub fn build(self) -> FilterPredicate {
        FilterPredicate {
            constraints: self
                .constraints
                .into_iter()
                .map(|(field, (constraint, _))| (field, constraint))
                .collect(),
        }
    }
}
