//! Predicate — the field-level condition language for triggers.
//!
//! A predicate maps payload field names to comparisons. All listed fields
//! must be satisfied (logical AND); the language defines no OR/NOT
//! composition. A field absent from the payload is a non-match, not an
//! error, since events from different entity kinds carry different shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A typed payload field value usable in comparisons.
///
/// Objects and nulls are not comparable; a payload field holding one of
/// those never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Convert a JSON payload value into a comparable field value.
    ///
    /// Returns `None` for nulls, objects, and non-finite numbers.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Self::Number),
            serde_json::Value::String(s) => Some(Self::String(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            serde_json::Value::Null | serde_json::Value::Object(_) => None,
        }
    }
}

/// Comparison operator for the explicit `{op, value}` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

/// A single field comparison.
///
/// Serialized either as a bare value (shorthand for equality) or as an
/// explicit `{"op": ..., "value": ...}` pair. The explicit form is tried
/// first during deserialization so the two shapes never collide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Comparison {
    /// Explicit operator form, e.g. `{"op": "gt", "value": 10000}`.
    Check { op: CompareOp, value: FieldValue },
    /// Bare expected value, compared for equality.
    Equals(FieldValue),
}

impl Comparison {
    /// Evaluate this comparison against a payload field value.
    #[must_use]
    pub fn matches(&self, actual: &serde_json::Value) -> bool {
        let Some(actual) = FieldValue::from_json(actual) else {
            return false;
        };
        match self {
            Self::Equals(expected) => actual == *expected,
            Self::Check { op, value } => match op {
                CompareOp::Eq => actual == *value,
                CompareOp::Neq => actual != *value,
                CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte => {
                    // Ordering is defined for numeric fields only.
                    match (&actual, value) {
                        (FieldValue::Number(a), FieldValue::Number(e)) => match op {
                            CompareOp::Gt => a > e,
                            CompareOp::Gte => a >= e,
                            CompareOp::Lt => a < e,
                            CompareOp::Lte => a <= e,
                            _ => unreachable!(),
                        },
                        _ => false,
                    }
                }
                CompareOp::In => match value {
                    FieldValue::List(options) => options.contains(&actual),
                    _ => false,
                },
            },
        }
    }
}

/// A conjunction of per-field comparisons over an event payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Predicate(pub BTreeMap<String, Comparison>);

impl Predicate {
    /// Evaluate the predicate against an event payload.
    ///
    /// Every listed field must exist in the payload and satisfy its
    /// comparison. An empty predicate always matches.
    #[must_use]
    pub fn matches(&self, payload: &serde_json::Value) -> bool {
        self.0.iter().all(|(field, comparison)| {
            payload
                .get(field)
                .is_some_and(|actual| comparison.matches(actual))
        })
    }
}
