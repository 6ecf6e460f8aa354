//! Firing record — an append-only execution-log entry.
//!
//! One record is created per rule match and never mutated afterwards.
//! Corrections are made by emitting a new record, never by rewriting
//! history.

use serde::{Deserialize, Serialize};

use crate::id::{EventId, FiringId, RuleId};
use crate::rule::ActionKind;
use crate::time::Timestamp;

/// Outcome of a single action within a firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Succeeded,
    Failed,
}

/// Per-action result, in the rule's action order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Position of the action in the rule's `actions` sequence.
    pub action_index: usize,
    /// The action kind that was attempted.
    pub kind: ActionKind,
    pub status: ActionStatus,
    /// Failure details; `None` on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    /// Record a successful action.
    #[must_use]
    pub fn succeeded(action_index: usize, kind: ActionKind) -> Self {
        Self {
            action_index,
            kind,
            status: ActionStatus::Succeeded,
            error: None,
        }
    }

    /// Record a failed action with its error details.
    #[must_use]
    pub fn failed(action_index: usize, kind: ActionKind, error: impl Into<String>) -> Self {
        Self {
            action_index,
            kind,
            status: ActionStatus::Failed,
            error: Some(error.into()),
        }
    }

    /// Whether the action completed without error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Succeeded
    }
}

/// One evaluation cycle where a rule's trigger and predicate both matched
/// an event, producing action results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiringRecord {
    pub id: FiringId,
    pub rule_id: RuleId,
    /// The event that caused this firing.
    pub event_id: EventId,
    pub matched_at: Timestamp,
    /// One entry per action in the rule, preserving order.
    pub action_results: Vec<ActionResult>,
}

impl FiringRecord {
    /// Create a firing record stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(rule_id: RuleId, event_id: EventId, action_results: Vec<ActionResult>) -> Self {
        Self {
            id: FiringId::new(),
            rule_id,
            event_id,
            matched_at: crate::time::now(),
            action_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_mark_succeeded_result_without_error() {
        let result = ActionResult::succeeded(0, ActionKind::notification());
        assert!(result.is_success());
        assert!(result.error.is_none());
    }

    #[test]
    fn should_mark_failed_result_with_error_details() {
        let result = ActionResult::failed(1, ActionKind::webhook(), "connection refused");
        assert!(!result.is_success());
        assert_eq!(result.error.as_deref(), Some("connection refused"));
        assert_eq!(result.action_index, 1);
    }

    #[test]
    fn should_stamp_id_and_time_on_creation() {
        let before = crate::time::now();
        let record = FiringRecord::new(
            RuleId::new(),
            EventId::new(),
            vec![ActionResult::succeeded(0, ActionKind::notification())],
        );
        assert!(record.matched_at >= before);
        assert_eq!(record.action_results.len(), 1);
    }

    #[test]
    fn should_roundtrip_firing_record_through_serde_json() {
        let record = FiringRecord::new(
            RuleId::new(),
            EventId::new(),
            vec![
                ActionResult::succeeded(0, ActionKind::notification()),
                ActionResult::failed(1, ActionKind::webhook(), "timeout"),
            ],
        );
        let json = serde_json::to_string(&record).unwrap();
        let parsed: FiringRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn should_omit_error_field_for_successful_results() {
        let json =
            serde_json::to_value(ActionResult::succeeded(0, ActionKind::notification())).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["status"], "succeeded");
    }
}
