//! Event — a lifecycle notification produced by the host application.
//!
//! Events are transient: the engine evaluates them against the rule
//! catalogue and drops them. Only firing outcomes are persisted, through
//! the execution log.

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::id::EventId;
use crate::time::Timestamp;

/// The lifecycle transition an event describes.
///
/// `Overdue` and `BudgetExceeded` are synthetic: the host derives them
/// from scheduled scans and emits them as ordinary events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Created,
    Updated,
    StatusChanged,
    Deleted,
    Overdue,
    BudgetExceeded,
}

impl EventKind {
    /// Stable snake_case name, matching the serde representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged => "status_changed",
            Self::Deleted => "deleted",
            Self::Overdue => "overdue",
            Self::BudgetExceeded => "budget_exceeded",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lifecycle event on a host record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Which record kind the event concerns.
    pub entity: EntityKind,
    /// Which lifecycle transition occurred.
    pub event_type: EventKind,
    /// Opaque host-side identifier of the affected record.
    pub record_id: String,
    /// Arbitrary field snapshot supplied by the host; predicates read it.
    pub payload: serde_json::Value,
    pub occurred_at: Timestamp,
}

impl Event {
    /// Create a new event stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(
        entity: EntityKind,
        event_type: EventKind,
        record_id: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: EventId::new(),
            entity,
            event_type,
            record_id: record_id.into(),
            payload,
            occurred_at: crate::time::now(),
        }
    }
}
