//! Trigger — the event pattern that activates a workflow rule.

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::event::{Event, EventKind};
use crate::rule::predicate::Predicate;

/// Describes which events a rule listens for.
///
/// Matching is two-phase: the cheap entity/event equality check first,
/// then the optional predicate against the payload. An event on a
/// different entity kind can never match, regardless of predicate content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// The record kind to watch.
    pub entity: EntityKind,
    /// The lifecycle transition to watch.
    pub event: EventKind,
    /// Optional field-level conditions; absent means always match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Predicate>,
}

impl Trigger {
    /// Create a trigger without conditions.
    #[must_use]
    pub fn new(entity: EntityKind, event: EventKind) -> Self {
        Self {
            entity,
            event,
            conditions: None,
        }
    }

    /// Attach a predicate to this trigger.
    #[must_use]
    pub fn with_conditions(mut self, conditions: Predicate) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Check whether this trigger matches a given event.
    #[must_use]
    pub fn matches_event(&self, event: &Event) -> bool {
        if self.entity != event.entity || self.event != event.event_type {
            return false;
        }
        match &self.conditions {
            None => true,
            Some(predicate) => predicate.matches(&event.payload),
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.entity, self.event)
    }
}
