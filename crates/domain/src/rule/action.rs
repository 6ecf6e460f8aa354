//! Action — a typed, configured side effect a rule performs when it fires.

use serde::{Deserialize, Serialize};

/// Open-ended action type tag.
///
/// The catalogue must round-trip kinds the engine does not know yet, so
/// this is a string newtype rather than a closed enum. The executor
/// resolves kinds against host-registered handlers; an unregistered kind
/// fails that single action without aborting the rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionKind(String);

impl ActionKind {
    /// Wrap an arbitrary kind tag.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Send a notification through the host's delivery channel.
    #[must_use]
    pub fn notification() -> Self {
        Self::new("notification")
    }

    /// Change the status field of the triggering record.
    #[must_use]
    pub fn status_update() -> Self {
        Self::new("status_update")
    }

    /// Assign the triggering record to a user.
    #[must_use]
    pub fn assignment() -> Self {
        Self::new("assignment")
    }

    /// Call an external webhook.
    #[must_use]
    pub fn webhook() -> Self {
        Self::new("webhook")
    }

    /// The raw kind tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionKind {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One configured side effect in a rule's action sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// The handler tag to resolve against the host's action ports.
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Handler-specific configuration, opaque to the engine.
    #[serde(default)]
    pub config: serde_json::Value,
}

impl Action {
    /// Create an action with the given kind and configuration.
    #[must_use]
    pub fn new(kind: ActionKind, config: serde_json::Value) -> Self {
        Self { kind, config }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "action({})", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_well_known_kinds() {
        assert_eq!(ActionKind::notification().as_str(), "notification");
        assert_eq!(ActionKind::status_update().as_str(), "status_update");
        assert_eq!(ActionKind::assignment().as_str(), "assignment");
        assert_eq!(ActionKind::webhook().as_str(), "webhook");
    }

    #[test]
    fn should_preserve_unknown_kind_tags() {
        let kind = ActionKind::new("escalation_v2");
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"escalation_v2\"");
        let parsed: ActionKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, kind);
    }

    #[test]
    fn should_serialize_kind_under_type_key() {
        let action = Action::new(
            ActionKind::notification(),
            serde_json::json!({"recipient": "auditor"}),
        );
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "notification");
        assert_eq!(json["config"]["recipient"], "auditor");
    }

    #[test]
    fn should_deserialize_action_with_default_config() {
        let json = serde_json::json!({"type": "webhook"});
        let action: Action = serde_json::from_value(json).unwrap();
        assert_eq!(action.kind, ActionKind::webhook());
        assert!(action.config.is_null());
    }

    #[test]
    fn should_roundtrip_action_through_serde_json() {
        let action = Action::new(
            ActionKind::status_update(),
            serde_json::json!({"status": "escalated"}),
        );
        let json = serde_json::to_string(&action).unwrap();
        let parsed: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn should_display_action_with_kind() {
        let action = Action::new(ActionKind::webhook(), serde_json::json!({}));
        assert_eq!(action.to_string(), "action(webhook)");
    }
}
