//! Workflow rule — trigger → predicate → action reactions.
//!
//! Rules let the host system react to lifecycle events without manual
//! intervention. Each rule has a [`Trigger`] that determines when it
//! activates (optionally narrowed by a [`Predicate`]) and one or more
//! [`Action`]s to execute. Rules are independent — no rule references
//! another, so the catalogue is a flat, orderable collection.

mod action;
mod predicate;
mod trigger;

pub use action::{Action, ActionKind};
pub use predicate::{CompareOp, Comparison, FieldValue, Predicate};
pub use trigger::Trigger;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, WorkflowError};
use crate::id::RuleId;

/// A configured automation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRule {
    pub id: RuleId,
    pub name: String,
    pub description: String,
    /// Disabled rules are retained but never evaluated.
    pub enabled: bool,
    pub trigger: Trigger,
    /// Ordered, non-empty action sequence.
    pub actions: Vec<Action>,
}

impl WorkflowRule {
    /// Create a builder for constructing a [`WorkflowRule`].
    #[must_use]
    pub fn builder() -> WorkflowRuleBuilder {
        WorkflowRuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `description` is empty ([`ValidationError::EmptyDescription`])
    /// - `actions` is empty ([`ValidationError::NoActions`])
    pub fn validate(&self) -> Result<(), WorkflowError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.description.is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions.into());
        }
        Ok(())
    }

    /// Merge a partial update into this rule.
    ///
    /// Only the fields present in the patch change; callers re-validate
    /// afterwards.
    pub fn apply(&mut self, patch: RulePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(trigger) = patch.trigger {
            self.trigger = trigger;
        }
        if let Some(actions) = patch.actions {
            self.actions = actions;
        }
    }
}

/// Partial field set for catalogue updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub trigger: Option<Trigger>,
    pub actions: Option<Vec<Action>>,
}

/// Step-by-step builder for [`WorkflowRule`].
#[derive(Debug, Default)]
pub struct WorkflowRuleBuilder {
    id: Option<RuleId>,
    name: Option<String>,
    description: Option<String>,
    enabled: Option<bool>,
    trigger: Option<Trigger>,
    actions: Vec<Action>,
}

impl WorkflowRuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder, validate, and return a [`WorkflowRule`].
    ///
    /// A missing trigger defaults to `audit:created`; `enabled` defaults
    /// to true.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<WorkflowRule, WorkflowError> {
        let rule = WorkflowRule {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            trigger: self.trigger.unwrap_or_else(|| {
                Trigger::new(crate::entity::EntityKind::Audit, crate::event::EventKind::Created)
            }),
            actions: self.actions,
        };
        rule.validate()?;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::event::EventKind;

    fn valid_action() -> Action {
        Action::new(
            ActionKind::notification(),
            serde_json::json!({"recipient": "auditor"}),
        )
    }

    fn valid_rule() -> WorkflowRule {
        WorkflowRule::builder()
            .name("Escalate overdue constats")
            .description("Notify the lead auditor when a constat goes overdue")
            .trigger(Trigger::new(EntityKind::Constat, EventKind::Overdue))
            .action(valid_action())
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_rule_when_required_fields_provided() {
        let rule = valid_rule();
        assert_eq!(rule.name, "Escalate overdue constats");
        assert!(rule.enabled);
        assert_eq!(rule.actions.len(), 1);
        assert!(rule.trigger.conditions.is_none());
    }

    #[test]
    fn should_default_to_enabled_when_not_specified() {
        let rule = valid_rule();
        assert!(rule.enabled);
    }

    #[test]
    fn should_build_disabled_rule_when_enabled_is_false() {
        let rule = WorkflowRule::builder()
            .name("Disabled rule")
            .description("kept but never evaluated")
            .enabled(false)
            .trigger(Trigger::new(EntityKind::Audit, EventKind::Created))
            .action(valid_action())
            .build()
            .unwrap();
        assert!(!rule.enabled);
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = WorkflowRule::builder()
            .description("desc")
            .action(valid_action())
            .build();
        assert!(matches!(
            result,
            Err(WorkflowError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_description_is_empty() {
        let result = WorkflowRule::builder()
            .name("No description")
            .action(valid_action())
            .build();
        assert!(matches!(
            result,
            Err(WorkflowError::Validation(ValidationError::EmptyDescription))
        ));
    }

    #[test]
    fn should_return_validation_error_when_actions_is_empty() {
        let result = WorkflowRule::builder()
            .name("No actions")
            .description("desc")
            .build();
        assert!(matches!(
            result,
            Err(WorkflowError::Validation(ValidationError::NoActions))
        ));
    }

    #[test]
    fn should_accumulate_multiple_actions_in_order() {
        let rule = WorkflowRule::builder()
            .name("Notify then escalate")
            .description("order matters")
            .trigger(Trigger::new(EntityKind::Audit, EventKind::StatusChanged))
            .action(Action::new(ActionKind::notification(), serde_json::json!({})))
            .action(Action::new(ActionKind::status_update(), serde_json::json!({})))
            .build()
            .unwrap();
        assert_eq!(rule.actions.len(), 2);
        assert_eq!(rule.actions[0].kind, ActionKind::notification());
        assert_eq!(rule.actions[1].kind, ActionKind::status_update());
    }

    #[test]
    fn should_set_custom_id_via_builder() {
        let id = RuleId::new();
        let rule = WorkflowRule::builder()
            .id(id)
            .name("Custom ID")
            .description("desc")
            .action(valid_action())
            .build()
            .unwrap();
        assert_eq!(rule.id, id);
    }

    #[test]
    fn should_roundtrip_rule_through_serde_json() {
        let rule = valid_rule();
        let json = serde_json::to_string(&rule).unwrap();
        let parsed: WorkflowRule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn should_apply_patch_fields_and_keep_the_rest() {
        let mut rule = valid_rule();
        let id = rule.id;
        rule.apply(RulePatch {
            name: Some("Renamed".to_string()),
            enabled: Some(false),
            ..RulePatch::default()
        });
        assert_eq!(rule.id, id);
        assert_eq!(rule.name, "Renamed");
        assert!(!rule.enabled);
        assert_eq!(rule.description, "Notify the lead auditor when a constat goes overdue");
        assert_eq!(rule.actions.len(), 1);
    }

    #[test]
    fn should_fail_validation_after_patch_empties_actions() {
        let mut rule = valid_rule();
        rule.apply(RulePatch {
            actions: Some(vec![]),
            ..RulePatch::default()
        });
        assert!(matches!(
            rule.validate(),
            Err(WorkflowError::Validation(ValidationError::NoActions))
        ));
    }

    #[test]
    fn should_deserialize_patch_with_partial_fields() {
        let patch: RulePatch =
            serde_json::from_value(serde_json::json!({"enabled": false})).unwrap();
        assert_eq!(patch.enabled, Some(false));
        assert!(patch.name.is_none());
        assert!(patch.trigger.is_none());
    }
}
