//! Action executor — runs a matched rule's actions with per-action
//! failure isolation.
//!
//! The executor is intentionally action-kind-agnostic: it is a thin
//! isolator plus a lookup table, so adding a new action kind never
//! requires touching dispatch or evaluation logic.

use std::collections::HashMap;
use std::sync::Arc;

use auditflow_domain::event::Event;
use auditflow_domain::firing::ActionResult;
use auditflow_domain::rule::{ActionKind, WorkflowRule};

use crate::ports::ActionHandler;

/// Lookup table from action kind to host-registered handler.
///
/// The host registers its handlers at startup; the engine only ever asks
/// whether a handler exists for a kind, never which one it is.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<ActionKind, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an action kind, replacing any previous one.
    pub fn register(&mut self, kind: ActionKind, handler: Arc<dyn ActionHandler>) {
        self.handlers.insert(kind, handler);
    }

    /// Look up the handler for an action kind.
    #[must_use]
    pub fn get(&self, kind: &ActionKind) -> Option<&Arc<dyn ActionHandler>> {
        self.handlers.get(kind)
    }

    /// Whether a handler is registered for the given kind.
    #[must_use]
    pub fn is_registered(&self, kind: &ActionKind) -> bool {
        self.handlers.contains_key(kind)
    }
}

/// Runs the actions of a matched rule, sequentially and in order.
///
/// Sequential execution keeps the ordering guarantee trivially true:
/// notify-then-escalate is never observed as escalate-then-notify.
pub struct ActionExecutor {
    registry: Arc<ActionRegistry>,
}

impl ActionExecutor {
    /// Create an executor backed by the given registry.
    #[must_use]
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    /// Execute every action of `rule` against `event`.
    ///
    /// Returns one [`ActionResult`] per action, preserving order. A
    /// failing action never prevents subsequent actions from running —
    /// rules are best-effort side effects, not transactions. Unknown
    /// action kinds are recorded as failures and skipped, keeping the
    /// catalogue forward-compatible with kinds added by the host.
    pub async fn execute(&self, rule: &WorkflowRule, event: &Event) -> Vec<ActionResult> {
        let mut results = Vec::with_capacity(rule.actions.len());

        for (index, action) in rule.actions.iter().enumerate() {
            let result = match self.registry.get(&action.kind) {
                None => {
                    tracing::warn!(
                        rule_id = %rule.id,
                        action_index = index,
                        kind = %action.kind,
                        "no handler registered for action kind"
                    );
                    ActionResult::failed(
                        index,
                        action.kind.clone(),
                        format!("unknown action type: {}", action.kind),
                    )
                }
                Some(handler) => match handler.execute(&action.config, event).await {
                    Ok(()) => ActionResult::succeeded(index, action.kind.clone()),
                    Err(err) => {
                        tracing::warn!(
                            rule_id = %rule.id,
                            action_index = index,
                            kind = %action.kind,
                            error = %err,
                            "action execution failed"
                        );
                        ActionResult::failed(index, action.kind.clone(), err.to_string())
                    }
                },
            };
            results.push(result);
        }

        results
    }
}
