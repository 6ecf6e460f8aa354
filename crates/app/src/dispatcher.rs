//! Event dispatcher — matches incoming events against the rule catalogue
//! and fires the rules that match.
//!
//! For each event the dispatcher takes one snapshot of the enabled rules
//! (mutations made mid-dispatch do not affect the current event), filters
//! by trigger and predicate, and executes the surviving rules in catalogue
//! order. It never short-circuits on one rule's failure — rules are
//! independent business reactions, not a pipeline.

use auditflow_domain::error::WorkflowError;
use auditflow_domain::event::Event;
use auditflow_domain::firing::{ActionResult, FiringRecord};
use auditflow_domain::id::RuleId;

use crate::executor::ActionExecutor;
use crate::ports::{FiringLog, RuleRepository};

/// Result of one rule firing during a dispatch.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub rule_id: RuleId,
    /// Per-action results, in the rule's action order.
    pub action_results: Vec<ActionResult>,
}

/// Dispatches lifecycle events to matching enabled rules.
pub struct EventDispatcher<RR, FL> {
    rule_repo: RR,
    executor: ActionExecutor,
    firing_log: FL,
}

impl<RR, FL> EventDispatcher<RR, FL>
where
    RR: RuleRepository,
    FL: FiringLog,
{
    /// Create a new dispatcher.
    pub fn new(rule_repo: RR, executor: ActionExecutor, firing_log: FL) -> Self {
        Self {
            rule_repo,
            executor,
            firing_log,
        }
    }

    /// Process a single event against all enabled rules.
    ///
    /// Matched rules fire in catalogue insertion order; every firing is
    /// appended to the execution log. Action failures are isolated per
    /// action and never abort the dispatch; a failed log write is warned
    /// and skipped so later rules still fire.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the rule snapshot cannot be loaded.
    pub async fn dispatch(&self, event: &Event) -> Result<Vec<DispatchOutcome>, WorkflowError> {
        let rules = self.rule_repo.get_enabled().await?;
        let mut outcomes = Vec::new();

        for rule in &rules {
            if !rule.trigger.matches_event(event) {
                continue;
            }

            tracing::debug!(rule_id = %rule.id, rule_name = %rule.name, event_id = %event.id, "rule matched");
            let action_results = self.executor.execute(rule, event).await;

            let record = FiringRecord::new(rule.id, event.id, action_results.clone());
            if let Err(err) = self.firing_log.record(record).await {
                tracing::warn!(rule_id = %rule.id, error = %err, "failed to append firing record");
            }

            outcomes.push(DispatchOutcome {
                rule_id: rule.id,
                action_results,
            });
        }

        Ok(outcomes)
    }
}
