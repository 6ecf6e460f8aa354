//! Rule repository port — persistence for the rule catalogue.

use std::future::Future;

use auditflow_domain::error::WorkflowError;
use auditflow_domain::id::RuleId;
use auditflow_domain::rule::WorkflowRule;

/// Repository for persisting and querying [`WorkflowRule`]s.
///
/// Listing operations return rules in stable insertion order; that order
/// is the tie-break used when several rules match the same event.
/// Mutations are durable before the returned future resolves.
pub trait RuleRepository {
    /// Create a new rule in storage.
    fn create(
        &self,
        rule: WorkflowRule,
    ) -> impl Future<Output = Result<WorkflowRule, WorkflowError>> + Send;

    /// Get a rule by its unique identifier.
    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<WorkflowRule>, WorkflowError>> + Send;

    /// Get all rules, in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<WorkflowRule>, WorkflowError>> + Send;

    /// Get all enabled rules, in insertion order.
    fn get_enabled(&self) -> impl Future<Output = Result<Vec<WorkflowRule>, WorkflowError>> + Send;

    /// Update an existing rule.
    fn update(
        &self,
        rule: WorkflowRule,
    ) -> impl Future<Output = Result<WorkflowRule, WorkflowError>> + Send;

    /// Delete a rule by its unique identifier. Deleting an absent id is a
    /// no-op, not an error.
    fn delete(&self, id: RuleId) -> impl Future<Output = Result<(), WorkflowError>> + Send;
}
