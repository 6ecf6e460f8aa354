//! Rule service — catalogue use-cases for managing workflow rules.

use auditflow_domain::error::{NotFoundError, WorkflowError};
use auditflow_domain::id::RuleId;
use auditflow_domain::rule::{RulePatch, WorkflowRule};

use crate::ports::RuleRepository;

/// Application service for rule catalogue operations.
///
/// Mutations validate invariants before touching the repository, so a
/// rejected rule is never partially stored.
pub struct RuleService<R> {
    repo: R,
}

impl<R: RuleRepository> RuleService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new rule after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, rule), fields(rule_name = %rule.name))]
    pub async fn create_rule(&self, rule: WorkflowRule) -> Result<WorkflowRule, WorkflowError> {
        rule.validate()?;
        self.repo.create(rule).await
    }

    /// Look up a rule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when no rule with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(&self, id: RuleId) -> Result<WorkflowRule, WorkflowError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "WorkflowRule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all rules in catalogue insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rules(&self) -> Result<Vec<WorkflowRule>, WorkflowError> {
        self.repo.get_all().await
    }

    /// List all enabled rules in catalogue insertion order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_enabled(&self) -> Result<Vec<WorkflowRule>, WorkflowError> {
        self.repo.get_enabled().await
    }

    /// Merge a partial update into an existing rule and re-validate.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when `id` is absent,
    /// [`WorkflowError::Validation`] when the merged rule violates an
    /// invariant, or a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_rule(
        &self,
        id: RuleId,
        patch: RulePatch,
    ) -> Result<WorkflowRule, WorkflowError> {
        let mut rule = self.get_rule(id).await?;
        rule.apply(patch);
        rule.validate()?;
        self.repo.update(rule).await
    }

    /// Delete a rule by id.
    ///
    /// Deleting an absent id is a no-op, which keeps UI retry logic simple.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(&self, id: RuleId) -> Result<(), WorkflowError> {
        self.repo.delete(id).await
    }

    /// Flip the `enabled` flag of a rule.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] when `id` is absent, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_rule(&self, id: RuleId) -> Result<WorkflowRule, WorkflowError> {
        let mut rule = self.get_rule(id).await?;
        rule.enabled = !rule.enabled;
        self.repo.update(rule).await
    }
}
