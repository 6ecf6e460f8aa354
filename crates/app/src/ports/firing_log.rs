//! Execution log port — append-only sink for firing records.

use std::future::Future;

use auditflow_domain::error::WorkflowError;
use auditflow_domain::firing::FiringRecord;
use auditflow_domain::id::RuleId;

/// Append-only store of [`FiringRecord`]s.
///
/// No update or delete operation is exposed; corrections are made by
/// emitting a new record.
pub trait FiringLog {
    /// Append a firing record.
    fn record(
        &self,
        firing: FiringRecord,
    ) -> impl Future<Output = Result<FiringRecord, WorkflowError>> + Send;

    /// Get the most recent firings, ordered newest-first.
    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<FiringRecord>, WorkflowError>> + Send;

    /// Find firings produced by a specific rule, ordered newest-first.
    fn find_by_rule(
        &self,
        rule_id: RuleId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<FiringRecord>, WorkflowError>> + Send;
}

impl<T: FiringLog + Send + Sync> FiringLog for std::sync::Arc<T> {
    fn record(
        &self,
        firing: FiringRecord,
    ) -> impl Future<Output = Result<FiringRecord, WorkflowError>> + Send {
        (**self).record(firing)
    }

    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<FiringRecord>, WorkflowError>> + Send {
        (**self).get_recent(limit)
    }

    fn find_by_rule(
        &self,
        rule_id: RuleId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<FiringRecord>, WorkflowError>> + Send {
        (**self).find_by_rule(rule_id, limit)
    }
}
