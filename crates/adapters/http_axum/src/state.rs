//! Shared application state for axum handlers.

use std::sync::Arc;

use auditflow_app::ports::{EventPublisher, FiringLog, RuleRepository};
use auditflow_app::services::rule_service::RuleService;

/// Application state shared across all axum handlers.
///
/// Generic over the rule repository, firing log, and event publisher to
/// avoid dynamic dispatch. `Clone` is implemented manually so the
/// underlying types themselves do not need to be `Clone` — only the `Arc`
/// wrappers are cloned.
pub struct AppState<RR, FL, EP> {
    /// Rule catalogue CRUD service.
    pub rule_service: Arc<RuleService<RR>>,
    /// Execution log for querying past firings.
    pub firing_log: Arc<FL>,
    /// Event bus handle for accepting host events over HTTP.
    pub publisher: Arc<EP>,
}

impl<RR, FL, EP> Clone for AppState<RR, FL, EP> {
    fn clone(&self) -> Self {
        Self {
            rule_service: Arc::clone(&self.rule_service),
            firing_log: Arc::clone(&self.firing_log),
            publisher: Arc::clone(&self.publisher),
        }
    }
}

impl<RR, FL, EP> AppState<RR, FL, EP>
where
    RR: RuleRepository + Send + Sync + 'static,
    FL: FiringLog + Send + Sync + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(rule_service: RuleService<RR>, firing_log: FL, publisher: EP) -> Self {
        Self {
            rule_service: Arc::new(rule_service),
            firing_log: Arc::new(firing_log),
            publisher: Arc::new(publisher),
        }
    }

    /// Create a new application state from pre-wrapped `Arc` handles.
    ///
    /// Use this when the firing log or publisher is shared with the
    /// dispatch loop before constructing the HTTP state.
    pub fn from_arcs(
        rule_service: Arc<RuleService<RR>>,
        firing_log: Arc<FL>,
        publisher: Arc<EP>,
    ) -> Self {
        Self {
            rule_service,
            firing_log,
            publisher,
        }
    }
}
