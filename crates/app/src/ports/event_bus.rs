//! Event bus port — fire-and-forget delivery of lifecycle events.

use std::future::Future;

use auditflow_domain::error::WorkflowError;
use auditflow_domain::event::Event;

/// Publishes lifecycle events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), WorkflowError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), WorkflowError>> + Send {
        (**self).publish(event)
    }
}
