//! Action port — host-owned side effects resolved by action kind.

use std::future::Future;
use std::pin::Pin;

use auditflow_domain::event::Event;

/// A host-registered handler for one action kind.
///
/// Handlers own the concrete side effect (notification delivery, record
/// mutation, webhook invocation) and any retry policy it needs; the
/// engine only records success or failure. The returned future is boxed
/// so handlers of different kinds can live behind one lookup table.
pub trait ActionHandler: Send + Sync {
    /// Execute the action with its rule-supplied configuration against
    /// the triggering event.
    fn execute<'a>(
        &'a self,
        config: &'a serde_json::Value,
        event: &'a Event,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;
}
