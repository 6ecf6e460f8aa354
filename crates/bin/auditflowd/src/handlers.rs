//! Built-in action handlers registered at startup.
//!
//! These are intentionally thin: auditflowd has no mail server or ticket
//! system of its own, so the stock handlers log the intended side effect
//! through `tracing` and let operators plug richer handlers in later.

use std::future::Future;
use std::pin::Pin;

use anyhow::Context;

use auditflow_app::ports::ActionHandler;
use auditflow_domain::event::Event;

/// Emits a notification as a structured log line.
///
/// Expects a `recipient` string in the action config; an optional
/// `message` is included verbatim.
pub struct LogNotificationHandler;

impl ActionHandler for LogNotificationHandler {
    fn execute<'a>(
        &'a self,
        config: &'a serde_json::Value,
        event: &'a Event,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let recipient = config
                .get("recipient")
                .and_then(serde_json::Value::as_str)
                .context("notification config is missing a 'recipient' field")?;
            let message = config
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default();

            tracing::info!(
                recipient,
                message,
                entity = %event.entity,
                event_type = %event.event_type,
                record_id = %event.record_id,
                "notification"
            );
            Ok(())
        })
    }
}

/// Logs a requested status transition on the affected record.
///
/// Expects a `status` string in the action config.
pub struct LogStatusUpdateHandler;

impl ActionHandler for LogStatusUpdateHandler {
    fn execute<'a>(
        &'a self,
        config: &'a serde_json::Value,
        event: &'a Event,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let status = config
                .get("status")
                .and_then(serde_json::Value::as_str)
                .context("status_update config is missing a 'status' field")?;

            tracing::info!(
                status,
                entity = %event.entity,
                record_id = %event.record_id,
                "status update requested"
            );
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditflow_domain::entity::EntityKind;
    use auditflow_domain::event::EventKind;

    fn event() -> Event {
        Event::new(
            EntityKind::Constat,
            EventKind::Overdue,
            "c-9",
            serde_json::json!({"severity": "high"}),
        )
    }

    #[tokio::test]
    async fn should_succeed_when_notification_config_has_recipient() {
        let handler = LogNotificationHandler;
        let config = serde_json::json!({"recipient": "lead_auditor", "message": "overdue"});
        assert!(handler.execute(&config, &event()).await.is_ok());
    }

    #[tokio::test]
    async fn should_fail_when_notification_recipient_is_missing() {
        let handler = LogNotificationHandler;
        let config = serde_json::json!({"message": "overdue"});
        let err = handler.execute(&config, &event()).await.unwrap_err();
        assert!(err.to_string().contains("recipient"));
    }

    #[tokio::test]
    async fn should_succeed_when_status_update_config_has_status() {
        let handler = LogStatusUpdateHandler;
        let config = serde_json::json!({"status": "escalated"});
        assert!(handler.execute(&config, &event()).await.is_ok());
    }

    #[tokio::test]
    async fn should_fail_when_status_is_missing() {
        let handler = LogStatusUpdateHandler;
        let config = serde_json::json!({});
        assert!(handler.execute(&config, &event()).await.is_err());
    }
}
