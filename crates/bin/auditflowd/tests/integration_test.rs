//! End-to-end smoke tests for the full auditflowd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! repos, real dispatch loop, real axum router) and exercises the HTTP
//! layer via `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use auditflow_adapter_http_axum::router;
use auditflow_adapter_http_axum::state::AppState;
use auditflow_adapter_storage_sqlite_sqlx::{Config, SqliteFiringLog, SqliteRuleRepository};
use auditflow_app::dispatcher::EventDispatcher;
use auditflow_app::event_bus::InProcessEventBus;
use auditflow_app::executor::{ActionExecutor, ActionRegistry};
use auditflow_app::ports::ActionHandler;
use auditflow_app::services::rule_service::RuleService;
use auditflow_domain::event::Event;
use auditflow_domain::rule::ActionKind;
use tokio::sync::broadcast::error::RecvError;

/// Always succeeds; stands in for a host-side notification sink.
struct OkHandler;

impl ActionHandler for OkHandler {
    fn execute<'a>(
        &'a self,
        _config: &'a serde_json::Value,
        _event: &'a Event,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>> {
        Box::pin(async { Ok(()) })
    }
}

/// Build a fully-wired router backed by an in-memory `SQLite` database,
/// with the dispatch loop running in the background.
async fn app() -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let bus = Arc::new(InProcessEventBus::new(64));

    let mut registry = ActionRegistry::new();
    registry.register(ActionKind::notification(), Arc::new(OkHandler));

    let firing_log = Arc::new(SqliteFiringLog::new(pool.clone()));
    let dispatcher = EventDispatcher::new(
        SqliteRuleRepository::new(pool.clone()),
        ActionExecutor::new(Arc::new(registry)),
        Arc::clone(&firing_log),
    );

    let mut events = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let _ = dispatcher.dispatch(&event).await;
                }
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    });

    let state = AppState::from_arcs(
        Arc::new(RuleService::new(SqliteRuleRepository::new(pool))),
        firing_log,
        bus,
    );

    router::build(state)
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap()
}

fn notification_rule_body() -> &'static str {
    r#"{
        "name": "Escalate overdue constats",
        "description": "Notify the lead auditor when a constat goes overdue",
        "trigger": {"entity": "constat", "event": "overdue"},
        "actions": [{"type": "notification", "config": {"recipient": "lead_auditor"}}]
    }"#
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// API: rule catalogue CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_rule_crud_cycle() {
    let app = app().await;

    // Create
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rules")
                .header("content-type", "application/json")
                .body(Body::from(notification_rule_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    let rule_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["enabled"], true);

    // List
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/rules")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Escalate overdue constats");

    // Patch
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/rules/{rule_id}"))
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name": "Renamed rule"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "Renamed rule");
    assert_eq!(
        body["description"],
        "Notify the lead auditor when a constat goes overdue"
    );

    // Toggle
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/rules/{rule_id}/toggle"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["enabled"], false);

    // Delete
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/rules/{rule_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Verify gone
    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/rules/{rule_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_rule_with_empty_name() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rules")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "name": "",
                        "description": "desc",
                        "trigger": {"entity": "audit", "event": "created"},
                        "actions": [{"type": "notification", "config": {}}]
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_reject_rule_without_actions() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rules")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "name": "No actions",
                        "description": "desc",
                        "trigger": {"entity": "audit", "event": "created"},
                        "actions": []
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_return_no_content_when_deleting_absent_rule() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/rules/00000000-0000-0000-0000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Event intake → dispatch loop → execution log
// ---------------------------------------------------------------------------

/// Poll `/api/firings` until `minimum` records appear or the deadline hits.
async fn wait_for_firings(app: &axum::Router, minimum: usize) -> serde_json::Value {
    for _ in 0..50 {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/firings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        if body.as_array().unwrap().len() >= minimum {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("expected {minimum} firing(s) to appear in the execution log");
}

#[tokio::test]
async fn should_fire_matching_rule_and_record_firing() {
    let app = app().await;

    // Create the rule
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rules")
                .header("content-type", "application/json")
                .body(Body::from(notification_rule_body()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let rule_id = body_json(resp).await["id"].as_str().unwrap().to_string();

    // Emit a matching event
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/events")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "entity": "constat",
                        "event_type": "overdue",
                        "record_id": "c-42",
                        "payload": {"severity": "high"}
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    // The dispatch loop runs asynchronously; poll the execution log
    let firings = wait_for_firings(&app, 1).await;
    assert_eq!(firings[0]["rule_id"], rule_id.as_str());
    assert_eq!(firings[0]["action_results"][0]["status"], "succeeded");

    // The per-rule listing shows the same record
    let resp = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/rules/{rule_id}/firings"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_not_fire_rule_when_event_does_not_match() {
    let app = app().await;

    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rules")
                .header("content-type", "application/json")
                .body(Body::from(notification_rule_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    // Wrong entity kind — the rule watches constat:overdue
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/events")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "entity": "audit",
                        "event_type": "overdue",
                        "record_id": "a-1",
                        "payload": {}
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/firings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn should_record_failed_action_for_unknown_kind() {
    let app = app().await;

    // webhook has no registered handler in this wiring
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rules")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "name": "Webhook rule",
                        "description": "calls out on audit creation",
                        "trigger": {"entity": "audit", "event": "created"},
                        "actions": [{"type": "webhook", "config": {"url": "http://example.com"}}]
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/events")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "entity": "audit",
                        "event_type": "created",
                        "record_id": "a-7",
                        "payload": {}
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let firings = wait_for_firings(&app, 1).await;
    assert_eq!(firings[0]["action_results"][0]["status"], "failed");
    assert!(
        firings[0]["action_results"][0]["error"]
            .as_str()
            .unwrap()
            .contains("unknown action type")
    );
}

#[tokio::test]
async fn should_apply_predicate_before_firing() {
    let app = app().await;

    // Only fire when amount exceeds 10000
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/rules")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "name": "Large overrun alert",
                        "description": "flag plan actions that blow the budget",
                        "trigger": {
                            "entity": "plan_action",
                            "event": "budget_exceeded",
                            "conditions": {"amount": {"op": "gt", "value": 10000}}
                        },
                        "actions": [{"type": "notification", "config": {"recipient": "cfo"}}]
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Below threshold — no firing
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/events")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "entity": "plan_action",
                        "event_type": "budget_exceeded",
                        "record_id": "p-1",
                        "payload": {"amount": 500}
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    // Above threshold — fires
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/events")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{
                        "entity": "plan_action",
                        "event_type": "budget_exceeded",
                        "record_id": "p-2",
                        "payload": {"amount": 20000}
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let firings = wait_for_firings(&app, 1).await;
    assert_eq!(firings.as_array().unwrap().len(), 1);
}
