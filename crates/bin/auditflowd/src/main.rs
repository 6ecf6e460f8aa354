//! # auditflowd — workflow engine daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (TOML file + env var overrides)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Register the built-in action handlers
//! - Spawn the dispatch loop that consumes events from the bus
//! - Build the axum router and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod handlers;

use std::sync::Arc;

use auditflow_adapter_http_axum::state::AppState;
use auditflow_adapter_storage_sqlite_sqlx::{Config, SqliteFiringLog, SqliteRuleRepository};
use auditflow_app::dispatcher::EventDispatcher;
use auditflow_app::event_bus::InProcessEventBus;
use auditflow_app::executor::{ActionExecutor, ActionRegistry};
use auditflow_app::services::rule_service::RuleService;
use auditflow_domain::rule::ActionKind;
use tokio::sync::broadcast::error::RecvError;

use crate::handlers::{LogNotificationHandler, LogStatusUpdateHandler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cfg.logging.filter))
        .init();

    // Database
    let db = Config {
        database_url: cfg.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Event bus, shared between HTTP intake and the dispatch loop
    let bus = Arc::new(InProcessEventBus::new(cfg.engine.event_bus_capacity));

    // Action handlers
    let mut registry = ActionRegistry::new();
    registry.register(ActionKind::notification(), Arc::new(LogNotificationHandler));
    registry.register(
        ActionKind::status_update(),
        Arc::new(LogStatusUpdateHandler),
    );

    // Dispatcher, fed by its own subscription on the bus
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
                    if let Err(err) = dispatcher.dispatch(&event).await {
                        tracing::error!(event_id = %event.id, error = %err, "dispatch failed");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "dispatch loop lagged behind the event bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // HTTP
    let state = AppState::from_arcs(
        Arc::new(RuleService::new(SqliteRuleRepository::new(pool))),
        firing_log,
        bus,
    );
    let app = auditflow_adapter_http_axum::router::build(state);

    let bind_addr = cfg.bind_addr();
    tracing::info!(%bind_addr, "auditflowd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
