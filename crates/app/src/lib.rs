//! # auditflow-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RuleRepository` — durable rule catalogue access
//!   - `FiringLog` — append-only execution log
//!   - `EventPublisher` — fire-and-forget event delivery
//!   - `ActionHandler` — host-owned side effects, keyed by action kind
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RuleService` — catalogue CRUD with invariant enforcement
//!   - `EventDispatcher` — match events against enabled rules and fire them
//!   - `ActionExecutor` — run a rule's actions with per-action failure isolation
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `auditflow-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod dispatcher;
pub mod event_bus;
pub mod executor;
pub mod ports;
pub mod services;
