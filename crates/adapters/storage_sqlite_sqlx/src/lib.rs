//! # auditflow-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `auditflow-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows; the trigger (including
//!   its optional predicate) and the action list round-trip losslessly
//!   as JSON text columns
//!
//! ## Dependency rule
//! Depends on `auditflow-app` (for port traits) and `auditflow-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

mod error;
mod firing_log;
mod pool;
mod rule_repo;

pub use error::StorageError;
pub use firing_log::SqliteFiringLog;
pub use pool::{Config, Database};
pub use rule_repo::SqliteRuleRepository;
