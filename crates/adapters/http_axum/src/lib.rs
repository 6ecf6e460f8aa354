//! # auditflow-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON management API** for the rule catalogue
//!   (`/api/rules`), event intake (`/api/events`) and the execution log
//!   (`/api/firings`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `auditflow-app` (for port traits and services) and
//! `auditflow-domain` (for types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build;
pub use state::AppState;
