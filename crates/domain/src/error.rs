//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`WorkflowError`] via `#[from]` — no stringly-typed variants.

/// Top-level error for the workflow engine.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// A rule violated a domain invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A lookup targeted a record that does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backing store failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations, surfaced synchronously to the caller.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Rule name must not be empty.
    #[error("rule name must not be empty")]
    EmptyName,

    /// Rule description must not be empty.
    #[error("rule description must not be empty")]
    EmptyDescription,

    /// A rule must carry at least one action.
    #[error("rule must have at least one action")]
    NoActions,

    /// An identifier in a request could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

/// A record lookup failed.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// The record kind, e.g. `"WorkflowRule"`.
    pub entity: &'static str,
    /// The identifier that was requested.
    pub id: String,
}
