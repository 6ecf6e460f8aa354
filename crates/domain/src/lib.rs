//! # auditflow-domain
//!
//! Pure domain model for the auditflow workflow automation engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **entity kinds** (the host record types that emit lifecycle events)
//! - Define **Events** (lifecycle notifications produced by the host)
//! - Define **Workflow rules** (trigger → predicate → action reactions)
//! - Define **Firing records** (append-only execution-log entries)
//! - Contain all invariant enforcement and the condition language
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod entity;
pub mod event;
pub mod firing;
pub mod rule;
