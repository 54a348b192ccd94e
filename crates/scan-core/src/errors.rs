//! Schema validation errors.
//!
//! Backend and configuration errors live in their own crates
//! (`DispatchError`, `ConfigError`); they converge as `anyhow` errors in
//! `scan-cli`.

use thiserror::Error;

/// Errors raised while building a [`Schema`](crate::Schema).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A schema must hold at least one criterion before a run starts.
    #[error("Schema has no criteria")]
    EmptySchema,

    /// Two criteria share the same name.
    #[error("Duplicate criterion name: {0}")]
    DuplicateCriterion(String),

    /// A criterion failed a field constraint.
    #[error("Invalid criterion '{name}': {reason}")]
    InvalidCriterion { name: String, reason: String },
}
