//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` with a
//! `#[from]` variant where they need to surface it.

use thiserror::Error;

use crate::EntityId;

/// The top-level error type for `cl-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("unknown {kind} option {value:?}")]
    UnknownOption { kind: &'static str, value: String },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `cl-core`.
pub type CoreResult<T> = Result<T, CoreError>;
