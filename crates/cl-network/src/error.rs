//! Network-subsystem error type.

use thiserror::Error;

use cl_core::{CoreError, EntityId};

use crate::RouteClass;

/// Errors produced by `cl-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no {class} route from {from} to {to}")]
    NoRoute {
        class: RouteClass,
        from:  EntityId,
        to:    EntityId,
    },

    #[error("no reachable {what} for {entity}")]
    NoCandidate {
        entity: EntityId,
        what:   &'static str,
    },

    #[error("route parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
