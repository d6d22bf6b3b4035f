use thiserror::Error;

use cl_core::{CoreError, EntityId};
use cl_ledger::LedgerError;
use cl_network::NetworkError;

use crate::EntityKind;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{entity} is not a {expected}")]
    WrongKind {
        entity:   EntityId,
        expected: EntityKind,
    },

    #[error("{0} cannot receive materials")]
    NotAReceiver(EntityId),

    #[error("entity table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AgentResult<T> = Result<T, AgentError>;
