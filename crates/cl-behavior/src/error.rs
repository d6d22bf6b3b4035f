use thiserror::Error;

use cl_agents::AgentError;
use cl_core::CoreError;
use cl_ledger::LedgerError;
use cl_network::NetworkError;
use cl_transport::TransportError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("no supplier of type {supplier_type:?} for material {material:?}")]
    NoSupplier {
        material:      String,
        supplier_type: String,
    },

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
