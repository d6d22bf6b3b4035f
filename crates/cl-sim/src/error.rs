use cl_agents::AgentError;
use cl_behavior::BehaviorError;
use cl_core::EntityId;
use cl_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("activation order has {got} entries, expected {expected}")]
    OrderLength { expected: usize, got: usize },

    #[error("activation order entry {0} is duplicated or not an active site, supplier, or hub")]
    OrderEntry(EntityId),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
