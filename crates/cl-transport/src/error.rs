use thiserror::Error;

use cl_core::{CoreError, MaterialId, NetworkType};
use cl_ledger::LedgerError;
use cl_network::NetworkError;

use crate::{Region, VehicleEnergy};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no {region} {network} vehicle for energy {energy}")]
    NoVehicle {
        network: NetworkType,
        energy:  VehicleEnergy,
        region:  Region,
    },

    #[error("{region} {network} vehicle has no capacity for {material}")]
    NoCapacity {
        material: MaterialId,
        network:  NetworkType,
        region:   Region,
    },

    #[error("vehicle table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type TransportResult<T> = Result<T, TransportError>;
