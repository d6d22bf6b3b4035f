use cl_core::{BiobasedPolicy, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("unknown material {0:?}")]
    UnknownMaterial(String),

    #[error("material {0:?} listed twice")]
    DuplicateMaterial(String),

    #[error("no composition rows for building type {building_type:?} under biobased policy {biobased}")]
    NoComposition {
        building_type: String,
        biobased:      BiobasedPolicy,
    },

    #[error("modular construction requested but building type {0:?} has no modules row")]
    NoModulesRow(String),

    #[error("no demolition-site name for material {0:?}")]
    NoConversion(String),

    #[error("no supplier type for material {0:?}")]
    NoSupplierType(String),

    #[error("ledger parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
