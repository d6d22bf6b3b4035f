//! `cl-ledger`: material bookkeeping.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`registry`]    | `MaterialRegistry`: name ↔ `MaterialId` key space               |
//! | [`grid`]        | `MaterialGrid` (category × material), `MaterialTotals`          |
//! | [`composition`] | `CompositionTable`: required tons per building type             |
//! | [`ledger`]      | `MaterialLedger`: required vs. received per site                |
//! | [`request`]     | `MaterialRequest` and the partial-request draw                  |
//! | [`catalog`]     | `NameConversion`, `SupplierTypes`                               |
//! | [`loader`]      | CSV loaders for the reference tables above                      |
//! | [`error`]       | `LedgerError`, `LedgerResult<T>`                                |
//!
//! # Key space
//!
//! Material kinds are not hard-coded: the registry is built from the
//! composition table at load time and every grid is sized to it.  A
//! `MaterialId` is therefore only valid for grids built from the same
//! registry.  The demolition-site taxonomy has its own registry and is
//! bridged by [`NameConversion`].

pub mod catalog;
pub mod composition;
pub mod error;
pub mod grid;
pub mod ledger;
pub mod loader;
pub mod registry;
pub mod request;

#[cfg(test)]
mod tests;

pub use catalog::{NameConversion, SupplierTypes};
pub use composition::{CompositionRow, CompositionTable};
pub use error::{LedgerError, LedgerResult};
pub use grid::{MaterialGrid, MaterialTotals};
pub use ledger::MaterialLedger;
pub use loader::{
    load_composition_csv, load_composition_reader, load_name_conversion_csv,
    load_name_conversion_reader, load_supplier_types_csv, load_supplier_types_reader,
};
pub use registry::{MODULES, MaterialRegistry};
pub use request::{MaterialRequest, REQUEST_FRACTION};
