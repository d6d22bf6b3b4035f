//! `cl-transport`: the transport & emissions accountant.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`vehicle`]    | `VehicleEnergy`, `Region`, `VehicleProfile`, `VehicleTable`   |
//! | [`leg`]        | `Endpoint`, `Leg`, mode selection, load factors               |
//! | [`accountant`] | trip / emission / damage formulas, `Shipment`                 |
//! | [`emissions`]  | `EmissionBucket`, `EmissionsAccumulator`                      |
//! | [`state`]      | `TransportState`: shared ledgers + `ship()`                   |
//! | [`loader`]     | `load_vehicles_csv` / `load_vehicles_reader`                  |
//! | [`error`]      | `TransportError`, `TransportResult<T>`                        |
//!
//! # Accounting model
//!
//! Every material movement goes through [`TransportState::ship`]:
//!
//! ```text
//! capacity  = profile.capacity(material) × leg.load_factor()
//! trips     = ⌈tons / capacity⌉                 (0 when tons = 0)
//! emissions = factor × (tare + tons) × km × trips × 2
//! damage    = (capacity / axles)⁴ × trips        (road legs only, per segment)
//! ```
//!
//! `ship` has no state besides the two ledgers it adds into, so calls can
//! happen in any order within a round without changing the totals.

pub mod accountant;
pub mod emissions;
pub mod error;
pub mod leg;
pub mod loader;
pub mod state;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use accountant::{
    axle_damage, trip_count, trip_emissions, Shipment, DEMOLITION_LOAD_FACTOR,
    DIRECT_SUPPLY_LOAD_FACTOR, ROUND_TRIP,
};
pub use emissions::{EmissionBucket, EmissionsAccumulator};
pub use error::{TransportError, TransportResult};
pub use leg::{Endpoint, Leg};
pub use loader::{load_vehicles_csv, load_vehicles_reader};
pub use state::TransportState;
pub use vehicle::{Region, VehicleEnergy, VehicleProfile, VehicleTable};
