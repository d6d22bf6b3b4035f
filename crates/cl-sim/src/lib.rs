//! `cl-sim`: round scheduler for the construction-logistics simulator.
//!
//! # Round loop
//!
//! ```text
//! for round in 0..config.total_rounds:
//!   ① on_round_start
//!   ② step every entity of the activation order, strictly in sequence
//!      (default: construction sites, suppliers, active hubs; by id)
//!   ③ on_round_end with the round's emissions summary
//!   ④ on_snapshot every `output_interval_rounds`
//! on_sim_end
//! ```
//!
//! The activation order is part of the scenario: a hub stepped before its
//! clients sees this round's requests only in the next round, so swapping
//! entries changes results.  The same seed and the same order always
//! reproduce a run exactly.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cl_behavior::StandardModel;
//! use cl_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, policy, catalog, composition, world, StandardModel)
//!     .routes(routes)
//!     .vehicles(vehicles)
//!     .demolition_vehicles(demolition_vehicles)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod summary;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use summary::RoundSummary;
