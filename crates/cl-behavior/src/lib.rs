//! `cl-behavior`: what each entity does when it is activated.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`context`]  | `MaterialCatalog`, `RoundContext`, `StepState`                    |
//! | [`model`]    | `LogisticsModel` trait, `StandardModel`                           |
//! | [`noop`]     | `NoopModel`: steps nothing                                        |
//! | [`triage`]   | reclaimed / virgin split of an aggregated request                 |
//! | [`sourcing`] | demolition collection loop, supplier collection, supplier lookup  |
//! | [`site`]     | construction-site demand step                                     |
//! | [`hub`]      | hub aggregation, sourcing, and delivery step                      |
//! | [`supplier`] | direct supplier → site delivery (no hub tier)                     |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                              |
//!
//! # Round protocol
//!
//! ```text
//! site      draw request from ledger (10–20 % of required, ≤ remaining)
//! supplier  (no hubs) deliver own materials straight to every site
//! hub       take client requests ─► aggregate
//!           micro: forward aggregate to macro hub
//!                  deliver each client request, capped by stock on hand
//!           macro: triage ─► demolition loop + supplier pulls ─► fill ratios
//!                  deliver each client request × fill ratio
//! ```
//!
//! Requests are cleared by whoever consumes them, so a request is never
//! served twice regardless of activation order.

pub mod context;
pub mod error;
pub mod hub;
pub mod model;
pub mod noop;
pub mod site;
pub mod sourcing;
pub mod supplier;
pub mod triage;


pub use context::{MaterialCatalog, RoundContext, StepState};
pub use error::{BehaviorError, BehaviorResult};
pub use model::{LogisticsModel, StandardModel};
pub use noop::NoopModel;
pub use sourcing::{validate_supply, supplier_for};
pub use triage::{Triage, reclaimed_categories};
