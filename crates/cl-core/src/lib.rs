//! `cl-core`: foundational types for the construction-logistics simulator.
//!
//! Every other `cl-*` crate depends on this one.  It has no `cl-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `SegmentId`, `MaterialId`                     |
//! | [`geo`]         | `GeoPoint`, haversine distance                            |
//! | [`zone`]        | `ZoneFlags` (low-emission zone, water access)             |
//! | [`category`]    | `StructuralCategory`                                      |
//! | [`policy`]      | scenario policy enums and `PolicyConfig`                  |
//! | [`time`]        | `Round`, `SimConfig`                                      |
//! | [`rng`]         | `EntityRng` (per-entity deterministic RNG)                |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, config and policies. |

pub mod category;
pub mod error;
pub mod geo;
pub mod ids;
pub mod policy;
pub mod rng;
pub mod time;
pub mod zone;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::StructuralCategory;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EntityId, MaterialId, SegmentId};
pub use policy::{
    BiobasedPolicy, CircularityPolicy, HubTopology, ModularityPolicy, NetworkType, PolicyConfig,
    TruckPolicy,
};
pub use rng::EntityRng;
pub use time::{Round, SimConfig};
pub use zone::ZoneFlags;
