//! `cl-agents`: simulation entities and their storage.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                           |
//! |----------------|--------------------------------------------------------------------|
//! | [`entity`]     | `ConstructionSite`, `Hub`, `Supplier`, `DemolitionSite`, `EntityKind` |
//! | [`capability`] | `RequestsMaterials`, `ReceivesMaterials`, `SuppliesMaterials`, `RoutesMaterials` |
//! | [`world`]      | `World` (per-kind arrays + id index), `EntityRngs`                 |
//! | [`builder`]    | `WorldBuilder` and the `*Spec` input rows                          |
//! | [`loader`]     | CSV loaders feeding a `WorldBuilder`                               |
//! | [`error`]      | `AgentError`, `AgentResult<T>`                                     |
//!
//! # Ids
//!
//! `EntityId`s come from one counter in creation order: construction
//! sites, then suppliers, then hubs, then demolition sites.  Route tables
//! refer to entities by these ids.
//!
//! # Why two structs?
//!
//! The behaviour step needs `&mut EntityRng` for the acting entity while it
//! mutates other entities in the `World`.  Keeping the RNGs in a separate
//! [`EntityRngs`] lets both borrows coexist.

pub mod builder;
pub mod capability;
pub mod entity;
pub mod error;
pub mod loader;
pub mod world;


pub use builder::{DemolitionSpec, HubSpec, SiteSpec, SupplierSpec, WorldBuilder};
pub use capability::{ReceivesMaterials, RequestsMaterials, RoutesMaterials, SuppliesMaterials};
pub use entity::{ConstructionSite, DemolitionSite, EntityKind, Hub, Supplier, UsageLog};
pub use error::{AgentError, AgentResult};
pub use loader::{
    load_demolition_sites_csv, load_demolition_sites_reader, load_hubs_csv, load_hubs_reader,
    load_sites_csv, load_sites_reader, load_suppliers_csv, load_suppliers_reader,
};
pub use world::{EntityRngs, World};
