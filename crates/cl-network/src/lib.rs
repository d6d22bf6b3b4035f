//! `cl-network`: routes, road usage, and hub assignment.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`route`]  | `RouteClass`, `Route`, `RouteTable` (precomputed lookups)       |
//! | [`roads`]  | `RoadUsageLedger`, `SegmentUsage` (trips + fourth-power damage) |
//! | [`assign`] | `HubTier`, `Nearest`, `Assignment`, `AssignmentTable`           |
//! | [`loader`] | `load_routes_csv` / `load_routes_reader`                        |
//! | [`error`]  | `NetworkError`, `NetworkResult<T>`                              |
//!
//! No routing happens here.  Shortest paths are computed offline by the
//! geospatial preparation step; this crate only looks them up.

pub mod assign;
pub mod error;
pub mod loader;
pub mod roads;
pub mod route;


pub use assign::{Assignment, AssignmentTable, HubTier, Nearest};
pub use error::{NetworkError, NetworkResult};
pub use loader::{load_routes_csv, load_routes_reader};
pub use roads::{RoadUsageLedger, SegmentUsage};
pub use route::{Route, RouteClass, RouteTable};
