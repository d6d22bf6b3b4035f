//! Synthetic route table for the demo city.
//!
//! Every leg runs over the origin's access road, a shared ring road, and
//! the destination's access road.  Distances are great-circle distances
//! with a fixed detour factor.

use cl_core::{EntityId, GeoPoint, SegmentId};
use cl_network::{Route, RouteClass, RouteTable};

const DETOUR:        f64 = 1.3;
const RING_ROAD:     u64 = 1;
const ACCESS_OFFSET: u64 = 1_000;

/// Entity ids of the demo world, grouped by kind.
pub struct Layout {
    pub sites:      Vec<EntityId>,
    pub suppliers:  Vec<EntityId>,
    pub macro_hubs: Vec<EntityId>,
    pub micro_hubs: Vec<EntityId>,
    pub demolition: Vec<EntityId>,
}

fn route(points: &[GeoPoint], from: EntityId, to: EntityId) -> Route {
    let km = points[from.index()].distance_km(points[to.index()]) * DETOUR;
    let segments = vec![
        SegmentId(ACCESS_OFFSET + u64::from(from.0)),
        SegmentId(RING_ROAD),
        SegmentId(ACCESS_OFFSET + u64::from(to.0)),
    ];
    Route::new(km, segments)
}

/// Routes for every pair the model can ask for.  `points` is indexed by
/// entity id.
pub fn build_routes(points: &[GeoPoint], layout: &Layout) -> RouteTable {
    let mut table = RouteTable::new();
    let hubs: Vec<EntityId> = layout.macro_hubs.iter().chain(&layout.micro_hubs).copied().collect();

    let mut add = |class, from: EntityId, to: EntityId| {
        table.insert(class, from, to, route(points, from, to));
    };

    for &hub in &hubs {
        for &site in &layout.sites {
            add(RouteClass::HubClient, hub, site);
        }
        for &dem in &layout.demolition {
            add(RouteClass::DemolitionHub, dem, hub);
        }
    }
    for &macro_hub in &layout.macro_hubs {
        for &micro in &layout.micro_hubs {
            add(RouteClass::HubClient, macro_hub, micro);
        }
        for &supplier in &layout.suppliers {
            add(RouteClass::SupplierHub, supplier, macro_hub);
        }
    }
    for &supplier in &layout.suppliers {
        for &site in &layout.sites {
            add(RouteClass::SupplierClient, supplier, site);
        }
    }
    table
}
