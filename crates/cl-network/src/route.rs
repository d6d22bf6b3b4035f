//! Precomputed route lookups.
//!
//! Every material movement follows a route computed offline.  A route has a
//! length (for emissions) and the ordered list of road segments it crosses
//! (for road usage and damage).  Routes are stored per direction and per
//! class, because the offline step produces one origin–destination matrix
//! per leg type.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use cl_core::{CoreError, EntityId, SegmentId};

use crate::{NetworkError, NetworkResult};

// ── RouteClass ────────────────────────────────────────────────────────────────

/// Leg type of a route; origin and destination roles are fixed per class.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RouteClass {
    /// Hub → construction site or micro hub.
    HubClient,
    /// Demolition site → hub.
    DemolitionHub,
    /// Supplier → hub.
    SupplierHub,
    /// Supplier → construction site (no hub tier).
    SupplierClient,
}

impl RouteClass {
    pub const ALL: [RouteClass; 4] = [
        RouteClass::HubClient,
        RouteClass::DemolitionHub,
        RouteClass::SupplierHub,
        RouteClass::SupplierClient,
    ];

    /// Short code used in route CSVs.
    pub fn as_str(self) -> &'static str {
        match self {
            RouteClass::HubClient      => "h2c",
            RouteClass::DemolitionHub  => "d2h",
            RouteClass::SupplierHub    => "s2h",
            RouteClass::SupplierClient => "s2c",
        }
    }
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "h2c" | "h2hc" => Ok(RouteClass::HubClient),
            "d2h"          => Ok(RouteClass::DemolitionHub),
            "s2h"          => Ok(RouteClass::SupplierHub),
            "s2c"          => Ok(RouteClass::SupplierClient),
            other => Err(CoreError::UnknownOption {
                kind:  "route class",
                value: other.to_owned(),
            }),
        }
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// One precomputed origin → destination route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Route length in kilometres.
    pub distance_km: f64,
    /// Road segments crossed, in travel order.  Empty for legs that never
    /// touch the road network (e.g. a straight-line water connection).
    pub segments: Vec<SegmentId>,
}

impl Route {
    pub fn new(distance_km: f64, segments: Vec<SegmentId>) -> Self {
        Self { distance_km, segments }
    }
}

// ── RouteTable ────────────────────────────────────────────────────────────────

/// `(class, origin, destination) → Route`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: FxHashMap<(RouteClass, EntityId, EntityId), Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a route.
    pub fn insert(&mut self, class: RouteClass, from: EntityId, to: EntityId, route: Route) {
        self.routes.insert((class, from, to), route);
    }

    /// Look up a route; a missing row is a lookup failure.
    pub fn get(&self, class: RouteClass, from: EntityId, to: EntityId) -> NetworkResult<&Route> {
        self.routes
            .get(&(class, from, to))
            .ok_or(NetworkError::NoRoute { class, from, to })
    }

    /// Like [`get`][Self::get] but `None` when absent.
    #[inline]
    pub fn find(&self, class: RouteClass, from: EntityId, to: EntityId) -> Option<&Route> {
        self.routes.get(&(class, from, to))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Every distinct segment referenced by any route, sorted.
    pub fn segments(&self) -> Vec<SegmentId> {
        let mut all: Vec<SegmentId> = self
            .routes
            .values()
            .flat_map(|r| r.segments.iter().copied())
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }
}
