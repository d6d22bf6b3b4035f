//! The four entity variants.

use std::collections::BTreeSet;
use std::fmt;

use cl_core::{EntityId, GeoPoint, ZoneFlags};
use cl_ledger::{MaterialGrid, MaterialLedger, MaterialRequest, MaterialTotals};
use cl_network::{Assignment, HubTier};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EntityKind {
    ConstructionSite,
    Supplier,
    Hub,
    DemolitionSite,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::ConstructionSite => "construction site",
            EntityKind::Supplier         => "supplier",
            EntityKind::Hub              => "hub",
            EntityKind::DemolitionSite   => "demolition site",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ConstructionSite ──────────────────────────────────────────────────────────

/// A building under construction.  The only entity with a material ledger.
#[derive(Debug, Clone)]
pub struct ConstructionSite {
    pub id:            EntityId,
    pub location:      GeoPoint,
    pub zone:          ZoneFlags,
    pub building_type: String,
    pub assignment:    Assignment,

    pub ledger: MaterialLedger,
    /// This round's request, cleared when the serving hub or supplier
    /// consumes it.
    pub request: MaterialRequest,
}

// ── Hub ───────────────────────────────────────────────────────────────────────

/// Partners a hub dealt with during the run, for route rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageLog {
    pub clients:          BTreeSet<EntityId>,
    pub suppliers:        BTreeSet<EntityId>,
    pub demolition_sites: BTreeSet<EntityId>,
}

/// A consolidation point between suppliers and construction sites.
#[derive(Debug, Clone)]
pub struct Hub {
    pub id:         EntityId,
    pub location:   GeoPoint,
    pub zone:       ZoneFlags,
    pub tier:       HubTier,
    /// Whether the hub's tier takes part under the current topology.
    /// Inactive hubs keep their id but are never stepped.
    pub active:     bool,
    pub assignment: Assignment,

    /// Sites (and, for macro hubs, micro hubs) served by this hub.  Fixed
    /// after assignment.
    pub clients: Vec<EntityId>,

    /// Micro hubs: aggregated client demand awaiting the macro hub.
    pub forwarded: MaterialRequest,

    /// Macro hubs: share of last round's aggregated request actually
    /// sourced, per (category, material).  Starts at 1.
    pub fill: MaterialGrid,

    /// Micro hubs: tons delivered by the macro hub and not yet passed on,
    /// per (category, material).  Client deliveries draw from here only.
    pub stock: MaterialGrid,

    /// Tons received from suppliers or, for micro hubs, the macro hub.
    pub received: MaterialTotals,

    /// Tons collected from demolition sites, in the demolition taxonomy.
    pub reclaimed: MaterialTotals,

    pub usage: UsageLog,
}

impl Hub {
    #[inline]
    pub fn is_macro(&self) -> bool {
        self.tier == HubTier::Macro
    }
}

// ── Supplier ──────────────────────────────────────────────────────────────────

/// A producer of virgin material with unlimited stock.
#[derive(Debug, Clone)]
pub struct Supplier {
    pub id:            EntityId,
    pub location:      GeoPoint,
    pub zone:          ZoneFlags,
    /// Matched against the material → supplier-type table.
    pub supplier_type: String,
}

// ── DemolitionSite ────────────────────────────────────────────────────────────

/// A source of reclaimed material with finite stock.
///
/// Stock is keyed by the demolition-site material registry, which is
/// distinct from the construction registry.
#[derive(Debug, Clone)]
pub struct DemolitionSite {
    pub id:         EntityId,
    pub location:   GeoPoint,
    pub zone:       ZoneFlags,
    pub assignment: Assignment,
    pub stock:      MaterialTotals,
}
