//! Plain data row types written by output backends, and their extraction
//! from simulation state.

use std::fmt;

use cl_agents::World;
use cl_core::{Round, StructuralCategory};
use cl_ledger::MaterialRegistry;
use cl_network::RoadUsageLedger;
use cl_sim::RoundSummary;

/// Emissions after one round.  Bucket columns are cumulative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundSummaryRow {
    pub round:                     u64,
    pub emissions_supplier_to_hub: f64,
    pub emissions_hub_to_client:   f64,
    pub emissions_total:           f64,
    pub emissions_round:           f64,
}

impl From<&RoundSummary> for RoundSummaryRow {
    fn from(s: &RoundSummary) -> Self {
        Self {
            round:                     s.round.0,
            emissions_supplier_to_hub: s.emissions_supplier_to_hub,
            emissions_hub_to_client:   s.emissions_hub_to_client,
            emissions_total:           s.emissions_total,
            emissions_round:           s.emissions_round,
        }
    }
}

/// Cumulative use of one road segment at a snapshot round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadUsageRow {
    pub round:      u64,
    pub segment_id: u64,
    pub trips:      u64,
    pub damage:     f64,
}

impl RoadUsageRow {
    /// One row per segment that has carried at least one trip.
    pub fn snapshot(round: Round, ledger: &RoadUsageLedger) -> Vec<Self> {
        ledger
            .iter_used()
            .map(|(segment, usage)| Self {
                round:      round.0,
                segment_id: segment.0,
                trips:      usage.trips,
                damage:     usage.damage,
            })
            .collect()
    }
}

/// One (category, material) cell of a construction site's ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialReceivedRow {
    pub round:     u64,
    pub entity_id: u32,
    pub category:  StructuralCategory,
    pub material:  String,
    pub required:  f64,
    pub received:  f64,
}

impl MaterialReceivedRow {
    /// Every cell with a positive requirement, for every site.
    pub fn snapshot(round: Round, world: &World, registry: &MaterialRegistry) -> Vec<Self> {
        let mut rows = Vec::new();
        for site in &world.sites {
            let ledger = &site.ledger;
            for (category, material, required) in ledger.required().iter_positive() {
                rows.push(Self {
                    round: round.0,
                    entity_id: site.id.0,
                    category,
                    material: registry.name(material).to_owned(),
                    required,
                    received: ledger.received().get(category, material),
                });
            }
        }
        rows
    }
}

/// Which hub log a [`UsageLogRow`] comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLink {
    Demolition,
    Supplier,
    Client,
}

impl UsageLink {
    pub fn as_str(self) -> &'static str {
        match self {
            UsageLink::Demolition => "demolition",
            UsageLink::Supplier   => "supplier",
            UsageLink::Client     => "client",
        }
    }
}

impl fmt::Display for UsageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hub's link to an entity it actually exchanged material with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageLogRow {
    pub hub_id:     u32,
    pub partner_id: u32,
    pub link:       UsageLink,
}

impl UsageLogRow {
    /// All usage logs of all hubs, ordered by hub, then link, then partner.
    pub fn collect(world: &World) -> Vec<Self> {
        let mut rows = Vec::new();
        for hub in &world.hubs {
            let logs = [
                (UsageLink::Demolition, &hub.usage.demolition_sites),
                (UsageLink::Supplier,   &hub.usage.suppliers),
                (UsageLink::Client,     &hub.usage.clients),
            ];
            for (link, partners) in logs {
                rows.extend(partners.iter().map(|p| Self { hub_id: hub.id.0, partner_id: p.0, link }));
            }
        }
        rows
    }
}
