//! End-of-run figures for comparing scenarios.
//!
//! These are the numbers behind the usual scenario charts (material usage
//! pie, circular share, emission totals); plotting is left to the caller.

use std::fmt;

use cl_agents::World;
use cl_behavior::reclaimed_categories;
use cl_core::{PolicyConfig, StructuralCategory};
use cl_ledger::MaterialRegistry;
use cl_transport::EmissionsAccumulator;

/// Tons of one material required across all sites.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialUsage {
    pub material: String,
    pub tons:     f64,
}

/// Total required tonnage per material over every site and category, in
/// registry order.  Materials no site requires are omitted.
pub fn usage_by_material(world: &World, registry: &MaterialRegistry) -> Vec<MaterialUsage> {
    let mut tons = vec![0.0; registry.len()];
    for site in &world.sites {
        let totals = site.ledger.required().collapse(&StructuralCategory::ALL);
        for (material, t) in totals.iter_positive() {
            tons[material.index()] += t;
        }
    }
    registry
        .iter()
        .zip(tons)
        .filter(|&(_, t)| t > 0.0)
        .map(|((_, name), tons)| MaterialUsage { material: name.to_owned(), tons })
        .collect()
}

/// Required tonnage in categories the scenario sources from demolition
/// sites (`circular`) versus everything else.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircularSplit {
    pub circular:     f64,
    pub not_circular: f64,
}

impl CircularSplit {
    /// Share of the total that is circular; 0 when nothing is required.
    pub fn circular_share(&self) -> f64 {
        let total = self.circular + self.not_circular;
        if total > 0.0 { self.circular / total } else { 0.0 }
    }
}

pub fn circular_split(world: &World, policy: &PolicyConfig) -> CircularSplit {
    let reclaimed = reclaimed_categories(policy);
    let mut split = CircularSplit::default();
    for site in &world.sites {
        for (category, _, tons) in site.ledger.required().iter_positive() {
            if reclaimed.contains(&category) {
                split.circular += tons;
            } else {
                split.not_circular += tons;
            }
        }
    }
    split
}

/// Cumulative emissions of a run, rounded to whole units for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionsReport {
    pub hub_to_client:   f64,
    pub supplier_to_hub: f64,
    pub total:           f64,
}

impl EmissionsReport {
    pub fn new(emissions: &EmissionsAccumulator) -> Self {
        Self {
            hub_to_client:   emissions.hub_to_client().round(),
            supplier_to_hub: emissions.supplier_to_hub().round(),
            total:           emissions.total().round(),
        }
    }
}

impl fmt::Display for EmissionsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "emissions (hubs to construction sites): {} tCO2eq", self.hub_to_client)?;
        writeln!(f, "emissions (suppliers to hubs): {} tCO2eq", self.supplier_to_hub)?;
        write!(f, "emissions (total): {} tCO2eq", self.total)
    }
}
