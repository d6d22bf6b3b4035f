//! Fluent construction of a [`World`] + [`EntityRngs`].
//!
//! ```ignore
//! let (world, rngs) = WorldBuilder::new()
//!     .sites(load_sites_csv(&dir.join("sites.csv"))?)
//!     .suppliers(load_suppliers_csv(&dir.join("suppliers.csv"))?)
//!     .hubs(load_hubs_csv(&dir.join("hubs.csv"))?)
//!     .demolition_sites(demolition)
//!     .build(&composition, &registry, demolition_registry.len(), &policy, config.seed)?;
//! ```

use cl_core::{EntityId, GeoPoint, HubTopology, MaterialId, PolicyConfig, StructuralCategory, ZoneFlags};
use cl_ledger::{CompositionTable, MaterialGrid, MaterialLedger, MaterialRegistry, MaterialRequest, MaterialTotals};
use cl_network::{Assignment, HubTier};

use crate::{
    AgentError, AgentResult, ConstructionSite, DemolitionSite, EntityRngs, Hub, Supplier, UsageLog,
    World,
};

// ── Specs ─────────────────────────────────────────────────────────────────────

/// Input row for one construction site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSpec {
    pub location:      GeoPoint,
    pub zone:          ZoneFlags,
    pub building_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierSpec {
    pub location:      GeoPoint,
    pub zone:          ZoneFlags,
    pub supplier_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HubSpec {
    pub location: GeoPoint,
    pub zone:     ZoneFlags,
    pub tier:     HubTier,
}

/// Input row for one demolition site; stock ids refer to the demolition
/// registry.
#[derive(Debug, Clone, PartialEq)]
pub struct DemolitionSpec {
    pub location: GeoPoint,
    pub zone:     ZoneFlags,
    pub stock:    Vec<(MaterialId, f64)>,
}

// ── WorldBuilder ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct WorldBuilder {
    sites:      Vec<SiteSpec>,
    suppliers:  Vec<SupplierSpec>,
    hubs:       Vec<HubSpec>,
    demolition: Vec<DemolitionSpec>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn site(mut self, spec: SiteSpec) -> Self {
        self.sites.push(spec);
        self
    }

    pub fn sites<I: IntoIterator<Item = SiteSpec>>(mut self, specs: I) -> Self {
        self.sites.extend(specs);
        self
    }

    pub fn supplier(mut self, spec: SupplierSpec) -> Self {
        self.suppliers.push(spec);
        self
    }

    pub fn suppliers<I: IntoIterator<Item = SupplierSpec>>(mut self, specs: I) -> Self {
        self.suppliers.extend(specs);
        self
    }

    pub fn hub(mut self, spec: HubSpec) -> Self {
        self.hubs.push(spec);
        self
    }

    pub fn hubs<I: IntoIterator<Item = HubSpec>>(mut self, specs: I) -> Self {
        self.hubs.extend(specs);
        self
    }

    pub fn demolition_site(mut self, spec: DemolitionSpec) -> Self {
        self.demolition.push(spec);
        self
    }

    pub fn demolition_sites<I: IntoIterator<Item = DemolitionSpec>>(mut self, specs: I) -> Self {
        self.demolition.extend(specs);
        self
    }

    /// Id the next `build` will give to site number `i` (0-based), and so
    /// on for the other kinds.  Useful for writing route tables by hand.
    pub fn site_id(&self, i: usize) -> EntityId {
        EntityId(i as u32)
    }

    pub fn supplier_id(&self, i: usize) -> EntityId {
        EntityId((self.sites.len() + i) as u32)
    }

    pub fn hub_id(&self, i: usize) -> EntityId {
        EntityId((self.sites.len() + self.suppliers.len() + i) as u32)
    }

    pub fn demolition_id(&self, i: usize) -> EntityId {
        EntityId((self.sites.len() + self.suppliers.len() + self.hubs.len() + i) as u32)
    }

    /// Assign ids, build ledgers, and seed the per-entity RNGs.
    ///
    /// Every site's ledger comes from `composition` filtered by its building
    /// type and the scenario's biobased and modularity policies.  Hubs
    /// whose tier does not take part in `policy.hub_topology` are built but
    /// left inactive.
    pub fn build(
        self,
        composition:          &CompositionTable,
        registry:             &MaterialRegistry,
        demolition_materials: usize,
        policy:               &PolicyConfig,
        seed:                 u64,
    ) -> AgentResult<(World, EntityRngs)> {
        let materials = registry.len();
        let mut next: u32 = 0;
        let mut next_id = || {
            let id = EntityId(next);
            next += 1;
            id
        };

        let mut sites = Vec::with_capacity(self.sites.len());
        for spec in self.sites {
            let ledger = MaterialLedger::from_composition(
                composition,
                registry,
                &spec.building_type,
                policy.biobased_policy,
                policy.modularity_policy,
            )?;
            sites.push(ConstructionSite {
                id:            next_id(),
                location:      spec.location,
                zone:          spec.zone,
                building_type: spec.building_type,
                assignment:    Assignment::default(),
                ledger,
                request:       MaterialRequest::empty(materials),
            });
        }

        let suppliers: Vec<Supplier> = self
            .suppliers
            .into_iter()
            .map(|spec| Supplier {
                id:            next_id(),
                location:      spec.location,
                zone:          spec.zone,
                supplier_type: spec.supplier_type,
            })
            .collect();

        let hubs: Vec<Hub> = self
            .hubs
            .into_iter()
            .map(|spec| Hub {
                id:         next_id(),
                location:   spec.location,
                zone:       spec.zone,
                tier:       spec.tier,
                active:     tier_active(policy.hub_topology, spec.tier),
                assignment: Assignment::default(),
                clients:    Vec::new(),
                forwarded:  MaterialRequest::empty(materials),
                fill:       full_fill(materials),
                stock:      MaterialGrid::zeros(materials),
                received:   MaterialTotals::zeros(materials),
                reclaimed:  MaterialTotals::zeros(demolition_materials),
                usage:      UsageLog::default(),
            })
            .collect();

        let mut demolition_sites = Vec::with_capacity(self.demolition.len());
        for spec in self.demolition {
            let mut stock = MaterialTotals::zeros(demolition_materials);
            for (material, tons) in spec.stock {
                if material.index() >= demolition_materials {
                    return Err(AgentError::Parse(format!(
                        "demolition stock material {material} outside registry of {demolition_materials}"
                    )));
                }
                stock.add(material, tons);
            }
            demolition_sites.push(DemolitionSite {
                id:         next_id(),
                location:   spec.location,
                zone:       spec.zone,
                assignment: Assignment::default(),
                stock,
            });
        }

        let world = World::new(sites, suppliers, hubs, demolition_sites);
        let rngs = EntityRngs::new(world.entity_count(), seed);
        Ok((world, rngs))
    }
}

fn tier_active(topology: HubTopology, tier: HubTier) -> bool {
    match topology {
        HubTopology::Centralized   => tier == HubTier::Macro,
        HubTopology::Decentralized => true,
        HubTopology::Direct        => false,
    }
}

fn full_fill(materials: usize) -> MaterialGrid {
    let mut grid = MaterialGrid::zeros(materials);
    for category in StructuralCategory::ALL {
        for m in 0..materials {
            grid.set(category, MaterialId(m as u16), 1.0);
        }
    }
    grid
}
