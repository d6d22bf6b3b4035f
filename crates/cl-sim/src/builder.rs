//! Fluent builder for constructing a [`Sim`].

use cl_agents::{World, WorldBuilder};
use cl_behavior::{LogisticsModel, MaterialCatalog, validate_supply};
use cl_core::{EntityId, PolicyConfig, Round, SimConfig};
use cl_ledger::CompositionTable;
use cl_network::{AssignmentTable, RouteTable};
use cl_transport::{TransportState, VehicleTable};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total rounds, seed, snapshot interval
/// - [`PolicyConfig`]: the scenario
/// - [`MaterialCatalog`] + [`CompositionTable`]: material reference data
/// - [`WorldBuilder`]: entity specs, in id order
/// - `M: LogisticsModel`: the behaviour implementation
///
/// # Optional inputs (have defaults)
///
/// | Method                       | Default                                   |
/// |------------------------------|-------------------------------------------|
/// | `.routes(t)`                 | empty table (every leg fails lookup)      |
/// | `.vehicles(t)`               | empty table                               |
/// | `.demolition_vehicles(t)`    | empty table                               |
/// | `.activation_order(v)`       | sites, suppliers, active hubs; by id      |
pub struct SimBuilder<M: LogisticsModel> {
    config:              SimConfig,
    policy:              PolicyConfig,
    catalog:             MaterialCatalog,
    composition:         CompositionTable,
    world:               WorldBuilder,
    model:               M,
    routes:              Option<RouteTable>,
    vehicles:            Option<VehicleTable>,
    demolition_vehicles: Option<VehicleTable>,
    order:               Option<Vec<EntityId>>,
}

impl<M: LogisticsModel> SimBuilder<M> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:      SimConfig,
        policy:      PolicyConfig,
        catalog:     MaterialCatalog,
        composition: CompositionTable,
        world:       WorldBuilder,
        model:       M,
    ) -> Self {
        Self {
            config,
            policy,
            catalog,
            composition,
            world,
            model,
            routes:              None,
            vehicles:            None,
            demolition_vehicles: None,
            order:               None,
        }
    }

    /// Precomputed routes for all four route classes.
    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Vehicle profiles for construction-material legs.
    pub fn vehicles(mut self, vehicles: VehicleTable) -> Self {
        self.vehicles = Some(vehicles);
        self
    }

    /// Vehicle profiles for demolition → hub legs, with capacities keyed by
    /// the demolition taxonomy.
    pub fn demolition_vehicles(mut self, vehicles: VehicleTable) -> Self {
        self.demolition_vehicles = Some(vehicles);
        self
    }

    /// Step entities in exactly this order every round.
    ///
    /// Must be a permutation of the construction sites, suppliers, and
    /// active hubs of the built world.
    pub fn activation_order(mut self, order: Vec<EntityId>) -> Self {
        self.order = Some(order);
        self
    }

    /// Build the world, assign clients to hubs, validate reference data,
    /// and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<M>> {
        let (mut world, rngs) = self.world.build(
            &self.composition,
            &self.catalog.construction,
            self.catalog.demolition.len(),
            &self.policy,
            self.config.seed,
        )?;

        // ── Static client assignment ──────────────────────────────────────
        if self.policy.hub_topology.has_hubs() {
            let hubs: Vec<_> = world.hubs.iter().filter(|h| h.active).map(|h| (h.id, h.tier)).collect();
            let sites: Vec<EntityId> = world.site_ids().collect();
            // Demolition sites are only ever collected from under circularity.
            let demolition: Vec<EntityId> = if self.policy.circularity_policy.is_circular() {
                world.demolition_ids().collect()
            } else {
                Vec::new()
            };
            let routes = self.routes.as_ref().ok_or_else(|| {
                SimError::Config(format!("hub topology {} requires a route table", self.policy.hub_topology))
            })?;
            let table = AssignmentTable::compute(&hubs, &sites, &demolition, routes)?;
            world.apply_assignment(&table, self.policy.hub_topology)?;
        }

        validate_supply(&world, &self.catalog)?;

        let order = match self.order {
            Some(order) => {
                validate_order(&world, &order)?;
                order
            }
            None => default_order(&world),
        };

        let transport = TransportState::new(
            self.policy,
            self.routes.unwrap_or_default(),
            self.vehicles.unwrap_or_default(),
            self.demolition_vehicles.unwrap_or_default(),
        );

        Ok(Sim {
            config:  self.config,
            policy:  self.policy,
            catalog: self.catalog,
            round:   Round::ZERO,
            world,
            rngs,
            transport,
            model:   self.model,
            order,
        })
    }
}

/// Construction sites, then suppliers, then active hubs, each by id.
pub fn default_order(world: &World) -> Vec<EntityId> {
    world
        .site_ids()
        .chain(world.supplier_ids())
        .chain(world.active_hub_ids())
        .collect()
}

fn validate_order(world: &World, order: &[EntityId]) -> SimResult<()> {
    let mut expected = default_order(world);
    if order.len() != expected.len() {
        return Err(SimError::OrderLength { expected: expected.len(), got: order.len() });
    }
    expected.sort_unstable();
    let mut seen = vec![false; expected.len()];
    for &id in order {
        match expected.binary_search(&id) {
            Ok(i) if !seen[i] => seen[i] = true,
            _ => return Err(SimError::OrderEntry(id)),
        }
    }
    Ok(())
}
