//! State handed to every step.

use cl_agents::{EntityRngs, World};
use cl_core::{EntityId, PolicyConfig, Round};
use cl_ledger::{MaterialRegistry, NameConversion, SupplierTypes};
use cl_network::RouteClass;
use cl_transport::{Endpoint, Leg, TransportState};

use crate::BehaviorResult;

/// The static material reference tables of a run.
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    /// Construction taxonomy; keys every ledger and request.
    pub construction:   MaterialRegistry,
    /// Demolition-site taxonomy; keys demolition stock.
    pub demolition:     MaterialRegistry,
    pub conversion:     NameConversion,
    pub supplier_types: SupplierTypes,
}

/// Read-only per-round inputs.
#[derive(Clone, Copy)]
pub struct RoundContext<'a> {
    pub round:   Round,
    pub policy:  &'a PolicyConfig,
    pub catalog: &'a MaterialCatalog,
}

impl<'a> RoundContext<'a> {
    #[inline]
    pub fn new(round: Round, policy: &'a PolicyConfig, catalog: &'a MaterialCatalog) -> Self {
        Self { round, policy, catalog }
    }
}

/// Everything a step may mutate.  Borrowed per round from the simulation;
/// the RNGs are a separate borrow so the acting entity's RNG can be used
/// while other entities in the world change.
pub struct StepState<'a> {
    pub world:     &'a mut World,
    pub rngs:      &'a mut EntityRngs,
    pub transport: &'a mut TransportState,
}

impl StepState<'_> {
    /// Leg between two entities, with their zone flags.
    pub fn leg(&self, class: RouteClass, from: EntityId, to: EntityId) -> BehaviorResult<Leg> {
        Ok(Leg::new(
            class,
            Endpoint::new(from, self.world.zone(from)?),
            Endpoint::new(to, self.world.zone(to)?),
        ))
    }
}
