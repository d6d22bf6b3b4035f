//! The `LogisticsModel` trait: what each entity kind does when activated.

use cl_agents::EntityKind;
use cl_core::EntityId;

use crate::{BehaviorResult, RoundContext, StepState};

/// Pluggable per-round behaviour.
///
/// The scheduler calls [`step`][Self::step] once per activated entity per
/// round, strictly sequentially; implementations may mutate anything in
/// [`StepState`].  Demolition sites are passive and never stepped.
pub trait LogisticsModel {
    fn step_site(&self, site: EntityId, ctx: &RoundContext<'_>, state: &mut StepState<'_>) -> BehaviorResult<()>;

    fn step_supplier(&self, supplier: EntityId, ctx: &RoundContext<'_>, state: &mut StepState<'_>) -> BehaviorResult<()>;

    fn step_hub(&self, hub: EntityId, ctx: &RoundContext<'_>, state: &mut StepState<'_>) -> BehaviorResult<()>;

    /// Dispatch on the entity's kind.
    fn step(&self, entity: EntityId, ctx: &RoundContext<'_>, state: &mut StepState<'_>) -> BehaviorResult<()> {
        match state.world.kind(entity)? {
            EntityKind::ConstructionSite => self.step_site(entity, ctx, state),
            EntityKind::Supplier         => self.step_supplier(entity, ctx, state),
            EntityKind::Hub              => self.step_hub(entity, ctx, state),
            EntityKind::DemolitionSite   => Ok(()),
        }
    }
}

/// The hub-logistics protocol: sites draw partial requests, hubs aggregate,
/// triage, source, and deliver, suppliers deliver directly when there are
/// no hubs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardModel;

impl LogisticsModel for StandardModel {
    fn step_site(&self, site: EntityId, _ctx: &RoundContext<'_>, state: &mut StepState<'_>) -> BehaviorResult<()> {
        crate::site::step_site(site, state)
    }

    fn step_supplier(&self, supplier: EntityId, ctx: &RoundContext<'_>, state: &mut StepState<'_>) -> BehaviorResult<()> {
        crate::supplier::step_supplier(supplier, ctx, state)
    }

    fn step_hub(&self, hub: EntityId, ctx: &RoundContext<'_>, state: &mut StepState<'_>) -> BehaviorResult<()> {
        crate::hub::step_hub(hub, ctx, state)
    }
}
