use cl_core::EntityId;

use crate::{BehaviorResult, LogisticsModel, RoundContext, StepState};

/// A model that does nothing.  Useful for testing the scheduler in
/// isolation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopModel;

impl LogisticsModel for NoopModel {
    fn step_site(&self, _site: EntityId, _ctx: &RoundContext<'_>, _state: &mut StepState<'_>) -> BehaviorResult<()> {
        Ok(())
    }

    fn step_supplier(&self, _supplier: EntityId, _ctx: &RoundContext<'_>, _state: &mut StepState<'_>) -> BehaviorResult<()> {
        Ok(())
    }

    fn step_hub(&self, _hub: EntityId, _ctx: &RoundContext<'_>, _state: &mut StepState<'_>) -> BehaviorResult<()> {
        Ok(())
    }
}
