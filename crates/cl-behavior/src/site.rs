//! Construction-site demand step.

use cl_core::EntityId;
use cl_ledger::MaterialRequest;

use crate::{BehaviorResult, StepState};

/// Replace the site's request with a fresh draw from its ledger.
///
/// A complete site draws an empty request.
pub fn step_site(site: EntityId, state: &mut StepState<'_>) -> BehaviorResult<()> {
    let s = state.world.site_mut(site)?;
    let rng = state.rngs.get_mut(site);
    s.request = MaterialRequest::draw(&s.ledger, rng);
    Ok(())
}
