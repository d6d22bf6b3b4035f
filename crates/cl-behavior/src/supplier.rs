//! Direct supply: with no hub tier, suppliers deliver straight to sites.

use cl_agents::{ReceivesMaterials, RequestsMaterials};
use cl_core::{EntityId, MaterialId, StructuralCategory};
use cl_network::RouteClass;

use crate::{supplier_for, BehaviorResult, RoundContext, StepState};

/// Deliver to every site the part of its request this supplier serves.
///
/// Does nothing when the topology has hubs: suppliers are then passive and
/// hubs pull from them.
pub fn step_supplier(supplier: EntityId, ctx: &RoundContext<'_>, state: &mut StepState<'_>) -> BehaviorResult<()> {
    if ctx.policy.hub_topology.has_hubs() {
        return Ok(());
    }

    let sites: Vec<EntityId> = state.world.site_ids().collect();
    for site in sites {
        let cells: Vec<(StructuralCategory, MaterialId, f64)> =
            state.world.site(site)?.pending_request().grid().iter_positive().collect();

        for (category, material, tons) in cells {
            if supplier_for(state.world, ctx.catalog, material)? != supplier {
                continue;
            }
            let leg = state.leg(RouteClass::SupplierClient, supplier, site)?;
            state.transport.ship(&leg, material, tons)?;

            let s = state.world.site_mut(site)?;
            s.request.take(category, material);
            s.receive(category, material, tons);
        }
    }
    Ok(())
}
