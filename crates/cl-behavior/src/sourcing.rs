//! Pulling material into a macro hub.
//!
//! Demolition collection is stochastic: the hub repeatedly draws one of its
//! demolition sites (those whose nearest macro hub it is) that still holds
//! the material, takes what it can, and stops when the demand is met or no
//! such site remains.  Each draw either meets the demand or empties a site,
//! so the loop always ends.  Supplier collection is deterministic: one
//! supplier per material, one shipment, full quantity.

use cl_agents::{SuppliesMaterials, World};
use cl_core::{EntityId, MaterialId};
use cl_ledger::MaterialTotals;
use cl_network::RouteClass;

use crate::{BehaviorError, BehaviorResult, MaterialCatalog, StepState};

/// The supplier serving `material`: the first one whose type matches the
/// material's supplier type.
pub fn supplier_for(world: &World, catalog: &MaterialCatalog, material: MaterialId) -> BehaviorResult<EntityId> {
    let kind = catalog.supplier_types.supplier_type(material)?;
    world
        .suppliers
        .iter()
        .find(|s| s.supplier_type == kind)
        .map(|s| s.id)
        .ok_or_else(|| BehaviorError::NoSupplier {
            material:      catalog.construction.name(material).to_owned(),
            supplier_type: kind.to_owned(),
        })
}

/// Check up front that every material some site requires resolves to a
/// supplier.
pub fn validate_supply(world: &World, catalog: &MaterialCatalog) -> BehaviorResult<()> {
    let mut required = MaterialTotals::zeros(catalog.construction.len());
    for site in &world.sites {
        for (_, material, tons) in site.ledger.required().iter_positive() {
            required.add(material, tons);
        }
    }
    for (material, _) in required.iter_positive() {
        supplier_for(world, catalog, material)?;
    }
    Ok(())
}

/// Run the demolition collection loop for every demanded material.
///
/// `demand` is keyed by the demolition taxonomy.  Returns what was actually
/// collected; a shortfall means the hub's demolition sites ran dry.
pub fn collect_from_demolition(
    hub:    EntityId,
    demand: &MaterialTotals,
    state:  &mut StepState<'_>,
) -> BehaviorResult<MaterialTotals> {
    let mut collected = MaterialTotals::zeros(demand.materials());

    for (material, wanted) in demand.iter_positive() {
        let mut still_needed = wanted;
        while still_needed > 0.0 {
            let eligible: Vec<EntityId> = state
                .world
                .demolition_sites
                .iter()
                .filter(|d| d.assignment.nearest_macro_hub.is_some_and(|n| n.hub == hub))
                .filter(|d| d.available(material) > 0.0)
                .map(|d| d.id)
                .collect();
            let Some(&site) = state.rngs.get_mut(hub).choose(&eligible) else { break };

            let taken = state.world.demolition_site(site)?.available(material).min(still_needed);
            let leg = state.leg(RouteClass::DemolitionHub, site, hub)?;
            state.transport.ship(&leg, material, taken)?;
            state.world.demolition_site_mut(site)?.supply(material, taken);

            let h = state.world.hub_mut(hub)?;
            h.reclaimed.add(material, taken);
            h.usage.demolition_sites.insert(site);
            collected.add(material, taken);

            if taken >= still_needed {
                break;
            }
            still_needed -= taken;
        }
    }
    Ok(collected)
}

/// Buy every material of `virgin` from its supplier in one shipment each.
pub fn collect_from_suppliers(
    hub:     EntityId,
    virgin:  &MaterialTotals,
    catalog: &MaterialCatalog,
    state:   &mut StepState<'_>,
) -> BehaviorResult<()> {
    for (material, tons) in virgin.iter_positive() {
        let supplier = supplier_for(state.world, catalog, material)?;
        let leg = state.leg(RouteClass::SupplierHub, supplier, hub)?;
        state.transport.ship(&leg, material, tons)?;

        let h = state.world.hub_mut(hub)?;
        h.received.add(material, tons);
        h.usage.suppliers.insert(supplier);
    }
    Ok(())
}
