//! Hub step: aggregate client demand, source it (macro hubs), deliver.

use cl_agents::RoutesMaterials;
use cl_core::EntityId;
use cl_ledger::{MaterialGrid, MaterialRequest, MaterialTotals};
use cl_network::{HubTier, RouteClass};

use crate::sourcing::{collect_from_demolition, collect_from_suppliers};
use crate::triage::fill_ratios;
use crate::{BehaviorResult, RoundContext, StepState, Triage};

/// One activation of `hub`.
///
/// 1. Take (and clear) the pending request of every client.
/// 2. Micro hub: add the aggregate to its forwarded request, then serve
///    each client out of the stock the macro hub has already delivered.
///    Macro hub: triage, collect from demolition sites and suppliers,
///    record this round's fill ratios and deliver each client request
///    scaled by them.
///
/// Whatever a client does not receive stays outstanding on its ledger and
/// is asked for again in a later round.
pub fn step_hub(hub: EntityId, ctx: &RoundContext<'_>, state: &mut StepState<'_>) -> BehaviorResult<()> {
    let (clients, tier) = {
        let h = state.world.hub(hub)?;
        (h.clients().to_vec(), h.tier())
    };

    let mut aggregate = MaterialRequest::empty(ctx.catalog.construction.len());
    let mut requests = Vec::with_capacity(clients.len());
    for client in clients {
        let request = state.world.requester_mut(client)?.take_request();
        if request.is_empty() {
            continue;
        }
        aggregate.absorb(&request);
        requests.push((client, request));
    }

    match tier {
        HubTier::Micro => {
            state.world.hub_mut(hub)?.forwarded.absorb(&aggregate);
            deliver(hub, &requests, Allotment::Stock, state)
        }
        HubTier::Macro => {
            let fill = source(hub, aggregate.grid(), ctx, state)?;
            deliver(hub, &requests, Allotment::Fill(&fill), state)
        }
    }
}

/// Triage and collect an aggregated request; returns and stores the fill
/// ratios.
fn source(
    hub:     EntityId,
    request: &MaterialGrid,
    ctx:     &RoundContext<'_>,
    state:   &mut StepState<'_>,
) -> BehaviorResult<MaterialGrid> {
    let catalog = ctx.catalog;
    let mut triage = Triage::split(request, ctx.policy);

    let demolition_len = catalog.demolition.len();
    let (demand, collected) = if ctx.policy.circularity_policy.is_circular() {
        let demand = triage.demolition_demand(&catalog.conversion, demolition_len)?;
        let collected = collect_from_demolition(hub, &demand, state)?;
        (demand, collected)
    } else {
        (MaterialTotals::zeros(demolition_len), MaterialTotals::zeros(demolition_len))
    };
    collect_from_suppliers(hub, &triage.virgin, catalog, state)?;

    let fill = fill_ratios(request, ctx.policy, &catalog.conversion, &demand, &collected)?;
    state.world.hub_mut(hub)?.fill = fill.clone();
    Ok(fill)
}

/// How much of a requested cell a hub can hand out.
#[derive(Clone, Copy)]
enum Allotment<'a> {
    /// Macro hub: the request scaled by this round's fill ratio.
    Fill(&'a MaterialGrid),
    /// Micro hub: capped by what the macro hub has delivered so far.
    Stock,
}

/// One shipment per client per requested (category, material) cell.
fn deliver(
    hub:       EntityId,
    requests:  &[(EntityId, MaterialRequest)],
    allotment: Allotment<'_>,
    state:     &mut StepState<'_>,
) -> BehaviorResult<()> {
    for (client, request) in requests {
        let leg = state.leg(RouteClass::HubClient, hub, *client)?;
        let mut served = false;
        for (category, material, tons) in request.grid().iter_positive() {
            let sent = match allotment {
                Allotment::Fill(fill) => tons * fill.get(category, material),
                Allotment::Stock => state.world.hub_mut(hub)?.stock.withdraw(category, material, tons),
            };
            if sent <= 0.0 {
                continue;
            }
            state.transport.ship(&leg, material, sent)?;
            state.world.receiver_mut(*client)?.receive(category, material, sent);
            served = true;
        }
        if served {
            state.world.hub_mut(hub)?.usage.clients.insert(*client);
        }
    }
    Ok(())
}
