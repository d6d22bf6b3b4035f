//! Shared transport context.

use cl_core::{MaterialId, NetworkType, PolicyConfig};
use cl_network::{RoadUsageLedger, RouteClass, RouteTable};

use crate::{
    axle_damage, trip_count, trip_emissions, EmissionsAccumulator, Leg, Shipment, TransportResult,
    VehicleTable,
};

/// Everything the accountant reads or writes during a run.
///
/// `vehicles` is keyed by the construction material registry;
/// `demolition_vehicles` by the demolition-site registry and used only for
/// [`RouteClass::DemolitionHub`] legs.
#[derive(Debug, Clone)]
pub struct TransportState {
    pub policy:              PolicyConfig,
    pub routes:              RouteTable,
    pub vehicles:            VehicleTable,
    pub demolition_vehicles: VehicleTable,
    pub road_usage:          RoadUsageLedger,
    pub emissions:           EmissionsAccumulator,
}

impl TransportState {
    /// Fresh state; every segment referenced by `routes` starts at zero use.
    pub fn new(
        policy:              PolicyConfig,
        routes:              RouteTable,
        vehicles:            VehicleTable,
        demolition_vehicles: VehicleTable,
    ) -> Self {
        let road_usage = RoadUsageLedger::with_segments(routes.segments());
        Self {
            policy,
            routes,
            vehicles,
            demolition_vehicles,
            road_usage,
            emissions: EmissionsAccumulator::new(),
        }
    }

    /// Account for moving `tons` of `material` along `leg`.
    ///
    /// Adds emissions to the leg's bucket and, on road legs, trips and
    /// damage to every segment of the route.  Lookups happen before any
    /// ledger is touched, so a failed call leaves the state unchanged.
    pub fn ship(&mut self, leg: &Leg, material: MaterialId, tons: f64) -> TransportResult<Shipment> {
        let route = self.routes.get(leg.class, leg.from.id, leg.to.id)?;
        let (network, energy) = leg.mode(&self.policy);
        let table = match leg.class {
            RouteClass::DemolitionHub => &self.demolition_vehicles,
            _ => &self.vehicles,
        };
        let profile = table.select(network, energy, leg.region())?;
        let capacity = profile.capacity(material)? * leg.load_factor();

        let trips = trip_count(tons, capacity);
        let emissions = trip_emissions(profile, tons, route.distance_km, trips);
        let on_road = network == NetworkType::Road;
        let damage = if on_road { axle_damage(capacity, profile.axles) * trips as f64 } else { 0.0 };

        if on_road && trips > 0 {
            self.road_usage.record(&route.segments, trips, damage);
        }
        self.emissions.add(leg.bucket(), emissions);

        Ok(Shipment {
            network,
            energy: on_road.then_some(energy),
            distance_km: route.distance_km,
            capacity,
            trips,
            emissions,
            damage,
        })
    }
}
