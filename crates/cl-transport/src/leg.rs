//! Transport legs and the mode-selection rule.

use cl_core::{EntityId, NetworkType, PolicyConfig, TruckPolicy, ZoneFlags};
use cl_network::RouteClass;

use crate::{EmissionBucket, Region, VehicleEnergy, DEMOLITION_LOAD_FACTOR, DIRECT_SUPPLY_LOAD_FACTOR};

/// One end of a leg.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub id:   EntityId,
    pub zone: ZoneFlags,
}

impl Endpoint {
    pub fn new(id: EntityId, zone: ZoneFlags) -> Self {
        Self { id, zone }
    }
}

/// A single origin → destination movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    pub class: RouteClass,
    pub from:  Endpoint,
    pub to:    Endpoint,
}

impl Leg {
    pub fn new(class: RouteClass, from: Endpoint, to: Endpoint) -> Self {
        Self { class, from, to }
    }

    pub fn region(&self) -> Region {
        match self.class {
            RouteClass::HubClient | RouteClass::DemolitionHub => Region::Urban,
            RouteClass::SupplierHub | RouteClass::SupplierClient => Region::International,
        }
    }

    /// Fraction of rated capacity actually loaded on this leg.
    pub fn load_factor(&self) -> f64 {
        match self.class {
            RouteClass::DemolitionHub  => DEMOLITION_LOAD_FACTOR,
            RouteClass::SupplierClient => DIRECT_SUPPLY_LOAD_FACTOR,
            RouteClass::HubClient | RouteClass::SupplierHub => 1.0,
        }
    }

    /// Running total this leg's emissions are added to.  Demolition pickups
    /// and direct supplier deliveries count as inbound supply.
    pub fn bucket(&self) -> EmissionBucket {
        match self.class {
            RouteClass::HubClient => EmissionBucket::HubToClient,
            _ => EmissionBucket::SupplierToHub,
        }
    }

    /// Network and road traction for this leg under `policy`.
    ///
    /// Urban legs go by water only when water transport is configured and
    /// both ends are water accessible.  Supplier legs use the configured
    /// network, falling back to road when it is water and the receiving end
    /// has no quay.  Supplier origins count as always reachable by water, so
    /// their own zone flags never force a supplier leg onto road.  The
    /// returned energy only matters on road.
    pub fn mode(&self, policy: &PolicyConfig) -> (NetworkType, VehicleEnergy) {
        let water = policy.network_type == NetworkType::Water;
        let network = match self.region() {
            Region::Urban if water && self.from.zone.water_accessible && self.to.zone.water_accessible => {
                NetworkType::Water
            }
            Region::Urban => NetworkType::Road,
            Region::International if water && !self.to.zone.water_accessible => NetworkType::Road,
            Region::International => policy.network_type,
        };
        let energy = match policy.truck_policy {
            TruckPolicy::Diesel   => VehicleEnergy::Diesel,
            TruckPolicy::Electric => VehicleEnergy::Electric,
            TruckPolicy::Semi if self.from.zone.in_low_emission_zone || self.to.zone.in_low_emission_zone => {
                VehicleEnergy::Electric
            }
            TruckPolicy::Semi => VehicleEnergy::Diesel,
        };
        (network, energy)
    }
}
