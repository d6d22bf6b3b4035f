//! Trip, emission, and road-damage formulas.

use cl_core::NetworkType;

use crate::{VehicleEnergy, VehicleProfile};

/// Every trip is driven there and back.
pub const ROUND_TRIP: f64 = 2.0;

/// Demolition pickups load 80 % of rated capacity.
pub const DEMOLITION_LOAD_FACTOR: f64 = 0.8;

/// Direct supplier → site deliveries load 30 % of rated capacity.
pub const DIRECT_SUPPLY_LOAD_FACTOR: f64 = 0.3;

/// `⌈tons / capacity⌉`, and zero for an empty shipment.
#[inline]
pub fn trip_count(tons: f64, capacity: f64) -> u64 {
    debug_assert!(capacity > 0.0);
    if tons <= 0.0 { 0 } else { (tons / capacity).ceil() as u64 }
}

/// Round-trip emissions for `trips` trips carrying `tons` in total.
///
/// The gross weight uses the whole shipment, not the per-trip load.
#[inline]
pub fn trip_emissions(profile: &VehicleProfile, tons: f64, distance_km: f64, trips: u64) -> f64 {
    profile.emissions_per_ton_km
        * (profile.tare_weight_tons + tons)
        * distance_km
        * trips as f64
        * ROUND_TRIP
}

/// Fourth-power pavement wear of one trip at full effective load.
/// `axles` is at least 1; the vehicle loader rejects anything else.
#[inline]
pub fn axle_damage(capacity: f64, axles: u32) -> f64 {
    (capacity / axles as f64).powi(4)
}

/// Result of one accountant call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shipment {
    pub network:     NetworkType,
    /// Traction used; `None` off the road network.
    pub energy:      Option<VehicleEnergy>,
    pub distance_km: f64,
    /// Effective (derated) capacity per trip.
    pub capacity:    f64,
    pub trips:       u64,
    pub emissions:   f64,
    /// Damage added to *each* segment of the route.
    pub damage:      f64,
}
