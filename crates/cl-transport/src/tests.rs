//! Unit tests for cl-transport.

use cl_core::{EntityId, MaterialId, NetworkType, PolicyConfig, SegmentId, TruckPolicy, ZoneFlags};
use cl_network::{Route, RouteClass, RouteTable};

use crate::{Endpoint, Leg, Region, TransportState, VehicleEnergy, VehicleProfile, VehicleTable};

// ── Helpers ───────────────────────────────────────────────────────────────────

const TIMBER: MaterialId = MaterialId(0);
const STEEL:  MaterialId = MaterialId(1);

const HUB:      EntityId = EntityId(10);
const SITE:     EntityId = EntityId(1);
const SUPPLIER: EntityId = EntityId(5);
const DEMO:     EntityId = EntityId(20);

fn plain() -> ZoneFlags {
    ZoneFlags::new(false, false)
}

fn leg(class: RouteClass, from: (EntityId, ZoneFlags), to: (EntityId, ZoneFlags)) -> Leg {
    Leg::new(class, Endpoint::new(from.0, from.1), Endpoint::new(to.0, to.1))
}

fn road(energy: VehicleEnergy, region: Region, factor: f64) -> VehicleProfile {
    VehicleProfile::new(NetworkType::Road, Some(energy), region, factor, 10.0, 4)
        .with_capacity(TIMBER, 20.0)
        .with_capacity(STEEL, 40.0)
}

fn vehicles() -> VehicleTable {
    VehicleTable::new(vec![
        road(VehicleEnergy::Diesel, Region::Urban, 0.001),
        road(VehicleEnergy::Electric, Region::Urban, 0.0005),
        road(VehicleEnergy::Diesel, Region::International, 0.002),
        road(VehicleEnergy::Electric, Region::International, 0.001),
        VehicleProfile::new(NetworkType::Water, None, Region::Urban, 0.0002, 200.0, 1)
            .with_capacity(TIMBER, 500.0),
        VehicleProfile::new(NetworkType::Water, None, Region::International, 0.0003, 300.0, 1)
            .with_capacity(TIMBER, 1000.0),
    ])
}

fn routes() -> RouteTable {
    let mut t = RouteTable::new();
    let segs = |ids: &[u64]| ids.iter().copied().map(SegmentId).collect::<Vec<_>>();
    t.insert(RouteClass::HubClient, HUB, SITE, Route::new(5.0, segs(&[1, 2])));
    t.insert(RouteClass::SupplierHub, SUPPLIER, HUB, Route::new(100.0, segs(&[3])));
    t.insert(RouteClass::SupplierClient, SUPPLIER, SITE, Route::new(104.0, segs(&[3, 2])));
    t.insert(RouteClass::DemolitionHub, DEMO, HUB, Route::new(2.0, segs(&[4])));
    t
}

fn state(policy: PolicyConfig) -> TransportState {
    let demolition = VehicleTable::new(vec![
        VehicleProfile::new(NetworkType::Road, Some(VehicleEnergy::Diesel), Region::Urban, 0.001, 10.0, 4)
            .with_capacity(MaterialId(0), 10.0),
    ]);
    TransportState::new(policy, routes(), vehicles(), demolition)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

// ── Formulas ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod formulas {
    use crate::{axle_damage, trip_count, trip_emissions};

    use super::*;

    #[test]
    fn trip_count_is_ceiling() {
        assert_eq!(trip_count(100.0, 20.0), 5);
        assert_eq!(trip_count(100.5, 20.0), 6);
        assert_eq!(trip_count(0.1, 20.0), 1);
        assert_eq!(trip_count(0.0, 20.0), 0);
    }

    #[test]
    fn emissions_use_whole_shipment_weight() {
        let p = road(VehicleEnergy::Diesel, Region::Urban, 0.001);
        // 0.001 × (10 + 100) × 5 km × 5 trips × 2
        assert!(close(trip_emissions(&p, 100.0, 5.0, 5), 5.5));
        assert_eq!(trip_emissions(&p, 0.0, 5.0, 0), 0.0);
    }

    #[test]
    fn damage_is_fourth_power_of_axle_load() {
        assert_eq!(axle_damage(20.0, 4), 625.0);
        // Doubling the axle load multiplies damage per trip by 16.
        assert!(close(axle_damage(40.0, 4) / axle_damage(20.0, 4), 16.0));
    }
}

// ── Mode selection ────────────────────────────────────────────────────────────

#[cfg(test)]
mod mode {
    use super::*;

    fn policy(network: NetworkType, trucks: TruckPolicy) -> PolicyConfig {
        PolicyConfig { network_type: network, truck_policy: trucks, ..PolicyConfig::default() }
    }

    #[test]
    fn urban_water_needs_both_ends_accessible() {
        let p = policy(NetworkType::Water, TruckPolicy::Diesel);
        let wet = ZoneFlags::new(false, true);

        let both = leg(RouteClass::HubClient, (HUB, wet), (SITE, wet));
        assert_eq!(both.mode(&p).0, NetworkType::Water);

        let one = leg(RouteClass::HubClient, (HUB, wet), (SITE, plain()));
        assert_eq!(one.mode(&p).0, NetworkType::Road);
    }

    #[test]
    fn supplier_water_falls_back_when_receiver_is_dry() {
        let p = policy(NetworkType::Water, TruckPolicy::Diesel);
        let dry_hub = leg(RouteClass::SupplierHub, (SUPPLIER, plain()), (HUB, plain()));
        assert_eq!(dry_hub.mode(&p).0, NetworkType::Road);

        let wet_hub = leg(RouteClass::SupplierHub, (SUPPLIER, plain()), (HUB, ZoneFlags::new(false, true)));
        assert_eq!(wet_hub.mode(&p).0, NetworkType::Water);
    }

    #[test]
    fn dry_supplier_origin_still_ships_by_water() {
        let p = policy(NetworkType::Water, TruckPolicy::Diesel);
        let wet = ZoneFlags::new(false, true);
        assert!(!plain().water_accessible);

        let direct = leg(RouteClass::SupplierClient, (SUPPLIER, plain()), (SITE, wet));
        assert_eq!(direct.mode(&p).0, NetworkType::Water);
        let dry_site = leg(RouteClass::SupplierClient, (SUPPLIER, wet), (SITE, plain()));
        assert_eq!(dry_site.mode(&p).0, NetworkType::Road);
    }

    #[test]
    fn rail_supplier_legs_stay_on_rail() {
        let p = policy(NetworkType::Rail, TruckPolicy::Diesel);
        let l = leg(RouteClass::SupplierHub, (SUPPLIER, plain()), (HUB, plain()));
        assert_eq!(l.mode(&p).0, NetworkType::Rail);
        // Urban legs never use rail.
        let urban = leg(RouteClass::HubClient, (HUB, plain()), (SITE, plain()));
        assert_eq!(urban.mode(&p).0, NetworkType::Road);
    }

    #[test]
    fn semi_fleet_goes_electric_in_low_emission_zone() {
        let p = policy(NetworkType::Road, TruckPolicy::Semi);
        let lez = ZoneFlags::new(true, false);

        let inside = leg(RouteClass::HubClient, (HUB, plain()), (SITE, lez));
        assert_eq!(inside.mode(&p).1, VehicleEnergy::Electric);

        let outside = leg(RouteClass::HubClient, (HUB, plain()), (SITE, plain()));
        assert_eq!(outside.mode(&p).1, VehicleEnergy::Diesel);

        let electric = policy(NetworkType::Road, TruckPolicy::Electric);
        assert_eq!(outside.mode(&electric).1, VehicleEnergy::Electric);
    }

    #[test]
    fn load_factors_and_buckets() {
        use crate::EmissionBucket;
        let demo = leg(RouteClass::DemolitionHub, (DEMO, plain()), (HUB, plain()));
        let direct = leg(RouteClass::SupplierClient, (SUPPLIER, plain()), (SITE, plain()));
        let h2c = leg(RouteClass::HubClient, (HUB, plain()), (SITE, plain()));
        assert_eq!(demo.load_factor(), 0.8);
        assert_eq!(direct.load_factor(), 0.3);
        assert_eq!(h2c.load_factor(), 1.0);
        assert_eq!(demo.bucket(), EmissionBucket::SupplierToHub);
        assert_eq!(direct.bucket(), EmissionBucket::SupplierToHub);
        assert_eq!(h2c.bucket(), EmissionBucket::HubToClient);
    }
}

// ── Accountant ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ship {
    use super::*;
    use crate::TransportError;
    use cl_network::NetworkError;

    #[test]
    fn hub_to_site_road_delivery() {
        let mut s = state(PolicyConfig::default());
        let l = leg(RouteClass::HubClient, (HUB, plain()), (SITE, plain()));
        let out = s.ship(&l, TIMBER, 100.0).unwrap();

        assert_eq!(out.trips, 5);
        assert_eq!(out.network, NetworkType::Road);
        assert_eq!(out.energy, Some(VehicleEnergy::Diesel));
        // 0.001 × (10 + 100) × 5 × 5 × 2
        assert!(close(out.emissions, 5.5));
        assert!(close(s.emissions.hub_to_client(), 5.5));
        assert_eq!(s.emissions.supplier_to_hub(), 0.0);

        // (20 / 4)^4 × 5 on both segments of the route.
        for seg in [SegmentId(1), SegmentId(2)] {
            let u = s.road_usage.get(seg).unwrap();
            assert_eq!(u.trips, 5);
            assert!(close(u.damage, 3125.0));
        }
        assert_eq!(s.road_usage.get(SegmentId(3)).unwrap().trips, 0);
    }

    #[test]
    fn doubling_tonnage_doubles_damage() {
        let l = leg(RouteClass::HubClient, (HUB, plain()), (SITE, plain()));
        let mut a = state(PolicyConfig::default());
        let mut b = state(PolicyConfig::default());
        let one = a.ship(&l, TIMBER, 100.0).unwrap();
        let two = b.ship(&l, TIMBER, 200.0).unwrap();
        assert_eq!(two.trips, 2 * one.trips);
        assert!(close(two.damage, 2.0 * one.damage));
    }

    #[test]
    fn heavier_material_load_raises_damage_sixteenfold() {
        // Steel capacity is twice timber capacity: same trips, double axle load.
        let l = leg(RouteClass::HubClient, (HUB, plain()), (SITE, plain()));
        let mut s = state(PolicyConfig::default());
        let timber = s.ship(&l, TIMBER, 20.0).unwrap();
        let steel = s.ship(&l, STEEL, 40.0).unwrap();
        assert_eq!(timber.trips, steel.trips);
        assert!(close(steel.damage / timber.damage, 16.0));
    }

    #[test]
    fn water_legs_do_not_touch_roads() {
        let policy = PolicyConfig { network_type: NetworkType::Water, ..PolicyConfig::default() };
        let mut s = state(policy);
        let wet = ZoneFlags::new(false, true);
        let l = leg(RouteClass::HubClient, (HUB, wet), (SITE, wet));
        let out = s.ship(&l, TIMBER, 600.0).unwrap();

        assert_eq!(out.network, NetworkType::Water);
        assert_eq!(out.energy, None);
        assert_eq!(out.trips, 2);
        assert_eq!(out.damage, 0.0);
        assert_eq!(s.road_usage.total_trips(), 0);
        assert!(s.emissions.hub_to_client() > 0.0);
    }

    #[test]
    fn demolition_pickup_uses_derated_demolition_vehicle() {
        let mut s = state(PolicyConfig::default());
        let l = leg(RouteClass::DemolitionHub, (DEMO, plain()), (HUB, plain()));
        // capacity 10 × 0.8 = 8 → ⌈20 / 8⌉ = 3 trips
        let out = s.ship(&l, MaterialId(0), 20.0).unwrap();
        assert!(close(out.capacity, 8.0));
        assert_eq!(out.trips, 3);
        assert!(close(s.emissions.supplier_to_hub(), out.emissions));
        assert_eq!(s.road_usage.get(SegmentId(4)).unwrap().trips, 3);
    }

    #[test]
    fn direct_supply_is_derated_and_counted_as_inbound() {
        let mut s = state(PolicyConfig::default());
        let l = leg(RouteClass::SupplierClient, (SUPPLIER, plain()), (SITE, plain()));
        // capacity 20 × 0.3 = 6 → ⌈30 / 6⌉ = 5 trips
        let out = s.ship(&l, TIMBER, 30.0).unwrap();
        assert_eq!(out.trips, 5);
        // 0.002 × (10 + 30) × 104 × 5 × 2
        assert!(close(out.emissions, 83.2));
        assert!(close(s.emissions.supplier_to_hub(), 83.2));
    }

    #[test]
    fn zero_quantity_ships_nothing() {
        let mut s = state(PolicyConfig::default());
        let l = leg(RouteClass::HubClient, (HUB, plain()), (SITE, plain()));
        let out = s.ship(&l, TIMBER, 0.0).unwrap();
        assert_eq!(out.trips, 0);
        assert_eq!(out.emissions, 0.0);
        assert_eq!(s.road_usage.total_trips(), 0);
    }

    #[test]
    fn accumulation_is_order_independent() {
        let h2c = leg(RouteClass::HubClient, (HUB, plain()), (SITE, plain()));
        let s2h = leg(RouteClass::SupplierHub, (SUPPLIER, plain()), (HUB, plain()));

        let mut a = state(PolicyConfig::default());
        a.ship(&h2c, TIMBER, 50.0).unwrap();
        a.ship(&s2h, STEEL, 90.0).unwrap();

        let mut b = state(PolicyConfig::default());
        b.ship(&s2h, STEEL, 90.0).unwrap();
        b.ship(&h2c, TIMBER, 50.0).unwrap();

        assert!(close(a.emissions.total(), b.emissions.total()));
        assert_eq!(a.road_usage.total_trips(), b.road_usage.total_trips());
        assert!(close(a.road_usage.total_damage(), b.road_usage.total_damage()));
    }

    #[test]
    fn missing_route_leaves_state_untouched() {
        let mut s = state(PolicyConfig::default());
        let l = leg(RouteClass::HubClient, (SITE, plain()), (HUB, plain()));
        let err = s.ship(&l, TIMBER, 10.0).unwrap_err();
        assert!(matches!(err, TransportError::Network(NetworkError::NoRoute { .. })));
        assert_eq!(s.emissions.total(), 0.0);
    }

    #[test]
    fn missing_vehicle_and_capacity_are_lookup_errors() {
        // No rail profiles in the table.
        let rail = PolicyConfig { network_type: NetworkType::Rail, ..PolicyConfig::default() };
        let mut s = state(rail);
        let l = leg(RouteClass::SupplierHub, (SUPPLIER, plain()), (HUB, plain()));
        assert!(matches!(s.ship(&l, TIMBER, 1.0), Err(TransportError::NoVehicle { .. })));

        let mut s = state(PolicyConfig::default());
        let h2c = leg(RouteClass::HubClient, (HUB, plain()), (SITE, plain()));
        assert!(matches!(s.ship(&h2c, MaterialId(7), 1.0), Err(TransportError::NoCapacity { .. })));
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;
    use crate::{load_vehicles_reader, TransportError};
    use cl_ledger::MaterialRegistry;

    const CSV: &str = "\
network,energy,region,emissions_per_ton_km,tare_weight_tons,axles,capacity_timber,capacity_steel
road,diesel,urban,0.001,10,4,20,40
water,,urban,0.0002,200,1,500,
";

    #[test]
    fn loads_profiles_and_capacities() {
        let reg = MaterialRegistry::new(["timber", "steel"]).unwrap();
        let table = load_vehicles_reader(CSV.as_bytes(), &reg).unwrap();
        assert_eq!(table.len(), 2);

        let truck = table.select(NetworkType::Road, VehicleEnergy::Diesel, Region::Urban).unwrap();
        assert_eq!(truck.axles, 4);
        assert_eq!(truck.capacity(reg.id("steel").unwrap()).unwrap(), 40.0);

        // Energy is ignored off-road.
        let boat = table.select(NetworkType::Water, VehicleEnergy::Electric, Region::Urban).unwrap();
        assert_eq!(boat.energy, None);
        assert!(boat.capacity(reg.id("steel").unwrap()).is_err());
    }

    #[test]
    fn unknown_capacity_column_is_rejected() {
        let reg = MaterialRegistry::new(["timber"]).unwrap();
        let err = load_vehicles_reader(CSV.as_bytes(), &reg).unwrap_err();
        assert!(matches!(err, TransportError::Ledger(_)));
    }

    #[test]
    fn road_vehicle_needs_energy() {
        let reg = MaterialRegistry::new(["timber"]).unwrap();
        let csv = "network,energy,region,emissions_per_ton_km,tare_weight_tons,axles,capacity_timber\n\
                   road,,urban,0.001,10,4,20\n";
        assert!(matches!(load_vehicles_reader(csv.as_bytes(), &reg), Err(TransportError::Parse(_))));
    }

    #[test]
    fn zero_axles_rejected() {
        let reg = MaterialRegistry::new(["timber"]).unwrap();
        let csv = "network,energy,region,emissions_per_ton_km,tare_weight_tons,axles,capacity_timber\n\
                   road,diesel,urban,0.001,10,0,20\n";
        let err = load_vehicles_reader(csv.as_bytes(), &reg).unwrap_err();
        assert!(matches!(err, TransportError::Parse(ref msg) if msg.contains("axles")));
    }
}
