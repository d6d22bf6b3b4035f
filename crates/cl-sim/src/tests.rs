//! Integration tests for cl-sim: whole runs over a tiny city.
//!
//! | Id | Entity                         |
//! |----|--------------------------------|
//! | 0  | construction site              |
//! | 1  | supplier `national`            |
//! | 2  | macro hub                      |
//! | 3  | demolition site                |

use cl_agents::{DemolitionSpec, HubSpec, SiteSpec, SupplierSpec, WorldBuilder};
use cl_behavior::{MaterialCatalog, StandardModel};
use cl_core::{
    CircularityPolicy, EntityId, GeoPoint, MaterialId, NetworkType, PolicyConfig, Round, SegmentId,
    SimConfig, StructuralCategory, ZoneFlags,
};
use cl_ledger::{MaterialRegistry, NameConversion, SupplierTypes, load_composition_reader};
use cl_network::{HubTier, Route, RouteClass, RouteTable};
use cl_transport::{Region, TransportState, VehicleEnergy, VehicleProfile, VehicleTable};

use crate::{NoopObserver, RoundSummary, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `house` needs 100 t of timber for its foundation; `shed` only uses
/// categories a full circularity policy reclaims.
const COMPOSITION_CSV: &str = "\
building_type,biobased,category,material,tons
house,none,foundation,timber,100
shed,none,structural,steel,60
shed,none,non-structural,timber,40
";

const SITE:       EntityId = EntityId(0);
const SUPPLIER:   EntityId = EntityId(1);
const HUB:        EntityId = EntityId(2);
const DEMOLITION: EntityId = EntityId(3);

const EMISSIONS_FACTOR: f64 = 0.05;
const TARE:             f64 = 10.0;
const CAPACITY:         f64 = 20.0;
const SUPPLIER_HUB_KM:  f64 = 40.0;
const HUB_SITE_KM:      f64 = 10.0;

fn config(total_rounds: u64, seed: u64) -> SimConfig {
    SimConfig { total_rounds, seed, output_interval_rounds: 1 }
}

fn catalog() -> (MaterialCatalog, cl_ledger::CompositionTable) {
    let (construction, composition) = load_composition_reader(COMPOSITION_CSV.as_bytes()).unwrap();
    let demolition = MaterialRegistry::new(["wood", "scrap"]).unwrap();
    let conversion = NameConversion::new(
        &construction,
        &demolition,
        [("timber", "wood"), ("steel", "scrap")].map(|(a, b)| (a.to_owned(), b.to_owned())),
    );
    let supplier_types = SupplierTypes::new(
        &construction,
        [("timber", "national"), ("steel", "national")].map(|(a, b)| (a.to_owned(), b.to_owned())),
    );
    let catalog = MaterialCatalog { construction, demolition, conversion, supplier_types };
    (catalog, composition)
}

fn world(building_type: &str) -> WorldBuilder {
    let here = GeoPoint::new(51.92, 4.48);
    let zone = ZoneFlags::default();
    WorldBuilder::new()
        .site(SiteSpec { location: here, zone, building_type: building_type.into() })
        .supplier(SupplierSpec { location: here, zone, supplier_type: "national".into() })
        .hub(HubSpec { location: here, zone, tier: HubTier::Macro })
        .demolition_site(DemolitionSpec {
            location: here,
            zone,
            stock: vec![(MaterialId(0), 10_000.0), (MaterialId(1), 10_000.0)],
        })
}

fn routes() -> RouteTable {
    let mut t = RouteTable::new();
    let r = |km, segs: &[u64]| Route::new(km, segs.iter().copied().map(SegmentId).collect());
    t.insert(RouteClass::HubClient, HUB, SITE, r(HUB_SITE_KM, &[1]));
    t.insert(RouteClass::SupplierHub, SUPPLIER, HUB, r(SUPPLIER_HUB_KM, &[2]));
    t.insert(RouteClass::DemolitionHub, DEMOLITION, HUB, r(5.0, &[3]));
    t.insert(RouteClass::SupplierClient, SUPPLIER, SITE, r(SUPPLIER_HUB_KM + HUB_SITE_KM, &[2, 1]));
    t
}

fn trucks(materials: usize) -> VehicleTable {
    let truck = |region| {
        let mut p = VehicleProfile::new(
            NetworkType::Road, Some(VehicleEnergy::Diesel), region, EMISSIONS_FACTOR, TARE, 5,
        );
        for m in 0..materials {
            p.set_capacity(MaterialId(m as u16), CAPACITY);
        }
        p
    };
    VehicleTable::new(vec![truck(Region::Urban), truck(Region::International)])
}

fn builder(building_type: &str, policy: PolicyConfig, seed: u64) -> SimBuilder<StandardModel> {
    let (catalog, composition) = catalog();
    let vehicles = trucks(catalog.construction.len());
    let demolition_vehicles = trucks(catalog.demolition.len());
    SimBuilder::new(config(12, seed), policy, catalog, composition, world(building_type), StandardModel)
        .routes(routes())
        .vehicles(vehicles)
        .demolition_vehicles(demolition_vehicles)
}

fn sim(building_type: &str, policy: PolicyConfig) -> Sim<StandardModel> {
    builder(building_type, policy, 42).build().unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Records every hook call.
#[derive(Default)]
struct Recorder {
    summaries:      Vec<RoundSummary>,
    received:       Vec<f64>,
    road_trips:     Vec<u64>,
    started:        Vec<Round>,
    ended:          Option<Round>,
    overshoot:      bool,
}

impl SimObserver for Recorder {
    fn on_round_start(&mut self, round: Round) {
        self.started.push(round);
    }

    fn on_round_end(&mut self, _round: Round, summary: &RoundSummary) {
        self.summaries.push(*summary);
    }

    fn on_snapshot(&mut self, _round: Round, world: &cl_agents::World, transport: &TransportState) {
        let mut total = 0.0;
        for site in &world.sites {
            let ledger = &site.ledger;
            total += ledger.received().total();
            for (c, m, q) in ledger.received().iter() {
                if q > ledger.required().get(c, m) * (1.0 + 1e-9) {
                    self.overshoot = true;
                }
            }
        }
        self.received.push(total);
        self.road_trips.push(transport.road_usage.total_trips());
    }

    fn on_sim_end(&mut self, final_round: Round, _world: &cl_agents::World, _transport: &TransportState) {
        self.ended = Some(final_round);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn default_order_is_sites_suppliers_hubs() {
        let s = sim("house", PolicyConfig::default());
        assert_eq!(s.activation_order(), &[SITE, SUPPLIER, HUB]);
        assert_eq!(s.world.hub(HUB).unwrap().clients, vec![SITE]);
    }

    #[test]
    fn custom_order_accepted_when_permutation() {
        let s = builder("house", PolicyConfig::default(), 1)
            .activation_order(vec![HUB, SITE, SUPPLIER])
            .build()
            .unwrap();
        assert_eq!(s.activation_order(), &[HUB, SITE, SUPPLIER]);
    }

    #[test]
    fn order_with_wrong_length_rejected() {
        let r = builder("house", PolicyConfig::default(), 1)
            .activation_order(vec![SITE, HUB])
            .build();
        assert!(matches!(r, Err(SimError::OrderLength { expected: 3, got: 2 })));
    }

    #[test]
    fn order_with_duplicate_or_passive_entity_rejected() {
        let dup = builder("house", PolicyConfig::default(), 1)
            .activation_order(vec![SITE, SITE, HUB])
            .build();
        assert!(matches!(dup, Err(SimError::OrderEntry(id)) if id == SITE));

        let passive = builder("house", PolicyConfig::default(), 1)
            .activation_order(vec![SITE, SUPPLIER, DEMOLITION])
            .build();
        assert!(matches!(passive, Err(SimError::OrderEntry(id)) if id == DEMOLITION));
    }

    #[test]
    fn missing_route_is_fatal_at_build() {
        let (catalog, composition) = catalog();
        let r = SimBuilder::new(
            config(1, 1), PolicyConfig::default(), catalog, composition, world("house"), StandardModel,
        )
        .routes(RouteTable::new())
        .build();
        assert!(matches!(r, Err(SimError::Network(_))));
    }

    #[test]
    fn missing_vehicle_aborts_run() {
        let (catalog, composition) = catalog();
        let mut s = SimBuilder::new(
            config(3, 1), PolicyConfig::default(), catalog, composition, world("house"), StandardModel,
        )
        .routes(routes())
        .build()
        .unwrap();
        assert!(s.run(&mut NoopObserver).is_err());
    }
}

// ── End-to-end scenarios ──────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn single_site_emissions_match_closed_form() {
        let mut s = sim("house", PolicyConfig::default());
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();

        assert_eq!(rec.started.len(), 12);
        assert_eq!(rec.ended, Some(Round(12)));

        let ledger = &s.world.site(SITE).unwrap().ledger;
        let timber = s.catalog.construction.id("timber").unwrap();
        assert!(close(ledger.received().get(StructuralCategory::Foundation, timber), 100.0));
        assert!(ledger.outstanding().next().is_none());

        // Every request is below capacity, so each delivering round runs one
        // trip per leg: emissions = 2·f·(d_sh + d_hc)·(tare·n + 100).
        let n = rec.summaries.iter().filter(|r| r.emissions_round > 0.0).count() as f64;
        assert!(n >= 5.0);
        let expected = 2.0 * EMISSIONS_FACTOR * (SUPPLIER_HUB_KM + HUB_SITE_KM) * (TARE * n + 100.0);
        let total = s.transport.emissions.total();
        assert!(close(total, expected), "{total} vs {expected}");

        let last = rec.summaries.last().unwrap();
        assert!(close(last.emissions_total, total));
        let summed: f64 = rec.summaries.iter().map(|r| r.emissions_round).sum();
        assert!(close(summed, total));

        assert_eq!(s.transport.road_usage.get(SegmentId(1)).unwrap().trips, n as u64);
        assert_eq!(s.transport.road_usage.get(SegmentId(3)).unwrap().trips, 0);
    }

    #[test]
    fn full_circularity_leaves_supplier_log_empty() {
        let policy = PolicyConfig { circularity_policy: CircularityPolicy::Full, ..PolicyConfig::default() };
        let mut s = sim("shed", policy);
        s.run(&mut NoopObserver).unwrap();

        let hub = s.world.hub(HUB).unwrap();
        assert!(hub.usage.suppliers.is_empty());
        assert!(hub.received.is_empty());
        assert!(hub.usage.demolition_sites.contains(&DEMOLITION));
        assert!(s.world.site(SITE).unwrap().ledger.is_complete());
        assert!(close(s.world.demolition_site(DEMOLITION).unwrap().stock.total(), 20_000.0 - 100.0));
        assert_eq!(s.transport.road_usage.get(SegmentId(2)).unwrap().trips, 0);
    }

    #[test]
    fn accumulators_are_monotonic_and_never_overshoot() {
        let mut s = sim("house", PolicyConfig::default());
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();

        assert_eq!(rec.received.len(), 12);
        assert!(rec.received.windows(2).all(|w| w[0] <= w[1]));
        assert!(rec.road_trips.windows(2).all(|w| w[0] <= w[1]));
        assert!(rec.summaries.windows(2).all(|w| w[0].emissions_total <= w[1].emissions_total));
        assert!(rec.summaries.iter().all(|r| r.emissions_round >= 0.0));
        assert!(!rec.overshoot);
    }

    #[test]
    fn same_seed_reproduces_run() {
        let run = |seed| {
            let mut s = builder("house", PolicyConfig::default(), seed).build().unwrap();
            let mut rec = Recorder::default();
            s.run(&mut rec).unwrap();
            rec.summaries
        };
        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }

    #[test]
    fn activation_order_changes_results() {
        let mut default = sim("house", PolicyConfig::default());
        let mut hub_first = builder("house", PolicyConfig::default(), 42)
            .activation_order(vec![HUB, SUPPLIER, SITE])
            .build()
            .unwrap();

        let mut a = Recorder::default();
        let mut b = Recorder::default();
        default.run_rounds(1, &mut a).unwrap();
        hub_first.run_rounds(1, &mut b).unwrap();

        assert!(a.summaries[0].emissions_round > 0.0);
        // The hub ran before its client drew a request.
        assert_eq!(b.summaries[0].emissions_round, 0.0);
        assert!(!hub_first.world.site(SITE).unwrap().request.is_empty());

        // The pending request is served next round, exactly once.
        hub_first.run_rounds(1, &mut b).unwrap();
        assert!(b.summaries[1].emissions_round > 0.0);
    }

    #[test]
    fn direct_supply_skips_hubs() {
        let policy = PolicyConfig { hub_topology: cl_core::HubTopology::Direct, ..PolicyConfig::default() };
        let mut s = sim("house", policy);
        assert_eq!(s.activation_order(), &[SITE, SUPPLIER]);
        s.run(&mut NoopObserver).unwrap();

        assert!(s.world.site(SITE).unwrap().ledger.received().total() > 0.0);
        assert_eq!(s.transport.emissions.hub_to_client(), 0.0);
        assert!(s.transport.emissions.supplier_to_hub() > 0.0);
        assert!(s.world.hub(HUB).unwrap().usage.clients.is_empty());
    }
}

// ── Decentralized topology ────────────────────────────────────────────────────

#[cfg(test)]
mod decentralized {
    //! A second city with a micro hub between the macro hub and the site:
    //! site 0, supplier 1, macro hub 2, micro hub 3, demolition site 4.

    use cl_core::HubTopology;

    use super::*;

    const MACRO:   EntityId = EntityId(2);
    const MICRO:   EntityId = EntityId(3);
    const WRECK:   EntityId = EntityId(4);

    fn tiered_sim(building_type: &str, circularity: CircularityPolicy, stock: f64) -> Sim<StandardModel> {
        let (catalog, composition) = catalog();
        let here = GeoPoint::new(51.92, 4.48);
        let zone = ZoneFlags::default();
        let world = WorldBuilder::new()
            .site(SiteSpec { location: here, zone, building_type: building_type.into() })
            .supplier(SupplierSpec { location: here, zone, supplier_type: "national".into() })
            .hub(HubSpec { location: here, zone, tier: HubTier::Macro })
            .hub(HubSpec { location: here, zone, tier: HubTier::Micro })
            .demolition_site(DemolitionSpec {
                location: here,
                zone,
                stock: vec![(MaterialId(0), stock), (MaterialId(1), stock)],
            });

        let mut routes = RouteTable::new();
        let r = |km, segs: &[u64]| Route::new(km, segs.iter().copied().map(SegmentId).collect());
        routes.insert(RouteClass::HubClient, MACRO, SITE, r(HUB_SITE_KM, &[1]));
        routes.insert(RouteClass::HubClient, MICRO, SITE, r(2.0, &[4]));
        routes.insert(RouteClass::HubClient, MACRO, MICRO, r(8.0, &[5]));
        routes.insert(RouteClass::SupplierHub, SUPPLIER, MACRO, r(SUPPLIER_HUB_KM, &[2]));
        routes.insert(RouteClass::DemolitionHub, WRECK, MACRO, r(5.0, &[3]));

        let policy = PolicyConfig {
            hub_topology: HubTopology::Decentralized,
            circularity_policy: circularity,
            ..PolicyConfig::default()
        };
        let vehicles = trucks(catalog.construction.len());
        let demolition_vehicles = trucks(catalog.demolition.len());
        SimBuilder::new(config(12, 42), policy, catalog, composition, world, StandardModel)
            .routes(routes)
            .vehicles(vehicles)
            .demolition_vehicles(demolition_vehicles)
            .build()
            .unwrap()
    }

    #[test]
    fn site_is_served_through_micro_hub() {
        let mut s = tiered_sim("house", CircularityPolicy::Conventional, 0.0);
        assert_eq!(s.activation_order(), &[SITE, SUPPLIER, MACRO, MICRO]);
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();

        let received = s.world.site(SITE).unwrap().ledger.received().total();
        assert!(received > 0.0);
        assert!(!rec.overshoot);
        assert!(rec.received.windows(2).all(|w| w[0] <= w[1]));

        // Everything the site got went through the micro hub first.
        let micro = s.world.hub(MICRO).unwrap();
        assert!(close(received + micro.stock.total(), micro.received.total()));
        assert!(micro.usage.clients.contains(&SITE));
        assert!(s.world.hub(MACRO).unwrap().usage.clients.contains(&MICRO));
        assert!(s.transport.road_usage.get(SegmentId(4)).unwrap().trips > 0);
        assert!(s.transport.road_usage.get(SegmentId(5)).unwrap().trips > 0);
        assert_eq!(s.transport.road_usage.get(SegmentId(1)).unwrap().trips, 0);
    }

    #[test]
    fn empty_demolition_stock_reaches_no_site() {
        let mut s = tiered_sim("shed", CircularityPolicy::Full, 0.0);
        s.run(&mut NoopObserver).unwrap();

        let site = s.world.site(SITE).unwrap();
        assert_eq!(site.ledger.received().total(), 0.0);
        assert!(!site.ledger.is_complete());
        let macro_hub = s.world.hub(MACRO).unwrap();
        assert!(macro_hub.reclaimed.is_empty());
        assert!(macro_hub.usage.suppliers.is_empty());
        let micro = s.world.hub(MICRO).unwrap();
        assert!(micro.received.is_empty());
        assert!(micro.stock.is_empty());
        assert_eq!(s.transport.emissions.hub_to_client(), 0.0);
    }

    #[test]
    fn limited_demolition_stock_caps_site_deliveries() {
        let mut s = tiered_sim("shed", CircularityPolicy::Full, 15.0);
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();

        let site = s.world.site(SITE).unwrap();
        let received = site.ledger.received().total();
        assert!(received > 0.0);
        assert!(received <= 30.0 + 1e-9);
        assert!(!site.ledger.is_complete());
        assert!(!rec.overshoot);
        assert!(close(s.world.hub(MACRO).unwrap().reclaimed.total(), 30.0));
        assert_eq!(s.world.demolition_site(WRECK).unwrap().stock.total(), 0.0);
    }
}

