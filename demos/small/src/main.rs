//! small: a one-district run of the construction-logistics hub simulator.
//!
//! Four construction sites draw material through two macro and two micro
//! hubs from a national and an international supplier, with two demolition
//! sites feeding reclaimed material back in.  The scenario is read from a
//! JSON policy file given as the first argument, or the embedded
//! business-as-usual policy otherwise.

mod data;
mod network;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use cl_agents::{
    World, WorldBuilder, load_demolition_sites_reader, load_hubs_reader, load_sites_reader,
    load_suppliers_reader,
};
use cl_behavior::{MaterialCatalog, StandardModel};
use cl_core::{EntityId, GeoPoint, PolicyConfig, Round, SimConfig};
use cl_ledger::{load_composition_reader, load_name_conversion_reader, load_supplier_types_reader};
use cl_network::HubTier;
use cl_output::{
    CsvWriter, EmissionsReport, OutputWriter, SimOutputObserver, circular_split, usage_by_material,
};
use cl_sim::{RoundSummary, SimBuilder, SimObserver};
use cl_transport::{TransportState, load_vehicles_reader};

use network::{Layout, build_routes};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                   u64 = 42;
const TOTAL_ROUNDS:           u64 = 40;
const OUTPUT_INTERVAL_ROUNDS: u64 = 5;
const OUTPUT_DIR:             &str = "output/small";

// ── Progress observer ─────────────────────────────────────────────────────────

/// Prints per-round emissions and forwards everything to the CSV observer.
struct ProgressObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    snapshots: usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshots: 0 }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_round_end(&mut self, round: Round, summary: &RoundSummary) {
        if round.0 % OUTPUT_INTERVAL_ROUNDS == 0 {
            println!(
                "{:>5}  +{:>8.3}  total {:>9.3} tCO2eq",
                round, summary.emissions_round, summary.emissions_total
            );
        }
        self.inner.on_round_end(round, summary);
    }

    fn on_snapshot(&mut self, round: Round, world: &World, transport: &TransportState) {
        self.snapshots += 1;
        self.inner.on_snapshot(round, world, transport);
    }

    fn on_sim_end(&mut self, final_round: Round, world: &World, transport: &TransportState) {
        self.inner.on_sim_end(final_round, world, transport);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_policy() -> Result<PolicyConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading policy {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing policy {path}"))
        }
        None => Ok(serde_json::from_str(data::POLICY_JSON)?),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let policy = load_policy()?;
    println!("=== small: construction-logistics hub simulator ===");
    println!(
        "Hubs: {}  |  Network: {}  |  Trucks: {}",
        policy.hub_topology, policy.network_type, policy.truck_policy
    );
    println!(
        "Biobased: {}  |  Modularity: {}  |  Circularity: {}",
        policy.biobased_policy, policy.modularity_policy, policy.circularity_policy
    );
    println!();

    // 1. Reference tables.
    let (construction, composition) = load_composition_reader(Cursor::new(data::COMPOSITION_CSV))?;
    let supplier_types = load_supplier_types_reader(Cursor::new(data::SUPPLIER_TYPES_CSV), &construction)?;
    let vehicles = load_vehicles_reader(Cursor::new(data::VEHICLES_CSV), &construction)?;

    // 2. Entities.
    let sites = load_sites_reader(Cursor::new(data::SITES_CSV))?;
    let suppliers = load_suppliers_reader(Cursor::new(data::SUPPLIERS_CSV))?;
    let hubs = load_hubs_reader(Cursor::new(data::HUBS_CSV))?;
    let (demolition, demolition_sites) = load_demolition_sites_reader(Cursor::new(data::DEMOLITION_SITES_CSV))?;

    let conversion = load_name_conversion_reader(Cursor::new(data::NAME_CONVERSION_CSV), &construction, &demolition)?;
    let demolition_vehicles = load_vehicles_reader(Cursor::new(data::DEMOLITION_VEHICLES_CSV), &demolition)?;
    println!(
        "Materials: {} construction, {} demolition  |  Vehicle profiles: {}",
        construction.len(),
        demolition.len(),
        vehicles.len()
    );

    let site_points: Vec<GeoPoint> = sites.iter().map(|s| s.location).collect();
    let supplier_points: Vec<GeoPoint> = suppliers.iter().map(|s| s.location).collect();
    let hub_points: Vec<GeoPoint> = hubs.iter().map(|h| h.location).collect();
    let demolition_points: Vec<GeoPoint> = demolition_sites.iter().map(|d| d.location).collect();
    let hub_tiers: Vec<HubTier> = hubs.iter().map(|h| h.tier).collect();

    let world = WorldBuilder::new()
        .sites(sites)
        .suppliers(suppliers)
        .hubs(hubs)
        .demolition_sites(demolition_sites);

    // 3. Routes between every pair the model may ask for.
    let layout = Layout {
        sites:      (0..site_points.len()).map(|i| world.site_id(i)).collect(),
        suppliers:  (0..supplier_points.len()).map(|i| world.supplier_id(i)).collect(),
        macro_hubs: hub_ids(&world, &hub_tiers, HubTier::Macro),
        micro_hubs: hub_ids(&world, &hub_tiers, HubTier::Micro),
        demolition: (0..demolition_points.len()).map(|i| world.demolition_id(i)).collect(),
    };
    // Builder order: sites, suppliers, hubs, demolition sites.
    let points: Vec<GeoPoint> = [&site_points, &supplier_points, &hub_points, &demolition_points]
        .into_iter()
        .flatten()
        .copied()
        .collect();
    let routes = build_routes(&points, &layout);
    println!("Routes: {}", routes.len());

    // 4. Sim.
    let config = SimConfig {
        total_rounds:           TOTAL_ROUNDS,
        seed:                   SEED,
        output_interval_rounds: OUTPUT_INTERVAL_ROUNDS,
    };
    let catalog = MaterialCatalog { construction, demolition, conversion, supplier_types };
    let mut sim = SimBuilder::new(config, policy, catalog, composition, world, StandardModel)
        .routes(routes)
        .vehicles(vehicles)
        .demolition_vehicles(demolition_vehicles)
        .build()?;
    println!("Activation order: {} entities", sim.activation_order().len());
    println!();

    // 5. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = ProgressObserver::new(SimOutputObserver::new(writer, &sim.catalog.construction));

    // 6. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!("Simulation complete in {:.3} s  ({} snapshots in {OUTPUT_DIR})", elapsed.as_secs_f64(), obs.snapshots);
    println!();

    // 7. Report.
    println!("{}", EmissionsReport::new(&sim.transport.emissions));
    println!();

    println!("{:<12} {:>12}", "Material", "Received (t)");
    println!("{}", "-".repeat(25));
    for usage in usage_by_material(&sim.world, &sim.catalog.construction) {
        println!("{:<12} {:>12.1}", usage.material, usage.tons);
    }
    println!();

    let split = circular_split(&sim.world, &sim.policy);
    println!(
        "Circular: {:.1} t  |  Not circular: {:.1} t  |  Share: {:.1}%",
        split.circular,
        split.not_circular,
        split.circular_share() * 100.0
    );
    println!(
        "Road use: {} trips, {:.3e} damage units",
        sim.transport.road_usage.total_trips(),
        sim.transport.road_usage.total_damage()
    );
    println!();

    println!("{:<8} {:<12} {:>9}", "Site", "Building", "Progress");
    println!("{}", "-".repeat(31));
    for site in &sim.world.sites {
        println!(
            "{:<8} {:<12} {:>8.1}%",
            site.id.0,
            site.building_type,
            site.ledger.progress() * 100.0
        );
    }
    if sim.world.all_sites_complete() {
        println!("All sites complete.");
    }
    println!();

    println!("{:<6} {:<6} {:>8} {:>10} {:>11}", "Hub", "Tier", "Clients", "Suppliers", "Demolition");
    println!("{}", "-".repeat(45));
    for hub in sim.world.hubs.iter().filter(|h| h.active) {
        println!(
            "{:<6} {:<6} {:>8} {:>10} {:>11}",
            hub.id.0,
            hub.tier.as_str(),
            hub.usage.clients.len(),
            hub.usage.suppliers.len(),
            hub.usage.demolition_sites.len()
        );
    }

    Ok(())
}

fn hub_ids(world: &WorldBuilder, tiers: &[HubTier], tier: HubTier) -> Vec<EntityId> {
    tiers
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t == tier)
        .map(|(i, _)| world.hub_id(i))
        .collect()
}
