//! CSV loaders for entity tables.
//!
//! All tables share the location columns
//! `lat,lon,in_low_emission_zone,water_accessible` (flags as `0/1` or
//! `true/false`) and add:
//!
//! | Table             | Extra columns                                   |
//! |-------------------|-------------------------------------------------|
//! | construction sites| `building_type`                                 |
//! | hubs              | `tier` (`macro` / `micro`)                      |
//! | suppliers         | `supplier_type`                                 |
//! | demolition sites  | one `stock_<material>` column per material      |
//!
//! The demolition table defines the demolition material taxonomy: its
//! `stock_*` columns, in order, become the demolition registry.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cl_core::{GeoPoint, ZoneFlags};
use cl_ledger::MaterialRegistry;
use cl_network::HubTier;

use crate::{AgentError, AgentResult, DemolitionSpec, HubSpec, SiteSpec, SupplierSpec};

const STOCK_PREFIX: &str = "stock_";

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SiteRecord {
    lat:                  f32,
    lon:                  f32,
    in_low_emission_zone: String,
    water_accessible:     String,
    building_type:        String,
}

#[derive(Deserialize)]
struct HubRecord {
    lat:                  f32,
    lon:                  f32,
    in_low_emission_zone: String,
    water_accessible:     String,
    tier:                 String,
}

#[derive(Deserialize)]
struct SupplierRecord {
    lat:                  f32,
    lon:                  f32,
    in_low_emission_zone: String,
    water_accessible:     String,
    supplier_type:        String,
}

// ── Public API ────────────────────────────────────────────────────────────────

pub fn load_sites_csv(path: &Path) -> AgentResult<Vec<SiteSpec>> {
    load_sites_reader(std::fs::File::open(path)?)
}

pub fn load_sites_reader<R: Read>(reader: R) -> AgentResult<Vec<SiteSpec>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<SiteRecord>()
        .map(|r| -> AgentResult<SiteSpec> {
            let rec = r.map_err(parse_err)?;
            Ok(SiteSpec {
                location:      GeoPoint::new(rec.lat, rec.lon),
                zone:          zone(&rec.in_low_emission_zone, &rec.water_accessible)?,
                building_type: rec.building_type.trim().to_owned(),
            })
        })
        .collect()
}

pub fn load_hubs_csv(path: &Path) -> AgentResult<Vec<HubSpec>> {
    load_hubs_reader(std::fs::File::open(path)?)
}

pub fn load_hubs_reader<R: Read>(reader: R) -> AgentResult<Vec<HubSpec>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<HubRecord>()
        .map(|r| -> AgentResult<HubSpec> {
            let rec = r.map_err(parse_err)?;
            let tier = match rec.tier.trim() {
                "macro" => HubTier::Macro,
                "micro" => HubTier::Micro,
                other => return Err(AgentError::Parse(format!("unknown hub tier {other:?}"))),
            };
            Ok(HubSpec {
                location: GeoPoint::new(rec.lat, rec.lon),
                zone:     zone(&rec.in_low_emission_zone, &rec.water_accessible)?,
                tier,
            })
        })
        .collect()
}

pub fn load_suppliers_csv(path: &Path) -> AgentResult<Vec<SupplierSpec>> {
    load_suppliers_reader(std::fs::File::open(path)?)
}

pub fn load_suppliers_reader<R: Read>(reader: R) -> AgentResult<Vec<SupplierSpec>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<SupplierRecord>()
        .map(|r| -> AgentResult<SupplierSpec> {
            let rec = r.map_err(parse_err)?;
            Ok(SupplierSpec {
                location:      GeoPoint::new(rec.lat, rec.lon),
                zone:          zone(&rec.in_low_emission_zone, &rec.water_accessible)?,
                supplier_type: rec.supplier_type.trim().to_owned(),
            })
        })
        .collect()
}

/// Load demolition sites and the demolition registry defined by their
/// `stock_*` columns.
pub fn load_demolition_sites_csv(path: &Path) -> AgentResult<(MaterialRegistry, Vec<DemolitionSpec>)> {
    load_demolition_sites_reader(std::fs::File::open(path)?)
}

pub fn load_demolition_sites_reader<R: Read>(
    reader: R,
) -> AgentResult<(MaterialRegistry, Vec<DemolitionSpec>)> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().map_err(parse_err)?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| AgentError::Parse(format!("missing column {name:?}")))
    };
    let lat_col   = column("lat")?;
    let lon_col   = column("lon")?;
    let lez_col   = column("in_low_emission_zone")?;
    let water_col = column("water_accessible")?;

    let stock_cols: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.trim().strip_prefix(STOCK_PREFIX).map(|m| (i, m)))
        .collect();
    let registry = MaterialRegistry::new(stock_cols.iter().map(|&(_, m)| m))?;

    let mut specs = Vec::new();
    for result in csv_reader.records() {
        let rec = result.map_err(parse_err)?;
        let field = |i: usize| rec.get(i).unwrap_or("").trim();

        let mut stock = Vec::with_capacity(stock_cols.len());
        for (&(col, name), (id, _)) in stock_cols.iter().zip(registry.iter()) {
            let cell = field(col);
            if cell.is_empty() {
                continue;
            }
            let tons: f64 = cell
                .parse()
                .map_err(|e| AgentError::Parse(format!("stock_{name} {cell:?}: {e}")))?;
            if tons < 0.0 || !tons.is_finite() {
                return Err(AgentError::Parse(format!("negative stock_{name}: {tons}")));
            }
            stock.push((id, tons));
        }

        specs.push(DemolitionSpec {
            location: GeoPoint::new(coordinate(field(lat_col))?, coordinate(field(lon_col))?),
            zone:     zone(field(lez_col), field(water_col))?,
            stock,
        });
    }
    Ok((registry, specs))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn zone(lez: &str, water: &str) -> AgentResult<ZoneFlags> {
    Ok(ZoneFlags::new(flag(lez)?, flag(water)?))
}

fn flag(cell: &str) -> AgentResult<bool> {
    match cell.trim() {
        "1" | "true" | "True" | "TRUE"   => Ok(true),
        "0" | "false" | "False" | "FALSE" | "" => Ok(false),
        other => Err(AgentError::Parse(format!("expected a 0/1 flag, got {other:?}"))),
    }
}

fn coordinate(cell: &str) -> AgentResult<f32> {
    cell.parse()
        .map_err(|e| AgentError::Parse(format!("coordinate {cell:?}: {e}")))
}

fn parse_err(e: csv::Error) -> AgentError {
    AgentError::Parse(e.to_string())
}
