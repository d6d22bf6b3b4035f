//! CSV vehicle-table loader.
//!
//! ```csv
//! network,energy,region,emissions_per_ton_km,tare_weight_tons,axles,capacity_concrete,capacity_timber
//! road,diesel,urban,0.00009,15.0,5,25,20
//! road,electric,urban,0.00003,17.0,5,22,18
//! water,,urban,0.00002,400.0,1,800,600
//! ```
//!
//! Every `capacity_<material>` column must name a material of the registry
//! the table is loaded against.  An empty capacity cell means the vehicle
//! cannot carry that material.  `energy` is empty (or `water`/`rail`) for
//! non-road vehicles.

use std::io::Read;
use std::path::Path;

use cl_core::{MaterialId, NetworkType};
use cl_ledger::MaterialRegistry;

use crate::{Region, TransportError, TransportResult, VehicleEnergy, VehicleProfile, VehicleTable};

const CAPACITY_PREFIX: &str = "capacity_";

/// Load a vehicle table from a CSV file.
pub fn load_vehicles_csv(path: &Path, registry: &MaterialRegistry) -> TransportResult<VehicleTable> {
    let file = std::fs::File::open(path)?;
    load_vehicles_reader(file, registry)
}

/// Like [`load_vehicles_csv`] but accepts any `Read` source.
pub fn load_vehicles_reader<R: Read>(
    reader:   R,
    registry: &MaterialRegistry,
) -> TransportResult<VehicleTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers().map_err(parse_err)?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| TransportError::Parse(format!("missing column {name:?}")))
    };
    let network_col = column("network")?;
    let energy_col  = column("energy")?;
    let region_col  = column("region")?;
    let factor_col  = column("emissions_per_ton_km")?;
    let tare_col    = column("tare_weight_tons")?;
    let axles_col   = column("axles")?;

    let capacity_cols: Vec<(usize, MaterialId)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.trim().strip_prefix(CAPACITY_PREFIX).map(|m| (i, m)))
        .map(|(i, m)| -> TransportResult<(usize, MaterialId)> { Ok((i, registry.id(m)?)) })
        .collect::<TransportResult<_>>()?;

    let mut table = VehicleTable::default();
    for result in csv_reader.records() {
        let rec = result.map_err(parse_err)?;
        let field = |i: usize| rec.get(i).unwrap_or("").trim();

        let energy = match field(energy_col) {
            "" | "water" | "rail" | "none" => None,
            other => Some(other.parse::<VehicleEnergy>()?),
        };
        let axles = field(axles_col)
            .parse::<u32>()
            .map_err(|e| TransportError::Parse(format!("axles: {e}")))?;
        if axles == 0 {
            return Err(TransportError::Parse("axles must be at least 1".into()));
        }
        let mut profile = VehicleProfile::new(
            field(network_col).parse::<NetworkType>()?,
            energy,
            field(region_col).parse::<Region>()?,
            parse_number(field(factor_col), "emissions_per_ton_km")?,
            parse_number(field(tare_col), "tare_weight_tons")?,
            axles,
        );
        if profile.network == NetworkType::Road && profile.energy.is_none() {
            return Err(TransportError::Parse("road vehicle without energy type".into()));
        }
        for &(col, material) in &capacity_cols {
            let cell = field(col);
            if !cell.is_empty() {
                profile.set_capacity(material, parse_number(cell, "capacity")?);
            }
        }
        table.push(profile);
    }
    Ok(table)
}

fn parse_number(cell: &str, what: &str) -> TransportResult<f64> {
    let v: f64 = cell
        .parse()
        .map_err(|e| TransportError::Parse(format!("{what} {cell:?}: {e}")))?;
    if v < 0.0 || !v.is_finite() {
        return Err(TransportError::Parse(format!("{what} must be a non-negative number, got {v}")));
    }
    Ok(v)
}

fn parse_err(e: csv::Error) -> TransportError {
    TransportError::Parse(e.to_string())
}
