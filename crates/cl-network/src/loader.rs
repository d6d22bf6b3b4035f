//! CSV route loader.
//!
//! ```csv
//! class,origin,destination,distance_km,segments
//! h2c,3,0,4.2,1001;1002;1007
//! s2h,1,3,118.0,2001;2002
//! d2h,5,3,2.5,
//! ```
//!
//! `origin`/`destination` are entity ids as assigned by the world builder;
//! `segments` is a `;`-separated list and may be empty.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cl_core::{EntityId, SegmentId};

use crate::{NetworkError, NetworkResult, Route, RouteClass, RouteTable};

#[derive(Deserialize)]
struct RouteRecord {
    class:       String,
    origin:      u32,
    destination: u32,
    distance_km: f64,
    #[serde(default)]
    segments:    String,
}

/// Load a route table from a CSV file.
pub fn load_routes_csv(path: &Path) -> NetworkResult<RouteTable> {
    let file = std::fs::File::open(path)?;
    load_routes_reader(file)
}

/// Like [`load_routes_csv`] but accepts any `Read` source.
pub fn load_routes_reader<R: Read>(reader: R) -> NetworkResult<RouteTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = RouteTable::new();

    for result in csv_reader.deserialize::<RouteRecord>() {
        let rec = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let class: RouteClass = rec.class.parse()?;
        if rec.distance_km < 0.0 || !rec.distance_km.is_finite() {
            return Err(NetworkError::Parse(format!(
                "invalid distance {} for {class} {} -> {}",
                rec.distance_km, rec.origin, rec.destination
            )));
        }
        let segments = parse_segments(&rec.segments)?;
        table.insert(
            class,
            EntityId(rec.origin),
            EntityId(rec.destination),
            Route::new(rec.distance_km, segments),
        );
    }

    Ok(table)
}

fn parse_segments(field: &str) -> NetworkResult<Vec<SegmentId>> {
    field
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map(SegmentId)
                .map_err(|e| NetworkError::Parse(format!("segment id {s:?}: {e}")))
        })
        .collect()
}
