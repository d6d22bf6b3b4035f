//! CSV loaders for the material reference tables.
//!
//! # Formats
//!
//! Composition (`buildingType_info`):
//!
//! ```csv
//! building_type,biobased,category,material,tons
//! A,none,foundation,concrete,820.0
//! A,none,non-structural,modules,140.0
//! ```
//!
//! `biobased` accepts the short codes or the long scenario labels; see
//! [`cl_core::BiobasedPolicy`].  The material registry is built from the
//! `material` column in first-seen order.
//!
//! Name conversion: `construction_name,demolition_name`.
//!
//! Supplier types: `material,supplier_type`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cl_core::{BiobasedPolicy, StructuralCategory};

use crate::{
    CompositionRow, CompositionTable, LedgerError, LedgerResult, MaterialRegistry,
    NameConversion, SupplierTypes,
};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CompositionRecord {
    building_type: String,
    biobased:      String,
    category:      String,
    material:      String,
    tons:          f64,
}

#[derive(Deserialize)]
struct ConversionRecord {
    construction_name: String,
    demolition_name:   String,
}

#[derive(Deserialize)]
struct SupplierTypeRecord {
    material:      String,
    supplier_type: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the composition table and the material registry derived from it.
pub fn load_composition_csv(path: &Path) -> LedgerResult<(MaterialRegistry, CompositionTable)> {
    let file = std::fs::File::open(path)?;
    load_composition_reader(file)
}

/// Like [`load_composition_csv`] but accepts any `Read` source.
pub fn load_composition_reader<R: Read>(
    reader: R,
) -> LedgerResult<(MaterialRegistry, CompositionTable)> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut registry = MaterialRegistry::default();
    let mut rows = Vec::new();

    for result in csv_reader.deserialize::<CompositionRecord>() {
        let rec = result.map_err(|e| LedgerError::Parse(e.to_string()))?;
        if rec.tons < 0.0 || !rec.tons.is_finite() {
            return Err(LedgerError::Parse(format!(
                "invalid tonnage {} for {} / {}",
                rec.tons, rec.building_type, rec.material
            )));
        }
        rows.push(CompositionRow {
            biobased:      rec.biobased.parse::<BiobasedPolicy>()?,
            category:      rec.category.parse::<StructuralCategory>()?,
            material:      registry.intern(rec.material.trim())?,
            building_type: rec.building_type,
            tons:          rec.tons,
        });
    }

    Ok((registry, CompositionTable::new(rows)))
}

/// Load the construction → demolition material name table.
pub fn load_name_conversion_csv(
    path:         &Path,
    construction: &MaterialRegistry,
    demolition:   &MaterialRegistry,
) -> LedgerResult<NameConversion> {
    let file = std::fs::File::open(path)?;
    load_name_conversion_reader(file, construction, demolition)
}

pub fn load_name_conversion_reader<R: Read>(
    reader:       R,
    construction: &MaterialRegistry,
    demolition:   &MaterialRegistry,
) -> LedgerResult<NameConversion> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let pairs = csv_reader
        .deserialize::<ConversionRecord>()
        .map(|r| {
            r.map(|rec| (rec.construction_name.trim().to_owned(), rec.demolition_name.trim().to_owned()))
                .map_err(|e| LedgerError::Parse(e.to_string()))
        })
        .collect::<LedgerResult<Vec<_>>>()?;
    Ok(NameConversion::new(construction, demolition, pairs))
}

/// Load the material → supplier type table.
pub fn load_supplier_types_csv(path: &Path, registry: &MaterialRegistry) -> LedgerResult<SupplierTypes> {
    let file = std::fs::File::open(path)?;
    load_supplier_types_reader(file, registry)
}

pub fn load_supplier_types_reader<R: Read>(
    reader:   R,
    registry: &MaterialRegistry,
) -> LedgerResult<SupplierTypes> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let pairs = csv_reader
        .deserialize::<SupplierTypeRecord>()
        .map(|r| {
            r.map(|rec| (rec.material.trim().to_owned(), rec.supplier_type.trim().to_owned()))
                .map_err(|e| LedgerError::Parse(e.to_string()))
        })
        .collect::<LedgerResult<Vec<_>>>()?;
    Ok(SupplierTypes::new(registry, pairs))
}
