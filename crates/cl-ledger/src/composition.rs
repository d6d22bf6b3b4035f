//! Material-composition reference table.

use cl_core::{BiobasedPolicy, MaterialId, StructuralCategory};

/// Required tons of one material in one category, for one building type
/// under one biobased policy.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionRow {
    pub building_type: String,
    pub biobased:      BiobasedPolicy,
    pub category:      StructuralCategory,
    pub material:      MaterialId,
    pub tons:          f64,
}

/// All composition rows.  Small (building types × policies × categories ×
/// materials), so lookups are linear scans.
#[derive(Debug, Clone, Default)]
pub struct CompositionTable {
    rows: Vec<CompositionRow>,
}

impl CompositionTable {
    pub fn new(rows: Vec<CompositionRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CompositionRow] {
        &self.rows
    }

    /// Rows for one building type under one biobased policy.
    pub fn rows_for<'a>(
        &'a self,
        building_type: &'a str,
        biobased:      BiobasedPolicy,
    ) -> impl Iterator<Item = &'a CompositionRow> + 'a {
        self.rows
            .iter()
            .filter(move |r| r.building_type == building_type && r.biobased == biobased)
    }
}
