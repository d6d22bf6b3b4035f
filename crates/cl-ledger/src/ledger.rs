//! Per-site material ledger: what a site needs and what it has received.

use cl_core::{BiobasedPolicy, MaterialId, ModularityPolicy, StructuralCategory};

use crate::{CompositionTable, LedgerError, LedgerResult, MaterialGrid, MaterialRegistry};

/// Required vs. received tons, keyed by (category, material).
///
/// `required` is fixed at construction.  `received` only grows, through
/// [`record_delivery`][Self::record_delivery].  Deliveries are not clamped
/// to `required`: a delivery larger than the remaining need is recorded as
/// is, so any overshoot stays visible to reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialLedger {
    required: MaterialGrid,
    received: MaterialGrid,
}

impl MaterialLedger {
    /// Ledger with an explicit requirement grid and nothing received.
    pub fn new(required: MaterialGrid) -> Self {
        let received = MaterialGrid::zeros(required.materials());
        Self { required, received }
    }

    /// Build the requirement grid for one building type.
    ///
    /// With modular construction, all non-structural tonnage is replaced by
    /// a single non-structural `modules` entry whose tonnage is the sum of
    /// the building type's `modules` rows.  Without it, `modules` rows are
    /// ignored.
    pub fn from_composition(
        table:         &CompositionTable,
        registry:      &MaterialRegistry,
        building_type: &str,
        biobased:      BiobasedPolicy,
        modularity:    ModularityPolicy,
    ) -> LedgerResult<Self> {
        let modules = registry.modules();
        let mut required = MaterialGrid::zeros(registry.len());
        let mut matched = false;
        let mut module_tons: Option<f64> = None;

        for row in table.rows_for(building_type, biobased) {
            matched = true;
            if Some(row.material) == modules {
                *module_tons.get_or_insert(0.0) += row.tons;
                continue;
            }
            if modularity.is_modular() && row.category == StructuralCategory::NonStructural {
                continue;
            }
            required.add(row.category, row.material, row.tons);
        }

        if !matched {
            return Err(LedgerError::NoComposition {
                building_type: building_type.to_owned(),
                biobased,
            });
        }

        if modularity.is_modular() {
            let (Some(id), Some(tons)) = (modules, module_tons) else {
                return Err(LedgerError::NoModulesRow(building_type.to_owned()));
            };
            required.set(StructuralCategory::NonStructural, id, tons);
        }

        Ok(Self::new(required))
    }

    #[inline]
    pub fn required(&self) -> &MaterialGrid {
        &self.required
    }

    #[inline]
    pub fn received(&self) -> &MaterialGrid {
        &self.received
    }

    /// `required − received`; negative after an overshoot.
    #[inline]
    pub fn remaining(&self, category: StructuralCategory, material: MaterialId) -> f64 {
        self.required.get(category, material) - self.received.get(category, material)
    }

    /// Pairs with `received < required`, with their remaining need.
    pub fn outstanding(&self) -> impl Iterator<Item = (StructuralCategory, MaterialId, f64)> + '_ {
        self.required
            .iter()
            .map(|(c, m, _)| (c, m, self.remaining(c, m)))
            .filter(|&(_, _, rem)| rem > 0.0)
    }

    /// `true` once every requirement is met.
    pub fn is_complete(&self) -> bool {
        self.outstanding().next().is_none()
    }

    /// Record a delivery.
    pub fn record_delivery(&mut self, category: StructuralCategory, material: MaterialId, tons: f64) {
        debug_assert!(tons >= 0.0, "negative delivery {tons}");
        self.received.add(category, material, tons);
    }

    /// Fraction of total required tonnage received so far (1.0 for an
    /// empty requirement).
    pub fn progress(&self) -> f64 {
        let required = self.required.total();
        if required <= 0.0 {
            return 1.0;
        }
        self.received.total() / required
    }
}
