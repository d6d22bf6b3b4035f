//! Per-round partial material requests.
//!
//! Sites never ask for their whole remaining need at once.  Each round they
//! ask for a random 10–20 % slice of the *required* quantity, capped at
//! what is still missing, so demand drains over several rounds the way
//! staged deliveries do on a real building site.

use std::ops::Range;

use cl_core::{EntityRng, MaterialId, StructuralCategory};

use crate::{MaterialGrid, MaterialLedger};

/// Share of the required quantity asked for in one round, drawn uniformly.
pub const REQUEST_FRACTION: Range<f64> = 0.10..0.20;

/// Tons requested this round, per (category, material).  Always
/// `0 ≤ q ≤ remaining need` when produced by [`draw`][Self::draw].
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRequest(MaterialGrid);

impl MaterialRequest {
    pub fn empty(materials: usize) -> Self {
        Self(MaterialGrid::zeros(materials))
    }

    /// Draw this round's request from a ledger.
    ///
    /// Only outstanding pairs are asked for; each gets
    /// `required × U[0.10, 0.20)`, capped at the remaining need.
    pub fn draw(ledger: &MaterialLedger, rng: &mut EntityRng) -> Self {
        let mut grid = MaterialGrid::zeros(ledger.required().materials());
        for (category, material, remaining) in ledger.outstanding() {
            let nominal = ledger.required().get(category, material) * rng.gen_range(REQUEST_FRACTION);
            grid.set(category, material, nominal.min(remaining));
        }
        Self(grid)
    }

    #[inline]
    pub fn grid(&self) -> &MaterialGrid {
        &self.0
    }

    #[inline]
    pub fn get(&self, category: StructuralCategory, material: MaterialId) -> f64 {
        self.0.get(category, material)
    }

    /// Merge another request into this one (hub aggregation).
    pub fn absorb(&mut self, other: &MaterialRequest) {
        self.0.add_grid(&other.0);
    }

    /// Consume one cell, leaving zero behind.
    #[inline]
    pub fn take(&mut self, category: StructuralCategory, material: MaterialId) -> f64 {
        self.0.take(category, material)
    }

    /// Consume the whole request, leaving an empty one behind.
    pub fn take_all(&mut self) -> MaterialRequest {
        let empty = MaterialGrid::zeros(self.0.materials());
        MaterialRequest(std::mem::replace(&mut self.0, empty))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.0.total()
    }
}

impl From<MaterialGrid> for MaterialRequest {
    fn from(grid: MaterialGrid) -> Self {
        Self(grid)
    }
}
