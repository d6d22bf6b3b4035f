//! Dense quantity tables.
//!
//! `MaterialGrid` is the fixed-schema replacement for nested
//! `category → material → tons` dictionaries: one `f64` cell per
//! (category, material) pair, laid out row-major by category.

use cl_core::{MaterialId, StructuralCategory};

// ── MaterialGrid ──────────────────────────────────────────────────────────────

/// Tons per (structural category, material).
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialGrid {
    materials: usize,
    cells:     Vec<f64>,
}

impl MaterialGrid {
    /// All-zero grid for a registry of `materials` kinds.
    pub fn zeros(materials: usize) -> Self {
        Self {
            materials,
            cells: vec![0.0; materials * StructuralCategory::COUNT],
        }
    }

    #[inline]
    fn slot(&self, category: StructuralCategory, material: MaterialId) -> usize {
        debug_assert!(material.index() < self.materials, "material {material} out of range");
        category.index() * self.materials + material.index()
    }

    /// Number of material columns.
    #[inline]
    pub fn materials(&self) -> usize {
        self.materials
    }

    #[inline]
    pub fn get(&self, category: StructuralCategory, material: MaterialId) -> f64 {
        self.cells[self.slot(category, material)]
    }

    #[inline]
    pub fn set(&mut self, category: StructuralCategory, material: MaterialId, tons: f64) {
        let i = self.slot(category, material);
        self.cells[i] = tons;
    }

    #[inline]
    pub fn add(&mut self, category: StructuralCategory, material: MaterialId, tons: f64) {
        let i = self.slot(category, material);
        self.cells[i] += tons;
    }

    /// Return the cell's value and reset it to zero.
    #[inline]
    pub fn take(&mut self, category: StructuralCategory, material: MaterialId) -> f64 {
        let i = self.slot(category, material);
        std::mem::take(&mut self.cells[i])
    }

    /// Remove up to `tons` from the cell; returns the amount removed.
    #[inline]
    pub fn withdraw(&mut self, category: StructuralCategory, material: MaterialId, tons: f64) -> f64 {
        let i = self.slot(category, material);
        let taken = tons.min(self.cells[i]).max(0.0);
        self.cells[i] -= taken;
        taken
    }

    /// Cell-wise `self += other`.
    ///
    /// # Panics
    /// Panics if the grids were sized for different registries.
    pub fn add_grid(&mut self, other: &MaterialGrid) {
        assert_eq!(self.materials, other.materials, "grids from different registries");
        for (a, b) in self.cells.iter_mut().zip(&other.cells) {
            *a += *b;
        }
    }

    /// Every `(category, material, tons)` cell in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StructuralCategory, MaterialId, f64)> + '_ {
        let n = self.materials;
        self.cells.iter().enumerate().map(move |(i, &t)| {
            (StructuralCategory::ALL[i / n], MaterialId((i % n) as u16), t)
        })
    }

    /// Cells with a strictly positive quantity.
    pub fn iter_positive(&self) -> impl Iterator<Item = (StructuralCategory, MaterialId, f64)> + '_ {
        self.iter().filter(|&(_, _, t)| t > 0.0)
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// `true` when no cell is positive.
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&t| t > 0.0)
    }

    /// Sum the given categories into material-only totals.
    pub fn collapse(&self, categories: &[StructuralCategory]) -> MaterialTotals {
        let mut out = MaterialTotals::zeros(self.materials);
        for (c, m, t) in self.iter() {
            if categories.contains(&c) {
                out.add(m, t);
            }
        }
        out
    }
}

// ── MaterialTotals ────────────────────────────────────────────────────────────

/// Tons per material, with the category dimension collapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTotals {
    cells: Vec<f64>,
}

impl MaterialTotals {
    pub fn zeros(materials: usize) -> Self {
        Self { cells: vec![0.0; materials] }
    }

    #[inline]
    pub fn materials(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn get(&self, material: MaterialId) -> f64 {
        self.cells[material.index()]
    }

    #[inline]
    pub fn set(&mut self, material: MaterialId, tons: f64) {
        self.cells[material.index()] = tons;
    }

    #[inline]
    pub fn add(&mut self, material: MaterialId, tons: f64) {
        self.cells[material.index()] += tons;
    }

    /// Remove up to `tons` of `material`; returns the amount removed.
    pub fn withdraw(&mut self, material: MaterialId, tons: f64) -> f64 {
        let cell = &mut self.cells[material.index()];
        let taken = tons.min(*cell).max(0.0);
        *cell -= taken;
        taken
    }

    /// Materials with a strictly positive quantity (zero entries dropped).
    pub fn iter_positive(&self) -> impl Iterator<Item = (MaterialId, f64)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t > 0.0)
            .map(|(i, &t)| (MaterialId(i as u16), t))
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&t| t > 0.0)
    }
}
