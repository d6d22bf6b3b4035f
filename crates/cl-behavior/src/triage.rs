//! Supply triage: which part of a hub's aggregated request is sourced from
//! demolition sites and which from virgin-material suppliers.
//!
//! The split is by structural category:
//!
//! | circularity | reclaimed categories                         |
//! |-------------|----------------------------------------------|
//! | none        | –                                            |
//! | semi        | non-structural                               |
//! | full        | non-structural, structural                   |
//! | extreme     | non-structural, structural, foundation       |
//!
//! Modular construction takes non-structural out of the reclaimed set:
//! modules are always bought new.  Every (category, material) cell lands in
//! exactly one of the two buckets.

use cl_core::{MaterialId, PolicyConfig, StructuralCategory};
use cl_ledger::{LedgerResult, MaterialGrid, MaterialTotals, NameConversion};

/// Categories sourced from demolition sites under `policy`.
pub fn reclaimed_categories(policy: &PolicyConfig) -> Vec<StructuralCategory> {
    policy
        .circularity_policy
        .reclaimed_categories()
        .iter()
        .copied()
        .filter(|&c| !(policy.modularity_policy.is_modular() && c == StructuralCategory::NonStructural))
        .collect()
}

fn virgin_categories(reclaimed: &[StructuralCategory]) -> Vec<StructuralCategory> {
    StructuralCategory::ALL
        .iter()
        .copied()
        .filter(|c| !reclaimed.contains(c))
        .collect()
}

/// A triaged request, collapsed to tons per construction material.
#[derive(Debug, Clone, PartialEq)]
pub struct Triage {
    pub reclaimed: MaterialTotals,
    pub virgin:    MaterialTotals,
}

impl Triage {
    /// Split an aggregated request by category and collapse each bucket to
    /// material totals.
    pub fn split(request: &MaterialGrid, policy: &PolicyConfig) -> Self {
        let reclaimed = reclaimed_categories(policy);
        let virgin = virgin_categories(&reclaimed);
        Self {
            reclaimed: request.collapse(&reclaimed),
            virgin:    request.collapse(&virgin),
        }
    }

    /// Translate the reclaimed bucket into the demolition taxonomy.
    ///
    /// Materials whose demolition name is not stocked by any demolition
    /// site move to the virgin bucket and are bought new in the same round.
    /// A material with no conversion row at all is a lookup failure.
    pub fn demolition_demand(&mut self, conversion: &NameConversion, demolition_len: usize) -> LedgerResult<MaterialTotals> {
        let mut demand = MaterialTotals::zeros(demolition_len);
        let wanted: Vec<(MaterialId, f64)> = self.reclaimed.iter_positive().collect();
        for (material, tons) in wanted {
            match conversion.convert(material)? {
                Some(target) => demand.add(target, tons),
                None => {
                    self.reclaimed.set(material, 0.0);
                    self.virgin.add(material, tons);
                }
            }
        }
        Ok(demand)
    }
}

/// Share of each requested (category, material) cell actually sourced.
///
/// Virgin cells and reclaimed cells that fell back to virgin supply are
/// fully sourced.  A reclaimed cell gets the collected / demanded ratio of
/// the demolition material it converts to; construction materials sharing a
/// demolition name share its ratio.
pub fn fill_ratios(
    request:    &MaterialGrid,
    policy:     &PolicyConfig,
    conversion: &NameConversion,
    demand:     &MaterialTotals,
    collected:  &MaterialTotals,
) -> LedgerResult<MaterialGrid> {
    let reclaimed = reclaimed_categories(policy);
    let mut fill = MaterialGrid::zeros(request.materials());
    for (category, material, _) in request.iter() {
        let mut ratio = 1.0;
        if reclaimed.contains(&category) && request.get(category, material) > 0.0 {
            if let Some(target) = conversion.convert(material)? {
                let wanted = demand.get(target);
                if wanted > 0.0 {
                    ratio = (collected.get(target) / wanted).min(1.0);
                }
            }
        }
        fill.set(category, material, ratio);
    }
    Ok(fill)
}
