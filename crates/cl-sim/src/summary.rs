//! Per-round emissions summary.

use cl_core::Round;
use cl_transport::EmissionsAccumulator;

/// Emissions after one round.  The three bucket fields are cumulative since
/// round 0; `emissions_round` is what this round added.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundSummary {
    pub round:                     Round,
    pub emissions_supplier_to_hub: f64,
    pub emissions_hub_to_client:   f64,
    pub emissions_total:           f64,
    pub emissions_round:           f64,
}

impl RoundSummary {
    /// Summarise `emissions` given the total before the round started.
    pub fn new(round: Round, emissions: &EmissionsAccumulator, total_before: f64) -> Self {
        let total = emissions.total();
        Self {
            round,
            emissions_supplier_to_hub: emissions.supplier_to_hub(),
            emissions_hub_to_client:   emissions.hub_to_client(),
            emissions_total:           total,
            emissions_round:           total - total_before,
        }
    }
}
