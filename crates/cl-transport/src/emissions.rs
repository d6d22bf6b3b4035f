//! Running emission totals.

/// Which running total a leg contributes to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EmissionBucket {
    /// Supplier → hub, demolition site → hub, supplier → site.
    SupplierToHub,
    /// Hub → site or micro hub.
    HubToClient,
}

/// Cumulative emissions (t CO₂-eq) since the start of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmissionsAccumulator {
    supplier_to_hub: f64,
    hub_to_client:   f64,
}

impl EmissionsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bucket: EmissionBucket, emissions: f64) {
        debug_assert!(emissions >= 0.0);
        match bucket {
            EmissionBucket::SupplierToHub => self.supplier_to_hub += emissions,
            EmissionBucket::HubToClient   => self.hub_to_client += emissions,
        }
    }

    #[inline]
    pub fn supplier_to_hub(&self) -> f64 {
        self.supplier_to_hub
    }

    #[inline]
    pub fn hub_to_client(&self) -> f64 {
        self.hub_to_client
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.supplier_to_hub + self.hub_to_client
    }
}
