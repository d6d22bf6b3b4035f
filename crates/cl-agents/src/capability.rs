//! Capability traits over the entity variants.
//!
//! | Trait               | Implemented by                     |
//! |---------------------|------------------------------------|
//! | `RequestsMaterials` | `ConstructionSite`, `Hub` (micro)  |
//! | `ReceivesMaterials` | `ConstructionSite`, `Hub`          |
//! | `SuppliesMaterials` | `Supplier`, `DemolitionSite`       |
//! | `RoutesMaterials`   | `Hub`                              |

use cl_core::{EntityId, MaterialId, StructuralCategory};
use cl_ledger::MaterialRequest;
use cl_network::HubTier;

use crate::{ConstructionSite, DemolitionSite, Hub, Supplier};

/// An entity whose pending request a hub collects.
pub trait RequestsMaterials {
    fn pending_request(&self) -> &MaterialRequest;

    /// Consume the pending request, leaving an empty one.
    fn take_request(&mut self) -> MaterialRequest;
}

/// An entity that can be the destination of a delivery.
pub trait ReceivesMaterials {
    fn receive(&mut self, category: StructuralCategory, material: MaterialId, tons: f64);
}

/// An entity materials are collected from.
pub trait SuppliesMaterials {
    /// Tons of `material` that can be handed over right now.
    fn available(&self, material: MaterialId) -> f64;

    /// Hand over up to `tons`; returns the amount actually handed over.
    fn supply(&mut self, material: MaterialId, tons: f64) -> f64;
}

/// An entity that aggregates and forwards demand.
pub trait RoutesMaterials {
    fn tier(&self) -> HubTier;
    fn clients(&self) -> &[EntityId];
}

// ── ConstructionSite ──────────────────────────────────────────────────────────

impl RequestsMaterials for ConstructionSite {
    fn pending_request(&self) -> &MaterialRequest {
        &self.request
    }

    fn take_request(&mut self) -> MaterialRequest {
        self.request.take_all()
    }
}

impl ReceivesMaterials for ConstructionSite {
    fn receive(&mut self, category: StructuralCategory, material: MaterialId, tons: f64) {
        self.ledger.record_delivery(category, material, tons);
    }
}

// ── Hub ───────────────────────────────────────────────────────────────────────

impl RequestsMaterials for Hub {
    fn pending_request(&self) -> &MaterialRequest {
        &self.forwarded
    }

    fn take_request(&mut self) -> MaterialRequest {
        self.forwarded.take_all()
    }
}

impl ReceivesMaterials for Hub {
    fn receive(&mut self, category: StructuralCategory, material: MaterialId, tons: f64) {
        self.received.add(material, tons);
        self.stock.add(category, material, tons);
    }
}

impl RoutesMaterials for Hub {
    fn tier(&self) -> HubTier {
        self.tier
    }

    fn clients(&self) -> &[EntityId] {
        &self.clients
    }
}

// ── Suppliers ─────────────────────────────────────────────────────────────────

impl SuppliesMaterials for Supplier {
    fn available(&self, _material: MaterialId) -> f64 {
        f64::INFINITY
    }

    fn supply(&mut self, _material: MaterialId, tons: f64) -> f64 {
        tons
    }
}

impl SuppliesMaterials for DemolitionSite {
    fn available(&self, material: MaterialId) -> f64 {
        self.stock.get(material)
    }

    fn supply(&mut self, material: MaterialId, tons: f64) -> f64 {
        self.stock.withdraw(material, tons)
    }
}
