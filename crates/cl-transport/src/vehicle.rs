//! Vehicle profiles and profile lookup.

use std::fmt;
use std::str::FromStr;

use cl_core::{CoreError, MaterialId, NetworkType};

use crate::{TransportError, TransportResult};

// ── Keys ──────────────────────────────────────────────────────────────────────

/// Traction of a road vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum VehicleEnergy {
    Diesel,
    Electric,
}

impl VehicleEnergy {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleEnergy::Diesel   => "diesel",
            VehicleEnergy::Electric => "electric",
        }
    }
}

impl fmt::Display for VehicleEnergy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleEnergy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "diesel"   => Ok(VehicleEnergy::Diesel),
            "electric" => Ok(VehicleEnergy::Electric),
            other => Err(CoreError::UnknownOption { kind: "vehicle energy", value: other.to_owned() }),
        }
    }
}

/// Operating region of a vehicle.  Urban vehicles serve hub and demolition
/// legs inside the city; international ones serve supplier legs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Region {
    Urban,
    International,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Urban         => "urban",
            Region::International => "international",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "urban"         => Ok(Region::Urban),
            "international" => Ok(Region::International),
            other => Err(CoreError::UnknownOption { kind: "region", value: other.to_owned() }),
        }
    }
}

// ── VehicleProfile ────────────────────────────────────────────────────────────

/// One row of a vehicle table.
///
/// Capacities are indexed by the `MaterialId`s of the registry the table
/// was loaded against (construction or demolition taxonomy).
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleProfile {
    pub network: NetworkType,
    /// `None` for vessels and trains, whose traction is not a policy lever.
    pub energy:  Option<VehicleEnergy>,
    pub region:  Region,

    /// Emission factor per ton-km of gross weight.
    pub emissions_per_ton_km: f64,
    pub tare_weight_tons:     f64,
    pub axles:                u32,

    capacities: Vec<Option<f64>>,
}

impl VehicleProfile {
    pub fn new(
        network:              NetworkType,
        energy:               Option<VehicleEnergy>,
        region:               Region,
        emissions_per_ton_km: f64,
        tare_weight_tons:     f64,
        axles:                u32,
    ) -> Self {
        Self {
            network,
            energy,
            region,
            emissions_per_ton_km,
            tare_weight_tons,
            axles,
            capacities: Vec::new(),
        }
    }

    /// Set the rated capacity for `material`.
    pub fn with_capacity(mut self, material: MaterialId, tons: f64) -> Self {
        self.set_capacity(material, tons);
        self
    }

    pub fn set_capacity(&mut self, material: MaterialId, tons: f64) {
        let i = material.index();
        if self.capacities.len() <= i {
            self.capacities.resize(i + 1, None);
        }
        self.capacities[i] = Some(tons);
    }

    /// Rated capacity for `material`.  A missing or non-positive capacity is
    /// a lookup failure.
    pub fn capacity(&self, material: MaterialId) -> TransportResult<f64> {
        match self.capacities.get(material.index()).copied().flatten() {
            Some(c) if c > 0.0 => Ok(c),
            _ => Err(TransportError::NoCapacity {
                material,
                network: self.network,
                region:  self.region,
            }),
        }
    }
}

// ── VehicleTable ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct VehicleTable {
    profiles: Vec<VehicleProfile>,
}

impl VehicleTable {
    pub fn new(profiles: Vec<VehicleProfile>) -> Self {
        Self { profiles }
    }

    pub fn push(&mut self, profile: VehicleProfile) {
        self.profiles.push(profile);
    }

    /// First profile matching the key.  Road profiles must match `energy`
    /// exactly; water and rail profiles ignore it.
    pub fn select(
        &self,
        network: NetworkType,
        energy:  VehicleEnergy,
        region:  Region,
    ) -> TransportResult<&VehicleProfile> {
        self.profiles
            .iter()
            .find(|p| {
                p.network == network
                    && p.region == region
                    && (network != NetworkType::Road || p.energy == Some(energy))
            })
            .ok_or(TransportError::NoVehicle { network, energy, region })
    }

    pub fn profiles(&self) -> &[VehicleProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
