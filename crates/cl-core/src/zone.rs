//! Immutable location flags attached to every entity.

/// Where an entity sits relative to the two zone-dependent transport rules.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneFlags {
    /// Inside the low-emission zone (electric traction required under a
    /// mixed-fleet truck policy).
    pub in_low_emission_zone: bool,
    /// Reachable by inland waterway.
    pub water_accessible: bool,
}

impl ZoneFlags {
    #[inline]
    pub fn new(in_low_emission_zone: bool, water_accessible: bool) -> Self {
        Self { in_low_emission_zone, water_accessible }
    }
}
