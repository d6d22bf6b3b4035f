//! Cumulative per-segment road usage.

use std::collections::BTreeMap;

use cl_core::SegmentId;

/// Counters for one road segment.  Both only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SegmentUsage {
    /// Vehicle trips that crossed the segment.
    pub trips: u64,
    /// Accumulated pavement wear in fourth-power load units.
    pub damage: f64,
}

/// Road usage for one simulation run, keyed by segment.
///
/// Segments may be pre-registered (so reports list unused roads with zero
/// counts); segments first seen in [`record`][Self::record] are added on
/// the fly.
#[derive(Debug, Clone, Default)]
pub struct RoadUsageLedger {
    segments: BTreeMap<SegmentId, SegmentUsage>,
}

impl RoadUsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger with every segment of `segments` at zero.
    pub fn with_segments<I: IntoIterator<Item = SegmentId>>(segments: I) -> Self {
        Self {
            segments: segments.into_iter().map(|s| (s, SegmentUsage::default())).collect(),
        }
    }

    /// Add `trips` and `damage` to every segment of a route.
    pub fn record(&mut self, route: &[SegmentId], trips: u64, damage: f64) {
        debug_assert!(damage >= 0.0);
        for &segment in route {
            let usage = self.segments.entry(segment).or_default();
            usage.trips += trips;
            usage.damage += damage;
        }
    }

    pub fn get(&self, segment: SegmentId) -> Option<&SegmentUsage> {
        self.segments.get(&segment)
    }

    /// All segments in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &SegmentUsage)> + '_ {
        self.segments.iter().map(|(&s, u)| (s, u))
    }

    /// Segments crossed at least once.
    pub fn iter_used(&self) -> impl Iterator<Item = (SegmentId, &SegmentUsage)> + '_ {
        self.iter().filter(|(_, u)| u.trips > 0)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of trips over all segments (a trip crossing n segments counts n
    /// times).
    pub fn total_trips(&self) -> u64 {
        self.segments.values().map(|u| u.trips).sum()
    }

    pub fn total_damage(&self) -> f64 {
        self.segments.values().map(|u| u.damage).sum()
    }
}
