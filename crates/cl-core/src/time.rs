//! Simulation time model.
//!
//! Time advances in discrete rounds.  There is no wall-clock mapping: a
//! round is one pass over the activation list, nothing more.

use std::fmt;

// ── Round ─────────────────────────────────────────────────────────────────────

/// An absolute round counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round(pub u64);

impl Round {
    pub const ZERO: Round = Round(0);

    /// The round after `self`.
    #[inline]
    pub fn next(self) -> Round {
        Round(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Round {
    type Output = Round;
    #[inline]
    fn add(self, rhs: u64) -> Round {
        Round(self.0 + rhs)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration (the scenario itself is a `PolicyConfig`).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total rounds to simulate.
    pub total_rounds: u64,

    /// Master RNG seed.  The same seed and activation order always produce
    /// identical results.
    pub seed: u64,

    /// Emit a snapshot every N rounds.  0 disables snapshots.
    pub output_interval_rounds: u64,
}

impl SimConfig {
    /// The round at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_round(&self) -> Round {
        Round(self.total_rounds)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { total_rounds: 10, seed: 42, output_interval_rounds: 1 }
    }
}
