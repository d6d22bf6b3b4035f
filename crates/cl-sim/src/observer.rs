//! Simulation observer trait for progress reporting and data collection.

use cl_agents::World;
use cl_core::Round;
use cl_transport::TransportState;

use crate::RoundSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// round loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_round_end(&mut self, round: Round, summary: &RoundSummary) {
///         println!("{round}: {:.1} emitted", summary.emissions_round);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each round, before any entity is stepped.
    fn on_round_start(&mut self, _round: Round) {}

    /// Called after every entity of the activation order has been stepped.
    fn on_round_end(&mut self, _round: Round, _summary: &RoundSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_rounds`
    /// rounds), after `on_round_end`.
    ///
    /// Read-only access to entity ledgers and to the road and emissions
    /// accumulators, so output writers can record a snapshot without the
    /// sim knowing about any specific format.
    fn on_snapshot(&mut self, _round: Round, _world: &World, _transport: &TransportState) {}

    /// Called once after the final round completes.
    fn on_sim_end(&mut self, _final_round: Round, _world: &World, _transport: &TransportState) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
