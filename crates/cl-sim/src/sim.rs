//! The `Sim` struct and its round loop.

use cl_agents::{EntityRngs, World};
use cl_behavior::{LogisticsModel, MaterialCatalog, RoundContext, StepState};
use cl_core::{EntityId, PolicyConfig, Round, SimConfig};
use cl_transport::TransportState;

use crate::{RoundSummary, SimObserver, SimResult};

/// The main simulation runner.
///
/// `Sim<M>` owns every piece of mutable state: the entity world, the
/// per-entity RNGs, and the transport context holding the road-usage and
/// emissions ledgers.  Each round steps every entity of the activation
/// order once, strictly in sequence; there is no parallelism and no shared
/// global state.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: LogisticsModel> {
    /// Global configuration (total rounds, seed, snapshot interval).
    pub config: SimConfig,

    /// The scenario.
    pub policy: PolicyConfig,

    /// Material registries and lookup tables.
    pub catalog: MaterialCatalog,

    /// Next round to run.
    pub round: Round,

    /// Entity state, including every ledger and hub usage log.
    pub world: World,

    /// Per-entity deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: EntityRngs,

    /// Routes, vehicles, and the road-usage and emissions accumulators.
    pub transport: TransportState,

    /// The behaviour model.  Called once per entity per round.
    pub model: M,

    pub(crate) order: Vec<EntityId>,
}

impl<M: LogisticsModel> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current round to `config.end_round()`.
    ///
    /// Calls observer hooks at every round boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    /// A lookup failure aborts the run with the state as it was when the
    /// failing step started.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.round < self.config.end_round() {
            self.run_round(observer)?;
        }
        observer.on_sim_end(self.round, &self.world, &self.transport);
        Ok(())
    }

    /// Run exactly `n` rounds from the current position (ignores `end_round`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_rounds<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.run_round(observer)?;
        }
        Ok(())
    }

    /// Entities in the order they are stepped each round.
    pub fn activation_order(&self) -> &[EntityId] {
        &self.order
    }

    // ── Core round processing ─────────────────────────────────────────────

    fn run_round<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.round;
        observer.on_round_start(now);
        let summary = self.process_round(now)?;
        observer.on_round_end(now, &summary);
        let interval = self.config.output_interval_rounds;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.world, &self.transport);
        }
        self.round = now.next();
        Ok(())
    }

    fn process_round(&mut self, now: Round) -> SimResult<RoundSummary> {
        let before = self.transport.emissions.total();

        // Explicit field borrows so the borrow checker sees disjoint access.
        let ctx = RoundContext::new(now, &self.policy, &self.catalog);
        let model = &self.model;
        let mut state = StepState {
            world:     &mut self.world,
            rngs:      &mut self.rngs,
            transport: &mut self.transport,
        };

        for &entity in &self.order {
            model.step(entity, &ctx, &mut state)?;
        }

        Ok(RoundSummary::new(now, &self.transport.emissions, before))
    }
}
