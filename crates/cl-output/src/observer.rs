//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use cl_agents::World;
use cl_core::Round;
use cl_ledger::MaterialRegistry;
use cl_sim::{RoundSummary, SimObserver};
use cl_transport::TransportState;

use crate::row::{MaterialReceivedRow, RoadUsageRow, RoundSummaryRow, UsageLogRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes round summaries, snapshots, and the final
/// usage logs to any [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    registry:   MaterialRegistry,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`; material names in the ledger
    /// rows come from `registry`.
    pub fn new(writer: W, registry: &MaterialRegistry) -> Self {
        Self {
            writer,
            registry:   registry.clone(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_round_end(&mut self, _round: Round, summary: &RoundSummary) {
        let result = self.writer.write_round_summary(&RoundSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, round: Round, world: &World, transport: &TransportState) {
        let roads = RoadUsageRow::snapshot(round, &transport.road_usage);
        if !roads.is_empty() {
            let result = self.writer.write_road_usage(&roads);
            self.store_err(result);
        }

        let materials = MaterialReceivedRow::snapshot(round, world, &self.registry);
        if !materials.is_empty() {
            let result = self.writer.write_materials_received(&materials);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_round: Round, world: &World, _transport: &TransportState) {
        let usage = UsageLogRow::collect(world);
        if !usage.is_empty() {
            let result = self.writer.write_usage_log(&usage);
            self.store_err(result);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
