//! The `OutputWriter` trait implemented by all backend writers.

use crate::{MaterialReceivedRow, OutputResult, RoadUsageRow, RoundSummaryRow, UsageLogRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one round summary row.
    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()>;

    /// Write a batch of road-usage rows from one snapshot.
    fn write_road_usage(&mut self, rows: &[RoadUsageRow]) -> OutputResult<()>;

    /// Write a batch of site ledger rows from one snapshot.
    fn write_materials_received(&mut self, rows: &[MaterialReceivedRow]) -> OutputResult<()>;

    /// Write the hub usage logs (once, at the end of a run).
    fn write_usage_log(&mut self, rows: &[UsageLogRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
