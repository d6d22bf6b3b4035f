//! `cl-output`: simulation output writers and reporting helpers.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                                        |
//! |-----------|-------------|----------------------------------------------------------------------|
//! | *(none)*  | CSV         | `round_summaries.csv`, `road_usage.csv`, `materials_received.csv`, `usage_log.csv` |
//! | `sqlite`  | SQLite      | `output.db` (same four tables)                                       |
//! | `parquet` | Parquet     | the same four files with a `.parquet` extension                      |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `cl_sim::SimObserver`.
//!
//! [`report`] turns a finished run into the figures a scenario comparison
//! needs: material usage by kind, the circular share, and an emissions
//! summary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cl_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer, &sim.catalog.construction);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use report::{CircularSplit, EmissionsReport, MaterialUsage, circular_split, usage_by_material};
pub use row::{MaterialReceivedRow, RoadUsageRow, RoundSummaryRow, UsageLink, UsageLogRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
