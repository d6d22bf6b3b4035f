//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables: `round_summaries`, `road_usage`, `materials_received`, and
//! `usage_log`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{MaterialReceivedRow, OutputResult, RoadUsageRow, RoundSummaryRow, UsageLogRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS round_summaries (
                 round                     INTEGER PRIMARY KEY,
                 emissions_supplier_to_hub REAL NOT NULL,
                 emissions_hub_to_client   REAL NOT NULL,
                 emissions_total           REAL NOT NULL,
                 emissions_round           REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS road_usage (
                 round      INTEGER NOT NULL,
                 segment_id INTEGER NOT NULL,
                 trips      INTEGER NOT NULL,
                 damage     REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS materials_received (
                 round     INTEGER NOT NULL,
                 entity_id INTEGER NOT NULL,
                 category  TEXT    NOT NULL,
                 material  TEXT    NOT NULL,
                 required  REAL    NOT NULL,
                 received  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS usage_log (
                 hub_id     INTEGER NOT NULL,
                 partner_id INTEGER NOT NULL,
                 link       TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO round_summaries \
             (round, emissions_supplier_to_hub, emissions_hub_to_client, emissions_total, emissions_round) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                row.round as i64,
                row.emissions_supplier_to_hub,
                row.emissions_hub_to_client,
                row.emissions_total,
                row.emissions_round,
            ],
        )?;
        Ok(())
    }

    fn write_road_usage(&mut self, rows: &[RoadUsageRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO road_usage (round, segment_id, trips, damage) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                // OSM way ids and trip counts fit in i64.
                stmt.execute(rusqlite::params![
                    row.round as i64,
                    row.segment_id as i64,
                    row.trips as i64,
                    row.damage,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_materials_received(&mut self, rows: &[MaterialReceivedRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO materials_received \
                 (round, entity_id, category, material, required, received) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.round as i64,
                    row.entity_id,
                    row.category.as_str(),
                    row.material,
                    row.required,
                    row.received,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_usage_log(&mut self, rows: &[UsageLogRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO usage_log (hub_id, partner_id, link) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.hub_id, row.partner_id, row.link.as_str()])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
