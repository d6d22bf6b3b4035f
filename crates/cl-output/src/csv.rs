//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `round_summaries.csv`
//! - `road_usage.csv`
//! - `materials_received.csv`
//! - `usage_log.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{MaterialReceivedRow, OutputResult, RoadUsageRow, RoundSummaryRow, UsageLogRow};

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    roads:     Writer<File>,
    materials: Writer<File>,
    usage:     Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the four CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("round_summaries.csv"))?;
        summaries.write_record([
            "round",
            "emissions_supplier_to_hub",
            "emissions_hub_to_client",
            "emissions_total",
            "emissions_round",
        ])?;

        let mut roads = Writer::from_path(dir.join("road_usage.csv"))?;
        roads.write_record(["round", "segment_id", "trips", "damage"])?;

        let mut materials = Writer::from_path(dir.join("materials_received.csv"))?;
        materials.write_record(["round", "entity_id", "category", "material", "required", "received"])?;

        let mut usage = Writer::from_path(dir.join("usage_log.csv"))?;
        usage.write_record(["hub_id", "partner_id", "link"])?;

        Ok(Self {
            summaries,
            roads,
            materials,
            usage,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.round.to_string(),
            row.emissions_supplier_to_hub.to_string(),
            row.emissions_hub_to_client.to_string(),
            row.emissions_total.to_string(),
            row.emissions_round.to_string(),
        ])?;
        Ok(())
    }

    fn write_road_usage(&mut self, rows: &[RoadUsageRow]) -> OutputResult<()> {
        for row in rows {
            self.roads.write_record(&[
                row.round.to_string(),
                row.segment_id.to_string(),
                row.trips.to_string(),
                row.damage.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_materials_received(&mut self, rows: &[MaterialReceivedRow]) -> OutputResult<()> {
        for row in rows {
            self.materials.write_record(&[
                row.round.to_string(),
                row.entity_id.to_string(),
                row.category.as_str().to_owned(),
                row.material.clone(),
                row.required.to_string(),
                row.received.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_usage_log(&mut self, rows: &[UsageLogRow]) -> OutputResult<()> {
        for row in rows {
            self.usage.write_record(&[
                row.hub_id.to_string(),
                row.partner_id.to_string(),
                row.link.as_str().to_owned(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.roads.flush()?;
        self.materials.flush()?;
        self.usage.flush()?;
        Ok(())
    }
}
