//! Parquet output backend (feature `parquet`).
//!
//! Creates four files in the configured output directory:
//! - `round_summaries.parquet`
//! - `road_usage.parquet`
//! - `materials_received.parquet`
//! - `usage_log.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{MaterialReceivedRow, OutputResult, RoadUsageRow, RoundSummaryRow, UsageLogRow};

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("round",                     DataType::UInt64,  false),
        Field::new("emissions_supplier_to_hub", DataType::Float64, false),
        Field::new("emissions_hub_to_client",   DataType::Float64, false),
        Field::new("emissions_total",           DataType::Float64, false),
        Field::new("emissions_round",           DataType::Float64, false),
    ]))
}

fn road_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("round",      DataType::UInt64,  false),
        Field::new("segment_id", DataType::UInt64,  false),
        Field::new("trips",      DataType::UInt64,  false),
        Field::new("damage",     DataType::Float64, false),
    ]))
}

fn material_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("round",     DataType::UInt64,  false),
        Field::new("entity_id", DataType::UInt32,  false),
        Field::new("category",  DataType::Utf8,    false),
        Field::new("material",  DataType::Utf8,    false),
        Field::new("required",  DataType::Float64, false),
        Field::new("received",  DataType::Float64, false),
    ]))
}

fn usage_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("hub_id",     DataType::UInt32, false),
        Field::new("partner_id", DataType::UInt32, false),
        Field::new("link",       DataType::Utf8,   false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// One output file: its schema and the open writer (`None` once closed).
struct Table {
    schema: Arc<Schema>,
    writer: Option<ArrowWriter<File>>,
}

impl Table {
    fn create(path: &Path, schema: Arc<Schema>) -> OutputResult<Self> {
        let file = File::create(path)?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;
        Ok(Self { schema, writer: Some(writer) })
    }

    fn write(&mut self, columns: Vec<arrow::array::ArrayRef>) -> OutputResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let batch = RecordBatch::try_new(Arc::clone(&self.schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}

/// Writes simulation output to four Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    summaries: Table,
    roads:     Table,
    materials: Table,
    usage:     Table,
}

impl ParquetWriter {
    /// Create all four Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            summaries: Table::create(&dir.join("round_summaries.parquet"), summary_schema())?,
            roads:     Table::create(&dir.join("road_usage.parquet"), road_schema())?,
            materials: Table::create(&dir.join("materials_received.parquet"), material_schema())?,
            usage:     Table::create(&dir.join("usage_log.parquet"), usage_schema())?,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_round_summary(&mut self, row: &RoundSummaryRow) -> OutputResult<()> {
        let mut rounds = UInt64Builder::new();
        let mut s2h    = Float64Builder::new();
        let mut h2c    = Float64Builder::new();
        let mut total  = Float64Builder::new();
        let mut delta  = Float64Builder::new();

        rounds.append_value(row.round);
        s2h.append_value(row.emissions_supplier_to_hub);
        h2c.append_value(row.emissions_hub_to_client);
        total.append_value(row.emissions_total);
        delta.append_value(row.emissions_round);

        self.summaries.write(vec![
            Arc::new(rounds.finish()),
            Arc::new(s2h.finish()),
            Arc::new(h2c.finish()),
            Arc::new(total.finish()),
            Arc::new(delta.finish()),
        ])
    }

    fn write_road_usage(&mut self, rows: &[RoadUsageRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut rounds   = UInt64Builder::new();
        let mut segments = UInt64Builder::new();
        let mut trips    = UInt64Builder::new();
        let mut damage   = Float64Builder::new();

        for row in rows {
            rounds.append_value(row.round);
            segments.append_value(row.segment_id);
            trips.append_value(row.trips);
            damage.append_value(row.damage);
        }

        self.roads.write(vec![
            Arc::new(rounds.finish()),
            Arc::new(segments.finish()),
            Arc::new(trips.finish()),
            Arc::new(damage.finish()),
        ])
    }

    fn write_materials_received(&mut self, rows: &[MaterialReceivedRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut rounds     = UInt64Builder::new();
        let mut entities   = UInt32Builder::new();
        let mut categories = StringBuilder::new();
        let mut materials  = StringBuilder::new();
        let mut required   = Float64Builder::new();
        let mut received   = Float64Builder::new();

        for row in rows {
            rounds.append_value(row.round);
            entities.append_value(row.entity_id);
            categories.append_value(row.category.as_str());
            materials.append_value(&row.material);
            required.append_value(row.required);
            received.append_value(row.received);
        }

        self.materials.write(vec![
            Arc::new(rounds.finish()),
            Arc::new(entities.finish()),
            Arc::new(categories.finish()),
            Arc::new(materials.finish()),
            Arc::new(required.finish()),
            Arc::new(received.finish()),
        ])
    }

    fn write_usage_log(&mut self, rows: &[UsageLogRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut hubs     = UInt32Builder::new();
        let mut partners = UInt32Builder::new();
        let mut links    = StringBuilder::new();

        for row in rows {
            hubs.append_value(row.hub_id);
            partners.append_value(row.partner_id);
            links.append_value(row.link.as_str());
        }

        self.usage.write(vec![
            Arc::new(hubs.finish()),
            Arc::new(partners.finish()),
            Arc::new(links.finish()),
        ])
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.summaries.close()?;
        self.roads.close()?;
        self.materials.close()?;
        self.usage.close()?;
        Ok(())
    }
}
