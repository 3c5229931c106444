use anyhow::{Context, Result};
use chrono::Local;
use csv::Writer;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::OutputRow;
use crate::storage::RecordSink;

/// `<dir>/<prefix>_YYYYmmdd_HHMMSS.csv`, so every run writes its own file.
pub fn timestamped_output_path(dir: impl AsRef<Path>, prefix: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.as_ref().join(format!("{}_{}.csv", prefix, timestamp))
}

/// Output CSV with the fixed column layout.
pub struct CsvOutput {
    writer: Writer<File>,
    path: PathBuf,
    rows_written: usize,
}

impl CsvOutput {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut writer = Writer::from_path(&path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;

        writer.write_record(OutputRow::header())?;
        writer.flush()?;

        info!("Writing results to {}", path.display());
        Ok(Self {
            writer,
            path,
            rows_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

impl RecordSink for CsvOutput {
    fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        self.writer
            .write_record(row.to_record())
            .with_context(|| format!("Failed to write row for {}", row.part_number()))?;
        // Flushed per row so an interrupted run keeps what it scraped.
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }
}
