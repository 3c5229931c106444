use anyhow::Result;

use crate::models::OutputRow;

mod input;
mod output;

pub use input::{read_part_numbers, write_remaining_parts, PartList};
pub use output::{timestamped_output_path, CsvOutput};

/// Destination for finished output rows.
pub trait RecordSink {
    fn write_row(&mut self, row: &OutputRow) -> Result<()>;
}
