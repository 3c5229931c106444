use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::path::Path;
use tracing::info;

/// Part numbers read from the input CSV, with the raw rows kept for rewriting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartList {
    pub header: Option<StringRecord>,
    pub rows: Vec<StringRecord>,
    pub part_numbers: Vec<String>,
}

fn first_column(row: &StringRecord) -> Option<&str> {
    row.get(0).map(str::trim).filter(|s| !s.is_empty())
}

/// Read part numbers from the first column of `path`. The first line is a header.
pub fn read_part_numbers(path: impl AsRef<Path>) -> Result<PartList> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;

    let mut list = PartList::default();

    for (index, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("Malformed row in {}", path.display()))?;

        if index == 0 {
            list.header = Some(row);
            continue;
        }

        if let Some(part) = first_column(&row) {
            list.part_numbers.push(part.to_string());
        }
        list.rows.push(row);
    }

    info!("Loaded {} part numbers from {}", list.part_numbers.len(), path.display());
    Ok(list)
}

/// Rewrite `path` without the rows for `processed`, returning what is left.
pub fn write_remaining_parts(path: impl AsRef<Path>, list: &PartList, processed: &str) -> Result<PartList> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to rewrite input file {}", path.display()))?;

    if let Some(header) = &list.header {
        writer.write_record(header)?;
    }

    let rows: Vec<StringRecord> = list
        .rows
        .iter()
        .filter(|row| first_column(row) != Some(processed))
        .cloned()
        .collect();

    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(PartList {
        header: list.header.clone(),
        part_numbers: list
            .part_numbers
            .iter()
            .filter(|part| part.as_str() != processed)
            .cloned()
            .collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const INPUT: &str = "part_number,notes\n SMBJ5.0A ,tvs\n,blank\n0451005.MRL\nSMBJ6.0A,tvs\n";

    #[test]
    fn reads_first_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.csv");
        fs::write(&path, INPUT).unwrap();

        let list = read_part_numbers(&path).unwrap();
        assert_eq!(list.part_numbers, vec!["SMBJ5.0A", "0451005.MRL", "SMBJ6.0A"]);
        assert_eq!(list.rows.len(), 4);
        assert_eq!(list.header.as_ref().and_then(|h| h.get(0)), Some("part_number"));
    }

    #[test]
    fn missing_input_file() {
        let dir = TempDir::new().unwrap();
        let err = read_part_numbers(dir.path().join("input.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open input file"));
    }

    #[test]
    fn removes_only_processed_part() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.csv");
        fs::write(&path, INPUT).unwrap();

        let list = read_part_numbers(&path).unwrap();
        let remaining = write_remaining_parts(&path, &list, "SMBJ5.0A").unwrap();

        assert_eq!(remaining.part_numbers, vec!["0451005.MRL", "SMBJ6.0A"]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "part_number,notes\n,blank\n0451005.MRL\nSMBJ6.0A,tvs\n"
        );
        assert_eq!(read_part_numbers(&path).unwrap(), remaining);
    }
}
