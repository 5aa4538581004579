//! CSV table samples.
//!
//! A profiled table is a CSV extract: the header row names the columns and
//! the first N data rows are the value sample. All rows are counted so the
//! report can show the table size.

use std::path::Path;

use anyhow::{Context, Result};
use colsense_model::{ColumnSample, SampleValue};
use tracing::debug;

/// Header plus the first rows of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSample {
    /// Table name, taken from the file stem.
    pub name: String,
    pub columns: Vec<String>,
    /// Sampled rows, each padded or cut to the column count.
    pub rows: Vec<Vec<SampleValue>>,
    /// Number of data rows in the whole file.
    pub row_count: usize,
}

impl TableSample {
    /// The sample split by column, in header order.
    pub fn column_samples(&self) -> Vec<ColumnSample> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, name)| ColumnSample {
                name: name.clone(),
                values: self
                    .rows
                    .iter()
                    .map(|row| row.get(idx).cloned().unwrap_or(SampleValue::Null))
                    .collect(),
            })
            .collect()
    }
}

/// Reads the header and up to `sample_size` data rows of a CSV file.
///
/// Empty cells become [`SampleValue::Null`]; everything else is kept as text.
pub fn read_csv_sample(path: &Path, sample_size: usize) -> Result<TableSample> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;

    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .iter()
        .map(|name| name.trim().to_string())
        .collect();

    let mut rows = Vec::with_capacity(sample_size);
    let mut row_count = 0usize;
    for record in reader.records() {
        let record = record
            .with_context(|| format!("read row {} of {}", row_count + 1, path.display()))?;
        row_count += 1;
        if rows.len() < sample_size {
            rows.push(
                (0..columns.len())
                    .map(|idx| cell_value(record.get(idx)))
                    .collect(),
            );
        }
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    debug!(
        table = %name,
        columns = columns.len(),
        rows = row_count,
        sampled = rows.len(),
        "read csv sample"
    );
    Ok(TableSample {
        name,
        columns,
        rows,
        row_count,
    })
}

fn cell_value(cell: Option<&str>) -> SampleValue {
    match cell {
        Some(text) if !text.trim().is_empty() => SampleValue::from(text),
        _ => SampleValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn samples_first_rows_and_counts_all() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.csv");
        fs::write(
            &path,
            "customer_id,email\n1,a@b.com\n2,\n3,c@d.org\n4,e@f.net\n",
        )
        .unwrap();

        let table = read_csv_sample(&path, 2).unwrap();

        assert_eq!(table.name, "customers");
        assert_eq!(table.columns, vec!["customer_id", "email"]);
        assert_eq!(table.row_count, 4);
        assert_eq!(
            table.rows,
            vec![
                vec![SampleValue::from("1"), SampleValue::from("a@b.com")],
                vec![SampleValue::from("2"), SampleValue::Null],
            ]
        );
    }

    #[test]
    fn short_rows_are_padded_with_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(&path, "order_id,total,notes\n10,5.50\n").unwrap();

        let table = read_csv_sample(&path, 5).unwrap();
        let columns = table.column_samples();

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[2].name, "notes");
        assert_eq!(columns[2].values, vec![SampleValue::Null]);
        assert_eq!(columns[1].values, vec![SampleValue::from("5.50")]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv_sample(&dir.path().join("nope.csv"), 5).unwrap_err();
        assert!(err.to_string().contains("nope.csv"));
    }
}
