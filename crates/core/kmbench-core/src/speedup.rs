//! Per-datafile speedup tables loaded from CSV.
//!
//! Each file carries a header row with at least a `Datafile` and a `Speedup`
//! column. Other columns are ignored.

use std::io::Read;
use std::path::Path;

use crate::error::Error;

/// Header of the datafile column.
pub const DATAFILE_COLUMN: &str = "Datafile";
/// Header of the speedup column.
pub const SPEEDUP_COLUMN: &str = "Speedup";

/// One row of a speedup table.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupRecord {
    /// Name of the dataset the speedup was measured on.
    pub datafile: String,
    /// Speedup ratio.
    pub speedup: f64,
}

/// A labelled series of speedups, one per datafile.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupTable {
    /// Series label shown in chart legends.
    pub label: String,
    /// Rows in file order.
    pub records: Vec<SpeedupRecord>,
}

impl SpeedupTable {
    /// Load a table from a CSV file.
    pub fn load(path: impl AsRef<Path>, label: impl Into<String>) -> Result<Self, Error> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file, label)
    }

    /// Load a table from any CSV source.
    pub fn from_reader<R: Read>(reader: R, label: impl Into<String>) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn {
                    column: name.to_string(),
                    available: headers.iter().map(str::to_string).collect(),
                })
        };
        let datafile_idx = column(DATAFILE_COLUMN)?;
        let speedup_idx = column(SPEEDUP_COLUMN)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, csv::Position::line);
            let datafile = record.get(datafile_idx).unwrap_or("").to_string();
            let raw = record.get(speedup_idx).unwrap_or("");
            let speedup = raw.parse::<f64>().map_err(|_| Error::InvalidSpeedup {
                line,
                value: raw.to_string(),
            })?;
            records.push(SpeedupRecord { datafile, speedup });
        }

        Ok(Self {
            label: label.into(),
            records,
        })
    }
}

/// Ordered union of datafile names across `tables`, in order of first
/// appearance.
pub fn category_union(tables: &[SpeedupTable]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for record in tables.iter().flat_map(|t| &t.records) {
        if !categories.contains(&record.datafile) {
            categories.push(record.datafile.clone());
        }
    }
    categories
}
