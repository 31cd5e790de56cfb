//! CSV loading for the sales and passenger datasets.
//!
//! Both files are read once into a [`RawTable`] and bundled into
//! [`Datasets`], which the caller builds and passes into every computation.

use anyhow::{Context, Result};
use csv::StringRecord;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::PipelineError;

/// A header-indexed CSV table of untyped string cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl RawTable {
    /// Reads a headed CSV table from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            rows.push(result?);
        }

        Ok(Self { headers, rows })
    }

    /// Opens a CSV file, gunzipping it first when the path ends in `.gz`.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

        let gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");
        debug!(gzipped, "Reading CSV");

        let table = if gzipped {
            Self::from_reader(GzDecoder::new(file))
        } else {
            Self::from_reader(file)
        }
        .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!(
            rows = table.len(),
            columns = table.headers.len(),
            "Table loaded"
        );
        Ok(table)
    }

    /// Builds a table from in-memory headers and rows.
    pub fn from_rows(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows.into_iter().map(StringRecord::from).collect(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column named `name`, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of the column named `name`, or a [`PipelineError::MissingColumn`].
    pub fn require(&self, name: &str) -> Result<usize> {
        self.column(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()).into())
    }
}

/// Reads a cell, treating short rows as blank.
pub fn cell(row: &StringRecord, index: usize) -> &str {
    row.get(index).map(str::trim).unwrap_or("")
}

/// Cell values read as missing, following pandas' default NA markers.
const MISSING_MARKERS: &[&str] = &[
    "", "nan", "NaN", "NAN", "-nan", "-NaN", "NA", "N/A", "n/a", "<NA>", "null", "NULL", "None",
    "#N/A",
];

/// Whether a (trimmed) cell holds no value.
pub fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

/// The two source tables, loaded once per run.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub sales: RawTable,
    pub passengers: RawTable,
}

impl Datasets {
    pub fn load(sales_path: &Path, passengers_path: &Path) -> Result<Self> {
        Ok(Self {
            sales: RawTable::from_path(sales_path)?,
            passengers: RawTable::from_path(passengers_path)?,
        })
    }
}
