//! Per-band averages of sales and traffic for one station.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::analysis::utility::{mean, parse_number};
use crate::error::PipelineError;
use crate::loader::{RawTable, cell};
use crate::schema::{Band, sales};
use crate::traffic::TrafficRecord;

/// Mean revenue and mean traffic of one time band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandAverage {
    pub band: Band,
    pub avg_sales: f64,
    pub avg_traffic: f64,
}

/// Six rows, one per band, in [`Band::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AverageTable {
    pub rows: Vec<BandAverage>,
}

impl AverageTable {
    /// Pairs sales and traffic means band by band.
    pub fn new(sales: [f64; 6], traffic: [f64; 6]) -> Self {
        let rows = Band::ALL
            .iter()
            .map(|&band| BandAverage {
                band,
                avg_sales: sales[band.index()],
                avg_traffic: traffic[band.index()],
            })
            .collect();
        Self { rows }
    }

    pub fn sales(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.avg_sales).collect()
    }

    pub fn traffic(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.avg_traffic).collect()
    }
}

/// Per-band revenue means over sales rows whose zone name contains `pattern`.
///
/// The match is a plain case-sensitive substring test. A band whose revenue
/// column is absent yields 0; a band with no values among the matched rows
/// yields NaN. Also returns the number of matched rows.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn sales_means(table: &RawTable, pattern: &str) -> Result<([f64; 6], usize)> {
    let zone_idx = table.require(sales::ZONE_NAME)?;

    let matched: Vec<(usize, &csv::StringRecord)> = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| cell(row, zone_idx).contains(pattern))
        .collect();

    debug!(matched = matched.len(), "Sales rows matched");

    let mut means = [0.0; 6];
    for band in Band::ALL {
        let column = band.revenue_column();
        let Some(idx) = table.column(&column) else {
            warn!(column = %column, "Revenue column not found, defaulting to zero");
            continue;
        };

        let mut values = Vec::with_capacity(matched.len());
        for &(row_no, row) in &matched {
            let raw = cell(row, idx);
            match parse_number(raw) {
                None => {}
                Some(Ok(v)) => values.push(v),
                Some(Err(_)) => {
                    return Err(PipelineError::InvalidNumber {
                        row: row_no + 1,
                        column,
                        value: raw.to_string(),
                    }
                    .into());
                }
            }
        }

        means[band.index()] = mean(&values);
    }

    Ok((means, matched.len()))
}

/// Per-band traffic means over rows whose station equals `station` exactly.
/// Also returns the number of matched rows.
pub fn traffic_means(records: &[TrafficRecord], station: &str) -> ([f64; 6], usize) {
    let matched: Vec<&TrafficRecord> = records.iter().filter(|r| r.station == station).collect();

    let mut means = [0.0; 6];
    for band in Band::ALL {
        let values: Vec<f64> = matched.iter().map(|r| r.band(band) as f64).collect();
        means[band.index()] = mean(&values);
    }

    debug!(station, matched = matched.len(), "Traffic rows matched");
    (means, matched.len())
}
