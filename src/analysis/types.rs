//! Result types of a station analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::averages::AverageTable;
use crate::analysis::correlation::Correlation;
use crate::analysis::relationship::{Relationship, classify};
use crate::schema::Band;

/// Everything computed for one station, serialized as the JSON report.
#[derive(Debug, Serialize)]
pub struct CorrelationReport {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) station: String,
    pub(crate) zone_pattern: String,
    pub(crate) sales_rows: usize,
    pub(crate) traffic_rows: usize,
    /// Bands defaulted to zero because the passenger table lacked their columns.
    pub(crate) missing_bands: Vec<Band>,
    #[serde(rename = "coefficient", serialize_with = "serialize_correlation")]
    pub(crate) correlation: Correlation,
    pub(crate) relationship: Option<Relationship>,
    pub(crate) averages: AverageTable,
}

impl CorrelationReport {
    pub fn new(
        station: &str,
        zone_pattern: &str,
        sales_rows: usize,
        traffic_rows: usize,
        missing_bands: Vec<Band>,
        averages: AverageTable,
        correlation: Correlation,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            station: station.to_string(),
            zone_pattern: zone_pattern.to_string(),
            sales_rows,
            traffic_rows,
            missing_bands,
            relationship: correlation.value().map(classify),
            correlation,
            averages,
        }
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn correlation(&self) -> Correlation {
        self.correlation
    }

    pub fn relationship(&self) -> Option<Relationship> {
        self.relationship
    }

    pub fn averages(&self) -> &AverageTable {
        &self.averages
    }

    pub fn sales_rows(&self) -> usize {
        self.sales_rows
    }

    pub fn traffic_rows(&self) -> usize {
        self.traffic_rows
    }

    pub fn missing_bands(&self) -> &[Band] {
        &self.missing_bands
    }
}

fn serialize_correlation<S: serde::Serializer>(
    correlation: &Correlation,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match correlation.value() {
        Some(r) => serializer.serialize_some(&r),
        None => serializer.serialize_none(),
    }
}
