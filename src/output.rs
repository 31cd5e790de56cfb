//! Output formatting and persistence for analysis results.
//!
//! Supports log output, a JSON report, chart-data CSV, and CSV dumps of the
//! intermediate banded and traffic tables.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::analysis::types::CorrelationReport;
use crate::bands::BandedRecord;
use crate::schema::{Band, passenger};
use crate::traffic::TrafficRecord;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &CorrelationReport) {
    debug!("{:#?}", report);
}

/// Logs the coefficient and its qualitative reading.
pub fn print_summary(report: &CorrelationReport) {
    let correlation = report.correlation();
    info!(
        station = report.station(),
        "Band sales vs. traffic correlation: {}", correlation
    );

    match report.relationship() {
        Some(relationship) => info!(relationship = relationship.label(), "{}", relationship.message()),
        None => warn!("Correlation is undefined: one series is constant or there is too little data"),
    }

    for row in &report.averages().rows {
        info!(
            band = %row.band,
            avg_sales = row.avg_sales,
            avg_traffic = row.avg_traffic,
            "Band average"
        );
    }
}

/// Writes the report as pretty-printed JSON.
pub fn write_report<W: Write>(writer: W, report: &CorrelationReport) -> Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Writes the report as pretty-printed JSON to `path`.
pub fn write_report_file(path: &Path, report: &CorrelationReport) -> Result<()> {
    write_report(File::create(path)?, report)?;
    info!(path = %path.display(), "Report written");
    Ok(())
}

#[derive(Serialize)]
struct ChartPoint {
    band: &'static str,
    avg_sales: f64,
    avg_traffic: f64,
}

/// Writes the two chart series, one row per band.
pub fn write_chart<W: Write>(writer: W, report: &CorrelationReport) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    for row in &report.averages().rows {
        writer.serialize(ChartPoint {
            band: row.band.short_name(),
            avg_sales: row.avg_sales,
            avg_traffic: row.avg_traffic,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the chart series CSV to `path`.
pub fn write_chart_file(path: &Path, report: &CorrelationReport) -> Result<()> {
    write_chart(File::create(path)?, report)?;
    info!(path = %path.display(), "Chart data written");
    Ok(())
}

/// Writes banded passenger rows with the source dataset's Korean headers.
pub fn write_banded<W: Write>(writer: W, records: &[BandedRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header = vec![
        passenger::DATE.to_string(),
        passenger::STATION.to_string(),
        passenger::DIRECTION.to_string(),
    ];
    header.extend(Band::ALL.iter().map(|b| b.label().to_string()));
    writer.write_record(&header)?;

    for rec in records {
        let mut row = vec![rec.date.clone(), rec.station.clone(), rec.direction.clone()];
        row.extend(rec.bands.iter().map(u64::to_string));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    debug!(rows = records.len(), "Banded rows written");
    Ok(())
}

/// Writes joined traffic rows; band columns carry the `_유동인구` suffix.
pub fn write_traffic<W: Write>(writer: W, records: &[TrafficRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header = vec![passenger::DATE.to_string(), passenger::STATION.to_string()];
    header.extend(Band::ALL.iter().map(|b| b.traffic_column()));
    writer.write_record(&header)?;

    for rec in records {
        let mut row = vec![rec.date.clone(), rec.station.clone()];
        row.extend(rec.bands.iter().map(u64::to_string));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    debug!(rows = records.len(), "Traffic rows written");
    Ok(())
}
