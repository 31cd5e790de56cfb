use anyhow::Result;
use tracing::{info, warn};

use crate::analysis::averages::{AverageTable, sales_means, traffic_means};
use crate::analysis::correlation::pearson;
use crate::analysis::types::CorrelationReport;
use crate::bands::group_time_bands;
use crate::config::AnalysisConfig;
use crate::loader::Datasets;
use crate::traffic::calculate_total_traffic;

/// Runs the whole pipeline for the configured station: band the passenger
/// table, join directions, average both datasets per band and correlate.
#[tracing::instrument(skip_all, fields(station = %config.station))]
pub fn analyze_station(datasets: &Datasets, config: &AnalysisConfig) -> Result<CorrelationReport> {
    let banded = group_time_bands(&datasets.passengers)?;
    let traffic = calculate_total_traffic(&banded.records, config.duplicate_policy)?;

    let zone_pattern = config.zone_pattern();
    let (sales_avg, sales_rows) = sales_means(&datasets.sales, zone_pattern)?;
    let (traffic_avg, traffic_rows) = traffic_means(&traffic, &config.station);

    if sales_rows == 0 {
        warn!(zone_pattern, "No sales rows match the zone pattern");
    }
    if traffic_rows == 0 {
        warn!(station = %config.station, "No traffic rows for station");
    }

    let averages = AverageTable::new(sales_avg, traffic_avg);
    let correlation = pearson(&averages.sales(), &averages.traffic());

    let report = CorrelationReport::new(
        &config.station,
        zone_pattern,
        sales_rows,
        traffic_rows,
        banded.missing_bands,
        averages,
        correlation,
    );

    info!(
        sales_rows,
        traffic_rows,
        coefficient = %correlation,
        "Station analysis complete"
    );
    Ok(report)
}
