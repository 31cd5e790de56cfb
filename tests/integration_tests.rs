use approx::assert_abs_diff_eq;
use station_traffic_corr::analysis::analyzer::analyze_station;
use station_traffic_corr::analysis::relationship::Relationship;
use station_traffic_corr::bands::group_time_bands;
use station_traffic_corr::config::AnalysisConfig;
use station_traffic_corr::loader::{Datasets, RawTable};
use station_traffic_corr::output::{write_chart_file, write_report_file};
use station_traffic_corr::traffic::{DuplicatePolicy, calculate_total_traffic};
use std::path::Path;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load() -> Datasets {
    Datasets::load(&fixture("sales.csv"), &fixture("passengers.csv"))
        .expect("Failed to load fixtures")
}

#[test]
fn test_full_pipeline() {
    let datasets = load();
    let report = analyze_station(&datasets, &AnalysisConfig::default()).unwrap();

    // three zone names contain "동대문"; two traffic days for the station
    assert_eq!(report.sales_rows(), 3);
    assert_eq!(report.traffic_rows(), 2);
    assert!(report.missing_bands().is_empty());

    assert_eq!(
        report.averages().traffic(),
        vec![3.5, 70.0, 84.0, 115.5, 203.0, 189.0]
    );
    let sales = report.averages().sales();
    assert_abs_diff_eq!(sales[0], 200_000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(sales[2], 1_233_333.333_333, epsilon = 1e-3);

    let r = report.correlation().value().unwrap();
    assert_abs_diff_eq!(r, 0.378_424_77, epsilon = 1e-6);
    assert_eq!(report.relationship(), Some(Relationship::NoClearRelationship));
}

#[test]
fn test_traffic_join_drops_one_sided_days() {
    let table = RawTable::from_path(fixture("passengers.csv")).unwrap();
    let banded = group_time_bands(&table).unwrap();
    let traffic = calculate_total_traffic(&banded.records, DuplicatePolicy::Reject).unwrap();

    assert_eq!(banded.records.len(), 7);
    assert_eq!(traffic.len(), 3);
    assert!(
        !traffic
            .iter()
            .any(|t| t.station == "종로3가" && t.date == "2024-01-02")
    );
}

#[test]
fn test_narrower_zone_pattern() {
    let datasets = load();
    let config = AnalysisConfig {
        zone_pattern: Some("동대문역".to_string()),
        ..Default::default()
    };

    let report = analyze_station(&datasets, &config).unwrap();

    assert_eq!(report.sales_rows(), 2);
    assert_abs_diff_eq!(report.averages().sales()[0], 100_000.0, epsilon = 1e-6);
}

#[test]
fn test_unknown_station_is_undefined() {
    let datasets = load();
    let config = AnalysisConfig {
        station: "없는역".to_string(),
        ..Default::default()
    };

    let report = analyze_station(&datasets, &config).unwrap();

    assert_eq!(report.traffic_rows(), 0);
    assert_eq!(report.correlation().value(), None);
    assert_eq!(report.relationship(), None);
}

#[test]
fn test_report_files_written() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.json");
    let chart_path = dir.path().join("chart.csv");

    let report = analyze_station(&load(), &AnalysisConfig::default()).unwrap();
    write_report_file(&report_path, &report).unwrap();
    write_chart_file(&chart_path, &report).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["station"], "동대문");
    assert_eq!(json["relationship"], "no_clear_relationship");

    let chart = std::fs::read_to_string(&chart_path).unwrap();
    assert_eq!(chart.lines().count(), 7);
    assert!(chart.lines().nth(6).unwrap().starts_with("21-24,"));
}
