//! CLI entry point for the station traffic correlation tool.
//!
//! Provides subcommands for the full sales vs. traffic analysis and for
//! dumping the intermediate banded and traffic tables.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use station_traffic_corr::{
    analysis::analyzer::analyze_station,
    bands::group_time_bands,
    config::AnalysisConfig,
    loader::{Datasets, RawTable},
    output::{
        print_pretty, print_summary, write_banded, write_chart_file, write_report_file,
        write_traffic,
    },
    traffic::{DuplicatePolicy, calculate_total_traffic},
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "station_traffic_corr")]
#[command(
    about = "Correlate commercial-zone sales with subway traffic by time of day",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correlate per-band sales with per-band passenger traffic for one station
    Analyze {
        /// Commercial-zone sales CSV (UTF-8, optionally .gz)
        #[arg(long, value_name = "CSV")]
        sales: PathBuf,

        /// Per-station hourly boarding/alighting CSV (UTF-8, optionally .gz)
        #[arg(long, value_name = "CSV")]
        passengers: PathBuf,

        /// JSON file with analysis settings; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Station name, matched exactly against the passenger table
        #[arg(short, long)]
        station: Option<String>,

        /// Substring matched against sales zone names (defaults to the station)
        #[arg(short, long)]
        zone: Option<String>,

        /// Sum duplicate (date, station, direction) rows instead of failing
        #[arg(long, default_value_t = false)]
        sum_duplicates: bool,

        /// JSON file to write the report to
        #[arg(short, long, default_value = "report.json")]
        report: PathBuf,

        /// CSV file to write the chart series to
        #[arg(long, default_value = "chart.csv")]
        chart: PathBuf,
    },
    /// Sum hourly passenger columns into time bands and write them as CSV
    Bands {
        /// Per-station hourly boarding/alighting CSV
        #[arg(long, value_name = "CSV")]
        passengers: PathBuf,

        /// Output CSV (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Join boarding and alighting rows into total traffic and write them as CSV
    Traffic {
        /// Per-station hourly boarding/alighting CSV
        #[arg(long, value_name = "CSV")]
        passengers: PathBuf,

        /// Output CSV (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sum duplicate (date, station, direction) rows instead of failing
        #[arg(long, default_value_t = false)]
        sum_duplicates: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/station_traffic_corr.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("station_traffic_corr.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            sales,
            passengers,
            config,
            station,
            zone,
            sum_duplicates,
            report,
            chart,
        } => {
            let mut settings = match config {
                Some(path) => AnalysisConfig::load(&path)?,
                None => AnalysisConfig::default(),
            };
            if let Some(station) = station {
                settings.station = station;
            }
            if zone.is_some() {
                settings.zone_pattern = zone;
            }
            if sum_duplicates {
                settings.duplicate_policy = DuplicatePolicy::Sum;
            }

            info!(
                station = %settings.station,
                zone_pattern = settings.zone_pattern(),
                policy = ?settings.duplicate_policy,
                "Starting analysis"
            );

            let datasets = Datasets::load(&sales, &passengers)?;
            let result = analyze_station(&datasets, &settings)?;

            print_pretty(&result);
            print_summary(&result);
            write_report_file(&report, &result)?;
            write_chart_file(&chart, &result)?;
        }
        Commands::Bands { passengers, output } => {
            let table = RawTable::from_path(&passengers)?;
            let banded = group_time_bands(&table)?;

            match output {
                Some(path) => write_banded(File::create(&path)?, &banded.records)?,
                None => write_banded(io::stdout().lock(), &banded.records)?,
            }
            info!(rows = banded.records.len(), "Banded rows exported");
        }
        Commands::Traffic {
            passengers,
            output,
            sum_duplicates,
        } => {
            let policy = if sum_duplicates {
                DuplicatePolicy::Sum
            } else {
                DuplicatePolicy::Reject
            };

            let table = RawTable::from_path(&passengers)?;
            let banded = group_time_bands(&table)?;
            let traffic = calculate_total_traffic(&banded.records, policy)?;

            match output {
                Some(path) => write_traffic(File::create(&path)?, &traffic)?,
                None => write_traffic(io::stdout().lock(), &traffic)?,
            }
            info!(rows = traffic.len(), "Traffic rows exported");
        }
    }

    Ok(())
}
