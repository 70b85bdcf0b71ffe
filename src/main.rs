//! CLI entry point for the fleet efficiency dashboard.
//!
//! Loads fleet records from a JSON file, a CSV export, or a published
//! spreadsheet URL, runs the aggregation engine, and prints or writes the
//! resulting views.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use fleet_rater::config::DashboardConfig;
use fleet_rater::engine::normalize::normalize_all;
use fleet_rater::engine::ranking::{
    Metric, Ranked, bottom_n, group_stats, model_ranking, top_n, vehicle_ranking,
};
use fleet_rater::engine::{consistency, heatmap, summary, trend};
use fleet_rater::fetch::{BasicClient, fetch_bytes, is_remote};
use fleet_rater::output::{print_json, ranking_rows, write_json, write_ranking_csv};
use fleet_rater::parser::{parse_csv, parse_records};
use fleet_rater::tier::tier;
use fleet_rater::{DashboardReport, ProcessedRecord};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "fleet_rater")]
#[command(about = "Fuel-efficiency statistics and rankings for a vehicle fleet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full dashboard report
    Report {
        /// Path to a JSON/CSV file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Write the report to this file instead of logging it
        #[arg(short, long)]
        output: Option<String>,

        /// Gzip-compress the output file
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Rank vehicles, models or groups
    Ranking {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// What to rank
        #[arg(long, value_enum, default_value_t = RankBy::Vehicle)]
        by: RankBy,

        /// Metric to order by
        #[arg(short, long, value_enum, default_value_t = RankMetric::Efficiency)]
        metric: RankMetric,

        /// Number of entries to show (defaults to FLEET_TOP_N)
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Show the bottom of the ranking, worst first
        #[arg(long, default_value_t = false)]
        bottom: bool,

        /// Also write the shown entries to a CSV file
        #[arg(long)]
        csv: Option<String>,
    },
    /// Monthly mean efficiency, oldest month first
    Trend {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Split each month by group
        #[arg(long, default_value_t = false)]
        by_group: bool,
    },
    /// Vehicles whose efficiency varies by more than 15%
    Consistency {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Maximum number of vehicles to show (defaults to FLEET_TOP_N)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Vehicle × month efficiency matrix with performance tiers
    Heatmap {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Most recent months to include (defaults to FLEET_HEATMAP_MONTHS)
        #[arg(long)]
        months: Option<usize>,

        /// Maximum vehicles to include (defaults to FLEET_HEATMAP_VEHICLES)
        #[arg(long)]
        vehicles: Option<usize>,
    },
    /// Summary per group
    Groups {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Fetch the fleet spreadsheet and save it as a JSON snapshot
    Sync {
        /// CSV export URL (defaults to FLEET_SHEET_URL)
        #[arg(long)]
        url: Option<String>,

        /// Snapshot file to write
        #[arg(short, long, default_value = "fleet.json")]
        output: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RankBy {
    Vehicle,
    Model,
    Group,
}

#[derive(Clone, Copy, ValueEnum)]
enum RankMetric {
    Efficiency,
    Distance,
}

impl From<RankMetric> for Metric {
    fn from(metric: RankMetric) -> Self {
        match metric {
            RankMetric::Efficiency => Metric::MeanEfficiency,
            RankMetric::Distance => Metric::TotalDistance,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/fleet_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fleet_rater.log"));

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

    let config = DashboardConfig::from_env()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            source,
            output,
            gzip,
        } => {
            let records = parse_records(&fetcher(&source).await?)?;
            let report = DashboardReport::build(&records);

            match output {
                Some(path) => {
                    write_json(&path, &report, gzip)?;
                    info!(path = %path, records = report.summary.record_count, "Report written");
                }
                None => print_json(&report)?,
            }
        }
        Commands::Ranking {
            source,
            by,
            metric,
            top,
            bottom,
            csv,
        } => {
            let records = load_processed(&source).await?;
            let n = top.unwrap_or(config.top_n);
            let metric = Metric::from(metric);

            match by {
                RankBy::Vehicle => {
                    show_ranking(&vehicle_ranking(&records, metric), n, bottom, csv.as_deref())?
                }
                RankBy::Model => {
                    show_ranking(&model_ranking(&records, metric), n, bottom, csv.as_deref())?
                }
                RankBy::Group => {
                    show_ranking(&group_stats(&records, metric), n, bottom, csv.as_deref())?
                }
            }
        }
        Commands::Trend { source, by_group } => {
            let records = load_processed(&source).await?;

            if by_group {
                for point in trend::group_monthly_trend(&records) {
                    for (group, mean) in &point.groups {
                        info!(month = %point.month, group = %group, mean, "Group trend");
                    }
                }
            } else {
                for point in trend::monthly_trend(&records) {
                    info!(month = %point.month, mean = point.mean, records = point.count, "Trend");
                }
            }
        }
        Commands::Consistency { source, limit } => {
            let records = load_processed(&source).await?;
            let flagged = consistency::inconsistent(&records);

            if flagged.is_empty() {
                info!("All vehicles perform consistently");
            } else {
                warn!(vehicles = flagged.len(), "Vehicles with high variation (CV > 15%)");
            }
            for (i, entry) in top_n(&flagged, limit.unwrap_or(config.top_n)).iter().enumerate() {
                info!(
                    position = i + 1,
                    vehicle = %entry.vehicle,
                    mean = entry.mean,
                    std_dev = entry.standard_deviation,
                    cv = entry.coefficient_of_variation,
                    "Inconsistent vehicle"
                );
            }
        }
        Commands::Heatmap {
            source,
            months,
            vehicles,
        } => {
            let records = load_processed(&source).await?;
            let reference = summary::fleet_summary(&records).mean_loaded_efficiency;
            let map = heatmap::heatmap(&records).recent(
                months.unwrap_or(config.heatmap_months),
                vehicles.unwrap_or(config.heatmap_vehicles),
            );

            if map.rows.is_empty() {
                info!("Not enough data for the heatmap");
            }
            for row in &map.rows {
                for month in &map.months {
                    match map.value(&row.vehicle, month) {
                        Some(value) if value > 0.0 => info!(
                            vehicle = %row.vehicle,
                            month = %month,
                            value,
                            tier = %tier(value, reference),
                            "Heatmap cell"
                        ),
                        _ => info!(vehicle = %row.vehicle, month = %month, "Heatmap cell without data"),
                    }
                }
            }
        }
        Commands::Groups { source } => {
            let records = load_processed(&source).await?;

            for group in summary::group_summaries(&records) {
                let s = &group.summary;
                info!(
                    group = %group.group,
                    mean = s.mean_loaded_efficiency,
                    total_distance = s.total_distance,
                    loaded_distance = s.total_loaded_distance,
                    vehicles = s.vehicle_count,
                    best = s.best_vehicle.as_ref().map(|p| p.vehicle.as_str()).unwrap_or("-"),
                    worst = s.worst_vehicle.as_ref().map(|p| p.vehicle.as_str()).unwrap_or("-"),
                    "Group summary"
                );
            }
        }
        Commands::Sync { url, output } => {
            let Some(url) = url.or(config.sheet_url) else {
                bail!("no spreadsheet URL: pass --url or set FLEET_SHEET_URL");
            };
            sync(&url, &output).await?;
        }
    }

    Ok(())
}

/// Loads fleet data from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %url))]
async fn fetcher(url: &str) -> Result<Vec<u8>> {
    let bytes = if is_remote(url) {
        let client = BasicClient::new()?;
        fetch_bytes(&client, url).await?
    } else {
        std::fs::read(url).with_context(|| format!("cannot read {url}"))?
    };
    Ok(bytes)
}

async fn load_processed(source: &str) -> Result<Vec<ProcessedRecord>> {
    let records = parse_records(&fetcher(source).await?)?;
    info!(records = records.len(), "Fleet data loaded");
    Ok(normalize_all(&records))
}

fn show_ranking<T: Ranked>(ranked: &[T], n: usize, bottom: bool, csv: Option<&str>) -> Result<()> {
    let shown: Vec<&T> = if bottom {
        bottom_n(ranked, n)
    } else {
        top_n(ranked, n).iter().collect()
    };

    for (i, item) in shown.iter().enumerate() {
        let stats = item.stats();
        info!(
            position = i + 1,
            name = %item.label(),
            mean = stats.mean,
            total_distance = stats.total_distance,
            records = stats.count,
            "Ranking"
        );
    }

    if let Some(path) = csv {
        write_ranking_csv(path, &ranking_rows(shown.iter().copied()))?;
        info!(path, rows = shown.len(), "Ranking CSV written");
    }
    Ok(())
}

/// Pulls the spreadsheet CSV export and stores the records as JSON, ready to
/// be loaded by the other commands.
#[tracing::instrument]
async fn sync(url: &str, output: &str) -> Result<()> {
    let client = BasicClient::new()?;
    let bytes = fetch_bytes(&client, url).await?;
    let records = parse_csv(&bytes)?;

    write_json(output, &records, false)?;
    info!(records = records.len(), "Spreadsheet snapshot saved");
    Ok(())
}
