//! CLI entry point for the waitline queue wait-time tool.
//!
//! Provides subcommands for recording ping/pong pairs into the raw log,
//! aggregating the log into chart-ready JSON, and summarizing what the log
//! holds.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use waitline::engine::aggregate::aggregate;
use waitline::engine::edition::{EditionId, EditionPolicy, EditionTable};
use waitline::engine::present::present;
use waitline::engine::types::{EngineConfig, OrderingPolicy, RawRecord};
use waitline::output::append_record;
use waitline::parser::{parse_timestamp, read_log};

#[derive(Parser)]
#[command(name = "waitline")]
#[command(about = "Records queue ping/pong pairs and charts wait times", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Year-to-edition derivation rule. Two rules were in historical use; the
/// caller must pick one explicitly.
#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// year - 1983 for every year
    Offset1983,
    /// year - 1983 before 2020, year - 1986 from 2020 on
    Cutover2020,
}

impl From<PolicyArg> for EditionPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Offset1983 => EditionPolicy::Offset1983,
            PolicyArg::Cutover2020 => EditionPolicy::Cutover2020,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the raw log and emit chart-ready JSON
    Chart {
        /// Path to the raw ping/pong log (default: $WAITLINE_DATA or waitline.csv)
        #[arg(short, long)]
        data: Option<String>,

        /// Comma-separated editions to include (default: all known)
        #[arg(short, long, value_delimiter = ',')]
        editions: Vec<String>,

        /// Year-to-edition derivation rule
        #[arg(long, value_enum, default_value_t = PolicyArg::Offset1983)]
        policy: PolicyArg,

        /// Sort records by ping time before aggregating
        #[arg(long, default_value_t = false)]
        time_sorted: bool,

        /// File to write the JSON to (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate and append one ping/pong pair to the log
    Record {
        /// Path to the raw ping/pong log (default: $WAITLINE_DATA or waitline.csv)
        #[arg(short, long)]
        data: Option<String>,

        /// Arrival at the back of the queue (ISO-8601)
        ping: String,

        /// Arrival at the front of the queue (ISO-8601)
        pong: String,
    },
    /// Summarize the raw log
    Stats {
        /// Path to the raw ping/pong log (default: $WAITLINE_DATA or waitline.csv)
        #[arg(short, long)]
        data: Option<String>,

        /// Year-to-edition derivation rule
        #[arg(long, value_enum, default_value_t = PolicyArg::Offset1983)]
        policy: PolicyArg,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/waitline.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("waitline.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            data,
            editions,
            policy,
            time_sorted,
            output,
        } => {
            chart(&data_path(data), &editions, policy, time_sorted, output)?;
        }
        Commands::Record { data, ping, pong } => {
            record(&data_path(data), &ping, &pong)?;
        }
        Commands::Stats { data, policy } => {
            stats(&data_path(data), policy)?;
        }
    }

    Ok(())
}

/// Resolves the log path: flag, then WAITLINE_DATA, then the default.
fn data_path(flag: Option<String>) -> String {
    flag.unwrap_or_else(|| {
        std::env::var("WAITLINE_DATA").unwrap_or_else(|_| "waitline.csv".to_string())
    })
}

/// Aggregates the log and writes the chart document as JSON.
#[tracing::instrument(skip(editions, policy, time_sorted, output), fields(data))]
fn chart(
    data: &str,
    editions: &[String],
    policy: PolicyArg,
    time_sorted: bool,
    output: Option<String>,
) -> Result<()> {
    let records = read_log(data)?;

    let config = EngineConfig {
        table: EditionTable::with_default_colors(policy.into()),
        ordering: if time_sorted {
            OrderingPolicy::TimeSorted
        } else {
            OrderingPolicy::ArrivalOrder
        },
    };

    let filter: BTreeSet<EditionId> = editions
        .iter()
        .map(|label| EditionId::new(label.trim()))
        .collect();

    let result = aggregate(
        &config,
        &records,
        if filter.is_empty() {
            None
        } else {
            Some(&filter)
        },
    );
    let view = present(&config, &result, &filter);

    if view.days.is_empty() {
        info!("No data to chart");
    }

    let document = serde_json::json!({
        "chart": &view,
        "last_sample": &result.last_sample,
    });
    let json = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            info!(path = %path, days = view.days.len(), "Chart data written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Validates one ping/pong pair and appends it to the log.
#[tracing::instrument(fields(data))]
fn record(data: &str, ping: &str, pong: &str) -> Result<()> {
    let ping = parse_timestamp(ping)?;
    let pong = parse_timestamp(pong)?;

    if pong < ping {
        warn!(%ping, %pong, "Pong precedes ping, recording a negative wait");
    }

    append_record(data, &RawRecord { ping, pong })?;
    info!(%ping, %pong, "Recorded ping/pong pair");
    Ok(())
}

/// Logs a summary of what the raw log currently holds.
#[tracing::instrument(skip(policy), fields(data))]
fn stats(data: &str, policy: PolicyArg) -> Result<()> {
    let records = read_log(data)?;

    let config = EngineConfig {
        table: EditionTable::with_default_colors(policy.into()),
        ordering: OrderingPolicy::ArrivalOrder,
    };
    let result = aggregate(&config, &records, None);

    info!(
        records = records.len(),
        days = result.by_day.len(),
        "Log summary"
    );

    for (day, editions) in &result.by_day {
        for (edition, series) in editions {
            let merged: u32 = series.iter().map(|s| s.merged_count).sum();
            info!(
                day = *day,
                edition = %edition,
                samples = series.len(),
                records = merged,
                "Day series"
            );
        }
    }

    if let Some(last) = &result.last_sample {
        info!(
            edition = %last.edition,
            day = last.day,
            year = last.year,
            bucket = %last.sample.time_bucket,
            duration_minutes = last.sample.duration_minutes,
            "Most recent sample"
        );
    }

    Ok(())
}
