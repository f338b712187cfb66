//! Candle CLI - inspect, aggregate and roll up candle files

#![deny(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use candles::asset::AssetSettings;
use candles::{
    AggregatorConfig, Candle, CandleAggregator, TimeBucketedSeries, TimestampedCandle, Timeframe,
    candles_from_json, candles_to_json, sort_by_time,
};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "candles";

#[derive(Parser)]
#[command(name = "candles")]
#[command(about = "Candle aggregation tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse pipe-delimited candle text into keyed JSON
    Parse {
        /// Candle text, e.g. `1|2|0.5|1.5|...`
        text: String,
    },
    /// Render a keyed JSON candle as pipe-delimited text
    Stringify {
        /// Candle JSON object
        json: String,
    },
    /// Aggregate a JSON array of timestamped candles into one candle
    Aggregate {
        /// Input file
        #[arg(long)]
        input: PathBuf,
        /// Inclusive lower bound, Unix seconds
        #[arg(long)]
        from: Option<i64>,
        /// Exclusive upper bound, Unix seconds
        #[arg(long)]
        to: Option<i64>,
        /// Print keyed JSON instead of pipe text
        #[arg(long)]
        json: bool,
    },
    /// Roll a JSON array of timestamped candles up to coarser buckets
    Rollup {
        /// Input file
        #[arg(long)]
        input: PathBuf,
        /// Single target timeframe; all configured timeframes when omitted
        #[arg(long)]
        timeframe: Option<Timeframe>,
        /// Aggregator config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate asset settings against their containing set
    ValidateSettings {
        /// Settings JSON file
        #[arg(long)]
        settings: PathBuf,
        /// Containing set ID segments
        #[arg(long, value_delimiter = ',', required = true)]
        set_id: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Parse { text } => parse_command(&text)?,
        Commands::Stringify { json } => stringify_command(&json)?,
        Commands::Aggregate {
            input,
            from,
            to,
            json,
        } => aggregate_command(&load_series(&input)?, from, to, json)?,
        Commands::Rollup {
            input,
            timeframe,
            config,
        } => {
            let config = match config {
                Some(path) => AggregatorConfig::from_file(path)?,
                None => AggregatorConfig::default(),
            };
            rollup_command(&load_series(&input)?, timeframe, config)?
        }
        Commands::ValidateSettings { settings, set_id } => {
            validate_settings_command(&settings, &set_id)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Initialize tracing with environment filter, writing to stderr
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{SERVICE_NAME}=info,candles_cli=info").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

fn load_series(path: &Path) -> Result<TimeBucketedSeries> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let candles = candles_from_json(&raw)
        .with_context(|| format!("Invalid candle JSON in {}", path.display()))?;

    let series: TimeBucketedSeries = candles.iter().copied().collect();
    if series.len() < candles.len() {
        warn!(
            duplicates = candles.len() - series.len(),
            "Duplicate timestamps in input; later entries win"
        );
    }
    info!(path = %path.display(), buckets = series.len(), "Loaded candles");
    Ok(series)
}

fn parse_command(text: &str) -> Result<String> {
    let candle = Candle::parse(text.trim())?;
    Ok(serde_json::to_string_pretty(&candle)?)
}

fn stringify_command(json: &str) -> Result<String> {
    let candle: Candle = serde_json::from_str(json).context("Invalid candle JSON")?;
    Ok(candle.stringify())
}

fn aggregate_command(
    series: &TimeBucketedSeries,
    from: Option<i64>,
    to: Option<i64>,
    json: bool,
) -> Result<String> {
    // Missing bounds are open, so candles at i64::MIN and i64::MAX stay reachable
    let mut ordered: Vec<TimestampedCandle> = series
        .iter()
        .filter(|(time, _)| from.is_none_or(|from| *time >= from))
        .filter(|(time, _)| to.is_none_or(|to| *time < to))
        .map(|(time, candle)| candle.to_timestamped(time))
        .collect();
    sort_by_time(&mut ordered, true);
    let aggregated = candles::aggregate(&ordered)?;

    info!(buckets = ordered.len(), "Aggregated window");
    if json {
        Ok(serde_json::to_string_pretty(&aggregated)?)
    } else {
        Ok(aggregated.stringify())
    }
}

fn rollup_command(
    series: &TimeBucketedSeries,
    timeframe: Option<Timeframe>,
    config: AggregatorConfig,
) -> Result<String> {
    let aggregator = CandleAggregator::new(config);

    if let Some(timeframe) = timeframe {
        let rolled = aggregator.rollup(series, timeframe)?;
        return Ok(candles_to_json(&rolled.sorted_by_time(true))?);
    }

    let rolled: BTreeMap<Timeframe, Vec<TimestampedCandle>> = aggregator
        .rollup_all(series)?
        .into_iter()
        .map(|(timeframe, series)| (timeframe, series.sorted_by_time(true)))
        .collect();
    Ok(serde_json::to_string_pretty(&rolled)?)
}

fn validate_settings_command(path: &Path, set_id: &[String]) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let settings: AssetSettings = serde_json::from_str(&raw).context("Invalid settings JSON")?;

    settings.validate(set_id)?;
    let state = settings.address.asset_type.state_config();
    Ok(format!(
        "{} is valid (key {:?}, {:?})",
        settings.address.asset_type, state.key, state.data_type
    ))
}
