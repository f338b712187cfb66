//! Candle aggregator configuration

use crate::timeframe::Timeframe;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable prefix, e.g. `CANDLES_MAX_CANDLES_MEMORY=500`
pub const ENV_PREFIX: &str = "CANDLES";

/// Candle aggregator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Resolution of the candles fed into the aggregator
    pub source_timeframe: Timeframe,

    /// Timeframes to roll up into
    pub timeframes: Vec<Timeframe>,

    /// Maximum candles to keep per rolled-up series
    pub max_candles_memory: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            source_timeframe: Timeframe::M1,
            timeframes: vec![
                Timeframe::M5,
                Timeframe::M15,
                Timeframe::H1,
                Timeframe::D1,
            ],
            max_candles_memory: 1000,
        }
    }
}

impl AggregatorConfig {
    /// Load configuration from file, with `CANDLES_*` environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;

        info!(
            path = %path.display(),
            timeframes = config.timeframes.len(),
            max_candles_memory = config.max_candles_memory,
            "Loaded aggregator config"
        );
        Ok(config)
    }

    /// Reject configurations that cannot produce output
    pub fn validate(&self) -> Result<()> {
        if self.timeframes.is_empty() {
            bail!("At least one rollup timeframe is required");
        }
        if self.max_candles_memory == 0 {
            bail!("max_candles_memory must be greater than zero");
        }
        if let Some(finest) = self.timeframes.iter().min() {
            if finest.duration_seconds() < self.source_timeframe.duration_seconds() {
                bail!(
                    "Timeframe {} is finer than source timeframe {}",
                    finest,
                    self.source_timeframe
                );
            }
        }
        Ok(())
    }
}
