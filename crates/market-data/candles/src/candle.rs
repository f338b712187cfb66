//! Candle entity and its timestamped form
//!
//! A [`Candle`] holds the statistics of a single time bucket for one asset.
//! Candles are plain `Copy` values: aggregation always produces a new one and
//! never mutates its inputs.

use crate::error::CandleResult;
use serde::{Deserialize, Serialize};

/// OHLC plus volume statistics for one bucket
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Candle {
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Volume bought (taker buy side)
    pub volume_bought: f64,
    /// Volume sold (taker sell side)
    pub volume_sold: f64,
    /// Number of trades
    pub trade_count: u64,
    /// Median of the sub-bucket bought volumes
    pub median_volume_bought: f64,
    /// Mean of the sub-bucket bought volumes
    pub average_volume_bought: f64,
    /// Median of the sub-bucket sold volumes
    pub median_volume_sold: f64,
    /// Mean of the sub-bucket sold volumes
    pub average_volume_sold: f64,
    /// Volume-weighted average price
    pub vwap: f64,
    /// Population standard deviation of bought and sold sub-bucket volumes
    pub standard_deviation: f64,
}

impl Candle {
    /// Create a leaf candle from its price levels, with no volume
    #[must_use]
    pub fn from_ohlc(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            ..Self::default()
        }
    }

    /// Set traded volume and trade count
    #[must_use]
    pub const fn with_volume(mut self, bought: f64, sold: f64, trade_count: u64) -> Self {
        self.volume_bought = bought;
        self.volume_sold = sold;
        self.trade_count = trade_count;
        self
    }

    /// Set the volume-weighted average price
    #[must_use]
    pub const fn with_vwap(mut self, vwap: f64) -> Self {
        self.vwap = vwap;
        self
    }

    /// Total traded volume (bought + sold)
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.volume_bought + self.volume_sold
    }

    /// Attach a bucket timestamp (Unix seconds)
    #[must_use]
    pub const fn to_timestamped(self, time: i64) -> TimestampedCandle {
        TimestampedCandle { candle: self, time }
    }
}

/// A candle keyed by the start of its bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimestampedCandle {
    /// Candle statistics
    #[serde(flatten)]
    pub candle: Candle,
    /// Bucket start, Unix seconds
    pub time: i64,
}

impl TimestampedCandle {
    /// Create a timestamped candle
    #[must_use]
    pub const fn new(time: i64, candle: Candle) -> Self {
        Self { candle, time }
    }

    /// Drop the timestamp
    #[must_use]
    pub const fn to_candle(&self) -> Candle {
        self.candle
    }
}

impl From<TimestampedCandle> for Candle {
    fn from(value: TimestampedCandle) -> Self {
        value.candle
    }
}

/// Render a list of timestamped candles in the keyed JSON form
pub fn candles_to_json(candles: &[TimestampedCandle]) -> CandleResult<String> {
    Ok(serde_json::to_string(candles)?)
}

/// Parse a JSON array of timestamped candles
pub fn candles_from_json(json: &str) -> CandleResult<Vec<TimestampedCandle>> {
    Ok(serde_json::from_str(json)?)
}
