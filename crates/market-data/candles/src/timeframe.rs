//! Bucket widths used for rolling candles up

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timeframe for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    /// 1 minute bars
    #[serde(rename = "1m")]
    M1,
    /// 5 minute bars
    #[serde(rename = "5m")]
    M5,
    /// 15 minute bars
    #[serde(rename = "15m")]
    M15,
    /// 30 minute bars
    #[serde(rename = "30m")]
    M30,
    /// 1 hour bars
    #[serde(rename = "1h")]
    H1,
    /// 4 hour bars
    #[serde(rename = "4h")]
    H4,
    /// Daily bars
    #[serde(rename = "1d")]
    D1,
    /// Weekly bars
    #[serde(rename = "1w")]
    W1,
}

/// Unknown timeframe label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown timeframe: {0}")]
pub struct UnknownTimeframe(pub String);

impl Timeframe {
    /// Every timeframe, finest first
    pub const ALL: [Self; 8] = [
        Self::M1,
        Self::M5,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H4,
        Self::D1,
        Self::W1,
    ];

    /// Get duration in seconds
    #[must_use]
    pub const fn duration_seconds(&self) -> i64 {
        match self {
            Self::M1 => 60,
            Self::M5 => 300,
            Self::M15 => 900,
            Self::M30 => 1800,
            Self::H1 => 3600,
            Self::H4 => 14400,
            Self::D1 => 86400,
            Self::W1 => 604_800,
        }
    }

    /// Get chrono duration
    #[must_use]
    pub fn to_duration(&self) -> Duration {
        Duration::seconds(self.duration_seconds())
    }

    /// Start of the bucket containing `time` (Unix seconds)
    ///
    /// Buckets are aligned to the Unix epoch, so weekly buckets start on a
    /// Thursday. `None` when the start lies below `i64::MIN`.
    #[must_use]
    pub const fn bucket_start(&self, time: i64) -> Option<i64> {
        let width = self.duration_seconds();
        time.div_euclid(width).checked_mul(width)
    }

    /// Short label, e.g. `15m`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::D1 => "1d",
            Self::W1 => "1w",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = UnknownTimeframe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|timeframe| timeframe.as_str() == s)
            .ok_or_else(|| UnknownTimeframe(s.to_string()))
    }
}
