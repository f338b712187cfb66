//! Asset kinds and their storage layout

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::settings::ValidationError;

/// How an asset's values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Price-like unit value
    Unit,
    /// Traded quantity
    Quantity,
    /// Indicator points
    Point,
}

/// Storage layout of an asset kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStateConfig {
    /// Asset kind
    pub id: AssetType,
    /// Two-byte storage key prefix
    pub key: [u8; 2],
    /// Value interpretation
    pub data_type: DataType,
}

/// Named asset kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetType {
    /// Spot trade price
    #[serde(rename = "spot_price")]
    SpotPrice,
    /// Spot trade volume
    #[serde(rename = "spot_volume")]
    SpotVolume,
    /// Futures trade price
    #[serde(rename = "futures_price")]
    FuturesPrice,
    /// Futures trade volume
    #[serde(rename = "futures_volume")]
    FuturesVolume,
    /// Book depth within +1%
    #[serde(rename = "bd-p1")]
    BookDepthP1,
    /// Book depth within +2%
    #[serde(rename = "bd-p2")]
    BookDepthP2,
    /// Book depth within +3%
    #[serde(rename = "bd-p3")]
    BookDepthP3,
    /// Book depth within +4%
    #[serde(rename = "bd-p4")]
    BookDepthP4,
    /// Book depth within +5%
    #[serde(rename = "bd-p5")]
    BookDepthP5,
    /// Book depth within -1%
    #[serde(rename = "bd-m1")]
    BookDepthM1,
    /// Book depth within -2%
    #[serde(rename = "bd-m2")]
    BookDepthM2,
    /// Book depth within -3%
    #[serde(rename = "bd-m3")]
    BookDepthM3,
    /// Book depth within -4%
    #[serde(rename = "bd-m4")]
    BookDepthM4,
    /// Book depth within -5%
    #[serde(rename = "bd-m5")]
    BookDepthM5,
    /// Summed open interest
    #[serde(rename = "metrics_sum_open_interest")]
    MetricSumOpenInterest,
    /// Top trader long/short ratio (accounts)
    #[serde(rename = "metrics_count_toptrader_long_short_ratio")]
    MetricCountTopTraderLongShortRatio,
    /// Top trader long/short ratio (positions)
    #[serde(rename = "metrics_sum_toptrader_long_short_ratio")]
    MetricSumTopTraderLongShortRatio,
    /// Global long/short account ratio
    #[serde(rename = "metrics_count_long_short_ratio")]
    MetricCountLongShortRatio,
    /// Taker long/short volume ratio
    #[serde(rename = "metrics_sum_taker_long_short_vol_ratio")]
    MetricSumTakerLongShortVolRatio,
    /// Circulating supply
    #[serde(rename = "circulating_supply")]
    CirculatingSupply,
    /// Relative strength index, derived from other assets
    #[serde(rename = "rsi")]
    Rsi,
}

impl AssetType {
    /// Every asset kind
    pub const ALL: [Self; 21] = [
        Self::SpotPrice,
        Self::SpotVolume,
        Self::FuturesPrice,
        Self::FuturesVolume,
        Self::BookDepthP1,
        Self::BookDepthP2,
        Self::BookDepthP3,
        Self::BookDepthP4,
        Self::BookDepthP5,
        Self::BookDepthM1,
        Self::BookDepthM2,
        Self::BookDepthM3,
        Self::BookDepthM4,
        Self::BookDepthM5,
        Self::MetricSumOpenInterest,
        Self::MetricCountTopTraderLongShortRatio,
        Self::MetricSumTopTraderLongShortRatio,
        Self::MetricCountLongShortRatio,
        Self::MetricSumTakerLongShortVolRatio,
        Self::CirculatingSupply,
        Self::Rsi,
    ];

    /// Asset kinds sourced directly from upstream data
    pub const WITHOUT_DEPENDENCIES: [Self; 20] = [
        Self::SpotPrice,
        Self::SpotVolume,
        Self::FuturesPrice,
        Self::FuturesVolume,
        Self::BookDepthP1,
        Self::BookDepthP2,
        Self::BookDepthP3,
        Self::BookDepthP4,
        Self::BookDepthP5,
        Self::BookDepthM1,
        Self::BookDepthM2,
        Self::BookDepthM3,
        Self::BookDepthM4,
        Self::BookDepthM5,
        Self::MetricSumOpenInterest,
        Self::MetricCountTopTraderLongShortRatio,
        Self::MetricSumTopTraderLongShortRatio,
        Self::MetricCountLongShortRatio,
        Self::MetricSumTakerLongShortVolRatio,
        Self::CirculatingSupply,
    ];

    /// Storage name, e.g. `bd-p3`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SpotPrice => "spot_price",
            Self::SpotVolume => "spot_volume",
            Self::FuturesPrice => "futures_price",
            Self::FuturesVolume => "futures_volume",
            Self::BookDepthP1 => "bd-p1",
            Self::BookDepthP2 => "bd-p2",
            Self::BookDepthP3 => "bd-p3",
            Self::BookDepthP4 => "bd-p4",
            Self::BookDepthP5 => "bd-p5",
            Self::BookDepthM1 => "bd-m1",
            Self::BookDepthM2 => "bd-m2",
            Self::BookDepthM3 => "bd-m3",
            Self::BookDepthM4 => "bd-m4",
            Self::BookDepthM5 => "bd-m5",
            Self::MetricSumOpenInterest => "metrics_sum_open_interest",
            Self::MetricCountTopTraderLongShortRatio => "metrics_count_toptrader_long_short_ratio",
            Self::MetricSumTopTraderLongShortRatio => "metrics_sum_toptrader_long_short_ratio",
            Self::MetricCountLongShortRatio => "metrics_count_long_short_ratio",
            Self::MetricSumTakerLongShortVolRatio => "metrics_sum_taker_long_short_vol_ratio",
            Self::CirculatingSupply => "circulating_supply",
            Self::Rsi => "rsi",
        }
    }

    /// Storage key and value interpretation
    #[must_use]
    pub const fn state_config(&self) -> AssetStateConfig {
        let (index, data_type) = match self {
            Self::SpotPrice => (0, DataType::Unit),
            Self::SpotVolume => (1, DataType::Quantity),
            Self::BookDepthP1 => (2, DataType::Unit),
            Self::BookDepthP2 => (3, DataType::Unit),
            Self::BookDepthP3 => (4, DataType::Unit),
            Self::BookDepthP4 => (5, DataType::Unit),
            Self::BookDepthP5 => (6, DataType::Unit),
            Self::BookDepthM1 => (7, DataType::Unit),
            Self::BookDepthM2 => (8, DataType::Unit),
            Self::BookDepthM3 => (9, DataType::Unit),
            Self::BookDepthM4 => (10, DataType::Unit),
            Self::BookDepthM5 => (11, DataType::Unit),
            Self::MetricSumOpenInterest => (12, DataType::Unit),
            Self::MetricCountTopTraderLongShortRatio => (13, DataType::Unit),
            Self::MetricSumTopTraderLongShortRatio => (14, DataType::Unit),
            Self::MetricCountLongShortRatio => (15, DataType::Unit),
            Self::MetricSumTakerLongShortVolRatio => (16, DataType::Unit),
            Self::CirculatingSupply => (17, DataType::Unit),
            Self::FuturesPrice => (18, DataType::Unit),
            Self::FuturesVolume => (19, DataType::Quantity),
            Self::Rsi => (20, DataType::Point),
        };
        AssetStateConfig {
            id: *self,
            key: [0, index],
            data_type,
        }
    }

    /// Value interpretation
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.state_config().data_type
    }

    /// Whether this kind is derived from other assets
    #[must_use]
    pub const fn requires_dependencies(&self) -> bool {
        matches!(self, Self::Rsi)
    }

    /// Signed depth band of a book-depth asset: `bd-p3` is 3, `bd-m2` is -2
    pub fn book_depth_percentage(&self) -> Result<i8, ValidationError> {
        match self {
            Self::BookDepthP1 => Ok(1),
            Self::BookDepthP2 => Ok(2),
            Self::BookDepthP3 => Ok(3),
            Self::BookDepthP4 => Ok(4),
            Self::BookDepthP5 => Ok(5),
            Self::BookDepthM1 => Ok(-1),
            Self::BookDepthM2 => Ok(-2),
            Self::BookDepthM3 => Ok(-3),
            Self::BookDepthM4 => Ok(-4),
            Self::BookDepthM5 => Ok(-5),
            _ => Err(ValidationError::NotBookDepth(*self)),
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|asset| asset.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownAsset(s.to_string()))
    }
}
