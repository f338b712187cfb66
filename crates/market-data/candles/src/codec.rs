//! Pipe-delimited text codec for candles
//!
//! Layout (13 fields, `|` separated):
//!
//! ```text
//! open|high|low|close|volume_bought|volume_sold|trade_count|
//! median_volume_bought|average_volume_bought|median_volume_sold|
//! average_volume_sold|vwap|standard_deviation
//! ```
//!
//! Prices keep full precision. Bought/sold volume is written with 4
//! decimals, every other statistic with 3. A statistic that is exactly zero
//! is written as `0`.

use crate::candle::Candle;
use crate::error::{CandleError, CandleResult};
use std::fmt;
use std::str::FromStr;

/// Field delimiter of the serialized form
pub const DELIMITER: char = '|';

/// Field names in serialized order
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "open",
    "high",
    "low",
    "close",
    "volume_bought",
    "volume_sold",
    "trade_count",
    "median_volume_bought",
    "average_volume_bought",
    "median_volume_sold",
    "average_volume_sold",
    "vwap",
    "standard_deviation",
];

/// Number of fields in the serialized form
pub const FIELD_COUNT: usize = 13;

const VOLUME_DECIMALS: usize = 4;
const STAT_DECIMALS: usize = 3;

/// Shortest decimal that parses back to the same value
fn format_price(value: f64) -> String {
    value.to_string()
}

/// Fixed decimals, with a bare `0` for zero
fn format_stat(value: f64, decimals: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value:.decimals$}")
}

impl Candle {
    /// Render the candle in the pipe-delimited form
    #[must_use]
    pub fn stringify(&self) -> String {
        let fields = [
            format_price(self.open),
            format_price(self.high),
            format_price(self.low),
            format_price(self.close),
            format_stat(self.volume_bought, VOLUME_DECIMALS),
            format_stat(self.volume_sold, VOLUME_DECIMALS),
            self.trade_count.to_string(),
            format_stat(self.median_volume_bought, STAT_DECIMALS),
            format_stat(self.average_volume_bought, STAT_DECIMALS),
            format_stat(self.median_volume_sold, STAT_DECIMALS),
            format_stat(self.average_volume_sold, STAT_DECIMALS),
            format_stat(self.vwap, STAT_DECIMALS),
            format_stat(self.standard_deviation, STAT_DECIMALS),
        ];
        fields.join("|")
    }

    /// Parse the pipe-delimited form
    ///
    /// Every field must be present and numeric; nothing defaults to zero.
    pub fn parse(text: &str) -> CandleResult<Self> {
        let parts: Vec<&str> = text.split(DELIMITER).collect();
        if parts.len() != FIELD_COUNT {
            return Err(CandleError::FieldCount {
                expected: FIELD_COUNT,
                found: parts.len(),
            });
        }

        let float = |index: usize| -> CandleResult<f64> {
            let raw = parts[index];
            raw.trim().parse::<f64>().map_err(|_| CandleError::Parse {
                index,
                field: FIELD_NAMES[index],
                raw: raw.to_string(),
            })
        };

        let trade_count = parts[6]
            .trim()
            .parse::<u64>()
            .map_err(|_| CandleError::Parse {
                index: 6,
                field: FIELD_NAMES[6],
                raw: parts[6].to_string(),
            })?;

        Ok(Self {
            open: float(0)?,
            high: float(1)?,
            low: float(2)?,
            close: float(3)?,
            volume_bought: float(4)?,
            volume_sold: float(5)?,
            trade_count,
            median_volume_bought: float(7)?,
            average_volume_bought: float(8)?,
            median_volume_sold: float(9)?,
            average_volume_sold: float(10)?,
            vwap: float(11)?,
            standard_deviation: float(12)?,
        })
    }

    /// Open price, full precision
    #[must_use]
    pub fn open_string(&self) -> String {
        format_price(self.open)
    }

    /// High price, full precision
    #[must_use]
    pub fn high_string(&self) -> String {
        format_price(self.high)
    }

    /// Low price, full precision
    #[must_use]
    pub fn low_string(&self) -> String {
        format_price(self.low)
    }

    /// Close price, full precision
    #[must_use]
    pub fn close_string(&self) -> String {
        format_price(self.close)
    }

    /// Bought volume, 3 decimals
    #[must_use]
    pub fn volume_bought_string(&self) -> String {
        format_stat(self.volume_bought, STAT_DECIMALS)
    }

    /// Sold volume, 3 decimals
    #[must_use]
    pub fn volume_sold_string(&self) -> String {
        format_stat(self.volume_sold, STAT_DECIMALS)
    }

    /// Trade count as a decimal integer
    #[must_use]
    pub fn trade_count_string(&self) -> String {
        self.trade_count.to_string()
    }

    /// Median bought volume, 3 decimals
    #[must_use]
    pub fn median_volume_bought_string(&self) -> String {
        format_stat(self.median_volume_bought, STAT_DECIMALS)
    }

    /// Average bought volume, 3 decimals
    #[must_use]
    pub fn average_volume_bought_string(&self) -> String {
        format_stat(self.average_volume_bought, STAT_DECIMALS)
    }

    /// Median sold volume, 3 decimals
    #[must_use]
    pub fn median_volume_sold_string(&self) -> String {
        format_stat(self.median_volume_sold, STAT_DECIMALS)
    }

    /// Average sold volume, 3 decimals
    #[must_use]
    pub fn average_volume_sold_string(&self) -> String {
        format_stat(self.average_volume_sold, STAT_DECIMALS)
    }

    /// VWAP, 3 decimals
    #[must_use]
    pub fn vwap_string(&self) -> String {
        format_stat(self.vwap, STAT_DECIMALS)
    }

    /// Standard deviation, 3 decimals
    #[must_use]
    pub fn standard_deviation_string(&self) -> String {
        format_stat(self.standard_deviation, STAT_DECIMALS)
    }
}

impl fmt::Display for Candle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl FromStr for Candle {
    type Err = CandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
