//! Error types for candle parsing and aggregation

use crate::timeframe::Timeframe;
use thiserror::Error;

/// Errors raised by the candle model, codec and aggregators
#[derive(Error, Debug)]
pub enum CandleError {
    /// Serialized candle does not have the expected number of fields
    #[error("Expected {expected} candle fields, found {found}")]
    FieldCount {
        /// Number of fields the format defines
        expected: usize,
        /// Number of fields present in the input
        found: usize,
    },

    /// A single field failed numeric parsing
    #[error("Invalid value for field {index} ({field}): {raw:?}")]
    Parse {
        /// Zero-based position of the field in the serialized form
        index: usize,
        /// Name of the field at that position
        field: &'static str,
        /// The raw substring that could not be parsed
        raw: String,
    },

    /// Aggregation was asked to reduce an empty sequence
    #[error("Cannot aggregate an empty candle sequence")]
    EmptyInput,

    /// Summed trade count does not fit in `u64`
    #[error("Trade count overflow after {count} candles")]
    TradeCountOverflow {
        /// Candles summed before the overflow
        count: usize,
    },

    /// Timestamp has no representable bucket start
    #[error("Timestamp {time} is outside the {timeframe} bucket range")]
    TimestampOutOfRange {
        /// Offending timestamp, Unix seconds
        time: i64,
        /// Target timeframe
        timeframe: Timeframe,
    },

    /// Structured (keyed) encoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for candle results
pub type CandleResult<T> = Result<T, CandleError>;
