//! Candle aggregation engine
//!
//! Models OHLC-plus-volume candles bucketed by timestamp and rolls fine
//! candles up into coarser ones:
//! - Candle model with pipe-delimited and keyed JSON encodings
//! - Timestamp-keyed series with half-open range filter, merge and delete
//! - Aggregation recomputing high/low, volume median/average, VWAP and
//!   standard deviation
//! - Timeframe rollup driven by [`AggregatorConfig`]
//! - Asset taxonomy and settings validation
//!
//! Everything here is synchronous and in-memory.

#![deny(clippy::all)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregators;
pub mod asset;
pub mod candle;
pub mod codec;
pub mod config;
pub mod error;
pub mod series;
pub mod stats;
pub mod timeframe;

pub use aggregators::{CandleAggregator, aggregate, aggregate_range, rollup};
pub use candle::{Candle, TimestampedCandle, candles_from_json, candles_to_json};
pub use config::AggregatorConfig;
pub use error::{CandleError, CandleResult};
pub use series::{TimeBucketedSeries, sort_by_time};
pub use stats::{safe_average, safe_median, standard_deviation};
pub use timeframe::{Timeframe, UnknownTimeframe};
