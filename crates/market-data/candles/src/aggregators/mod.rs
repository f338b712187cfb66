//! Aggregator implementations

pub mod candle;

pub use candle::{CandleAggregator, aggregate, aggregate_range, rollup};
