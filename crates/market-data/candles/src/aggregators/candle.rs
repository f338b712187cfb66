//! Candle aggregator implementation
//!
//! Reduces an ascending run of fine candles to one coarse candle and rolls
//! whole series up to coarser timeframes.
//!
//! VWAP is recomputed from the sub-candles' own VWAP weighted by their
//! traded volume. Raw trades are not available at this layer, so the
//! approximation compounds across aggregation levels.

use crate::candle::{Candle, TimestampedCandle};
use crate::config::AggregatorConfig;
use crate::error::{CandleError, CandleResult};
use crate::series::{TimeBucketedSeries, sort_by_time};
use crate::stats::{safe_average, safe_median, standard_deviation};
use crate::timeframe::Timeframe;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Combine candles ordered ascending by time into a single candle
///
/// Open comes from the first candle and close from the last; high and low
/// are folded starting from the first candle. Volumes and trade counts are
/// summed; a trade count sum past `u64::MAX` is an error. Median and average are taken over the per-candle volumes, and the
/// standard deviation over bought volumes followed by sold volumes.
pub fn aggregate(candles: &[TimestampedCandle]) -> CandleResult<Candle> {
    let (first, last) = match (candles.first(), candles.last()) {
        (Some(first), Some(last)) => (first.candle, last.candle),
        _ => return Err(CandleError::EmptyInput),
    };

    let mut aggregated = Candle {
        open: first.open,
        high: first.high,
        low: first.low,
        close: last.close,
        ..Candle::default()
    };

    let mut volumes_bought = Vec::with_capacity(candles.len());
    let mut volumes_sold = Vec::with_capacity(candles.len());

    for (index, TimestampedCandle { candle, .. }) in candles.iter().enumerate() {
        aggregated.high = aggregated.high.max(candle.high);
        aggregated.low = aggregated.low.min(candle.low);
        aggregated.volume_bought += candle.volume_bought;
        aggregated.volume_sold += candle.volume_sold;
        aggregated.trade_count = aggregated
            .trade_count
            .checked_add(candle.trade_count)
            .ok_or(CandleError::TradeCountOverflow { count: index + 1 })?;

        volumes_bought.push(candle.volume_bought);
        volumes_sold.push(candle.volume_sold);
    }

    aggregated.median_volume_bought = safe_median(&volumes_bought);
    aggregated.median_volume_sold = safe_median(&volumes_sold);
    aggregated.average_volume_bought = safe_average(&volumes_bought);
    aggregated.average_volume_sold = safe_average(&volumes_sold);
    aggregated.vwap = volume_weighted_price(candles);

    volumes_bought.extend_from_slice(&volumes_sold);
    aggregated.standard_deviation = standard_deviation(&volumes_bought);

    debug!(
        count = candles.len(),
        trade_count = aggregated.trade_count,
        "Aggregated candles"
    );
    Ok(aggregated)
}

/// Σ(vwap × volume) / Σ volume, or 0 when nothing traded
fn volume_weighted_price(candles: &[TimestampedCandle]) -> f64 {
    let (numerator, total_volume) =
        candles
            .iter()
            .fold((0.0, 0.0), |(numerator, total), TimestampedCandle { candle, .. }| {
                let volume = candle.total_volume();
                (numerator + candle.vwap * volume, total + volume)
            });

    if total_volume == 0.0 {
        return 0.0;
    }
    numerator / total_volume
}

/// Filter `[t0, t1)`, sort ascending and aggregate
pub fn aggregate_range(series: &TimeBucketedSeries, t0: i64, t1: i64) -> CandleResult<Candle> {
    let window = series.filter_in_range(t0, t1).sorted_by_time(true);
    aggregate(&window)
}

/// Roll a series up into `timeframe` buckets
///
/// Each candle lands in the bucket containing its timestamp. Buckets are
/// aggregated in ascending time order and keyed by their aligned start.
/// A timestamp whose bucket start falls below `i64::MIN` is an error.
pub fn rollup(series: &TimeBucketedSeries, timeframe: Timeframe) -> CandleResult<TimeBucketedSeries> {
    let mut groups: FxHashMap<i64, Vec<TimestampedCandle>> = FxHashMap::default();
    for (time, candle) in series.iter() {
        let bucket = timeframe
            .bucket_start(time)
            .ok_or(CandleError::TimestampOutOfRange { time, timeframe })?;
        groups
            .entry(bucket)
            .or_default()
            .push(candle.to_timestamped(time));
    }

    let mut rolled = TimeBucketedSeries::new();
    for (bucket, mut members) in groups {
        sort_by_time(&mut members, true);
        rolled.insert(bucket, aggregate(&members)?);
    }

    debug!(
        timeframe = %timeframe,
        input = series.len(),
        output = rolled.len(),
        "Rolled up candle series"
    );
    Ok(rolled)
}

/// Aggregator for candle data processing
#[derive(Debug, Clone, Default)]
pub struct CandleAggregator {
    config: AggregatorConfig,
}

impl CandleAggregator {
    /// Create a new candle aggregator
    #[must_use]
    pub const fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Roll `series` up into one timeframe, keeping at most
    /// `max_candles_memory` of the newest buckets
    pub fn rollup(
        &self,
        series: &TimeBucketedSeries,
        timeframe: Timeframe,
    ) -> CandleResult<TimeBucketedSeries> {
        let mut rolled = rollup(series, timeframe)?;
        let before = rolled.len();
        rolled.retain_latest(self.config.max_candles_memory);
        if rolled.len() < before {
            debug!(
                timeframe = %timeframe,
                dropped = before - rolled.len(),
                "Capped rolled-up series"
            );
        }
        Ok(rolled)
    }

    /// Roll `series` up into every configured timeframe
    ///
    /// Timeframes finer than the source resolution are skipped.
    pub fn rollup_all(
        &self,
        series: &TimeBucketedSeries,
    ) -> CandleResult<FxHashMap<Timeframe, TimeBucketedSeries>> {
        let mut rolled = FxHashMap::default();
        for timeframe in &self.config.timeframes {
            if timeframe.duration_seconds() < self.config.source_timeframe.duration_seconds() {
                warn!(
                    timeframe = %timeframe,
                    source = %self.config.source_timeframe,
                    "Skipping timeframe finer than source candles"
                );
                continue;
            }
            rolled.insert(*timeframe, self.rollup(series, *timeframe)?);
        }
        Ok(rolled)
    }

    /// Aggregate the `[t0, t1)` window of `series`
    pub fn aggregate_range(
        &self,
        series: &TimeBucketedSeries,
        t0: i64,
        t1: i64,
    ) -> CandleResult<Candle> {
        aggregate_range(series, t0, t1)
    }
}
