//! Timestamp-keyed candle storage
//!
//! [`TimeBucketedSeries`] maps bucket start (Unix seconds) to a [`Candle`].
//! Range operations use half-open `[t0, t1)` intervals throughout; an
//! inverted interval (`t1 < t0`) is simply empty.
//!
//! The series does no locking. `merge` and `delete_in_range` take
//! `&mut self`, so sharing one series between threads needs an outer lock.

use crate::candle::{Candle, TimestampedCandle};
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mapping from bucket timestamp to candle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeBucketedSeries {
    buckets: FxHashMap<i64, Candle>,
}

const fn in_range(time: i64, t0: i64, t1: i64) -> bool {
    time >= t0 && time < t1
}

impl TimeBucketedSeries {
    /// Create an empty series
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the series holds no buckets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Insert or replace the candle for `time`, returning the previous one
    pub fn insert(&mut self, time: i64, candle: Candle) -> Option<Candle> {
        self.buckets.insert(time, candle)
    }

    /// Candle stored for `time`
    #[must_use]
    pub fn get(&self, time: i64) -> Option<&Candle> {
        self.buckets.get(&time)
    }

    /// Remove the candle for `time`
    pub fn remove(&mut self, time: i64) -> Option<Candle> {
        self.buckets.remove(&time)
    }

    /// Whether a candle exists for `time`
    #[must_use]
    pub fn contains(&self, time: i64) -> bool {
        self.buckets.contains_key(&time)
    }

    /// Iterate `(time, candle)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &Candle)> + '_ {
        self.buckets.iter().map(|(time, candle)| (*time, candle))
    }

    /// Earliest bucket timestamp
    #[must_use]
    pub fn first_time(&self) -> Option<i64> {
        self.buckets.keys().min().copied()
    }

    /// Latest bucket timestamp
    #[must_use]
    pub fn last_time(&self) -> Option<i64> {
        self.buckets.keys().max().copied()
    }

    /// Project into a sequence; order is unspecified until sorted
    #[must_use]
    pub fn to_ordered_sequence(&self) -> Vec<TimestampedCandle> {
        self.buckets
            .iter()
            .map(|(time, candle)| candle.to_timestamped(*time))
            .collect()
    }

    /// Project into a sequence sorted by time
    #[must_use]
    pub fn sorted_by_time(&self, ascending: bool) -> Vec<TimestampedCandle> {
        let mut sequence = self.to_ordered_sequence();
        sort_by_time(&mut sequence, ascending);
        sequence
    }

    /// Copy of the buckets with `t0 <= time < t1`
    #[must_use]
    pub fn filter_in_range(&self, t0: i64, t1: i64) -> Self {
        let buckets: FxHashMap<i64, Candle> = self
            .buckets
            .iter()
            .filter(|(time, _)| in_range(**time, t0, t1))
            .map(|(time, candle)| (*time, *candle))
            .collect();
        Self { buckets }
    }

    /// [`Self::filter_in_range`] over wall-clock bounds
    #[must_use]
    pub fn filter_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.filter_in_range(from.timestamp(), to.timestamp())
    }

    /// Copy every bucket of `other` into `self`; incoming candles win
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        let overwritten = other
            .buckets
            .keys()
            .filter(|time| self.buckets.contains_key(*time))
            .count();
        self.buckets.extend(other.buckets.iter().map(|(k, v)| (*k, *v)));
        debug!(
            incoming = other.len(),
            overwritten,
            total = self.len(),
            "Merged candle series"
        );
        self
    }

    /// Remove every bucket with `t0 <= time < t1`
    pub fn delete_in_range(&mut self, t0: i64, t1: i64) {
        let before = self.buckets.len();
        self.buckets.retain(|time, _| !in_range(*time, t0, t1));
        let removed = before - self.buckets.len();
        if removed > 0 {
            debug!(t0, t1, removed, "Deleted candle range");
        }
    }

    /// [`Self::delete_in_range`] over wall-clock bounds
    pub fn delete_between(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) {
        self.delete_in_range(from.timestamp(), to.timestamp());
    }

    /// Keep only the `n` most recent buckets
    pub fn retain_latest(&mut self, n: usize) {
        if self.buckets.len() <= n {
            return;
        }
        let mut times: Vec<i64> = self.buckets.keys().copied().collect();
        times.sort_unstable();
        let cutoff = times[times.len() - n..].first().copied();
        match cutoff {
            Some(cutoff) => self.buckets.retain(|time, _| *time >= cutoff),
            None => self.buckets.clear(),
        }
    }
}

/// Sort a candle sequence by time
///
/// Keys in a series are unique, so the result is fully determined.
pub fn sort_by_time(candles: &mut [TimestampedCandle], ascending: bool) {
    if ascending {
        candles.sort_by_key(|candle| candle.time);
    } else {
        candles.sort_by_key(|candle| std::cmp::Reverse(candle.time));
    }
}

impl FromIterator<TimestampedCandle> for TimeBucketedSeries {
    fn from_iter<I: IntoIterator<Item = TimestampedCandle>>(iter: I) -> Self {
        let mut series = Self::new();
        series.extend(iter);
        series
    }
}

impl Extend<TimestampedCandle> for TimeBucketedSeries {
    fn extend<I: IntoIterator<Item = TimestampedCandle>>(&mut self, iter: I) {
        self.buckets
            .extend(iter.into_iter().map(|candle| (candle.time, candle.candle)));
    }
}

impl From<&[TimestampedCandle]> for TimeBucketedSeries {
    fn from(value: &[TimestampedCandle]) -> Self {
        value.iter().copied().collect()
    }
}
