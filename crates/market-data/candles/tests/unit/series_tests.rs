//! Series range, merge and ordering behaviour

use candles::{Candle, TimeBucketedSeries, TimestampedCandle, sort_by_time};
use pretty_assertions::assert_eq;
use rstest::*;

/// Series with buckets at 10, 20 and 30
#[fixture]
fn three_buckets() -> TimeBucketedSeries {
    [10_i64, 20, 30]
        .into_iter()
        .map(|time| Candle::from_ohlc(1.0, 1.0, 1.0, time as f64).to_timestamped(time))
        .collect()
}

fn times(series: &TimeBucketedSeries) -> Vec<i64> {
    series.sorted_by_time(true).iter().map(|c| c.time).collect()
}

#[rstest]
#[case(10, 30, vec![10, 20])]
#[case(30, 30, vec![])]
#[case(11, 30, vec![20])]
#[case(0, 100, vec![10, 20, 30])]
#[case(40, 10, vec![])]
fn test_filter_in_range(
    three_buckets: TimeBucketedSeries,
    #[case] t0: i64,
    #[case] t1: i64,
    #[case] expected: Vec<i64>,
) {
    assert_eq!(times(&three_buckets.filter_in_range(t0, t1)), expected);
}

#[rstest]
#[case(10, 30, vec![30])]
#[case(0, 10, vec![10, 20, 30])]
#[case(20, 21, vec![10, 30])]
fn test_delete_in_range(
    mut three_buckets: TimeBucketedSeries,
    #[case] t0: i64,
    #[case] t1: i64,
    #[case] expected: Vec<i64>,
) {
    three_buckets.delete_in_range(t0, t1);
    assert_eq!(times(&three_buckets), expected);
}

#[rstest]
fn test_merge_overwrites_collisions() {
    let a = Candle::from_ohlc(1.0, 1.0, 1.0, 1.0);
    let b = Candle::from_ohlc(2.0, 2.0, 2.0, 2.0);

    let mut left = TimeBucketedSeries::new();
    left.insert(5, a);
    let mut right = TimeBucketedSeries::new();
    right.insert(5, b);

    left.merge(&right);
    assert_eq!(left.len(), 1);
    assert_eq!(left.get(5), Some(&b));
}

#[rstest]
fn test_projection_and_sort(three_buckets: TimeBucketedSeries) {
    let mut sequence: Vec<TimestampedCandle> = three_buckets.to_ordered_sequence();
    assert_eq!(sequence.len(), 3);

    sort_by_time(&mut sequence, false);
    let desc: Vec<i64> = sequence.iter().map(|c| c.time).collect();
    assert_eq!(desc, vec![30, 20, 10]);

    sort_by_time(&mut sequence, true);
    let asc: Vec<i64> = sequence.iter().map(|c| c.time).collect();
    assert_eq!(asc, vec![10, 20, 30]);
}

#[rstest]
fn test_rebuild_from_sequence(three_buckets: TimeBucketedSeries) {
    let sequence = three_buckets.sorted_by_time(false);
    let rebuilt = TimeBucketedSeries::from(sequence.as_slice());
    assert_eq!(rebuilt, three_buckets);
}
