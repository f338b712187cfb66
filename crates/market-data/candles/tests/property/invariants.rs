//! Property-based tests for aggregation and codec invariants
//!
//! - Aggregated candles keep high/low bounding open/close
//! - Volumes and trade counts are additive
//! - VWAP is never NaN
//! - Pipe text round-trips within its declared precision, statistics included

use candles::{Candle, TimestampedCandle, aggregate};
use proptest::prelude::*;

/// Generate a candle carrying non-zero summary statistics
fn arb_candle_with_stats() -> impl Strategy<Value = Candle> {
    (arb_candle(), prop::array::uniform5(0.0f64..1_000.0)).prop_map(|(candle, stats)| {
        let [median_bought, median_sold, average_bought, average_sold, deviation] = stats;
        Candle {
            median_volume_bought: median_bought,
            median_volume_sold: median_sold,
            average_volume_bought: average_bought,
            average_volume_sold: average_sold,
            standard_deviation: deviation,
            ..candle
        }
    })
}

/// Generate a leaf candle with consistent price levels
fn arb_candle() -> impl Strategy<Value = Candle> {
    (
        1.0f64..10_000.0,
        1.0f64..10_000.0,
        0.0f64..50.0,
        0.0f64..50.0,
        0.0f64..1_000.0,
        0.0f64..1_000.0,
        0u64..10_000,
    )
        .prop_map(|(open, close, up, down, bought, sold, trades)| {
            let high = open.max(close) + up;
            let low = open.min(close) - down;
            let vwap = (low + high) / 2.0;
            Candle::from_ohlc(open, high, low, close)
                .with_volume(bought, sold, trades)
                .with_vwap(vwap)
        })
}

/// Generate an ascending run of one-minute candles
fn arb_run() -> impl Strategy<Value = Vec<TimestampedCandle>> {
    prop::collection::vec(arb_candle(), 1..40).prop_map(|candles| {
        candles
            .into_iter()
            .enumerate()
            .map(|(i, candle)| candle.to_timestamped(i as i64 * 60))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_high_low_bound_open_close(run in arb_run()) {
        let aggregated = aggregate(&run).unwrap();
        prop_assert!(aggregated.high >= aggregated.open.max(aggregated.close));
        prop_assert!(aggregated.low <= aggregated.open.min(aggregated.close));
    }

    #[test]
    fn prop_volumes_are_additive(run in arb_run()) {
        let aggregated = aggregate(&run).unwrap();
        let bought: f64 = run.iter().map(|c| c.candle.volume_bought).sum();
        let trades: u64 = run.iter().map(|c| c.candle.trade_count).sum();
        prop_assert_eq!(aggregated.volume_bought, bought);
        prop_assert_eq!(aggregated.trade_count, trades);
        prop_assert!(aggregated.volume_sold >= 0.0);
    }

    #[test]
    fn prop_vwap_is_finite_and_bounded(run in arb_run()) {
        let aggregated = aggregate(&run).unwrap();
        prop_assert!(aggregated.vwap.is_finite());
        if aggregated.volume_bought + aggregated.volume_sold > 0.0 {
            let lowest = run.iter().map(|c| c.candle.vwap).fold(f64::INFINITY, f64::min);
            let highest = run.iter().map(|c| c.candle.vwap).fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(aggregated.vwap >= lowest - 1e-6);
            prop_assert!(aggregated.vwap <= highest + 1e-6);
        }
    }

    #[test]
    fn prop_median_within_min_max(run in arb_run()) {
        let aggregated = aggregate(&run).unwrap();
        let lowest = run.iter().map(|c| c.candle.volume_bought).fold(f64::INFINITY, f64::min);
        let highest = run.iter().map(|c| c.candle.volume_bought).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(aggregated.median_volume_bought >= lowest);
        prop_assert!(aggregated.median_volume_bought <= highest);
        prop_assert!(aggregated.standard_deviation >= 0.0);
    }

    #[test]
    fn prop_stringify_round_trip(candle in arb_candle_with_stats()) {
        let parsed = Candle::parse(&candle.stringify()).unwrap();
        prop_assert_eq!(parsed.open, candle.open);
        prop_assert_eq!(parsed.high, candle.high);
        prop_assert_eq!(parsed.low, candle.low);
        prop_assert_eq!(parsed.close, candle.close);
        prop_assert_eq!(parsed.trade_count, candle.trade_count);
        prop_assert!((parsed.volume_bought - candle.volume_bought).abs() <= 5e-5 + 1e-9);
        prop_assert!((parsed.volume_sold - candle.volume_sold).abs() <= 5e-5 + 1e-9);
        prop_assert!((parsed.vwap - candle.vwap).abs() <= 5e-4 + 1e-9);
        prop_assert!((parsed.median_volume_bought - candle.median_volume_bought).abs() <= 5e-4 + 1e-9);
        prop_assert!((parsed.median_volume_sold - candle.median_volume_sold).abs() <= 5e-4 + 1e-9);
        prop_assert!((parsed.average_volume_bought - candle.average_volume_bought).abs() <= 5e-4 + 1e-9);
        prop_assert!((parsed.average_volume_sold - candle.average_volume_sold).abs() <= 5e-4 + 1e-9);
        prop_assert!((parsed.standard_deviation - candle.standard_deviation).abs() <= 5e-4 + 1e-9);
    }
}
