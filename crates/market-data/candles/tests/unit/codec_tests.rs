//! Pipe codec edge cases

use candles::codec::{FIELD_COUNT, FIELD_NAMES};
use candles::{Candle, CandleError};
use rstest::*;

#[rstest]
#[case("")]
#[case("1|2|3|4|5|6|7|8|9|10|11|12")]
#[case("1|2|3|4|5|6|7|8|9|10|11|12|13|14")]
fn test_wrong_arity_is_rejected(#[case] text: &str) {
    assert!(matches!(
        Candle::parse(text),
        Err(CandleError::FieldCount { expected: FIELD_COUNT, .. })
    ));
}

#[rstest]
#[case(0, "abc")]
#[case(4, "1,5")]
#[case(6, "-3")]
#[case(6, "2.5")]
#[case(12, "")]
fn test_bad_field_is_named(#[case] index: usize, #[case] raw: &str) {
    let mut fields = vec!["1"; FIELD_COUNT];
    fields[index] = raw;
    let text = fields.join("|");

    match Candle::parse(&text) {
        Err(CandleError::Parse {
            index: got,
            field,
            raw: got_raw,
        }) => {
            assert_eq!(got, index);
            assert_eq!(field, FIELD_NAMES[index]);
            assert_eq!(got_raw, raw);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_error_message_mentions_field() {
    let err = Candle::parse("1|1|1|1|1|1|1|1|1|1|1|oops|1").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("vwap"), "{message}");
    assert!(message.contains("oops"), "{message}");
}

#[test]
fn test_volume_uses_four_decimals_and_stats_three() {
    let mut candle = Candle::from_ohlc(1.0, 1.0, 1.0, 1.0).with_volume(1.23456, 0.00004, 1);
    candle.standard_deviation = 0.1234;

    let text = candle.stringify();
    let fields: Vec<&str> = text.split('|').collect();
    assert_eq!(fields[4], "1.2346");
    // Non-zero values that round to zero keep their decimals
    assert_eq!(fields[5], "0.0000");
    assert_eq!(fields[12], "0.123");
}
