//! Duration: unit table shared by parser and formatter

use crate::common::*;
use proptest::prelude::*;

#[test]
fn test_canonical_forms() {
    assert_eq!(Duration::from_string("2w").unwrap().to_string(), "2w");
    assert_eq!(Duration::from_string("2d").unwrap().to_string(), "2d");
    assert_eq!(Duration::from_string("90s").unwrap().seconds(), 90);
    assert_eq!(Duration::from_secs(90).to_string(), "90s");
    assert_eq!(Duration::from_string("14d").unwrap().to_string(), "2w");
    assert_eq!(Duration::from_string("3600").unwrap().to_string(), "1h");
}

#[test]
fn test_unknown_unit_is_decode_failure() {
    let err = Duration::from_string("10y").unwrap_err();
    assert!(err.is_decode());
    assert!(err.is_initialization());
}

#[test]
fn test_expiry_offsets_base() {
    let base = RdfDatetime::from_string("2020-01-01").unwrap();
    let expiry = Duration::from_string("1d").unwrap().expiry(Some(&base));
    assert_eq!(expiry.to_string(), "2020-01-02 00:00:00");
    assert_eq!(base.to_string(), "2020-01-01 00:00:00");
}

#[test]
fn test_datetime_difference_is_duration() {
    let later = RdfDatetime::from_string("2020-01-08").unwrap();
    let earlier = RdfDatetime::from_string("2020-01-01").unwrap();
    assert_eq!((&later - &earlier).to_string(), "1w");
}

proptest! {
    #[test]
    fn prop_format_parse_round_trip(secs in -10_000_000_000i64..10_000_000_000i64) {
        let d = Duration::from_secs(secs);
        let text = d.to_string();
        prop_assert_eq!(Duration::from_string(&text).unwrap(), d);
    }

    #[test]
    fn prop_format_uses_largest_even_unit(quotient in 1i64..10_000, unit in 0usize..5) {
        let (letter, divider) = rdfvalue::temporal::duration::DIVIDERS[unit];
        let d = Duration::from_secs(quotient * divider);
        let text = d.to_string();
        let shown = text.chars().last().unwrap();
        let shown_divider = rdfvalue::temporal::duration::DIVIDERS
            .iter()
            .find(|(l, _)| *l == shown)
            .unwrap()
            .1;
        prop_assert!(
            shown_divider >= divider,
            "{} rendered with {} (from {})",
            text,
            shown,
            letter
        );
    }
}
