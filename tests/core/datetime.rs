//! DateTime: construction rules, anchors, arithmetic

use crate::common::*;
use chrono::{NaiveDate, TimeZone, Utc};

fn year_defaults(year: i32) -> (chrono::NaiveDateTime, chrono::NaiveDateTime) {
    (
        DateAnchor::StartOfPeriod.default_for_year(year),
        DateAnchor::EndOfPeriod.default_for_year(year),
    )
}

#[test]
fn test_bare_year_anchors() {
    let (start, end) = year_defaults(2023);
    let lower = RdfDatetime::parse_human_with_default("2020", start).unwrap();
    let upper = RdfDatetime::parse_human_with_default("2020", end).unwrap();
    assert_eq!(
        lower.to_chrono().unwrap(),
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        upper.to_chrono().unwrap(),
        Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 0).unwrap()
    );
}

#[test]
fn test_month_only_end_anchor_clamps_day() {
    let (_, end) = year_defaults(2023);
    let upper = RdfDatetime::parse_human_with_default("2021-02", end).unwrap();
    assert_eq!(upper.to_string(), "2021-02-28 23:59:00");
}

#[test]
fn test_construction_rules_in_order() {
    let copy_source = RdfDatetime::from_raw(99);
    assert_eq!(RdfDatetime::copy_from(&copy_source).raw(), 99);
    assert_eq!(RdfDatetime::from_raw(1_000_000).as_secs(), 1);

    let calendar = NaiveDate::from_ymd_opt(2012, 4, 20)
        .unwrap()
        .and_hms_micro_opt(7, 39, 41, 123_456)
        .unwrap();
    let from_calendar = RdfDatetime::from_naive(&calendar).unwrap();
    assert_eq!(from_calendar.raw(), 1_334_907_581_123_456);
    let seconds = RdfDatetimeSeconds::from_naive(&calendar).unwrap();
    assert_eq!(seconds.raw(), 1_334_907_581);

    assert_eq!(RdfDatetime::from_string("1334907581123456").unwrap(), from_calendar);
    assert_eq!(
        RdfDatetime::from_string("2012-04-20 07:39:41.123456").unwrap(),
        from_calendar
    );
}

#[test]
fn test_human_formats() {
    let (start, _) = year_defaults(2023);
    let cases = [
        ("2020-03-04T05:06:07Z", "2020-03-04 05:06:07"),
        ("2020-03-04 05:06", "2020-03-04 05:06:00"),
        ("2020/03/04", "2020-03-04 00:00:00"),
        ("Mar 2020", "2020-03-01 00:00:00"),
        ("5 January 2020", "2020-01-05 00:00:00"),
        ("January 5, 2020", "2020-01-05 00:00:00"),
        ("2020-03-04 05:06 pm", "2020-03-04 17:06:00"),
        ("2020-03-04 05:06:07 +0200", "2020-03-04 03:06:07"),
    ];
    for (text, expected) in cases {
        let parsed = RdfDatetime::parse_human_with_default(text, start).unwrap();
        assert_eq!(parsed.to_string(), expected, "{}", text);
    }
}

#[test]
fn test_garbage_is_decode_failure() {
    assert!(RdfDatetime::from_string("the day after tomorrow")
        .unwrap_err()
        .is_decode());
}

#[test]
fn test_arithmetic_keeps_resolution() {
    let micro = RdfDatetime::from_raw(1_500_000);
    assert_eq!((&micro + 2).raw(), 3_500_000);
    let secs = RdfDatetimeSeconds::from_raw(10);
    assert_eq!((&secs + &Duration::from_secs(5)).raw(), 15);
}

#[test]
fn test_rescale_between_resolutions() {
    let secs = RdfDatetimeSeconds::from_secs(86_400);
    let as_micros = RdfDatetime::from_raw((&secs * 1_000_000).raw());
    assert_eq!(as_micros.to_string(), "1970-01-02 00:00:00");
    assert_eq!(RdfDatetime::convert_from(&secs), as_micros);
}

#[test]
fn test_age_accepts_datetime_or_raw() {
    let mut value = RdfString::new("x");
    value.set_age(RdfDatetimeSeconds::from_secs(7));
    assert_eq!(value.age().as_secs(), 7);
    value.set_age(8_000_000u64);
    assert_eq!(value.age(), RdfDatetime::from_secs(8));
}
