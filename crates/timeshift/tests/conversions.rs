// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(missing_docs, reason = "This is a test module")]

//! Integration tests for conversions between the built-in formats using only public API.

use rstest::rstest;
use timeshift::{CustomFormat, ErrorKind, Format, TimeFormat, convert, shift_zone};

const UNIX: &str = "1501170060";
const UTC: &str = "2017-07-27T15:41:00Z";
const LOCAL: &str = "2017-07-27T23:41:00+08:00";
const DB: &str = "2017-07-27 23:41:00.0";
const MYSQL: &str = "2017-07-27 23:41:00";

fn sample(format: TimeFormat) -> &'static str {
    match format {
        TimeFormat::UnixTime => UNIX,
        TimeFormat::Iso8601Utc => UTC,
        TimeFormat::Iso8601Local => LOCAL,
        TimeFormat::DbDateTime => DB,
        TimeFormat::MySqlDateTime => MYSQL,
    }
}

#[rstest]
fn every_pair_agrees_on_the_same_instant(
    #[values(
        TimeFormat::UnixTime,
        TimeFormat::Iso8601Utc,
        TimeFormat::Iso8601Local,
        TimeFormat::DbDateTime,
        TimeFormat::MySqlDateTime
    )]
    from: TimeFormat,
    #[values(
        TimeFormat::UnixTime,
        TimeFormat::Iso8601Utc,
        TimeFormat::Iso8601Local,
        TimeFormat::DbDateTime,
        TimeFormat::MySqlDateTime
    )]
    to: TimeFormat,
) {
    let converted = convert(Some(sample(from)), &from, &to).unwrap();

    assert_eq!(converted.as_deref(), Some(sample(to)), "{from} -> {to}");
}

#[rstest]
#[case::utc_to_local(UTC, TimeFormat::Iso8601Utc, TimeFormat::Iso8601Local, LOCAL)]
#[case::unix_to_mysql(UNIX, TimeFormat::UnixTime, TimeFormat::MySqlDateTime, MYSQL)]
#[case::db_to_unix(DB, TimeFormat::DbDateTime, TimeFormat::UnixTime, UNIX)]
#[case::local_to_utc(LOCAL, TimeFormat::Iso8601Local, TimeFormat::Iso8601Utc, UTC)]
#[case::mysql_to_db(MYSQL, TimeFormat::MySqlDateTime, TimeFormat::DbDateTime, DB)]
#[case::epoch(
    "0",
    TimeFormat::UnixTime,
    TimeFormat::Iso8601Local,
    "1970-01-01T08:00:00+08:00"
)]
#[case::before_epoch("-1", TimeFormat::UnixTime, TimeFormat::Iso8601Utc, "1969-12-31T23:59:59Z")]
#[case::day_boundary(
    "2017-12-31T20:00:00Z",
    TimeFormat::Iso8601Utc,
    TimeFormat::MySqlDateTime,
    "2018-01-01 04:00:00"
)]
#[case::leap_day(
    "2020-02-29 07:59:59",
    TimeFormat::MySqlDateTime,
    TimeFormat::Iso8601Utc,
    "2020-02-28T23:59:59Z"
)]
fn seed_conversions(#[case] value: &str, #[case] from: TimeFormat, #[case] to: TimeFormat, #[case] expected: &str) {
    let converted = convert(Some(value), &from, &to).unwrap();

    assert_eq!(converted.as_deref(), Some(expected));
}

#[rstest]
#[case::unix(TimeFormat::UnixTime, "1501170060")]
#[case::utc(TimeFormat::Iso8601Utc, "1999-12-31T23:59:59Z")]
#[case::local(TimeFormat::Iso8601Local, "2000-01-01T07:59:59+08:00")]
#[case::db(TimeFormat::DbDateTime, "2017-07-27 23:41:00.3")]
#[case::mysql(TimeFormat::MySqlDateTime, "1970-01-01 08:00:00")]
fn same_format_is_identity(#[case] format: TimeFormat, #[case] value: &str) {
    let rendered = format.render(format.parse(value).unwrap()).unwrap();

    assert_eq!(rendered, value);
    assert_eq!(convert(Some(value), &format, &format).unwrap().as_deref(), Some(value));
}

#[rstest]
#[case::utc_missing_separator(TimeFormat::Iso8601Utc, "2017-07-2523:25:51Z")]
#[case::utc_no_designator(TimeFormat::Iso8601Utc, "2017-07-25T23:25:51")]
#[case::utc_with_fraction(TimeFormat::Iso8601Utc, "2017-07-25T23:25:51.777Z")]
#[case::local_short_offset(TimeFormat::Iso8601Local, "2017-08-08T13:45:00+2:00")]
#[case::db_without_fraction(TimeFormat::DbDateTime, "2017-07-27 23:41:00")]
#[case::mysql_single_digit_month(TimeFormat::MySqlDateTime, "2017-7-27 23:41:00")]
#[case::mysql_invalid_day(TimeFormat::MySqlDateTime, "2017-02-30 23:41:00")]
fn malformed_text_is_a_format_mismatch(#[case] format: TimeFormat, #[case] value: &str) {
    let error = convert(Some(value), &format, &TimeFormat::UnixTime).unwrap_err();

    assert!(
        matches!(error.kind(), ErrorKind::FormatMismatch { .. }),
        "{format} accepted '{value}' or failed with {error:?}"
    );
}

#[rstest]
#[case::words("Que Pa So!")]
#[case::more_words("For Shizzle My Nizzle!")]
#[case::too_large("99999999999999999999999")]
#[case::outside_calendar("9223372036854775807")]
#[case::decimal("1501170060.5")]
fn non_numeric_unix_time_is_a_numeric_range_error(#[case] value: &str) {
    let error = convert(Some(value), &TimeFormat::UnixTime, &TimeFormat::Iso8601Local).unwrap_err();

    assert!(matches!(error.kind(), ErrorKind::NumericRange { .. }), "{error:?}");
}

#[test]
fn absent_values_pass_through() {
    assert_eq!(convert(None, &TimeFormat::UnixTime, &TimeFormat::Iso8601Local).unwrap(), None);
    assert_eq!(convert(Some(""), &TimeFormat::UnixTime, &TimeFormat::Iso8601Local).unwrap(), None);
}

#[test]
fn unix_timestamp_to_custom_pattern() {
    let custom = CustomFormat::in_reference_zone("%Y/%m/%d %H").unwrap();

    let converted = convert(Some(UNIX), &TimeFormat::UnixTime, &custom).unwrap();

    assert_eq!(converted.as_deref(), Some("2017/07/27 23"));
}

#[test]
fn custom_pattern_to_unix_timestamp() {
    let pacific = jiff::tz::TimeZone::fixed(jiff::tz::Offset::constant(-7));
    let custom = CustomFormat::new("%Y-%m-%dT%H:%M", pacific).unwrap();

    let converted = convert(Some("2017-07-29T20:00"), &custom, &TimeFormat::UnixTime).unwrap();

    assert_eq!(converted.as_deref(), Some("1501383600"));
}

#[test]
fn shift_zone_keeps_the_instant() {
    let tokyo = jiff::tz::TimeZone::fixed(jiff::tz::Offset::constant(9));

    let shifted = shift_zone(Some(LOCAL), &tokyo).unwrap();

    assert_eq!(shifted.as_deref(), Some("2017-07-28T00:41:00+09:00"));
}
