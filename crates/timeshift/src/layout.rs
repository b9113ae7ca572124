// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Strict scanning of the fixed-width layouts used by the built-in formats.
//!
//! `jiff`'s `strptime` accepts variable-width numeric fields, so `2017-7-27` would
//! be read as a valid date. The built-in formats require exact field widths, which
//! is checked here before the fields are handed to `jiff` for calendar validation.

use jiff::civil::DateTime;
use jiff::tz::Offset;

use crate::Error;

/// Layout of a civil date-time with the separator at index 10 left open.
/// `9` stands for any ASCII digit.
const DATE_TIME_SHAPE: &[u8; 19] = b"9999-99-99_99:99:99";
const DATE_TIME_LEN: usize = DATE_TIME_SHAPE.len();
const MAX_FRACTION_DIGITS: usize = 9;

/// Parses `yyyy-MM-dd<sep>HH:mm:ss` that makes up the whole of `text`.
pub(crate) fn date_time(format: &'static str, text: &str, separator: u8) -> Result<DateTime, Error> {
    if text.len() != DATE_TIME_LEN {
        return Err(Error::format_mismatch(
            format,
            text,
            format!("expected {DATE_TIME_LEN} characters, found {}", text.len()),
        ));
    }

    date_time_prefix(format, text, separator, 0)
}

/// Parses `yyyy-MM-dd HH:mm:ss.S` where the fraction has one to nine digits.
pub(crate) fn date_time_with_fraction(format: &'static str, text: &str) -> Result<DateTime, Error> {
    let Some(fraction) = text.get(DATE_TIME_LEN..).and_then(|rest| rest.strip_prefix('.')) else {
        return Err(Error::format_mismatch(
            format,
            text,
            format!("expected '.' at position {DATE_TIME_LEN}"),
        ));
    };

    if fraction.is_empty() || fraction.len() > MAX_FRACTION_DIGITS || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::format_mismatch(
            format,
            text,
            "expected one to nine fraction digits",
        ));
    }

    let padding = u32::try_from(MAX_FRACTION_DIGITS - fraction.len()).unwrap_or_default();
    let nanos = digits(fraction.as_bytes()) * 10_i32.pow(padding);

    date_time_prefix(format, text, b' ', nanos)
}

/// Parses `yyyy-MM-ddTHH:mm:ss` followed by `Z` or `±HH:mm`.
pub(crate) fn iso_8601(format: &'static str, text: &str) -> Result<(DateTime, Offset), Error> {
    let Some(designator) = text.get(DATE_TIME_LEN..) else {
        return Err(Error::format_mismatch(
            format,
            text,
            format!("expected at least {DATE_TIME_LEN} characters, found {}", text.len()),
        ));
    };

    let offset = offset(format, text, designator)?;
    let date_time = date_time_prefix(format, text, b'T', 0)?;

    Ok((date_time, offset))
}

fn date_time_prefix(format: &'static str, text: &str, separator: u8, nanos: i32) -> Result<DateTime, Error> {
    let bytes = text.as_bytes();
    let Some(head) = bytes.get(..DATE_TIME_LEN) else {
        return Err(Error::format_mismatch(
            format,
            text,
            format!("expected at least {DATE_TIME_LEN} characters, found {}", text.len()),
        ));
    };

    for (position, (&actual, &expected)) in head.iter().zip(DATE_TIME_SHAPE).enumerate() {
        let matches = match expected {
            b'9' => actual.is_ascii_digit(),
            b'_' => actual == separator,
            literal => actual == literal,
        };

        if !matches {
            let expected = match expected {
                b'9' => "a digit".to_owned(),
                b'_' => format!("'{}'", char::from(separator)),
                literal => format!("'{}'", char::from(literal)),
            };
            return Err(Error::format_mismatch(
                format,
                text,
                format!("expected {expected} at position {position}"),
            ));
        }
    }

    // The shape check above guarantees every field is ASCII digits that fit the target types.
    let field = |start: usize, end: usize| digits(&head[start..end]);
    DateTime::new(
        i16::try_from(field(0, 4)).unwrap_or_default(),
        i8::try_from(field(5, 7)).unwrap_or_default(),
        i8::try_from(field(8, 10)).unwrap_or_default(),
        i8::try_from(field(11, 13)).unwrap_or_default(),
        i8::try_from(field(14, 16)).unwrap_or_default(),
        i8::try_from(field(17, 19)).unwrap_or_default(),
        nanos,
    )
    .map_err(|error| Error::format_mismatch_jiff(format, text, error))
}

fn offset(format: &'static str, text: &str, designator: &str) -> Result<Offset, Error> {
    if designator == "Z" {
        return Ok(Offset::UTC);
    }

    let bytes = designator.as_bytes();
    let well_formed = bytes.len() == 6
        && matches!(bytes[0], b'+' | b'-')
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
        && bytes[3] == b':'
        && bytes[4].is_ascii_digit()
        && bytes[5].is_ascii_digit();

    if !well_formed {
        return Err(Error::format_mismatch(
            format,
            text,
            format!("expected 'Z' or '\u{b1}HH:mm' at position {DATE_TIME_LEN}"),
        ));
    }

    let hours = digits(&bytes[1..3]);
    let minutes = digits(&bytes[4..6]);
    if minutes >= 60 {
        return Err(Error::format_mismatch(
            format,
            text,
            "offset minutes must be less than 60",
        ));
    }

    let seconds = hours * 3600 + minutes * 60;
    let seconds = if bytes[0] == b'-' { -seconds } else { seconds };

    Offset::from_seconds(seconds).map_err(|error| Error::format_mismatch_jiff(format, text, error))
}

/// Folds a run of ASCII digits into a number. Callers validate the bytes and bound the length.
fn digits(bytes: &[u8]) -> i32 {
    bytes
        .iter()
        .fold(0, |acc, byte| acc * 10 + i32::from(byte.wrapping_sub(b'0')))
}
