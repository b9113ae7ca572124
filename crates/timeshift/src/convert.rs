// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cmp::Ordering;

use jiff::civil::DateTime;
use jiff::fmt::strtime;
use jiff::tz::TimeZone;

use crate::pattern::LOCAL_ISO_8601_PATTERN;
use crate::{CustomFormat, Error, Format, Instant, Pattern, Result, TimeFormat, layout};

/// Converts `value` from one format to another.
///
/// Absent and empty values are passed through as `None` without being parsed, so
/// optional timestamp fields can be converted uniformly.
///
/// # Errors
///
/// Returns an error if `value` does not match `from`, or if the instant cannot be
/// rendered by `to`.
///
/// # Examples
///
/// ```
/// use timeshift::{convert, TimeFormat};
///
/// let local = convert(Some("2017-07-27T15:41:00Z"), &TimeFormat::Iso8601Utc, &TimeFormat::Iso8601Local)?;
/// assert_eq!(local.as_deref(), Some("2017-07-27T23:41:00+08:00"));
///
/// let missing = convert(None, &TimeFormat::UnixTime, &TimeFormat::MySqlDateTime)?;
/// assert_eq!(missing, None);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn convert<F, T>(value: Option<&str>, from: &F, to: &T) -> Result<Option<String>>
where
    F: Format + ?Sized,
    T: Format + ?Sized,
{
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    let instant = parse(from, value)?;
    to.render(instant).map(Some)
}

/// Re-renders an ISO 8601 string in `zone`.
///
/// The input may carry `Z` or a numeric `±HH:mm` designator; the designator is honored,
/// so the output denotes the same instant. Absent and empty values yield `None`.
///
/// # Errors
///
/// Returns an error if `value` is not an ISO 8601 string with a designator.
///
/// # Examples
///
/// ```
/// use timeshift::shift_zone;
/// use timeshift::zone::reference_zone;
///
/// let shifted = shift_zone(Some("2017-07-27T15:41:00Z"), &reference_zone())?;
/// assert_eq!(shifted.as_deref(), Some("2017-07-27T23:41:00+08:00"));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn shift_zone(value: Option<&str>, zone: &TimeZone) -> Result<Option<String>> {
    let target = CustomFormat::new(LOCAL_ISO_8601_PATTERN, zone.clone())?;
    convert(value, &TimeFormat::Iso8601Utc, &target)
}

/// Compares two values of the same format chronologically.
///
/// To compare values of different formats, first [`convert`] one of them.
///
/// # Errors
///
/// Returns an error if either value does not match `format`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use timeshift::{compare_instants, TimeFormat};
///
/// let earlier = "2017-07-28T13:45:00Z";
/// let later = "2017-07-28T21:45:00Z";
/// assert_eq!(compare_instants(earlier, later, &TimeFormat::Iso8601Utc)?, Ordering::Less);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compare_instants<F>(a: &str, b: &str, format: &F) -> Result<Ordering>
where
    F: Format + ?Sized,
{
    Ok(parse(format, a)?.cmp(&parse(format, b)?))
}

/// Compares the civil date and time fields of two strings that share `pattern`.
///
/// The pattern alone decides whether an offset is present. When it is, each string's
/// offset must be well formed, but it does not take part in the ordering: only the
/// wall-clock fields are compared.
///
/// [`LOCAL_ISO_8601_PATTERN`] is matched strictly: every field must have its full
/// width and the offset may be `Z` or `±HH:mm`. Other patterns are matched by
/// [`jiff::fmt::strtime`], which accepts numeric fields of variable width, so
/// `2017-8-8` satisfies `%Y-%m-%d`.
///
/// # Errors
///
/// Returns an [`InvalidPattern`][crate::ErrorKind::InvalidPattern] error if `pattern` is
/// malformed, or a [`FormatMismatch`][crate::ErrorKind::FormatMismatch] error if either
/// string does not match it.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use timeshift::{compare_local_text, LOCAL_ISO_8601_PATTERN};
///
/// let ordering = compare_local_text(
///     "2017-08-08T13:45:00-03:00",
///     "2017-08-08T13:45:00+07:00",
///     LOCAL_ISO_8601_PATTERN,
/// )?;
/// assert_eq!(ordering, Ordering::Equal);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compare_local_text(a: &str, b: &str, pattern: &str) -> Result<Ordering> {
    let pattern = Pattern::new(pattern)?;
    Ok(civil(&pattern, a)?.cmp(&civil(&pattern, b)?))
}

fn civil(pattern: &Pattern, text: &str) -> Result<DateTime> {
    let result = if pattern.as_str() == LOCAL_ISO_8601_PATTERN {
        layout::iso_8601(LOCAL_ISO_8601_PATTERN, text).map(|(date_time, _)| date_time)
    } else {
        strtime::parse(pattern.as_str(), text)
            .and_then(|broken_down| broken_down.to_datetime())
            .map_err(|error| Error::format_mismatch_jiff(pattern.as_str().to_owned(), text, error))
    };
    log_failure(pattern.as_str(), &result);
    result
}

fn parse<F>(format: &F, text: &str) -> Result<Instant>
where
    F: Format + ?Sized,
{
    let result = format.parse(text);
    log_failure(format.name(), &result);
    result
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "only used when logs are enabled")
)]
fn log_failure<T>(format: &str, result: &Result<T>) {
    #[cfg(any(feature = "logs", test))]
    if let Err(error) = result {
        tracing::event!(
            name: "timeshift.parse_failed",
            tracing::Level::DEBUG,
            time_format.name = format,
            error = %error,
            "failed to parse timestamp"
        );
    }
}
