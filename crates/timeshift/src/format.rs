// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::zone::{REFERENCE_OFFSET, reference_zone};
use crate::{Error, Instant, Result, layout};

const ISO_8601_UTC_PATTERN: &str = "%Y-%m-%dT%H:%M:%SZ";
const ISO_8601_OFFSET_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%:z";
const DATE_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
const NANOS_PER_TENTH: i32 = 100_000_000;

/// A textual representation of an [`Instant`].
///
/// A format knows how to read its text into an absolute instant and how to write an
/// instant back as text. [`convert`][crate::convert] and
/// [`compare_instants`][crate::compare_instants] work with any implementation.
pub trait Format {
    /// A short name that identifies the format in errors and diagnostics.
    fn name(&self) -> &str;

    /// Parses `text` into an absolute instant.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` does not match the format.
    fn parse(&self, text: &str) -> Result<Instant>;

    /// Renders `instant` as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the instant cannot be represented in this format.
    fn render(&self, instant: Instant) -> Result<String>;
}

impl<F: Format + ?Sized> Format for &F {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn parse(&self, text: &str) -> Result<Instant> {
        (**self).parse(text)
    }

    fn render(&self, instant: Instant) -> Result<String> {
        (**self).render(instant)
    }
}

/// The built-in timestamp formats.
///
/// | Variant           | Example                       | Zone                       |
/// |-------------------|-------------------------------|----------------------------|
/// | `UnixTime`        | `1501170060`                  | none                       |
/// | `Iso8601Utc`      | `2017-07-27T15:41:00Z`        | UTC                        |
/// | `Iso8601Local`    | `2017-07-27T23:41:00+08:00`   | [reference][crate::zone]   |
/// | `DbDateTime`      | `2017-07-27 23:41:00.0`       | [reference][crate::zone]   |
/// | `MySqlDateTime`   | `2017-07-27 23:41:00`         | [reference][crate::zone]   |
///
/// Parsing is strict: field widths and separators must match exactly. Rendering the
/// result of a parse with the same variant reproduces the input, except that
/// `DbDateTime` keeps only tenths of a second.
///
/// # Examples
///
/// ```
/// use timeshift::{Format, TimeFormat};
///
/// let instant = TimeFormat::Iso8601Utc.parse("2017-07-27T15:41:00Z")?;
/// assert_eq!(TimeFormat::MySqlDateTime.render(instant)?, "2017-07-27 23:41:00");
/// assert_eq!(TimeFormat::UnixTime.render(instant)?, "1501170060");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    /// Decimal seconds since the Unix epoch. Fractional seconds are rounded down when rendering.
    UnixTime,

    /// `yyyy-MM-ddTHH:mm:ss` followed by a zone designator, rendered in UTC with `Z`.
    ///
    /// Parsing honors a numeric `±HH:mm` designator as well as `Z`.
    Iso8601Utc,

    /// `yyyy-MM-ddTHH:mm:ss±HH:mm`, rendered in the reference zone.
    ///
    /// When parsing, the designator must be well formed but the civil fields are always
    /// read in the reference zone.
    Iso8601Local,

    /// `yyyy-MM-dd HH:mm:ss.S` in the reference zone.
    ///
    /// Parsing accepts one to nine fraction digits; rendering emits tenths.
    DbDateTime,

    /// `yyyy-MM-dd HH:mm:ss` in the reference zone.
    MySqlDateTime,
}

impl TimeFormat {
    /// Every built-in format.
    pub const ALL: [Self; 5] = [
        Self::UnixTime,
        Self::Iso8601Utc,
        Self::Iso8601Local,
        Self::DbDateTime,
        Self::MySqlDateTime,
    ];

    /// Returns the snake case name used by [`Display`] and [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnixTime => "unix_time",
            Self::Iso8601Utc => "iso8601_utc",
            Self::Iso8601Local => "iso8601_local",
            Self::DbDateTime => "db_date_time",
            Self::MySqlDateTime => "mysql_date_time",
        }
    }
}

impl Format for TimeFormat {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn parse(&self, text: &str) -> Result<Instant> {
        let name = self.as_str();
        let timestamp = match self {
            Self::UnixTime => {
                let seconds: i64 = text.parse().map_err(|error| Error::numeric_parse(text, error))?;
                return Instant::from_unix_seconds(seconds);
            }
            Self::Iso8601Utc => {
                let (date_time, offset) = layout::iso_8601(name, text)?;
                offset.to_timestamp(date_time)
            }
            Self::Iso8601Local => {
                let (date_time, _) = layout::iso_8601(name, text)?;
                REFERENCE_OFFSET.to_timestamp(date_time)
            }
            Self::DbDateTime => REFERENCE_OFFSET.to_timestamp(layout::date_time_with_fraction(name, text)?),
            Self::MySqlDateTime => REFERENCE_OFFSET.to_timestamp(layout::date_time(name, text, b' ')?),
        };

        timestamp
            .map(Instant::from)
            .map_err(|error| Error::format_mismatch_jiff(name, text, error))
    }

    fn render(&self, instant: Instant) -> Result<String> {
        match self {
            Self::UnixTime => Ok(instant.as_unix_seconds().to_string()),
            Self::Iso8601Utc => self.strftime(ISO_8601_UTC_PATTERN, &zoned(instant, TimeZone::UTC)),
            Self::Iso8601Local => self.strftime(ISO_8601_OFFSET_PATTERN, &zoned(instant, reference_zone())),
            Self::DbDateTime => {
                let local = zoned(instant, reference_zone());
                let mut text = self.strftime(DATE_TIME_PATTERN, &local)?;
                let tenths = local.subsec_nanosecond() / NANOS_PER_TENTH;
                text.push('.');
                text.push_str(&tenths.to_string());
                Ok(text)
            }
            Self::MySqlDateTime => self.strftime(DATE_TIME_PATTERN, &zoned(instant, reference_zone())),
        }
    }
}

impl TimeFormat {
    fn strftime(self, pattern: &str, zoned: &Zoned) -> Result<String> {
        jiff::fmt::strtime::format(pattern, zoned)
            .map_err(|error| Error::format_mismatch_jiff(self.as_str(), &zoned.timestamp().to_string(), error))
    }
}

fn zoned(instant: Instant, zone: TimeZone) -> Zoned {
    instant.as_timestamp().to_zoned(zone)
}

impl Display for TimeFormat {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| {
                Error::format_mismatch(
                    "time format name",
                    s,
                    "expected one of unix_time, iso8601_utc, iso8601_local, db_date_time, mysql_date_time",
                )
            })
    }
}

#[cfg(any(feature = "serde", test))]
impl serde_core::Serialize for TimeFormat {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde_core::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(any(feature = "serde", test))]
impl<'de> serde_core::Deserialize<'de> for TimeFormat {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde_core::Deserializer<'de>,
    {
        <String as serde_core::Deserialize>::deserialize(deserializer)?
            .parse::<Self>()
            .map_err(serde_core::de::Error::custom)
    }
}
