// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};

use jiff::fmt::strtime;
use jiff::tz::TimeZone;

use crate::zone::reference_zone;
use crate::{Error, Format, Instant, Result};

/// The local ISO 8601 layout, `yyyy-MM-ddTHH:mm:ss±HH:mm`, as a [`Pattern`].
pub const LOCAL_ISO_8601_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%:z";

const CONVERSIONS: &[u8] = b"%AaBbCcDdeFfGgHhIjklMmNnPpQqRrSsTtUuVWwXxYyZz";
const FLAGS: &[u8] = b"-_0^#";
const MAX_OFFSET_COLONS: usize = 3;

/// A validated `strftime`-style pattern.
///
/// Patterns use the conversion specifiers understood by [`jiff::fmt::strtime`], for
/// example `%Y-%m-%d %H:%M:%S`. The pattern is checked when it is created so that a
/// malformed pattern is reported before any text is parsed.
///
/// The check covers the syntax of each specifier (flags, width, precision for `%f`,
/// colons for `%z` and `%Q`) and the set of conversion letters. Whether a specifier
/// can be used for parsing, formatting, or both is left to `jiff`, which reports an
/// unsupported use when the pattern is applied.
///
/// # Examples
///
/// ```
/// use timeshift::{ErrorKind, Pattern};
///
/// let pattern = Pattern::new("%Y/%m/%d")?;
/// assert_eq!(pattern.as_str(), "%Y/%m/%d");
///
/// let error = Pattern::new("%Y/%m/%").unwrap_err();
/// assert!(matches!(error.kind(), ErrorKind::InvalidPattern { .. }));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern(String);

impl Pattern {
    /// Validates and wraps `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidPattern`][crate::ErrorKind::InvalidPattern] error if the pattern
    /// is empty, ends with a dangling `%`, or uses an unknown conversion specifier.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        validate(&pattern)?;
        Ok(Self(pattern))
    }

    /// Returns the pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(Error::invalid_pattern(pattern, "pattern is empty"));
    }

    let bytes = pattern.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] != b'%' {
            index += 1;
            continue;
        }

        let start = index;
        index += 1;
        while bytes.get(index).is_some_and(|b| FLAGS.contains(b)) {
            index += 1;
        }
        while bytes.get(index).is_some_and(u8::is_ascii_digit) {
            index += 1;
        }

        let mut precision = false;
        if bytes.get(index) == Some(&b'.') {
            precision = true;
            index += 1;
            while bytes.get(index).is_some_and(u8::is_ascii_digit) {
                index += 1;
            }
        }

        let mut colons = 0;
        while bytes.get(index) == Some(&b':') {
            colons += 1;
            index += 1;
        }

        let Some(&conversion) = bytes.get(index) else {
            return Err(Error::invalid_pattern(pattern, "pattern ends with a dangling '%'"));
        };

        if !CONVERSIONS.contains(&conversion) {
            return Err(Error::invalid_pattern(
                pattern,
                format!(
                    "unknown conversion specifier '{}' at position {start}",
                    pattern[index..].chars().next().unwrap_or_default()
                ),
            ));
        }
        if precision && conversion != b'f' {
            return Err(Error::invalid_pattern(
                pattern,
                format!("precision is only allowed with '%f' at position {start}"),
            ));
        }
        let max_colons = match conversion {
            b'z' => MAX_OFFSET_COLONS,
            b'Q' => 1,
            _ => 0,
        };
        if colons > max_colons {
            return Err(Error::invalid_pattern(
                pattern,
                format!("too many colons for '%{}' at position {start}", char::from(conversion)),
            ));
        }

        index += 1;
    }

    Ok(())
}

/// A [`Format`] defined by a caller-supplied [`Pattern`] and a time zone.
///
/// When the pattern carries an offset (`%z` and friends) the parsed offset is honored.
/// Otherwise the civil fields are read in the bound zone. Rendering always projects the
/// instant into the bound zone.
///
/// # Examples
///
/// ```
/// use timeshift::{convert, CustomFormat, TimeFormat};
///
/// let slashes = CustomFormat::in_reference_zone("%Y/%m/%d %H:%M")?;
/// let text = convert(Some("1501170060"), &TimeFormat::UnixTime, &slashes)?;
/// assert_eq!(text.as_deref(), Some("2017/07/27 23:41"));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CustomFormat {
    pattern: Pattern,
    zone: TimeZone,
}

impl CustomFormat {
    /// Creates a format from `pattern`, reading and writing civil fields in `zone`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidPattern`][crate::ErrorKind::InvalidPattern] error if the pattern
    /// is malformed.
    pub fn new(pattern: impl Into<String>, zone: TimeZone) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
            zone,
        })
    }

    /// Creates a format from `pattern` bound to the [reference zone][crate::zone].
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidPattern`][crate::ErrorKind::InvalidPattern] error if the pattern
    /// is malformed.
    pub fn in_reference_zone(pattern: impl Into<String>) -> Result<Self> {
        Self::new(pattern, reference_zone())
    }

    /// Returns the pattern.
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the zone civil fields are read and written in.
    #[must_use]
    pub fn zone(&self) -> &TimeZone {
        &self.zone
    }
}

impl Format for CustomFormat {
    fn name(&self) -> &str {
        self.pattern.as_str()
    }

    fn parse(&self, text: &str) -> Result<Instant> {
        let parsed = strtime::parse(self.pattern.as_str(), text)
            .and_then(|broken_down| {
                if broken_down.offset().is_some() {
                    broken_down.to_timestamp()
                } else {
                    broken_down
                        .to_datetime()
                        .and_then(|date_time| date_time.to_zoned(self.zone.clone()))
                        .map(|zoned| zoned.timestamp())
                }
            })
            .map_err(|error| Error::format_mismatch_jiff(self.pattern.as_str().to_owned(), text, error))?;

        Ok(Instant::from(parsed))
    }

    fn render(&self, instant: Instant) -> Result<String> {
        let zoned = instant.as_timestamp().to_zoned(self.zone.clone());
        strtime::format(self.pattern.as_str(), &zoned)
            .map_err(|error| Error::invalid_pattern_jiff(self.pattern.as_str(), error))
    }
}
