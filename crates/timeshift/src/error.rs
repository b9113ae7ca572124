// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::num::ParseIntError;

/// The result type for fallible operations that use the [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while parsing, rendering, or comparing timestamps.
///
/// Every failure falls into one of three categories, exposed through
/// [`Error::kind`]:
///
/// * [`ErrorKind::FormatMismatch`] - the text does not have the layout of the named format.
/// * [`ErrorKind::NumericRange`] - a number could not be parsed or is not representable.
/// * [`ErrorKind::InvalidPattern`] - a caller-supplied pattern is malformed.
///
/// # Examples
///
/// ```
/// use timeshift::{ErrorKind, Format, TimeFormat};
///
/// let error = TimeFormat::UnixTime.parse("Que Pa So!").unwrap_err();
/// assert!(matches!(error.kind(), ErrorKind::NumericRange { .. }));
/// ```
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] ErrorKind);

/// The category of an [`Error`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The text does not match the layout of the named format.
    #[error("'{text}' does not match the {format} format: {reason}")]
    FormatMismatch {
        /// The name of the format the text was parsed with.
        format: Cow<'static, str>,
        /// The rejected text.
        text: String,
        /// Why the text was rejected.
        reason: Cow<'static, str>,
        /// The underlying parser error, if any.
        #[source]
        source: Option<jiff::Error>,
    },

    /// A numeric value cannot be parsed or lies outside the representable range.
    #[error("'{text}' is not a valid number of seconds since the Unix epoch")]
    NumericRange {
        /// The rejected text.
        text: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A caller-supplied pattern is malformed.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Why the pattern was rejected.
        reason: Cow<'static, str>,
        /// The underlying formatter error, if any.
        #[source]
        source: Option<jiff::Error>,
    },
}

impl Error {
    const fn from_kind(kind: ErrorKind) -> Self {
        Self(kind)
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.0
    }

    pub(crate) fn format_mismatch(
        format: impl Into<Cow<'static, str>>,
        text: &str,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::from_kind(ErrorKind::FormatMismatch {
            format: format.into(),
            text: text.to_owned(),
            reason: reason.into(),
            source: None,
        })
    }

    pub(crate) fn format_mismatch_jiff(format: impl Into<Cow<'static, str>>, text: &str, error: jiff::Error) -> Self {
        Self::from_kind(ErrorKind::FormatMismatch {
            format: format.into(),
            text: text.to_owned(),
            reason: Cow::Owned(error.to_string()),
            source: Some(error),
        })
    }

    pub(crate) fn numeric_parse(text: &str, error: ParseIntError) -> Self {
        Self::from_kind(ErrorKind::NumericRange {
            text: text.to_owned(),
            source: Box::new(error),
        })
    }

    pub(crate) fn numeric_range(text: &str, error: jiff::Error) -> Self {
        Self::from_kind(ErrorKind::NumericRange {
            text: text.to_owned(),
            source: Box::new(error),
        })
    }

    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::from_kind(ErrorKind::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason.into(),
            source: None,
        })
    }

    pub(crate) fn invalid_pattern_jiff(pattern: &str, error: jiff::Error) -> Self {
        Self::from_kind(ErrorKind::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: Cow::Owned(error.to_string()),
            source: Some(error),
        })
    }
}
