// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::time::SystemTime;

use jiff::Timestamp;

use crate::Error;

/// An absolute point in time with no attached time zone.
///
/// Every [`Format`][crate::Format] parses its text into an `Instant` and renders an
/// `Instant` back into text. The value has nanosecond resolution; formats that carry
/// less precision drop the excess when rendering.
///
/// # Serialization and deserialization
///
/// With the `serde` feature, `Instant` is serialized as an ISO 8601 string in UTC.
///
/// # Examples
///
/// ```
/// use timeshift::Instant;
///
/// let instant = Instant::from_unix_seconds(1_501_170_060)?;
/// assert_eq!(instant.to_string(), "2017-07-27T15:41:00Z");
/// assert_eq!(instant.as_unix_seconds(), 1_501_170_060);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(Timestamp);

impl Instant {
    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const UNIX_EPOCH: Self = Self(Timestamp::UNIX_EPOCH);

    /// Reads the system clock.
    #[must_use]
    pub fn now() -> Self {
        Self(Timestamp::now())
    }

    /// Creates an instant from a whole number of seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns an error if `seconds` lies outside the range supported by [`Timestamp`].
    pub fn from_unix_seconds(seconds: i64) -> Result<Self, Error> {
        Timestamp::from_second(seconds)
            .map(Self)
            .map_err(|error| Error::numeric_range(&seconds.to_string(), error))
    }

    /// Returns the number of whole seconds since the Unix epoch.
    ///
    /// Fractional seconds are rounded towards negative infinity, so half a second
    /// before the epoch is `-1`.
    #[must_use]
    pub fn as_unix_seconds(self) -> i64 {
        let seconds = self.0.as_second();
        if self.0.subsec_nanosecond() < 0 { seconds - 1 } else { seconds }
    }

    /// Returns the underlying [`Timestamp`].
    #[must_use]
    pub const fn as_timestamp(self) -> Timestamp {
        self.0
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Timestamp> for Instant {
    fn from(value: Timestamp) -> Self {
        Self(value)
    }
}

impl From<Instant> for Timestamp {
    fn from(value: Instant) -> Self {
        value.0
    }
}

impl From<Instant> for SystemTime {
    fn from(value: Instant) -> Self {
        value.0.into()
    }
}

/// Returns the current time as decimal seconds since the Unix epoch.
///
/// The system clock is read on every call.
///
/// # Examples
///
/// ```
/// let now: i64 = timeshift::current_unix_timestamp().parse()?;
/// assert!(now > 1_501_170_060);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn current_unix_timestamp() -> String {
    Instant::now().as_unix_seconds().to_string()
}

impl TryFrom<SystemTime> for Instant {
    type Error = Error;

    fn try_from(value: SystemTime) -> Result<Self, Self::Error> {
        Timestamp::try_from(value)
            .map(Self)
            .map_err(|error| Error::numeric_range(&format!("{value:?}"), error))
    }
}

#[cfg(any(feature = "serde", test))]
impl serde_core::Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde_core::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

#[cfg(any(feature = "serde", test))]
impl<'de> serde_core::Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde_core::Deserializer<'de>,
    {
        <String as serde_core::Deserialize>::deserialize(deserializer)?
            .parse::<Timestamp>()
            .map(Self)
            .map_err(serde_core::de::Error::custom)
    }
}
