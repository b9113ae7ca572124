// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The fixed reference zone used by the local formats.
//!
//! [`TimeFormat::Iso8601Local`][crate::TimeFormat::Iso8601Local],
//! [`TimeFormat::DbDateTime`][crate::TimeFormat::DbDateTime] and
//! [`TimeFormat::MySqlDateTime`][crate::TimeFormat::MySqlDateTime] all read and write
//! their civil fields in this zone. It is a fixed offset of UTC+8 with no daylight
//! saving transitions.

use jiff::tz::{Offset, TimeZone};

/// The UTC offset of the reference zone.
pub const REFERENCE_OFFSET: Offset = Offset::constant(8);

/// The literal suffix that ISO 8601 strings rendered in the reference zone end with.
pub const REFERENCE_OFFSET_SUFFIX: &str = "+08:00";

/// Returns the reference zone as a [`TimeZone`].
///
/// # Examples
///
/// ```
/// use timeshift::zone::{reference_zone, REFERENCE_OFFSET};
///
/// let now = jiff::Timestamp::now();
/// assert_eq!(reference_zone().to_offset(now), REFERENCE_OFFSET);
/// ```
#[must_use]
pub fn reference_zone() -> TimeZone {
    TimeZone::fixed(REFERENCE_OFFSET)
}

/// Returns `true` if `text` ends with the reference zone's offset literal (`+08:00`).
///
/// This is a textual check only. An offset that denotes the same displacement but is
/// written differently (for example `+0800`) is not recognized. Absent and empty input
/// yield `false`.
///
/// # Examples
///
/// ```
/// use timeshift::is_in_reference_zone_offset;
///
/// assert!(is_in_reference_zone_offset(Some("2017-08-08T13:45:00+08:00")));
/// assert!(!is_in_reference_zone_offset(Some("2017-08-08T13:45:00Z")));
/// assert!(!is_in_reference_zone_offset(None));
/// ```
#[must_use]
pub fn is_in_reference_zone_offset(text: Option<&str>) -> bool {
    text.is_some_and(|text| text.ends_with(REFERENCE_OFFSET_SUFFIX))
}
