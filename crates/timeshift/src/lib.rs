// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(
    test,
    allow(
        clippy::arithmetic_side_effects,
        clippy::unwrap_used,
        reason = "allow these lints in tests to improve the readability of the tests"
    )
)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Conversion and comparison of timestamps stored as text.
//!
//! Timestamps travel between systems in many shapes: Unix seconds in one API, ISO 8601
//! in another, a database column holding `2017-07-27 23:41:00.0` in a third. This crate
//! reads each of these shapes into an absolute [`Instant`] and writes it back out in
//! any other shape.
//!
//! # Quick Start
//!
//! ```
//! use timeshift::{convert, TimeFormat};
//!
//! let mysql = convert(Some("1501170060"), &TimeFormat::UnixTime, &TimeFormat::MySqlDateTime)?;
//! assert_eq!(mysql.as_deref(), Some("2017-07-27 23:41:00"));
//!
//! let unix = convert(Some("2017-07-27 23:41:00.0"), &TimeFormat::DbDateTime, &TimeFormat::UnixTime)?;
//! assert_eq!(unix.as_deref(), Some("1501170060"));
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Overview
//!
//! - [`TimeFormat`] - The built-in formats: Unix seconds, ISO 8601 in UTC, ISO 8601 in
//!   the reference zone, and two database date-time layouts.
//! - [`Format`] - The parse and render contract shared by every format.
//! - [`CustomFormat`] - A format built from a caller-supplied `strftime`-style [`Pattern`].
//! - [`convert`] and [`shift_zone`] - Move a value from one format or zone to another.
//! - [`compare_instants`] and [`compare_local_text`] - Order two timestamp strings.
//! - [`current_unix_timestamp`] - The current time as Unix seconds.
//! - [`zone`] - The fixed UTC+8 reference zone used by the local formats.
//! - [`Error`] - Every failure, categorized by [`ErrorKind`].
//!
//! # Reference zone
//!
//! [`TimeFormat::Iso8601Local`], [`TimeFormat::DbDateTime`] and [`TimeFormat::MySqlDateTime`]
//! carry no zone of their own that is honored when parsing. Their civil fields are read
//! and written in the [reference zone][zone], a fixed offset of UTC+8.
//!
//! # Absent values
//!
//! [`convert`] and [`shift_zone`] accept `Option<&str>` and map both `None` and the empty
//! string to `Ok(None)` without parsing, so optional fields can be passed through
//! unchanged.
//!
//! # Features
//!
//! - **`serde`** - Serialization of [`Instant`] as ISO 8601 text and of [`TimeFormat`]
//!   as its name.
//! - **`logs`** - Emits a `DEBUG` event through [tracing](https://docs.rs/tracing) whenever
//!   a conversion or comparison fails to parse its input.

mod convert;
mod error;
mod format;
mod instant;
mod layout;
mod pattern;
pub mod zone;

#[cfg(test)]
mod testing;

pub use convert::{compare_instants, compare_local_text, convert, shift_zone};
pub use error::{Error, ErrorKind, Result};
pub use format::{Format, TimeFormat};
pub use instant::{Instant, current_unix_timestamp};
pub use pattern::{CustomFormat, LOCAL_ISO_8601_PATTERN, Pattern};
pub use zone::is_in_reference_zone_offset;
