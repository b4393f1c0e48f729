//! Clock port for timestamping drafts and generation logs.

use chrono::{DateTime, SecondsFormat, Utc};

/// Provides the current time.
///
/// File names and front matter are derived from this clock, so tests can
/// pin it to a fixed instant and assert exact paths.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Formats an instant as RFC 3339 with millisecond precision and a `Z` suffix.
#[must_use]
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats an instant for use inside a file name (`:` replaced by `-`).
#[must_use]
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    iso_timestamp(at).replace(':', "-")
}
