//! Cocoa-epoch timestamps.

use std::fmt;

use serde::Serialize;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::config::TimeZone;
use crate::format::COCOA_EPOCH_DELTA;

/// Second-precision rendering used for human-readable timestamps.
const HUMAN_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Rendered in place of a timestamp that cannot be represented.
pub const INVALID_TIMESTAMP: &str = "invalid";

/// Seconds since 2001-01-01T00:00:00Z, as stored in the container.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct CocoaTimestamp(pub f64);

impl CocoaTimestamp {
    /// Raw Cocoa-epoch seconds.
    pub fn seconds(self) -> f64 {
        self.0
    }

    /// Seconds since the Unix epoch.
    pub fn unix_seconds(self) -> f64 {
        self.0 + COCOA_EPOCH_DELTA as f64
    }

    /// Convert to a UTC instant.
    ///
    /// Returns `None` for NaN, infinities, or values outside the calendar
    /// range `time` supports.
    pub fn to_datetime(self) -> Option<OffsetDateTime> {
        let unix = self.unix_seconds();
        if !unix.is_finite() {
            return None;
        }
        let nanos = (unix * 1e9).floor();
        if nanos.abs() >= i128::MAX as f64 {
            return None;
        }
        OffsetDateTime::from_unix_timestamp_nanos(nanos as i128).ok()
    }

    /// Render as `YYYY-MM-DD HH:MM:SS` in the given zone.
    pub fn format(self, zone: TimeZone) -> Option<String> {
        let instant = self.to_datetime()?;
        let local = instant.to_offset(zone.offset_at(instant));
        local.format(HUMAN_FORMAT).ok()
    }

    /// Like [`format`](Self::format), substituting [`INVALID_TIMESTAMP`].
    pub fn format_or_invalid(self, zone: TimeZone) -> String {
        self.format(zone)
            .unwrap_or_else(|| INVALID_TIMESTAMP.to_string())
    }
}

impl From<f64> for CocoaTimestamp {
    fn from(seconds: f64) -> Self {
        CocoaTimestamp(seconds)
    }
}

impl fmt::Display for CocoaTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_or_invalid(TimeZone::Utc))
    }
}
