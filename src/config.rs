//! Decoder configuration types.

use serde::{Deserialize, Serialize};
use time::UtcOffset;

/// Time zone used when rendering human-readable timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZone {
    /// Host local time, falling back to UTC when the offset is unavailable
    #[default]
    Local,
    /// Coordinated Universal Time
    Utc,
}

impl TimeZone {
    /// Get the name of this time zone setting.
    pub fn name(&self) -> &'static str {
        match self {
            TimeZone::Local => "local",
            TimeZone::Utc => "utc",
        }
    }

    /// Parse a time zone setting from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" => Some(TimeZone::Local),
            "utc" | "gmt" | "z" => Some(TimeZone::Utc),
            _ => None,
        }
    }

    /// Resolve the offset to apply at the given Unix timestamp.
    ///
    /// The local offset depends on the instant (daylight saving), so it is
    /// looked up per timestamp.
    pub fn offset_at(&self, instant: time::OffsetDateTime) -> UtcOffset {
        match self {
            TimeZone::Utc => UtcOffset::UTC,
            TimeZone::Local => UtcOffset::local_offset_at(instant).unwrap_or(UtcOffset::UTC),
        }
    }
}

/// Configuration for decoding a container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Zone for human-readable timestamps
    #[serde(default)]
    pub time_zone: TimeZone,
    /// Treat non-UTF-8 text fields as a record failure instead of replacing bytes
    #[serde(default)]
    pub strict_text: bool,
}

impl DecoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render timestamps in the given zone.
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Reject records whose text fields are not valid UTF-8.
    pub fn with_strict_text(mut self, strict_text: bool) -> Self {
        self.strict_text = strict_text;
        self
    }
}
