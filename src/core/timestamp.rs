//! Timestamp formatting for the built-in handlers

use super::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format written under the `time` key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 with offset: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    ///
    /// Written as a number by the JSON handler.
    UnixMillis,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use slogr::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%Y-%m-%d".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
            }
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                // An invalid strftime string would make `to_string` panic
                let mut formatted = String::new();
                match write!(formatted, "{}", datetime.format(format_str)) {
                    Ok(()) => formatted,
                    Err(_) => TimestampFormat::Iso8601.format(datetime),
                }
            }
        }
    }

    /// Typed value for the `time` attribute
    pub(crate) fn to_field_value(&self, datetime: &DateTime<Utc>) -> FieldValue {
        match self {
            TimestampFormat::UnixMillis => FieldValue::Int(datetime.timestamp_millis()),
            _ => FieldValue::String(self.format(datetime)),
        }
    }
}
