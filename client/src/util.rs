//! Small display helpers.

use chrono::{DateTime, Utc};

/// Formats a timestamp the way the tables display it
#[must_use]
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y %H:%M").to_string()
}
