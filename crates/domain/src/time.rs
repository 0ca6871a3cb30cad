//! Time and timestamp helpers.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// UTC timestamp used for log entries and save-time snapshots.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp as `MM/DD/YYYY HH:MM:SS`, all fields zero-padded.
///
/// This is the exact format existing log reports were written with, so it
/// must be reproduced bit-for-bit.
#[must_use]
pub fn format_timestamp(ts: Timestamp) -> String {
    format!(
        "{:02}/{:02}/{} {:02}:{:02}:{:02}",
        ts.month(),
        ts.day(),
        ts.year(),
        ts.hour(),
        ts.minute(),
        ts.second()
    )
}

/// Render a timestamp's date as `M/D/YYYY`, month and day unpadded.
///
/// Used as the grouping key for usage reports; distinct from
/// [`format_timestamp`], which pads.
#[must_use]
pub fn format_date(ts: Timestamp) -> String {
    format!("{}/{}/{}", ts.month(), ts.day(), ts.year())
}
