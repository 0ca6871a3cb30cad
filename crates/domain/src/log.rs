//! Log entry — an immutable record of a device status change.
//!
//! Entries are append-only and never mutated after being written; reports
//! display them newest-first.

use serde::{Deserialize, Serialize};

use crate::device::Mode;
use crate::id::{DeviceId, LogEntryId};
use crate::schedule::LightStatus;
use crate::time::{self, Timestamp};

/// A usage-log record as stored in the append-only log list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,
    /// Display name of the user who made the change.
    pub user: String,
    #[serde(rename = "deviceId")]
    pub device_id: DeviceId,
    #[serde(rename = "deviceName")]
    pub device_name: String,
    #[serde(rename = "isAutomatic")]
    pub mode: Mode,
    pub status: LightStatus,
    #[serde(rename = "updatedAt")]
    pub updated_at: Timestamp,
}

impl LogEntry {
    /// Create a builder for constructing a [`LogEntry`].
    #[must_use]
    pub fn builder() -> LogEntryBuilder {
        LogEntryBuilder::default()
    }

    /// The entry's timestamp in report format (`MM/DD/YYYY HH:MM:SS`).
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        time::format_timestamp(self.updated_at)
    }
}

/// Sort entries for display: most recent first.
pub fn sort_newest_first(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// Step-by-step builder for [`LogEntry`].
#[derive(Debug, Default)]
pub struct LogEntryBuilder {
    id: Option<LogEntryId>,
    user: Option<String>,
    device_id: Option<DeviceId>,
    device_name: Option<String>,
    mode: Option<Mode>,
    status: Option<LightStatus>,
    updated_at: Option<Timestamp>,
}

impl LogEntryBuilder {
    #[must_use]
    pub fn id(mut self, id: LogEntryId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    #[must_use]
    pub fn device_name(mut self, device_name: impl Into<String>) -> Self {
        self.device_name = Some(device_name.into());
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn status(mut self, status: LightStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn updated_at(mut self, updated_at: Timestamp) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Consume the builder and return a [`LogEntry`].
    #[must_use]
    pub fn build(self) -> LogEntry {
        LogEntry {
            id: self.id.unwrap_or_default(),
            user: self.user.unwrap_or_default(),
            device_id: self.device_id.unwrap_or_default(),
            device_name: self.device_name.unwrap_or_default(),
            mode: self.mode.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            updated_at: self.updated_at.unwrap_or_else(time::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry_at(ts: Timestamp) -> LogEntry {
        LogEntry::builder()
            .user("ada")
            .device_name("Living Room")
            .status(LightStatus::On)
            .updated_at(ts)
            .build()
    }

    #[test]
    fn should_build_entry_with_defaults() {
        let entry = LogEntry::builder().user("ada").build();
        assert_eq!(entry.user, "ada");
        assert_eq!(entry.mode, Mode::Manual);
        assert_eq!(entry.status, LightStatus::Off);
    }

    #[test]
    fn should_format_timestamp_in_report_format() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 9, 7, 4, 30).unwrap();
        assert_eq!(entry_at(ts).formatted_timestamp(), "01/09/2024 07:04:30");
    }

    #[test]
    fn should_sort_entries_newest_first() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let middle = Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 3, 8, 0, 0).unwrap();

        let mut entries = vec![entry_at(middle), entry_at(late), entry_at(early)];
        sort_newest_first(&mut entries);

        let order: Vec<_> = entries.iter().map(|e| e.updated_at).collect();
        assert_eq!(order, vec![late, middle, early]);
    }

    #[test]
    fn should_serialize_wire_field_names() {
        let entry = LogEntry::builder()
            .user("ada")
            .device_name("Porch")
            .mode(Mode::Automatic)
            .build();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["deviceName"], "Porch");
        assert_eq!(json["isAutomatic"], true);
        assert!(json["updatedAt"].is_string());
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let entry = entry_at(Utc.with_ymd_and_hms(2024, 5, 20, 18, 30, 0).unwrap());
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: LogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, entry.id);
        assert_eq!(parsed.updated_at, entry.updated_at);
        assert_eq!(parsed.status, entry.status);
    }
}
