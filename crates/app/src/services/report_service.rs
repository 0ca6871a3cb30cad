//! Report service — formatted log rows and usage aggregation.

use lumen_domain::error::LumenError;
use lumen_domain::id::DeviceId;
use lumen_domain::log::LogEntry;
use lumen_domain::report::{self, DeviceUsage};
use serde::Serialize;

use crate::ports::LogStore;

/// A log entry shaped for display, with fields already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    pub user: String,
    #[serde(rename = "deviceName")]
    pub device_name: String,
    /// `"Automatic"` or `"Manual"`.
    pub mode: String,
    /// `"on"` or `"off"`.
    pub status: String,
    /// `MM/DD/YYYY HH:MM:SS`.
    pub timestamp: String,
}

impl From<&LogEntry> for LogRow {
    fn from(entry: &LogEntry) -> Self {
        Self {
            user: entry.user.clone(),
            device_name: entry.device_name.clone(),
            mode: entry.mode.to_string(),
            status: entry.status.to_string(),
            timestamp: entry.formatted_timestamp(),
        }
    }
}

/// Application service for the usage-report views.
pub struct ReportService<L> {
    logs: L,
}

impl<L: LogStore> ReportService<L> {
    /// Create a new service backed by the given log store.
    pub fn new(logs: L) -> Self {
        Self { logs }
    }

    /// The most recent log rows, newest first, ready for display.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the log store.
    #[tracing::instrument(skip(self))]
    pub async fn recent_logs(&self, limit: usize) -> Result<Vec<LogRow>, LumenError> {
        let entries = self.logs.get_recent(limit).await?;
        Ok(entries.iter().map(LogRow::from).collect())
    }

    /// Recent log rows for a single device, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the log store.
    #[tracing::instrument(skip(self))]
    pub async fn device_logs(
        &self,
        device_id: DeviceId,
        limit: usize,
    ) -> Result<Vec<LogRow>, LumenError> {
        let entries = self.logs.find_by_device(device_id, limit).await?;
        Ok(entries.iter().map(LogRow::from).collect())
    }

    /// Per-device daily activity counts across the whole log.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the log store.
    #[tracing::instrument(skip(self))]
    pub async fn usage_report(&self) -> Result<Vec<DeviceUsage>, LumenError> {
        let entries = self.logs.get_all().await?;
        Ok(report::usage_by_device(&entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lumen_domain::device::Mode;
    use lumen_domain::log::sort_newest_first;
    use lumen_domain::schedule::LightStatus;
    use lumen_domain::time::Timestamp;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryLogStore {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl LogStore for InMemoryLogStore {
        fn append(
            &self,
            entry: LogEntry,
        ) -> impl Future<Output = Result<LogEntry, LumenError>> + Send {
            let mut entries = self.entries.lock().unwrap();
            entries.push(entry.clone());
            async { Ok(entry) }
        }

        fn get_recent(
            &self,
            limit: usize,
        ) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send {
            let mut entries = self.entries.lock().unwrap().clone();
            sort_newest_first(&mut entries);
            entries.truncate(limit);
            async { Ok(entries) }
        }

        fn find_by_device(
            &self,
            device_id: DeviceId,
            limit: usize,
        ) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send {
            let mut entries: Vec<_> = self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.device_id == device_id)
                .cloned()
                .collect();
            sort_newest_first(&mut entries);
            entries.truncate(limit);
            async { Ok(entries) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send {
            let entries = self.entries.lock().unwrap().clone();
            async { Ok(entries) }
        }
    }

    fn entry(device: &str, mode: Mode, status: LightStatus, ts: Timestamp) -> LogEntry {
        LogEntry::builder()
            .user("ada")
            .device_name(device)
            .mode(mode)
            .status(status)
            .updated_at(ts)
            .build()
    }

    async fn seeded() -> ReportService<InMemoryLogStore> {
        let store = InMemoryLogStore::default();
        let days = [
            entry(
                "Porch",
                Mode::Manual,
                LightStatus::On,
                Utc.with_ymd_and_hms(2024, 3, 7, 8, 15, 0).unwrap(),
            ),
            entry(
                "Porch",
                Mode::Automatic,
                LightStatus::Off,
                Utc.with_ymd_and_hms(2024, 3, 7, 19, 0, 5).unwrap(),
            ),
            entry(
                "Attic",
                Mode::Manual,
                LightStatus::On,
                Utc.with_ymd_and_hms(2024, 3, 8, 7, 30, 0).unwrap(),
            ),
        ];
        for e in days {
            store.append(e).await.unwrap();
        }
        ReportService::new(store)
    }

    #[tokio::test]
    async fn should_return_rows_newest_first() {
        let svc = seeded().await;
        let rows = svc.recent_logs(10).await.unwrap();
        let timestamps: Vec<_> = rows.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(
            timestamps,
            vec![
                "03/08/2024 07:30:00",
                "03/07/2024 19:00:05",
                "03/07/2024 08:15:00",
            ]
        );
    }

    #[tokio::test]
    async fn should_format_mode_and_status_for_display() {
        let svc = seeded().await;
        let rows = svc.recent_logs(10).await.unwrap();
        assert_eq!(rows[0].mode, "Manual");
        assert_eq!(rows[0].status, "on");
        assert_eq!(rows[1].mode, "Automatic");
        assert_eq!(rows[1].status, "off");
    }

    #[tokio::test]
    async fn should_honor_row_limit() {
        let svc = seeded().await;
        let rows = svc.recent_logs(1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].device_name, "Attic");
    }

    #[tokio::test]
    async fn should_aggregate_usage_per_device_and_day() {
        let svc = seeded().await;
        let usage = svc.usage_report().await.unwrap();
        let names: Vec<_> = usage.iter().map(|u| u.device_name.as_str()).collect();
        assert_eq!(names, vec!["Attic", "Porch"]);

        let porch = &usage[1];
        assert_eq!(porch.daily.len(), 1);
        assert_eq!(porch.daily[0].date, "3/7/2024");
        assert_eq!(porch.daily[0].count, 2);
    }

    #[tokio::test]
    async fn should_filter_rows_by_device() {
        let store = InMemoryLogStore::default();
        let porch_id = DeviceId::new();
        let attic_id = DeviceId::new();
        for (id, name) in [(porch_id, "Porch"), (attic_id, "Attic"), (porch_id, "Porch")] {
            let e = LogEntry::builder()
                .user("ada")
                .device_id(id)
                .device_name(name)
                .build();
            store.append(e).await.unwrap();
        }
        let svc = ReportService::new(store);

        let rows = svc.device_logs(porch_id, 10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.device_name == "Porch"));
    }

    #[tokio::test]
    async fn should_return_empty_report_when_no_logs() {
        let svc = ReportService::new(InMemoryLogStore::default());
        assert!(svc.recent_logs(25).await.unwrap().is_empty());
        assert!(svc.usage_report().await.unwrap().is_empty());
    }
}
