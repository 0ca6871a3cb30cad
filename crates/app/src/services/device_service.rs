//! Device service — use-cases for editing devices and their schedules.

use serde::Deserialize;

use lumen_domain::device::{Device, Mode};
use lumen_domain::error::{LumenError, NotFoundError, ValidationError};
use lumen_domain::id::DeviceId;
use lumen_domain::log::LogEntry;
use lumen_domain::schedule::{LightStatus, Schedule, TimeOfDay};

use crate::ports::{ChangeEvent, ChangePublisher, DeviceRepository, LogStore};

/// An edit to a device, as submitted from a details screen.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceUpdate {
    pub name: String,
    #[serde(rename = "isAutomatic")]
    pub mode: Mode,
    /// Desired manual status; ignored in automatic mode, where the saved
    /// status is a snapshot of the schedule evaluation instead.
    #[serde(rename = "lightStatus", default)]
    pub light_status: LightStatus,
    #[serde(default)]
    pub schedule: Option<Schedule>,
}

/// Application service for device reads, edits, and manual toggles.
pub struct DeviceService<R, L, P> {
    repo: R,
    logs: L,
    publisher: P,
}

impl<R, L, P> DeviceService<R, L, P>
where
    R: DeviceRepository,
    L: LogStore,
    P: ChangePublisher,
{
    /// Create a new service backed by the given ports.
    pub fn new(repo: R, logs: L, publisher: P) -> Self {
        Self {
            repo,
            logs,
            publisher,
        }
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, LumenError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, LumenError> {
        self.repo.get_all().await
    }

    /// Apply an edit, evaluating the schedule against the current wall clock.
    ///
    /// # Errors
    ///
    /// See [`update_device_at`](Self::update_device_at).
    pub async fn update_device(
        &self,
        id: DeviceId,
        update: DeviceUpdate,
        user: &str,
    ) -> Result<Device, LumenError> {
        self.update_device_at(id, update, user, wall_clock()).await
    }

    /// Apply an edit, evaluating the schedule against `now`.
    ///
    /// Validation happens before anything is written. For automatic mode
    /// the persisted `light_status` is a snapshot of the schedule evaluated
    /// at `now`; for manual mode it is the submitted value and any previous
    /// schedule is cleared. A usage-log entry is appended after the save.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when the device does not exist,
    /// [`LumenError::Validation`] when the edit violates invariants
    /// (empty name, automatic mode without schedule or days), or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, update), fields(device_name = %update.name))]
    pub async fn update_device_at(
        &self,
        id: DeviceId,
        update: DeviceUpdate,
        user: &str,
        now: TimeOfDay,
    ) -> Result<Device, LumenError> {
        let existing = self.get_device(id).await?;

        let mut device = Device {
            id: existing.id,
            name: update.name,
            mode: update.mode,
            light_status: update.light_status,
            schedule: match update.mode {
                Mode::Automatic => update.schedule,
                Mode::Manual => None,
            },
        };
        device.validate()?;

        if device.mode.is_automatic() {
            device.light_status = device.effective_status(now);
        }

        let saved = self.repo.update(device).await?;
        self.publish_update(&saved).await;
        self.record_change(&saved, user).await;
        Ok(saved)
    }

    /// Flip a manual device's light and log the change.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotManual`] for devices in automatic mode,
    /// [`LumenError::NotFound`] when the device does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_light(&self, id: DeviceId, user: &str) -> Result<Device, LumenError> {
        let mut device = self.get_device(id).await?;
        if device.mode.is_automatic() {
            return Err(ValidationError::NotManual.into());
        }

        device.toggle();
        let saved = self.repo.update(device).await?;
        self.publish_update(&saved).await;
        self.record_change(&saved, user).await;
        Ok(saved)
    }

    /// The status a device's output should currently have.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when the device does not exist,
    /// or a storage error from the repository.
    pub async fn current_status(&self, id: DeviceId) -> Result<LightStatus, LumenError> {
        let device = self.get_device(id).await?;
        Ok(device.effective_status(wall_clock()))
    }

    /// Publish a saved device on the change feed.
    ///
    /// Feed failures degrade: the save has already happened, so a broken
    /// publisher is reported and otherwise ignored.
    async fn publish_update(&self, device: &Device) {
        if let Err(err) = self
            .publisher
            .publish(ChangeEvent::DeviceUpdated(device.clone()))
            .await
        {
            tracing::warn!(error = %err, device_id = %device.id, "failed to publish device change");
        }
    }

    /// Append a usage-log entry for a saved device state.
    ///
    /// Log failures degrade: the save has already happened, so a broken
    /// log store is reported and otherwise ignored.
    async fn record_change(&self, device: &Device, user: &str) {
        let entry = LogEntry::builder()
            .user(user)
            .device_id(device.id)
            .device_name(device.name.clone())
            .mode(device.mode)
            .status(device.light_status)
            .build();

        match self.logs.append(entry).await {
            Ok(entry) => {
                if let Err(err) = self.publisher.publish(ChangeEvent::LogAppended(entry)).await {
                    tracing::warn!(error = %err, device_id = %device.id, "failed to publish log change");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, device_id = %device.id, "failed to append usage log entry");
            }
        }
    }
}

/// The current local wall-clock time of day.
fn wall_clock() -> TimeOfDay {
    TimeOfDay::from(chrono::Local::now().time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_domain::schedule::Weekday;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    struct InMemoryDeviceRepo {
        store: Mutex<HashMap<DeviceId, Device>>,
    }

    impl InMemoryDeviceRepo {
        fn with(devices: Vec<Device>) -> Self {
            let map: HashMap<_, _> = devices.into_iter().map(|d| (d.id, d)).collect();
            Self {
                store: Mutex::new(map),
            }
        }
    }

    impl DeviceRepository for InMemoryDeviceRepo {
        fn get_by_id(
            &self,
            id: DeviceId,
        ) -> impl Future<Output = Result<Option<Device>, LumenError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, LumenError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Device> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn update(
            &self,
            device: Device,
        ) -> impl Future<Output = Result<Device, LumenError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(device.id, device.clone());
            async { Ok(device) }
        }
    }

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
            let entries = self.entries.lock().unwrap();
            let mut result: Vec<LogEntry> = entries.clone();
            result.reverse();
            result.truncate(limit);
            async { Ok(result) }
        }

        fn find_by_device(
            &self,
            device_id: DeviceId,
            limit: usize,
        ) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send {
            let entries = self.entries.lock().unwrap();
            let mut result: Vec<LogEntry> = entries
                .iter()
                .filter(|e| e.device_id == device_id)
                .cloned()
                .collect();
            result.reverse();
            result.truncate(limit);
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send {
            let entries = self.entries.lock().unwrap();
            let result = entries.clone();
            async { Ok(result) }
        }
    }

    /// Log store that always fails, for the degraded-append path.
    struct BrokenLogStore;

    impl LogStore for BrokenLogStore {
        fn append(
            &self,
            _entry: LogEntry,
        ) -> impl Future<Output = Result<LogEntry, LumenError>> + Send {
            async { Err(lumen_domain::error::StorageError("log store down".to_string()).into()) }
        }

        fn get_recent(
            &self,
            _limit: usize,
        ) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send {
            async { Ok(vec![]) }
        }

        fn find_by_device(
            &self,
            _device_id: DeviceId,
            _limit: usize,
        ) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send {
            async { Ok(vec![]) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send {
            async { Ok(vec![]) }
        }
    }

    struct NullPublisher;

    impl ChangePublisher for NullPublisher {
        fn publish(
            &self,
            _event: ChangeEvent,
        ) -> impl Future<Output = Result<(), LumenError>> + Send {
            async { Ok(()) }
        }
    }

    /// Publisher that always fails, for the degraded-publish path.
    struct BrokenPublisher;

    impl ChangePublisher for BrokenPublisher {
        fn publish(
            &self,
            _event: ChangeEvent,
        ) -> impl Future<Output = Result<(), LumenError>> + Send {
            async { Err(lumen_domain::error::StorageError("feed down".to_string()).into()) }
        }
    }

    fn t(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    fn manual_device() -> Device {
        Device::builder().name("Living Room").build().unwrap()
    }

    fn automatic_update(days: Vec<Weekday>) -> DeviceUpdate {
        DeviceUpdate {
            name: "Living Room".to_string(),
            mode: Mode::Automatic,
            light_status: LightStatus::Off,
            schedule: Some(Schedule::new(t(9, 0), t(17, 0), days)),
        }
    }

    fn service_with(
        devices: Vec<Device>,
    ) -> DeviceService<InMemoryDeviceRepo, InMemoryLogStore, NullPublisher> {
        DeviceService::new(
            InMemoryDeviceRepo::with(devices),
            InMemoryLogStore::default(),
            NullPublisher,
        )
    }

    #[tokio::test]
    async fn should_snapshot_on_when_now_is_inside_window() {
        let device = manual_device();
        let id = device.id;
        let svc = service_with(vec![device]);

        let saved = svc
            .update_device_at(id, automatic_update(vec![Weekday::Mon]), "ada", t(12, 30))
            .await
            .unwrap();

        assert_eq!(saved.mode, Mode::Automatic);
        assert_eq!(saved.light_status, LightStatus::On);
    }

    #[tokio::test]
    async fn should_snapshot_off_when_now_is_outside_window() {
        let device = manual_device();
        let id = device.id;
        let svc = service_with(vec![device]);

        let saved = svc
            .update_device_at(id, automatic_update(vec![Weekday::Mon]), "ada", t(8, 59))
            .await
            .unwrap();

        assert_eq!(saved.light_status, LightStatus::Off);
    }

    #[tokio::test]
    async fn should_reject_automatic_update_with_no_days() {
        let device = manual_device();
        let id = device.id;
        let svc = service_with(vec![device]);

        let result = svc
            .update_device_at(id, automatic_update(vec![]), "ada", t(12, 0))
            .await;

        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::NoDaysSelected))
        ));
    }

    #[tokio::test]
    async fn should_reject_automatic_update_without_schedule() {
        let device = manual_device();
        let id = device.id;
        let svc = service_with(vec![device]);

        let update = DeviceUpdate {
            name: "Living Room".to_string(),
            mode: Mode::Automatic,
            light_status: LightStatus::Off,
            schedule: None,
        };
        let result = svc.update_device_at(id, update, "ada", t(12, 0)).await;

        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::MissingSchedule))
        ));
    }

    #[tokio::test]
    async fn should_not_persist_anything_when_validation_fails() {
        let device = manual_device();
        let id = device.id;
        let svc = service_with(vec![device]);

        let mut update = automatic_update(vec![]);
        update.name = "Renamed".to_string();
        let _ = svc.update_device_at(id, update, "ada", t(12, 0)).await;

        let stored = svc.get_device(id).await.unwrap();
        assert_eq!(stored.name, "Living Room");
        assert!(svc.logs.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_clear_schedule_when_switching_to_manual() {
        let device = Device::builder()
            .name("Office")
            .mode(Mode::Automatic)
            .schedule(Schedule::new(t(9, 0), t(17, 0), [Weekday::Tue]))
            .build()
            .unwrap();
        let id = device.id;
        let svc = service_with(vec![device]);

        let update = DeviceUpdate {
            name: "Office".to_string(),
            mode: Mode::Manual,
            light_status: LightStatus::On,
            schedule: Some(Schedule::new(t(9, 0), t(17, 0), [Weekday::Tue])),
        };
        let saved = svc.update_device_at(id, update, "ada", t(12, 0)).await.unwrap();

        assert_eq!(saved.mode, Mode::Manual);
        assert_eq!(saved.light_status, LightStatus::On);
        assert!(saved.schedule.is_none());
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_device() {
        let svc = service_with(vec![]);
        let result = svc
            .update_device_at(
                DeviceId::new(),
                automatic_update(vec![Weekday::Mon]),
                "ada",
                t(12, 0),
            )
            .await;
        assert!(matches!(result, Err(LumenError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_append_log_entry_with_saved_snapshot() {
        let device = manual_device();
        let id = device.id;
        let svc = service_with(vec![device]);

        svc.update_device_at(id, automatic_update(vec![Weekday::Mon]), "ada", t(12, 30))
            .await
            .unwrap();

        let entries = svc.logs.get_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user, "ada");
        assert_eq!(entries[0].device_id, id);
        assert_eq!(entries[0].mode, Mode::Automatic);
        assert_eq!(entries[0].status, LightStatus::On);
    }

    #[tokio::test]
    async fn should_toggle_manual_device_and_log_it() {
        let device = manual_device();
        let id = device.id;
        let svc = service_with(vec![device]);

        let saved = svc.toggle_light(id, "ada").await.unwrap();
        assert_eq!(saved.light_status, LightStatus::On);

        let saved = svc.toggle_light(id, "ada").await.unwrap();
        assert_eq!(saved.light_status, LightStatus::Off);

        assert_eq!(svc.logs.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_reject_toggle_in_automatic_mode() {
        let device = Device::builder()
            .name("Office")
            .mode(Mode::Automatic)
            .schedule(Schedule::new(t(9, 0), t(17, 0), [Weekday::Tue]))
            .build()
            .unwrap();
        let id = device.id;
        let svc = service_with(vec![device]);

        let result = svc.toggle_light(id, "ada").await;
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::NotManual))
        ));
    }

    #[tokio::test]
    async fn should_save_device_even_when_log_store_fails() {
        let device = manual_device();
        let id = device.id;
        let svc = DeviceService::new(
            InMemoryDeviceRepo::with(vec![device]),
            BrokenLogStore,
            NullPublisher,
        );

        let saved = svc
            .update_device_at(id, automatic_update(vec![Weekday::Mon]), "ada", t(12, 30))
            .await
            .unwrap();
        assert_eq!(saved.light_status, LightStatus::On);

        let stored = svc.get_device(id).await.unwrap();
        assert_eq!(stored.mode, Mode::Automatic);
    }

    #[tokio::test]
    async fn should_save_and_log_even_when_publisher_fails() {
        let device = manual_device();
        let id = device.id;
        let svc = DeviceService::new(
            InMemoryDeviceRepo::with(vec![device]),
            InMemoryLogStore::default(),
            BrokenPublisher,
        );

        let saved = svc.toggle_light(id, "ada").await.unwrap();
        assert_eq!(saved.light_status, LightStatus::On);

        let stored = svc.get_device(id).await.unwrap();
        assert_eq!(stored.light_status, LightStatus::On);
        assert_eq!(svc.logs.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_publish_device_update_on_feed() {
        let feed = std::sync::Arc::new(crate::feed::InProcessFeed::new(16));
        let mut sub = feed.subscribe();

        let device = manual_device();
        let id = device.id;
        let svc = DeviceService::new(
            InMemoryDeviceRepo::with(vec![device]),
            InMemoryLogStore::default(),
            std::sync::Arc::clone(&feed),
        );

        svc.toggle_light(id, "ada").await.unwrap();

        match sub.next().await {
            Some(ChangeEvent::DeviceUpdated(d)) => assert_eq!(d.id, id),
            other => panic!("unexpected event: {other:?}"),
        }
        match sub.next().await {
            Some(ChangeEvent::LogAppended(entry)) => assert_eq!(entry.device_id, id),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
