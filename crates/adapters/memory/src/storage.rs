//! In-memory keyed store — device, profile, and log collections.

use std::collections::HashMap;
use std::sync::Arc;

use lumen_app::ports::{DeviceRepository, LogStore, ProfileRepository};
use lumen_domain::device::Device;
use lumen_domain::error::LumenError;
use lumen_domain::id::{DeviceId, Uid};
use lumen_domain::log::{self, LogEntry};
use lumen_domain::profile::UserProfile;
use tokio::sync::RwLock;

/// Device records keyed by id, shared via `Arc` so clones see one map.
#[derive(Debug, Default, Clone)]
pub struct MemoryDeviceRepository {
    devices: Arc<RwLock<HashMap<DeviceId, Device>>>,
}

impl MemoryDeviceRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a device record. Creation happens outside the update port, so
    /// this is the only way records enter the map.
    pub async fn insert(&self, device: Device) {
        let mut devices = self.devices.write().await;
        devices.insert(device.id, device);
    }
}

impl DeviceRepository for MemoryDeviceRepository {
    async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, LumenError> {
        let devices = self.devices.read().await;
        Ok(devices.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Device>, LumenError> {
        let devices = self.devices.read().await;
        let mut all: Vec<_> = devices.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update(&self, device: Device) -> Result<Device, LumenError> {
        let mut devices = self.devices.write().await;
        devices.insert(device.id, device.clone());
        Ok(device)
    }
}

/// Profile records keyed by external uid.
#[derive(Debug, Default, Clone)]
pub struct MemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<Uid, UserProfile>>>,
}

impl MemoryProfileRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileRepository for MemoryProfileRepository {
    async fn get(&self, uid: &Uid) -> Result<Option<UserProfile>, LumenError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(uid).cloned())
    }

    async fn set(&self, uid: &Uid, profile: UserProfile) -> Result<UserProfile, LumenError> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(uid.clone(), profile.clone());
        Ok(profile)
    }
}

/// Append-only log list.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogStore {
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

impl MemoryLogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogStore for MemoryLogStore {
    async fn append(&self, entry: LogEntry) -> Result<LogEntry, LumenError> {
        let mut entries = self.entries.write().await;
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>, LumenError> {
        let mut recent = self.entries.read().await.clone();
        log::sort_newest_first(&mut recent);
        recent.truncate(limit);
        Ok(recent)
    }

    async fn find_by_device(
        &self,
        device_id: DeviceId,
        limit: usize,
    ) -> Result<Vec<LogEntry>, LumenError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<_> = entries
            .iter()
            .filter(|entry| entry.device_id == device_id)
            .cloned()
            .collect();
        log::sort_newest_first(&mut matching);
        matching.truncate(limit);
        Ok(matching)
    }

    async fn get_all(&self) -> Result<Vec<LogEntry>, LumenError> {
        Ok(self.entries.read().await.clone())
    }
}
