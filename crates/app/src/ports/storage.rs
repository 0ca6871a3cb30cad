//! Storage ports — traits over the external realtime keyed store.
//!
//! Writes are full overwrites of a key's value, matching the store's
//! point-write semantics. Device records are created and deleted outside
//! this system; only the update path lives here.

use std::future::Future;

use lumen_domain::device::Device;
use lumen_domain::error::LumenError;
use lumen_domain::id::{DeviceId, Uid};
use lumen_domain::log::LogEntry;
use lumen_domain::profile::UserProfile;

/// Point read/write access to `devices/{id}` records.
pub trait DeviceRepository {
    /// Get a device by its unique identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, LumenError>> + Send;

    /// List all devices.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, LumenError>> + Send;

    /// Overwrite the record for `device.id` with `device`.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, LumenError>> + Send;
}

/// Read/overwrite access to the `users/{uid}` record.
pub trait ProfileRepository {
    /// Get the stored profile, if the record exists.
    fn get(
        &self,
        uid: &Uid,
    ) -> impl Future<Output = Result<Option<UserProfile>, LumenError>> + Send;

    /// Overwrite the record with `profile`.
    fn set(
        &self,
        uid: &Uid,
        profile: UserProfile,
    ) -> impl Future<Output = Result<UserProfile, LumenError>> + Send;
}

/// Append-only store for usage-log entries.
pub trait LogStore {
    /// Persist a new entry. Entries are immutable once written.
    fn append(&self, entry: LogEntry) -> impl Future<Output = Result<LogEntry, LumenError>> + Send;

    /// The most recent entries, ordered newest-first.
    fn get_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send;

    /// Entries for a specific device, ordered newest-first.
    fn find_by_device(
        &self,
        device_id: DeviceId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send;

    /// Every entry, in append order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<LogEntry>, LumenError>> + Send;
}
