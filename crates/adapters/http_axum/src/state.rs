//! Shared application state for axum handlers.

use std::sync::Arc;

use lumen_app::ports::{
    BlobStore, ChangePublisher, DeviceRepository, IdentityProvider, LogStore, MediaPicker,
    ProfileRepository,
};
use lumen_app::services::account_service::AccountService;
use lumen_app::services::device_service::DeviceService;
use lumen_app::services::report_service::ReportService;

/// Application state shared across all axum handlers.
///
/// Generic over the port implementations to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do
/// not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<DR, LS, CP, IP, PR, BS, MP> {
    /// Device edits, toggles, and status queries.
    pub device_service: Arc<DeviceService<DR, LS, CP>>,
    /// Profile load/save and session teardown.
    pub account_service: Arc<AccountService<IP, PR, BS, MP>>,
    /// Log rows and usage aggregation.
    pub report_service: Arc<ReportService<LS>>,
}

impl<DR, LS, CP, IP, PR, BS, MP> Clone for AppState<DR, LS, CP, IP, PR, BS, MP> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            account_service: Arc::clone(&self.account_service),
            report_service: Arc::clone(&self.report_service),
        }
    }
}

impl<DR, LS, CP, IP, PR, BS, MP> AppState<DR, LS, CP, IP, PR, BS, MP>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        device_service: DeviceService<DR, LS, CP>,
        account_service: AccountService<IP, PR, BS, MP>,
        report_service: ReportService<LS>,
    ) -> Self {
        Self {
            device_service: Arc::new(device_service),
            account_service: Arc::new(account_service),
            report_service: Arc::new(report_service),
        }
    }
}
