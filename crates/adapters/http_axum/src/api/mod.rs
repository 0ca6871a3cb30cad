//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod logs;
#[allow(clippy::missing_errors_doc)]
pub mod profile;

use axum::Router;
use axum::routing::{get, post};

use lumen_app::ports::{
    BlobStore, ChangePublisher, DeviceRepository, IdentityProvider, LogStore, MediaPicker,
    ProfileRepository,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR, LS, CP, IP, PR, BS, MP>() -> Router<AppState<DR, LS, CP, IP, PR, BS, MP>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route("/devices", get(devices::list::<DR, LS, CP, IP, PR, BS, MP>))
        .route(
            "/devices/{id}",
            get(devices::get::<DR, LS, CP, IP, PR, BS, MP>)
                .put(devices::update::<DR, LS, CP, IP, PR, BS, MP>),
        )
        .route(
            "/devices/{id}/toggle",
            post(devices::toggle::<DR, LS, CP, IP, PR, BS, MP>),
        )
        .route(
            "/devices/{id}/status",
            get(devices::status::<DR, LS, CP, IP, PR, BS, MP>),
        )
        .route(
            "/devices/{id}/logs",
            get(logs::by_device::<DR, LS, CP, IP, PR, BS, MP>),
        )
        // Profile & session
        .route(
            "/profile",
            get(profile::get::<DR, LS, CP, IP, PR, BS, MP>)
                .put(profile::update::<DR, LS, CP, IP, PR, BS, MP>),
        )
        .route(
            "/profile/image",
            post(profile::update_image::<DR, LS, CP, IP, PR, BS, MP>),
        )
        .route(
            "/session/sign-out",
            post(profile::sign_out::<DR, LS, CP, IP, PR, BS, MP>),
        )
        // Logs & report
        .route("/logs", get(logs::list::<DR, LS, CP, IP, PR, BS, MP>))
        .route("/report", get(logs::report::<DR, LS, CP, IP, PR, BS, MP>))
}
