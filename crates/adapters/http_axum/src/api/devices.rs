//! JSON handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use lumen_app::ports::{
    BlobStore, ChangePublisher, DeviceRepository, IdentityProvider, LogStore, MediaPicker,
    ProfileRepository,
};
use lumen_app::services::device_service::DeviceUpdate;
use lumen_domain::device::Device;
use lumen_domain::error::NotFoundError;
use lumen_domain::id::DeviceId;
use lumen_domain::schedule::LightStatus;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for the status endpoint.
#[derive(Serialize)]
pub struct StatusResponse {
    pub status: LightStatus,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single device.
pub enum DeviceResponse {
    Ok(Json<Device>),
}

impl IntoResponse for DeviceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(raw).map_err(|_| {
        ApiError::from(lumen_domain::error::LumenError::from(NotFoundError {
            entity: "Device",
            id: raw.to_string(),
        }))
    })
}

/// `GET /api/devices`
pub async fn list<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/:id`
pub async fn get<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let device = state.device_service.get_device(parse_id(&id)?).await?;
    Ok(DeviceResponse::Ok(Json(device)))
}

/// `PUT /api/devices/:id`
///
/// Applies an edit on behalf of the signed-in user, whose display name
/// ends up in the usage log.
pub async fn update<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
    Path(id): Path<String>,
    Json(req): Json<DeviceUpdate>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let profile = state.account_service.load_profile().await?;
    let device = state
        .device_service
        .update_device(parse_id(&id)?, req, &profile.username)
        .await?;
    Ok(DeviceResponse::Ok(Json(device)))
}

/// `POST /api/devices/:id/toggle`
pub async fn toggle<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let profile = state.account_service.load_profile().await?;
    let device = state
        .device_service
        .toggle_light(parse_id(&id)?, &profile.username)
        .await?;
    Ok(DeviceResponse::Ok(Json(device)))
}

/// `GET /api/devices/:id/status`
///
/// The effective status right now: the stored status in manual mode, the
/// schedule evaluated against the wall clock in automatic mode.
pub async fn status<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let status = state.device_service.current_status(parse_id(&id)?).await?;
    Ok(Json(StatusResponse { status }))
}
