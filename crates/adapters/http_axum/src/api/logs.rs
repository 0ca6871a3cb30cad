//! JSON handlers for the usage log and report.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use lumen_app::ports::{
    BlobStore, ChangePublisher, DeviceRepository, IdentityProvider, LogStore, MediaPicker,
    ProfileRepository,
};
use lumen_app::services::report_service::LogRow;
use lumen_domain::error::NotFoundError;
use lumen_domain::id::DeviceId;
use lumen_domain::report::DeviceUsage;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 25;

/// Query parameters for log listings.
#[derive(Deserialize)]
pub struct LogQuery {
    pub limit: Option<usize>,
}

/// `GET /api/logs?limit=25`
///
/// Rows come back newest-first, already formatted for display.
pub async fn list<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<LogRow>>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let rows = state.report_service.recent_logs(limit).await?;
    Ok(Json(rows))
}

/// `GET /api/devices/:id/logs?limit=25`
pub async fn by_device<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
    Path(id): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<LogRow>>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let device_id = DeviceId::from_str(&id).map_err(|_| {
        ApiError::from(lumen_domain::error::LumenError::from(NotFoundError {
            entity: "Device",
            id,
        }))
    })?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let rows = state.report_service.device_logs(device_id, limit).await?;
    Ok(Json(rows))
}

/// `GET /api/report`
///
/// Per-device daily activity counts across the whole log.
pub async fn report<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
) -> Result<Json<Vec<DeviceUsage>>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let usage = state.report_service.usage_report().await?;
    Ok(Json(usage))
}
