//! JSON handlers for the signed-in user's profile and session.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use lumen_app::ports::{
    BlobStore, ChangePublisher, DeviceRepository, IdentityProvider, LogStore, MediaPicker,
    ProfileRepository,
};
use lumen_domain::profile::UserProfile;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for updating the profile.
#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub username: String,
}

/// Possible responses from the sign-out endpoint.
pub enum SignOutResponse {
    NoContent,
}

impl IntoResponse for SignOutResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/profile`
///
/// The resolved profile: missing fields are already filled with their
/// fallbacks, so clients render it as-is.
pub async fn get<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
) -> Result<Json<UserProfile>, ApiError>
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
    Ok(Json(profile))
}

/// `PUT /api/profile`
pub async fn update<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let saved = state.account_service.save_profile(req.username, None).await?;
    Ok(Json(saved))
}

/// `POST /api/profile/image`
///
/// Runs the media picker and, if the user chose an image, uploads it and
/// saves the profile. A cancelled pick returns the profile unchanged.
pub async fn update_image<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
) -> Result<Json<UserProfile>, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    let current = state.account_service.load_profile().await?;
    let Some(image) = state.account_service.pick_profile_image().await? else {
        return Ok(Json(current));
    };

    let saved = state
        .account_service
        .save_profile(current.username, Some(image))
        .await?;
    Ok(Json(saved))
}

/// `POST /api/session/sign-out`
pub async fn sign_out<DR, LS, CP, IP, PR, BS, MP>(
    State(state): State<AppState<DR, LS, CP, IP, PR, BS, MP>>,
) -> Result<SignOutResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LS: LogStore + Send + Sync + 'static,
    CP: ChangePublisher + Send + Sync + 'static,
    IP: IdentityProvider + Send + Sync + 'static,
    PR: ProfileRepository + Send + Sync + 'static,
    BS: BlobStore + Send + Sync + 'static,
    MP: MediaPicker + Send + Sync + 'static,
{
    state.account_service.sign_out().await?;
    Ok(SignOutResponse::NoContent)
}
