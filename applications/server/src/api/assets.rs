/// Asset metadata API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DurationResponse {
    pub file: String,
    pub duration_secs: f64,
}

#[derive(Debug, Serialize)]
pub struct AssetInfoResponse {
    pub file: String,
    pub duration_secs: f64,
    pub sample_rate: Option<u32>,
    pub channels: Option<u8>,
    /// kbps
    pub bitrate: Option<u32>,
}

/// GET /api/assets/:file/duration - Duration of an asset in seconds
pub async fn get_duration(
    State(app_state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Json<DurationResponse>> {
    // Probing can take seconds; do not hold the player meanwhile
    let prober = app_state.player.lock().await.prober();
    let duration_secs = prober.fetch_duration(&file).await?;
    Ok(Json(DurationResponse {
        file,
        duration_secs,
    }))
}

/// GET /api/assets/:file - Structural metadata of an asset
pub async fn get_asset_info(
    State(app_state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Json<AssetInfoResponse>> {
    let prober = app_state.player.lock().await.prober();
    let info = prober.probe(&file).await?;
    Ok(Json(AssetInfoResponse {
        file,
        duration_secs: info.duration_secs(),
        sample_rate: info.sample_rate,
        channels: info.channels,
        bitrate: info.bitrate,
    }))
}
