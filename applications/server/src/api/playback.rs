/// Playback control API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, Json};
use mindful_playback::PlaybackSnapshot;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PlayCommand {
    pub file: String,
    #[serde(rename = "loop", default)]
    pub looping: bool,
}

#[derive(Debug, Deserialize)]
pub struct VolumeCommand {
    /// Linear level; values outside [0, 1] are clamped
    pub level: f32,
}

/// GET /api/playback - Current playback state
pub async fn get_playback(State(app_state): State<AppState>) -> Json<PlaybackSnapshot> {
    Json(app_state.player.lock().await.snapshot())
}

/// POST /api/playback/play - Start playing an asset
pub async fn play(
    State(app_state): State<AppState>,
    Json(command): Json<PlayCommand>,
) -> Result<Json<PlaybackSnapshot>> {
    let mut player = app_state.player.lock().await;
    player.play(&command.file, command.looping).await?;
    Ok(Json(player.snapshot()))
}

/// POST /api/playback/pause - Pause playback
pub async fn pause(State(app_state): State<AppState>) -> Result<Json<PlaybackSnapshot>> {
    let mut player = app_state.player.lock().await;
    player.pause().await?;
    Ok(Json(player.snapshot()))
}

/// POST /api/playback/resume - Resume playback
pub async fn resume(State(app_state): State<AppState>) -> Result<Json<PlaybackSnapshot>> {
    let mut player = app_state.player.lock().await;
    player.resume().await?;
    Ok(Json(player.snapshot()))
}

/// POST /api/playback/stop - Stop playback
pub async fn stop(State(app_state): State<AppState>) -> Result<Json<PlaybackSnapshot>> {
    let mut player = app_state.player.lock().await;
    player.stop().await?;
    Ok(Json(player.snapshot()))
}

/// POST /api/playback/volume - Set volume
pub async fn set_volume(
    State(app_state): State<AppState>,
    Json(command): Json<VolumeCommand>,
) -> Result<Json<PlaybackSnapshot>> {
    let mut player = app_state.player.lock().await;
    player.set_volume(command.level).await?;
    Ok(Json(player.snapshot()))
}
