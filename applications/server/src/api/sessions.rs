/// Session, cue and progress API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mindful_core::{Cue, Session, SessionId, SessionStore};
use mindful_playback::PlaybackSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<Session>,
}

#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub session_id: SessionId,
    pub created: bool,
}

#[derive(Debug, Serialize)]
pub struct CuesResponse {
    pub session_id: SessionId,
    pub cues: Vec<Cue>,
}

#[derive(Debug, Deserialize)]
pub struct AddCueRequest {
    pub time_sec: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub session_id: SessionId,
    pub last_position: i64,
    /// Unix seconds of the last checkpoint, absent if never played
    pub updated_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeSessionRequest {
    pub file: String,
    #[serde(rename = "loop", default)]
    pub looping: bool,
}

#[derive(Debug, Serialize)]
pub struct ResumeSessionResponse {
    pub resumed_from: u64,
    pub playback: PlaybackSnapshot,
}

/// GET /api/sessions - List all sessions
pub async fn list_sessions(State(app_state): State<AppState>) -> Result<Json<SessionsResponse>> {
    let sessions = app_state.db.list_sessions().await?;
    Ok(Json(SessionsResponse { sessions }))
}

/// GET /api/sessions/:id - Get one session
pub async fn get_session(
    State(app_state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<Session>> {
    app_state
        .db
        .get_session(id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("Session {id} not found")))
}

/// POST /api/sessions/:id - Initialize a session and make it active
///
/// Responds 201 when the row was created, 200 when it already existed.
pub async fn initialize_session(
    State(app_state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<(StatusCode, Json<InitializeResponse>)> {
    let created = app_state.player.lock().await.initialize_session(id).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(InitializeResponse {
            session_id: id,
            created,
        }),
    ))
}

/// GET /api/sessions/:id/cues - Cues in chronological order
pub async fn get_cues(
    State(app_state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<CuesResponse>> {
    let cues = app_state.player.lock().await.get_cues(id).await?;
    Ok(Json(CuesResponse {
        session_id: id,
        cues,
    }))
}

/// POST /api/sessions/:id/cues - Add a cue
pub async fn add_cue(
    State(app_state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(request): Json<AddCueRequest>,
) -> Result<(StatusCode, Json<Cue>)> {
    let cue = app_state
        .player
        .lock()
        .await
        .add_cue(id, request.time_sec, request.message)
        .await?;

    Ok((StatusCode::CREATED, Json(cue)))
}

/// GET /api/sessions/:id/progress - Stored playback position
pub async fn get_progress(
    State(app_state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<ProgressResponse>> {
    if !app_state.db.session_exists(id).await? {
        return Err(ServerError::NotFound(format!("Session {id} not found")));
    }

    let progress = app_state.db.get_progress(id).await?;

    Ok(Json(ProgressResponse {
        session_id: id,
        last_position: progress.as_ref().map_or(0, |p| p.last_position),
        updated_at: progress.map(|p| p.updated_at),
    }))
}

/// POST /api/sessions/:id/resume - Play a file from the stored position
pub async fn resume_session(
    State(app_state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(request): Json<ResumeSessionRequest>,
) -> Result<Json<ResumeSessionResponse>> {
    let mut player = app_state.player.lock().await;
    let offset = player
        .resume_session(id, &request.file, request.looping)
        .await?;

    Ok(Json(ResumeSessionResponse {
        resumed_from: offset.as_secs(),
        playback: player.snapshot(),
    }))
}
