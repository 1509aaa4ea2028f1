/// Activities API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mindful_core::{Activity, ActivityId, NewActivity};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<Activity>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: ActivityId,
}

/// Rows touched by an update or delete
#[derive(Debug, Serialize)]
pub struct ChangesResponse {
    pub changes: u64,
}

fn validate(activity: &NewActivity) -> Result<()> {
    if activity.name.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "Activity name is required".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/activities - List all activities
pub async fn list_activities(
    State(app_state): State<AppState>,
) -> Result<Json<ActivitiesResponse>> {
    let activities = mindful_storage::activities::get_all(app_state.db.pool()).await?;
    Ok(Json(ActivitiesResponse { activities }))
}

/// GET /api/activities/:id - Get one activity
pub async fn get_activity(
    State(app_state): State<AppState>,
    Path(id): Path<ActivityId>,
) -> Result<Json<Activity>> {
    mindful_storage::activities::get_by_id(app_state.db.pool(), id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("Activity {id} not found")))
}

/// POST /api/activities - Create an activity
pub async fn create_activity(
    State(app_state): State<AppState>,
    Json(activity): Json<NewActivity>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    validate(&activity)?;

    let id = mindful_storage::activities::create(app_state.db.pool(), &activity).await?;
    tracing::info!(id, name = %activity.name, "Activity created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// PUT /api/activities/:id - Replace an activity
///
/// Unknown ids report zero changes.
pub async fn update_activity(
    State(app_state): State<AppState>,
    Path(id): Path<ActivityId>,
    Json(activity): Json<NewActivity>,
) -> Result<Json<ChangesResponse>> {
    validate(&activity)?;

    let changes = mindful_storage::activities::update(app_state.db.pool(), id, &activity).await?;
    Ok(Json(ChangesResponse { changes }))
}

/// DELETE /api/activities/:id - Delete an activity
pub async fn delete_activity(
    State(app_state): State<AppState>,
    Path(id): Path<ActivityId>,
) -> Result<Json<ChangesResponse>> {
    let changes = mindful_storage::activities::delete(app_state.db.pool(), id).await?;
    Ok(Json(ChangesResponse { changes }))
}
