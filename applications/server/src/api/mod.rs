/// API route modules
pub mod activities;
pub mod assets;
pub mod health;
pub mod playback;
pub mod sessions;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full `/api` router
pub fn router(app_state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health))
        // Activities
        .route(
            "/activities",
            get(activities::list_activities).post(activities::create_activity),
        )
        .route(
            "/activities/:id",
            get(activities::get_activity)
                .put(activities::update_activity)
                .delete(activities::delete_activity),
        )
        // Sessions and cues
        .route("/sessions", get(sessions::list_sessions))
        .route(
            "/sessions/:id",
            get(sessions::get_session).post(sessions::initialize_session),
        )
        .route(
            "/sessions/:id/cues",
            get(sessions::get_cues).post(sessions::add_cue),
        )
        .route("/sessions/:id/progress", get(sessions::get_progress))
        .route("/sessions/:id/resume", post(sessions::resume_session))
        // Playback
        .route("/playback", get(playback::get_playback))
        .route("/playback/play", post(playback::play))
        .route("/playback/pause", post(playback::pause))
        .route("/playback/resume", post(playback::resume))
        .route("/playback/stop", post(playback::stop))
        .route("/playback/volume", post(playback::set_volume))
        // Assets
        .route("/assets/:file", get(assets::get_asset_info))
        .route("/assets/:file/duration", get(assets::get_duration));

    Router::new()
        .nest("/api", routes)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
