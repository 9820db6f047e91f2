use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stateless alignment
        .route("/lyrics/align", post(handlers::align_lyrics))
        // Playback sessions
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:session_id",
            get(handlers::get_session_status).delete(handlers::stop_session),
        )
        .route("/sessions/:session_id/lyrics", get(handlers::get_session_lyrics))
        .route("/sessions/:session_id/frame", get(handlers::get_session_frame))
        .route("/sessions/:session_id/seek", post(handlers::seek_session))
        .route("/sessions/:session_id/play", post(handlers::play_session))
        .route("/sessions/:session_id/pause", post(handlers::pause_session))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        // The front-end is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
