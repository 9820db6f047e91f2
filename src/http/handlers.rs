use super::state::AppState;
use crate::lyrics::LyricsPayload;
use crate::playback::SimulatedClock;
use crate::session::{KaraokeSession, SessionConfig, SongInfo};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    pub title: String,

    pub artist: Option<String>,

    /// Track length in seconds (0 or absent = unknown)
    pub duration_secs: Option<f64>,

    /// Lyric artifacts of the completed job
    pub lyrics: LyricsPayload,

    /// Start playing right away
    #[serde(default)]
    pub autoplay: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub phrase_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct SeekRequest {
    /// Position in seconds
    pub position: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn session_not_found(session_id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Session {} not found", session_id),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /lyrics/align
/// Align a job payload and return the phrase structure
pub async fn align_lyrics(
    State(state): State<AppState>,
    Json(payload): Json<LyricsPayload>,
) -> impl IntoResponse {
    match payload.align_with(&state.aligner) {
        Ok(lyrics) => (StatusCode::OK, Json(lyrics)).into_response(),
        Err(e) => {
            warn!("Rejected lyrics payload: {:#}", e);
            error_response(StatusCode::UNPROCESSABLE_ENTITY, format!("{:#}", e))
        }
    }
}

/// POST /sessions
/// Load a song into a new playback session
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));

    info!("Creating session {} for \"{}\"", session_id, req.title);

    let lyrics = match req.lyrics.align_with(&state.aligner) {
        Ok(lyrics) => lyrics,
        Err(e) => {
            warn!("Rejected lyrics payload for {}: {:#}", session_id, e);
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, format!("{:#}", e));
        }
    };
    let phrase_count = lyrics.len();

    let config = SessionConfig {
        session_id: session_id.clone(),
        ..state.session_defaults.clone()
    };
    let song = SongInfo {
        title: req.title,
        artist: req.artist,
    };
    let clock = SimulatedClock::new(req.duration_secs.unwrap_or(0.0));

    let mut session = KaraokeSession::new(config, song, lyrics, Box::new(clock));
    if req.autoplay {
        session.play();
    }

    // Duplicate check and insert share one write guard
    {
        let mut sessions = state.sessions.write().await;
        match sessions.entry(session_id.clone()) {
            Entry::Occupied(_) => {
                return error_response(
                    StatusCode::CONFLICT,
                    format!("Session {} already exists", session_id),
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(session)));
            }
        }
    }

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            phrase_count,
        }),
    )
        .into_response()
}

/// GET /sessions/:session_id
/// Get status of a session
pub async fn get_session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.session(&session_id).await {
        Some(session) => {
            let stats = session.lock().await.stats();
            (StatusCode::OK, Json(stats)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/lyrics
/// Aligned lyrics of the loaded song
pub async fn get_session_lyrics(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.session(&session_id).await {
        Some(session) => {
            let lyrics = session.lock().await.lyrics().clone();
            (StatusCode::OK, Json(lyrics)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/frame
/// Highlight state at the current playback position
pub async fn get_session_frame(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.session(&session_id).await {
        Some(session) => {
            let frame = session.lock().await.tick();
            (StatusCode::OK, Json(frame)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/seek
pub async fn seek_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SeekRequest>,
) -> impl IntoResponse {
    if !req.position.is_finite() {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid seek position {}", req.position),
        );
    }

    match state.session(&session_id).await {
        Some(session) => {
            let playback = session.lock().await.seek(req.position);
            (StatusCode::OK, Json(playback)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/play
pub async fn play_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.session(&session_id).await {
        Some(session) => {
            let playback = session.lock().await.play();
            (StatusCode::OK, Json(playback)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/pause
pub async fn pause_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.session(&session_id).await {
        Some(session) => {
            let playback = session.lock().await.pause();
            (StatusCode::OK, Json(playback)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// DELETE /sessions/:session_id
/// End a session and release its resources
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("Stopping session: {}", session_id);

    // Find and remove session
    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match session {
        Some(session) => match session.lock().await.stop().await {
            Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
            Err(e) => {
                error!("Failed to stop session: {}", e);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to stop session: {}", e),
                )
            }
        },
        None => session_not_found(&session_id),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
