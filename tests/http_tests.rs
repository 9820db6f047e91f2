// Integration tests for the HTTP API
//
// Requests are dispatched straight into the router without binding a socket.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use singalong::http::CreateSessionResponse;
use singalong::{create_router, AppState};
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::default())
}

fn twinkle_payload() -> Value {
    json!({
        "lyrics_json": [
            {"text": "twinkle", "start": 1.0, "end": 1.8},
            {"text": "twinkle", "start": 2.0, "end": 2.8},
            {"text": "little", "start": 3.0, "end": 3.8},
            {"text": "star", "start": 4.0, "end": 4.8}
        ],
        "lyrics_txt": "Twinkle, twinkle,\nlittle star,\n"
    })
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Vec<u8>)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, body.to_vec()))
}

async fn send_json(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let (status, body) = send(app, request).await?;
    Ok((status, serde_json::from_slice(&body)?))
}

#[tokio::test]
async fn test_health_check() -> Result<()> {
    let (status, body) = send(&app(), empty_request("GET", "/health")).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
    Ok(())
}

#[tokio::test]
async fn test_align_returns_phrases() -> Result<()> {
    let (status, body) =
        send_json(&app(), json_request("POST", "/lyrics/align", &twinkle_payload())).await?;

    assert_eq!(status, StatusCode::OK);
    let phrases = body["phrases"].as_array().expect("phrases array");
    assert_eq!(phrases.len(), 2);
    assert_eq!(phrases[0]["text"], "Twinkle, twinkle,");
    assert_eq!(phrases[0]["time"], 1.0);
    assert_eq!(phrases[1]["time"], 3.0);
    assert_eq!(phrases[1]["words"][1]["text"], "star,");
    assert_eq!(phrases[1]["words"][1]["time"], 4.0);
    Ok(())
}

#[tokio::test]
async fn test_align_rejects_backend_error_string() -> Result<()> {
    let payload = json!({
        "lyrics_json": "Error: Could not connect to transcription service",
        "lyrics_txt": "Error: Could not connect to transcription service"
    });

    let (status, body) = send_json(&app(), json_request("POST", "/lyrics/align", &payload)).await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .contains("Could not connect"));
    Ok(())
}

#[tokio::test]
async fn test_session_lifecycle() -> Result<()> {
    let app = app();
    let request = json!({
        "session_id": "lifecycle",
        "title": "Twinkle Twinkle",
        "duration_secs": 30.0,
        "lyrics": twinkle_payload()
    });

    let (status, body) = send(&app, json_request("POST", "/sessions", &request)).await?;
    assert_eq!(status, StatusCode::CREATED);
    let created: CreateSessionResponse = serde_json::from_slice(&body)?;
    assert_eq!(created.session_id, "lifecycle");
    assert_eq!(created.phrase_count, 2);

    let (status, lyrics) = send_json(&app, empty_request("GET", "/sessions/lifecycle/lyrics")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lyrics["phrases"].as_array().map(Vec::len), Some(2));

    let (status, playback) = send_json(
        &app,
        json_request("POST", "/sessions/lifecycle/seek", &json!({"position": 3.5})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(playback["current_time"], 3.5);
    assert_eq!(playback["is_playing"], false);

    let (status, frame) = send_json(&app, empty_request("GET", "/sessions/lifecycle/frame")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(frame["snapshot"]["active_phrase_index"], 1);
    assert_eq!(frame["snapshot"]["active_word_time"], 3.0);
    assert_eq!(frame["word_states"], json!(["active", "future"]));
    assert_eq!(frame["scroll"]["phrase_index"], 1);

    let (status, playback) = send_json(&app, empty_request("POST", "/sessions/lifecycle/play")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(playback["is_playing"], true);

    let (status, playback) = send_json(&app, empty_request("POST", "/sessions/lifecycle/pause")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(playback["is_playing"], false);

    let (status, stats) = send_json(&app, empty_request("GET", "/sessions/lifecycle")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["song_title"], "Twinkle Twinkle");
    assert_eq!(stats["phrase_count"], 2);
    assert_eq!(stats["active_phrase_index"], 1);

    let (status, stats) = send_json(&app, empty_request("DELETE", "/sessions/lifecycle")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["session_id"], "lifecycle");
    assert_eq!(stats["capturing"], false);

    let (status, _) = send(&app, empty_request("GET", "/sessions/lifecycle")).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_session_is_rejected() -> Result<()> {
    let app = app();
    let request = json!({
        "session_id": "dup",
        "title": "Twinkle",
        "lyrics": twinkle_payload()
    });

    let (status, _) = send(&app, json_request("POST", "/sessions", &request)).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(&app, json_request("POST", "/sessions", &request)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap_or_default().contains("dup"));
    Ok(())
}

#[tokio::test]
async fn test_session_ids_are_generated() -> Result<()> {
    let request = json!({"title": "No Id", "lyrics": {"lyrics_json": null}});

    let (status, body) = send(&app(), json_request("POST", "/sessions", &request)).await?;

    assert_eq!(status, StatusCode::CREATED);
    let created: CreateSessionResponse = serde_json::from_slice(&body)?;
    assert!(created.session_id.starts_with("session-"));
    assert_eq!(created.phrase_count, 0);
    Ok(())
}

#[tokio::test]
async fn test_unknown_session_is_not_found() -> Result<()> {
    let app = app();

    for request in [
        empty_request("GET", "/sessions/missing"),
        empty_request("GET", "/sessions/missing/frame"),
        empty_request("POST", "/sessions/missing/play"),
        empty_request("DELETE", "/sessions/missing"),
    ] {
        let (status, _) = send(&app, request).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    Ok(())
}

#[tokio::test]
async fn test_seek_clamps_to_track() -> Result<()> {
    let app = app();
    let request = json!({
        "session_id": "clamp",
        "title": "Twinkle",
        "duration_secs": 5.0,
        "lyrics": twinkle_payload()
    });
    send(&app, json_request("POST", "/sessions", &request)).await?;

    let (status, playback) = send_json(
        &app,
        json_request("POST", "/sessions/clamp/seek", &json!({"position": 60.0})),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(playback["current_time"], 5.0);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_creates_with_same_id_admit_one() -> Result<()> {
    let app = app();
    let request = json!({
        "session_id": "race",
        "title": "Twinkle",
        "lyrics": twinkle_payload()
    });

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        let request = json_request("POST", "/sessions", &request);
        tasks.push(tokio::spawn(async move { send(&app, request).await }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for task in tasks {
        let (status, _) = task.await??;
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("Unexpected status {}", other),
        }
    }

    assert_eq!(created, 1, "Exactly one create wins");
    assert_eq!(conflicts, 7);
    Ok(())
}

#[tokio::test]
async fn test_session_without_timing_keeps_its_own_transcript() -> Result<()> {
    let app = app();
    let request = json!({
        "session_id": "untimed",
        "title": "Untimed",
        "lyrics": {"lyrics_txt": "first line\nsecond line\n"}
    });

    let (status, _) = send(&app, json_request("POST", "/sessions", &request)).await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, lyrics) = send_json(&app, empty_request("GET", "/sessions/untimed/lyrics")).await?;
    let phrases = lyrics["phrases"].as_array().expect("phrases array");
    assert_eq!(phrases.len(), 2, "No demo lyrics substituted");
    assert_eq!(phrases[0]["text"], "first line");
    assert_eq!(phrases[1]["time"], 0.0);
    assert!(lyrics["timing"].as_array().is_some_and(Vec::is_empty));
    Ok(())
}
