//! HTTP API over the sing-along engine
//!
//! - POST /lyrics/align - Align a job payload without starting a session
//! - POST /sessions - Load a song into a new playback session
//! - GET /sessions/:id - Session status
//! - GET /sessions/:id/lyrics - Aligned lyrics of the loaded song
//! - GET /sessions/:id/frame - Highlight state at the current position
//! - POST /sessions/:id/seek | play | pause - Playback control
//! - DELETE /sessions/:id - End a session
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{CreateSessionRequest, CreateSessionResponse, ErrorResponse, SeekRequest};
pub use routes::create_router;
pub use state::AppState;
