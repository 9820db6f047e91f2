use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::render::ViewportLayout;

/// Configuration for a playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-<uuid>")
    pub session_id: String,

    /// How often the playback position is sampled
    /// Default: 250ms (media position callbacks arrive a few times per second)
    pub tick_interval: Duration,

    /// Step for skip forward / back, in seconds
    pub skip_secs: f64,

    /// Directory for recorded takes
    pub recordings_path: PathBuf,

    /// Viewport geometry for auto-scroll
    pub layout: ViewportLayout,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            tick_interval: Duration::from_millis(250),
            skip_secs: 10.0,
            recordings_path: PathBuf::from("recordings"),
            layout: ViewportLayout::default(),
        }
    }
}
