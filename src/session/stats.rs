use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capture::TakeMetadata;

/// Statistics about a playback session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,

    /// Title of the loaded song
    pub song_title: String,

    /// Whether the track is currently playing
    pub is_playing: bool,

    /// Playback position in seconds
    pub position_secs: f64,

    /// Track length in seconds (0 if unknown)
    pub duration_secs: f64,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Wall-clock time since the session was created
    pub elapsed_secs: f64,

    /// Number of phrases in the loaded lyrics
    pub phrase_count: usize,

    pub active_phrase_index: usize,

    /// Position updates processed
    pub ticks: u64,

    /// How many times the active phrase changed
    pub phrase_changes: u64,

    /// Whether the microphone is being captured
    pub capturing: bool,

    /// Recorded take, once capture has been stopped
    pub take: Option<TakeMetadata>,
}
