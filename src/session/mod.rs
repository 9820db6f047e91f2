//! Playback session management
//!
//! This module provides the `KaraokeSession` abstraction that owns:
//! - The playback clock of the loaded song
//! - The aligned lyrics and the active-phrase tracking
//! - Auto-scroll state
//! - The optional microphone capture and its recorded take

mod config;
mod session;
mod stats;

pub use config::SessionConfig;
pub use session::{HighlightFrame, KaraokeSession, SongInfo};
pub use stats::SessionStats;
