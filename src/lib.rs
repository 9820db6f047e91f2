pub mod capture;
pub mod config;
pub mod highlight;
pub mod http;
pub mod lyrics;
pub mod playback;
pub mod render;
pub mod session;

pub use capture::{
    CaptureConfig, CaptureDevice, CaptureFrame, CaptureHandle, TakeMetadata, TakeRecorder,
    WavFileDevice,
};
pub use config::Config;
pub use highlight::{snapshot, HighlightSnapshot, WordState};
pub use http::{create_router, AppState};
pub use lyrics::{
    align, AlignedLyrics, Aligner, EmptyTranscriptPolicy, LyricsPayload, Phrase, TimedToken,
    TimedWord,
};
pub use playback::{PlaybackClock, PlaybackState, SimulatedClock};
pub use render::{ScrollCommand, ScrollDriver, ViewportLayout};
pub use session::{HighlightFrame, KaraokeSession, SessionConfig, SessionStats, SongInfo};
