//! Highlight state machine
//!
//! Pure projection of (playback position, aligned lyrics) onto the active
//! phrase and the active/past/future state of its words. Recomputed on every
//! position update; holds no state of its own.

pub mod snapshot;
pub mod word;

pub use snapshot::{active_phrase_index, active_word_time, snapshot, HighlightSnapshot};
pub use word::{classify_phrase, classify_word, WordState};
