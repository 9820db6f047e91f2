use serde::{Deserialize, Serialize};

use super::word::{classify_phrase, WordState};
use crate::lyrics::{AlignedLyrics, Phrase, TimedToken};
use crate::playback::PlaybackState;

/// Highlight state derived from one playback position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightSnapshot {
    /// Phrase under the playhead (0 before the first phrase starts)
    pub active_phrase_index: usize,
    /// Onset of the last token already reached, if any
    pub active_word_time: Option<f64>,
}

impl HighlightSnapshot {
    /// Per-word states for the active phrase; other phrases are not classified
    pub fn word_states(&self, lyrics: &AlignedLyrics) -> Vec<WordState> {
        lyrics
            .phrase(self.active_phrase_index)
            .map(|phrase| classify_phrase(phrase, self.active_word_time))
            .unwrap_or_default()
    }
}

/// Recompute the highlight state for the current playback position
pub fn snapshot(playback: &PlaybackState, lyrics: &AlignedLyrics) -> HighlightSnapshot {
    HighlightSnapshot {
        active_phrase_index: active_phrase_index(lyrics.phrases(), playback.current_time),
        active_word_time: active_word_time(lyrics.timing(), playback.current_time),
    }
}

/// Index of the last phrase with `time <= current_time`, or 0 if none has started
pub fn active_phrase_index(phrases: &[Phrase], current_time: f64) -> usize {
    phrases
        .iter()
        .rposition(|phrase| phrase.time <= current_time)
        .unwrap_or(0)
}

/// Time of the last token with `time <= current_time`
pub fn active_word_time(timing: &[TimedToken], current_time: f64) -> Option<f64> {
    timing
        .iter()
        .rev()
        .find(|token| token.time <= current_time)
        .map(|token| token.time)
}
