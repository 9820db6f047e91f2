use crate::highlight::{HighlightSnapshot, WordState};
use crate::lyrics::AlignedLyrics;

/// Plain-text lyrics window around the active phrase
///
/// The active phrase is prefixed with `>` and its active word bracketed;
/// the `radius` phrases on either side are shown as whole lines.
pub fn render_window(lyrics: &AlignedLyrics, snapshot: &HighlightSnapshot, radius: usize) -> Vec<String> {
    let active = snapshot.active_phrase_index;
    let start = active.saturating_sub(radius);
    let end = (active + radius + 1).min(lyrics.len());

    (start..end)
        .filter_map(|index| {
            let phrase = lyrics.phrase(index)?;
            if index != active {
                return Some(format!("  {}", phrase.text));
            }

            let states = snapshot.word_states(lyrics);
            let words: Vec<String> = phrase
                .words
                .iter()
                .zip(states)
                .map(|(word, state)| match state {
                    WordState::Active => format!("[{}]", word.text),
                    WordState::Past | WordState::Future => word.text.clone(),
                })
                .collect();

            Some(format!("> {}", words.join(" ")))
        })
        .collect()
}

/// `m:ss` timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() { seconds.max(0.0) as u64 } else { 0 };
    format!("{}:{:02}", total / 60, total % 60)
}
