use serde::{Deserialize, Serialize};

use crate::lyrics::{Phrase, TimedWord};

/// Display state of a word in the active phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordState {
    Active,
    Past,
    Future,
}

/// Classify `words[index]` against the active word time
///
/// A word is active from its own onset until the next word's onset (the
/// last word stays active). It is past once the next word has been reached
/// and the playhead is strictly beyond its own onset. Anything else,
/// including every word when no token has been reached, is future.
pub fn classify_word(words: &[TimedWord], index: usize, active_word_time: Option<f64>) -> WordState {
    let (Some(word), Some(now)) = (words.get(index), active_word_time) else {
        return WordState::Future;
    };
    let next = words.get(index + 1);

    let before_next = next.map_or(true, |next| now < next.time);
    if now >= word.time && before_next {
        return WordState::Active;
    }

    if now > word.time && next.is_some_and(|next| now >= next.time) {
        return WordState::Past;
    }

    WordState::Future
}

pub fn classify_phrase(phrase: &Phrase, active_word_time: Option<f64>) -> Vec<WordState> {
    (0..phrase.words.len())
        .map(|index| classify_word(&phrase.words, index, active_word_time))
        .collect()
}
