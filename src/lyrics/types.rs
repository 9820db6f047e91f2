use serde::{Deserialize, Serialize};

/// One recognized word and its onset time in the track (seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedToken {
    pub text: String,
    pub time: f64,
}

impl TimedToken {
    pub fn new(text: impl Into<String>, time: f64) -> Self {
        Self {
            text: text.into(),
            time,
        }
    }
}

/// A display word with the time it inherited during alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedWord {
    /// Word as it appears in the phrase (punctuation preserved)
    pub text: String,
    pub time: f64,
}

/// One displayable lyric line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    /// Line text as authored (surrounding whitespace trimmed)
    pub text: String,

    /// Onset of the first matched word, or the carried-forward time
    pub time: f64,

    /// One entry per whitespace-delimited word of `text`
    pub words: Vec<TimedWord>,
}

/// Phrase-segmented, word-timed lyrics for one song
///
/// Built once per song load and never mutated afterwards. The flat timing
/// sequence is kept alongside the phrases because active-word lookup runs
/// over it directly, independent of phrase boundaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedLyrics {
    phrases: Vec<Phrase>,
    timing: Vec<TimedToken>,
}

impl AlignedLyrics {
    pub fn new(phrases: Vec<Phrase>, timing: Vec<TimedToken>) -> Self {
        Self { phrases, timing }
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn timing(&self) -> &[TimedToken] {
        &self.timing
    }

    pub fn phrase(&self, index: usize) -> Option<&Phrase> {
        self.phrases.get(index)
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
