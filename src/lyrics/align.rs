use serde::{Deserialize, Serialize};
use tracing::debug;

use super::normalize::normalize;
use super::types::{AlignedLyrics, Phrase, TimedToken, TimedWord};

/// What to do with a transcript that has no usable lines after trimming
/// while a timing sequence is present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTranscriptPolicy {
    /// Treat the transcript as absent: one phrase per timing token
    #[default]
    FallbackToTokens,
    /// Keep the empty phrase list (nothing is displayed)
    Empty,
}

/// Merges a line-broken transcript with a word-level timing sequence
///
/// Matching is greedy and leftmost: a single cursor walks the timing
/// sequence across all lines and never moves backwards, so no token is
/// consumed twice. Words that find no token inherit the last known time.
/// Alignment never fails; mismatches degrade to stale timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aligner {
    policy: EmptyTranscriptPolicy,
}

/// Result of aligning one transcript line
struct LineAlignment {
    phrase: Phrase,
    cursor: usize,
    matched: usize,
}

impl Aligner {
    pub fn new(policy: EmptyTranscriptPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> EmptyTranscriptPolicy {
        self.policy
    }

    /// Build phrase-segmented lyrics from an optional transcript and the timing sequence
    pub fn align(&self, transcript: Option<&str>, timing: &[TimedToken]) -> AlignedLyrics {
        let Some(text) = transcript.filter(|t| !t.is_empty()) else {
            return one_phrase_per_token(timing);
        };

        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_matches(is_blank))
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return match self.policy {
                EmptyTranscriptPolicy::FallbackToTokens => {
                    debug!("Transcript is blank, falling back to one phrase per token");
                    one_phrase_per_token(timing)
                }
                EmptyTranscriptPolicy::Empty => {
                    debug!("Transcript is blank, keeping an empty phrase list");
                    AlignedLyrics::new(Vec::new(), timing.to_vec())
                }
            };
        }

        let keys: Vec<String> = timing.iter().map(|token| normalize(&token.text)).collect();

        let mut phrases = Vec::with_capacity(lines.len());
        let mut cursor = 0;
        let mut carried_time = 0.0;
        let mut matched = 0;
        let mut total_words = 0;

        for line in lines {
            let aligned = align_line(line, timing, &keys, cursor, carried_time);

            cursor = aligned.cursor;
            carried_time = aligned.phrase.time;
            matched += aligned.matched;
            total_words += aligned.phrase.words.len();
            phrases.push(aligned.phrase);
        }

        debug!(
            "Aligned {} phrases: {}/{} words matched, {} timing tokens consumed of {}",
            phrases.len(),
            matched,
            total_words,
            cursor,
            timing.len()
        );

        AlignedLyrics::new(phrases, timing.to_vec())
    }
}

/// Whitespace, plus the byte-order mark a transcript file may start with
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Align with the default policy
pub fn align(transcript: Option<&str>, timing: &[TimedToken]) -> AlignedLyrics {
    Aligner::default().align(transcript, timing)
}

/// Degenerate mode: each timing token becomes its own single-word phrase
fn one_phrase_per_token(timing: &[TimedToken]) -> AlignedLyrics {
    let phrases = timing
        .iter()
        .map(|token| Phrase {
            text: token.text.clone(),
            time: token.time,
            words: vec![TimedWord {
                text: token.text.clone(),
                time: token.time,
            }],
        })
        .collect();

    AlignedLyrics::new(phrases, timing.to_vec())
}

/// Match the words of one line starting at `cursor`
///
/// `carried_time` is the previous phrase's time, used as the provisional
/// phrase time once the cursor has run past the end of the timing sequence.
fn align_line(
    line: &str,
    timing: &[TimedToken],
    keys: &[String],
    mut cursor: usize,
    carried_time: f64,
) -> LineAlignment {
    let provisional = timing.get(cursor).map_or(carried_time, |token| token.time);

    let mut first_match = None;
    let mut words: Vec<TimedWord> = Vec::new();
    let mut matched = 0;

    for display in line.split(is_blank).filter(|word| !word.is_empty()) {
        let key = normalize(display);
        let hit = keys[cursor..]
            .iter()
            .position(|candidate| *candidate == key)
            .map(|offset| cursor + offset);

        let time = match hit {
            Some(index) => {
                cursor = index + 1;
                matched += 1;
                let time = timing[index].time;
                first_match.get_or_insert(time);
                time
            }
            // Miss: keep the last known time, leave the cursor alone
            None => words.last().map_or(provisional, |word| word.time),
        };

        words.push(TimedWord {
            text: display.to_string(),
            time,
        });
    }

    LineAlignment {
        phrase: Phrase {
            text: line.to_string(),
            time: first_match.unwrap_or(provisional),
            words,
        },
        cursor,
        matched,
    }
}
