//! Lyric reconstruction
//!
//! Turns the two artifacts of the transcription backend into phrase-level,
//! word-timed lyrics:
//! - `ingest`: parse and validate the word-timing sequence
//! - `normalize`: comparison key for words from different token streams
//! - `align`: merge the transcript lines with the timing sequence

pub mod align;
pub mod demo;
pub mod ingest;
pub mod normalize;
pub mod types;

pub use align::{align, Aligner, EmptyTranscriptPolicy};
pub use demo::demo_timing;
pub use ingest::{parse_timing, LyricsPayload, RawTimingEntry};
pub use normalize::{normalize, same_word};
pub use types::{AlignedLyrics, Phrase, TimedToken, TimedWord};
