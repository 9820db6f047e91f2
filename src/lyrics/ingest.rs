use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::align::Aligner;
use super::types::{AlignedLyrics, TimedToken};

/// Word-timing record as produced by the transcription backend
///
/// Producers disagree on the name of the onset field, so both `time` and
/// `start` are accepted. `end` is carried by some producers and ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTimingEntry {
    pub text: String,
    #[serde(alias = "start")]
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

/// Lyric artifacts embedded in a completed job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LyricsPayload {
    /// Word-timing sequence (array), absent, or the backend's error string
    #[serde(default)]
    pub lyrics_json: Option<Value>,

    /// Raw transcript, one phrase per line
    #[serde(default)]
    pub lyrics_txt: Option<String>,
}

impl LyricsPayload {
    pub fn new(timing: &[TimedToken], transcript: Option<&str>) -> Self {
        let entries: Vec<Value> = timing
            .iter()
            .map(|token| serde_json::json!({ "text": token.text, "time": token.time }))
            .collect();

        Self {
            lyrics_json: Some(Value::Array(entries)),
            lyrics_txt: transcript.map(str::to_string),
        }
    }

    /// Validated timing sequence
    pub fn timing(&self) -> Result<Vec<TimedToken>> {
        match &self.lyrics_json {
            None | Some(Value::Null) => Ok(Vec::new()),
            // The job pipeline reports failures in-band, e.g. "Error: Could not connect ..."
            Some(Value::String(message)) => {
                bail!("Backend returned no timing data: {}", message)
            }
            Some(value) => {
                let entries: Vec<RawTimingEntry> = serde_json::from_value(value.clone())
                    .context("Malformed word-timing sequence")?;
                validate(entries)
            }
        }
    }

    /// Transcript text, `None` when absent or empty
    pub fn transcript(&self) -> Option<&str> {
        self.lyrics_txt.as_deref().filter(|text| !text.is_empty())
    }

    pub fn align_with(&self, aligner: &Aligner) -> Result<AlignedLyrics> {
        let timing = self.timing()?;
        Ok(aligner.align(self.transcript(), &timing))
    }
}

/// Parse a JSON array of timing records into canonical tokens
pub fn parse_timing(json: &str) -> Result<Vec<TimedToken>> {
    let entries: Vec<RawTimingEntry> =
        serde_json::from_str(json).context("Malformed word-timing sequence")?;
    validate(entries)
}

/// Reject unusable times and restore non-decreasing order
pub fn validate(entries: Vec<RawTimingEntry>) -> Result<Vec<TimedToken>> {
    let mut tokens = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.time.is_finite() || entry.time < 0.0 {
            bail!(
                "Timing entry {} ({:?}) has invalid time {}",
                index,
                entry.text,
                entry.time
            );
        }
        tokens.push(TimedToken::new(entry.text, entry.time));
    }

    let ordered = tokens.windows(2).all(|pair| pair[0].time <= pair[1].time);
    if !ordered {
        warn!(
            "Timing sequence of {} tokens is out of order, sorting by time",
            tokens.len()
        );
        tokens.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    Ok(tokens)
}
