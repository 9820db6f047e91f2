use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::capture::CaptureConfig;
use crate::lyrics::EmptyTranscriptPolicy;
use crate::session::SessionConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub lyrics: LyricsConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub capture: CaptureSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Default, Deserialize)]
pub struct LyricsConfig {
    /// Handling of a transcript with no usable lines
    #[serde(default)]
    pub empty_transcript: EmptyTranscriptPolicy,
}

#[derive(Debug, Deserialize)]
pub struct PlaybackConfig {
    pub tick_interval_ms: u64,
    pub skip_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            skip_secs: 10.0,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CaptureSettings {
    pub recordings_path: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub buffer_duration_ms: u64,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        let defaults = CaptureConfig::default();
        Self {
            recordings_path: "recordings".to_string(),
            sample_rate: defaults.sample_rate,
            channels: defaults.channels,
            buffer_duration_ms: defaults.buffer_duration_ms,
        }
    }
}

impl Config {
    /// Load from a config file (extension optional) with `SINGALONG__` environment overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SINGALONG").separator("__"))
            .build()
            .with_context(|| format!("Failed to load config from {}", path))?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }

    /// Recordings directory with `~` expanded
    pub fn recordings_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.capture.recordings_path).into_owned())
    }

    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            sample_rate: self.capture.sample_rate,
            channels: self.capture.channels,
            buffer_duration_ms: self.capture.buffer_duration_ms,
        }
    }

    /// Session settings for a new session (fresh session id)
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            tick_interval: Duration::from_millis(self.playback.tick_interval_ms.max(1)),
            skip_secs: self.playback.skip_secs,
            recordings_path: self.recordings_path(),
            ..SessionConfig::default()
        }
    }
}
