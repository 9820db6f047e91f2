use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Current position of the playing track
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Position in seconds
    pub current_time: f64,
    /// Track length in seconds (0 while unknown)
    pub duration: f64,
    pub is_playing: bool,
}

impl PlaybackState {
    /// State at a fixed position, used for one-off highlight queries
    pub fn at(current_time: f64) -> Self {
        Self {
            current_time,
            ..Self::default()
        }
    }

    /// Whether the position has reached the end of a track of known length
    pub fn has_ended(&self) -> bool {
        self.duration > 0.0 && self.current_time >= self.duration
    }
}

/// Real-time media position source
///
/// Minimal synchronous surface over the playback facility. Implementations
/// are the only writers of playback state.
pub trait PlaybackClock: Send {
    /// Read the current position
    fn state(&self) -> PlaybackState;

    /// Move to `position` seconds, effective immediately
    fn seek(&mut self, position: f64);

    fn play(&mut self);

    fn pause(&mut self);

    /// Seek relative to the current position
    fn skip(&mut self, delta: f64) {
        let now = self.state().current_time;
        self.seek(now + delta);
    }

    /// Clock name for logging
    fn name(&self) -> &str;
}

/// Clock driven by the runtime's monotonic time, for headless playback
///
/// Positions are clamped to `[0, duration]`; with an unknown duration (0)
/// there is no upper bound. Reaching the end stops playback.
#[derive(Debug)]
pub struct SimulatedClock {
    duration: f64,
    /// Position when `started_at` was taken (or the paused position)
    position: f64,
    /// Set while playing
    started_at: Option<Instant>,
}

impl SimulatedClock {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: if duration.is_finite() { duration.max(0.0) } else { 0.0 },
            position: 0.0,
            started_at: None,
        }
    }

    fn clamp(&self, position: f64) -> f64 {
        let position = position.max(0.0);
        if self.duration > 0.0 {
            position.min(self.duration)
        } else {
            position
        }
    }

    fn position(&self) -> f64 {
        match self.started_at {
            Some(started_at) => self.clamp(self.position + started_at.elapsed().as_secs_f64()),
            None => self.position,
        }
    }
}

impl PlaybackClock for SimulatedClock {
    fn state(&self) -> PlaybackState {
        let current_time = self.position();
        let state = PlaybackState {
            current_time,
            duration: self.duration,
            is_playing: self.started_at.is_some(),
        };

        PlaybackState {
            is_playing: state.is_playing && !state.has_ended(),
            ..state
        }
    }

    fn seek(&mut self, position: f64) {
        self.position = self.clamp(position);
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    fn play(&mut self) {
        // Playing a finished track starts it over
        if self.duration > 0.0 && self.position() >= self.duration {
            self.position = 0.0;
            self.started_at = None;
        }
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.position = self.position();
        self.started_at = None;
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
