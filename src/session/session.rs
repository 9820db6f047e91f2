use super::config::SessionConfig;
use super::stats::SessionStats;
use crate::capture::{CaptureDevice, CaptureHandle, TakeMetadata};
use crate::highlight::{self, HighlightSnapshot, WordState};
use crate::lyrics::AlignedLyrics;
use crate::playback::{PlaybackClock, PlaybackState};
use crate::render::{ScrollCommand, ScrollDriver};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Song metadata shown alongside the lyrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongInfo {
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
}

/// Everything the render layer needs for one position update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightFrame {
    pub playback: PlaybackState,
    pub snapshot: HighlightSnapshot,
    /// States of the active phrase's words
    pub word_states: Vec<WordState>,
    /// Set when the active phrase changed and the view should re-center
    pub scroll: Option<ScrollCommand>,
}

/// A sing-along session for one loaded song
///
/// Owns the song's playback clock, its aligned lyrics and the optional
/// microphone capture. All mutation goes through `&mut self`, so callers
/// that share a session serialize access with a single lock.
pub struct KaraokeSession {
    /// Session configuration
    config: SessionConfig,

    /// Playback clock of the loaded song
    clock: Box<dyn PlaybackClock>,

    song: SongInfo,

    lyrics: AlignedLyrics,

    /// Active phrase as of the last tick
    active_phrase_index: usize,

    scroll: ScrollDriver,

    /// Microphone capture, if acquired
    capture: Option<CaptureHandle>,

    /// When the session started
    started_at: DateTime<Utc>,

    ticks: u64,

    phrase_changes: u64,
}

impl KaraokeSession {
    /// Create a session with a song already loaded
    pub fn new(
        config: SessionConfig,
        song: SongInfo,
        lyrics: AlignedLyrics,
        clock: Box<dyn PlaybackClock>,
    ) -> Self {
        info!(
            "Creating session {} for \"{}\" ({} phrases, clock: {})",
            config.session_id,
            song.title,
            lyrics.len(),
            clock.name()
        );

        let scroll = ScrollDriver::new(config.layout);

        Self {
            config,
            clock,
            song,
            lyrics,
            active_phrase_index: 0,
            scroll,
            capture: None,
            started_at: Utc::now(),
            ticks: 0,
            phrase_changes: 0,
        }
    }

    /// Replace the loaded song
    ///
    /// Lyrics, clock, active phrase and scroll state are swapped together, so
    /// the next tick never pairs the old lyrics with the new clock or the
    /// reverse.
    pub fn load_song(&mut self, song: SongInfo, lyrics: AlignedLyrics, clock: Box<dyn PlaybackClock>) {
        info!(
            "Session {}: loading \"{}\" ({} phrases)",
            self.config.session_id,
            song.title,
            lyrics.len()
        );

        self.clock.pause();
        self.clock = clock;
        self.song = song;
        self.lyrics = lyrics;
        self.active_phrase_index = 0;
        self.scroll.reset();
    }

    /// Sample the clock once and derive the highlight state
    pub fn tick(&mut self) -> HighlightFrame {
        let playback = self.clock.state();
        let snapshot = highlight::snapshot(&playback, &self.lyrics);

        if snapshot.active_phrase_index != self.active_phrase_index {
            debug!(
                "Active phrase {} -> {} at {:.2}s",
                self.active_phrase_index, snapshot.active_phrase_index, playback.current_time
            );
            self.active_phrase_index = snapshot.active_phrase_index;
            self.phrase_changes += 1;
        }

        self.ticks += 1;

        HighlightFrame {
            playback,
            word_states: snapshot.word_states(&self.lyrics),
            scroll: self.scroll.on_snapshot(&snapshot),
            snapshot,
        }
    }

    /// Play until the track ends or is paused, handing every frame to `on_frame`
    pub async fn run<F>(&mut self, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HighlightFrame),
    {
        self.play();
        let mut ticker = tokio::time::interval(self.config.tick_interval);

        loop {
            ticker.tick().await;
            let frame = self.tick();
            on_frame(&frame);

            if !frame.playback.is_playing {
                info!(
                    "Playback stopped at {:.1}s",
                    frame.playback.current_time
                );
                break;
            }
        }

        Ok(())
    }

    pub fn play(&mut self) -> PlaybackState {
        self.clock.play();
        self.clock.state()
    }

    pub fn pause(&mut self) -> PlaybackState {
        self.clock.pause();
        self.clock.state()
    }

    pub fn toggle(&mut self) -> PlaybackState {
        if self.clock.state().is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    pub fn seek(&mut self, position: f64) -> PlaybackState {
        debug!("Seeking to {:.2}s", position);
        self.clock.seek(position);
        self.clock.state()
    }

    pub fn skip_forward(&mut self) -> PlaybackState {
        self.clock.skip(self.config.skip_secs);
        self.clock.state()
    }

    pub fn skip_back(&mut self) -> PlaybackState {
        self.clock.skip(-self.config.skip_secs);
        self.clock.state()
    }

    /// Acquire a capture device and record the take next to the session's recordings
    pub async fn start_capture(&mut self, device: Box<dyn CaptureDevice>) -> Result<()> {
        if self.capture.is_some() {
            warn!("Capture already started");
            return Ok(());
        }

        let take_path = self
            .config
            .recordings_path
            .join(format!("{}-take.wav", self.config.session_id));

        let handle = CaptureHandle::start(device, take_path).await?;
        info!("Capturing from {}", handle.device_name());
        self.capture = Some(handle);

        Ok(())
    }

    /// Stop capturing and return the recorded take
    pub async fn stop_capture(&mut self) -> Result<Option<TakeMetadata>> {
        match self.capture.take() {
            Some(handle) => Ok(Some(handle.stop().await?)),
            None => Ok(None),
        }
    }

    /// End the session: pause playback and release the capture device
    pub async fn stop(&mut self) -> Result<SessionStats> {
        info!("Stopping session: {}", self.config.session_id);

        self.clock.pause();

        let take = match self.stop_capture().await {
            Ok(take) => take,
            Err(e) => {
                error!("Failed to finish take: {}", e);
                None
            }
        };

        let mut stats = self.stats();
        stats.take = take;

        info!("Session stopped: {}", self.config.session_id);

        Ok(stats)
    }

    /// Current session statistics
    pub fn stats(&self) -> SessionStats {
        let playback = self.clock.state();
        let elapsed = Utc::now().signed_duration_since(self.started_at);

        SessionStats {
            session_id: self.config.session_id.clone(),
            song_title: self.song.title.clone(),
            is_playing: playback.is_playing,
            position_secs: playback.current_time,
            duration_secs: playback.duration,
            started_at: self.started_at,
            elapsed_secs: elapsed.num_milliseconds() as f64 / 1000.0,
            phrase_count: self.lyrics.len(),
            active_phrase_index: self.active_phrase_index,
            ticks: self.ticks,
            phrase_changes: self.phrase_changes,
            capturing: self.capture.is_some(),
            take: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn song(&self) -> &SongInfo {
        &self.song
    }

    pub fn lyrics(&self) -> &AlignedLyrics {
        &self.lyrics
    }

    pub fn playback(&self) -> PlaybackState {
        self.clock.state()
    }

    pub fn active_phrase_index(&self) -> usize {
        self.active_phrase_index
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }
}
