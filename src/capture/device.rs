use anyhow::Result;
use tokio::sync::mpsc;

/// Captured microphone audio (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct CaptureFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

impl CaptureFrame {
    /// Duration of this frame in milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0;
        }
        let frames = self.samples.len() as u64 / self.channels as u64;
        frames * 1000 / self.sample_rate as u64
    }
}

/// Configuration for a capture device
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Preferred sample rate in Hz
    pub sample_rate: u32,
    /// Preferred channel count (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Frame size in milliseconds (affects latency)
    pub buffer_duration_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            channels: 1,
            buffer_duration_ms: 100,
        }
    }
}

/// Audio capture device trait
///
/// A device is acquired by `start` and must be released by `stop`; the
/// session's capture handle guarantees the release on every exit path.
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Acquire the device and start capturing
    ///
    /// Returns a channel receiver that will receive audio frames
    async fn start(&mut self) -> Result<mpsc::Receiver<CaptureFrame>>;

    /// Stop capturing and release the device
    async fn stop(&mut self) -> Result<()>;

    /// Check if the device is currently capturing
    fn is_capturing(&self) -> bool;

    /// Device name for logging
    fn name(&self) -> &str;
}
