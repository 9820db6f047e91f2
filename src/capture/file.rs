use anyhow::{Context, Result};
use hound::WavReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::device::{CaptureConfig, CaptureDevice, CaptureFrame};

/// Capture device that replays a WAV file in real time
///
/// Stands in for a microphone in headless runs and tests. Frames are
/// `buffer_duration_ms` long and paced by the runtime clock.
pub struct WavFileDevice {
    path: PathBuf,
    name: String,
    config: CaptureConfig,
    sample_rate: u32,
    channels: u16,
    capturing: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl WavFileDevice {
    pub fn open(path: impl AsRef<Path>, config: CaptureConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening capture file: {}", path.display());

        let reader = WavReader::open(path)
            .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
        let spec = reader.spec();

        info!(
            "Capture file ready: {}Hz, {} channels, {} samples",
            spec.sample_rate,
            spec.channels,
            reader.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            name: format!("wav:{}", path.display()),
            config,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            capturing: Arc::new(AtomicBool::new(false)),
            task: None,
        })
    }

    fn read_samples(&self) -> Result<Vec<i16>> {
        let reader = WavReader::open(&self.path).context("Failed to reopen WAV file")?;
        reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read audio samples")
    }
}

#[async_trait::async_trait]
impl CaptureDevice for WavFileDevice {
    async fn start(&mut self) -> Result<mpsc::Receiver<CaptureFrame>> {
        let samples = self.read_samples()?;
        let (tx, rx) = mpsc::channel(32);

        let buffer_ms = self.config.buffer_duration_ms.max(1);
        // Whole channel frames only, so interleaved samples never straddle two frames
        let frames_per_buffer = (self.sample_rate as u64 * buffer_ms / 1000).max(1);
        let samples_per_frame = (frames_per_buffer * self.channels.max(1) as u64) as usize;
        let sample_rate = self.sample_rate;
        let channels = self.channels;
        let capturing = Arc::clone(&self.capturing);

        capturing.store(true, Ordering::SeqCst);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_millis(buffer_ms));

            for (index, chunk) in samples.chunks(samples_per_frame).enumerate() {
                ticker.tick().await;
                if !capturing.load(Ordering::SeqCst) {
                    break;
                }

                let frame = CaptureFrame {
                    samples: chunk.to_vec(),
                    sample_rate,
                    channels,
                    timestamp_ms: index as u64 * buffer_ms,
                };
                if tx.send(frame).await.is_err() {
                    break;
                }
            }

            capturing.store(false, Ordering::SeqCst);
        });

        self.task = Some(task);
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.capturing.store(false, Ordering::SeqCst);

        if let Some(task) = self.task.take() {
            task.abort();
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("Capture file task failed: {}", e);
                }
            }
        }

        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
