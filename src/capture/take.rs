use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::device::CaptureFrame;

/// Metadata for a recorded take
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeMetadata {
    /// File path of the take
    pub file_path: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
    /// Number of samples written (all channels)
    pub sample_count: usize,
    /// Capture time covered by the take
    pub duration_ms: u64,
}

/// Writes the singer's take to a single WAV file
///
/// The file is created on the first frame, using that frame's format.
pub struct TakeRecorder {
    file_path: PathBuf,
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    metadata: Option<TakeMetadata>,
}

impl TakeRecorder {
    pub fn new(file_path: PathBuf) -> Result<Self> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).context("Failed to create recordings directory")?;
        }

        Ok(Self {
            file_path,
            writer: None,
            metadata: None,
        })
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    pub fn write_frame(&mut self, frame: &CaptureFrame) -> Result<()> {
        if self.writer.is_none() {
            let spec = hound::WavSpec {
                channels: frame.channels,
                sample_rate: frame.sample_rate,
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            };

            let writer = hound::WavWriter::create(&self.file_path, spec)
                .with_context(|| format!("Failed to create WAV file: {:?}", self.file_path))?;

            info!("Recording take to {}", self.file_path.display());
            self.writer = Some(writer);
            self.metadata = Some(TakeMetadata {
                file_path: self.file_path.clone(),
                sample_rate: frame.sample_rate,
                channels: frame.channels,
                sample_count: 0,
                duration_ms: 0,
            });
        }

        if let (Some(writer), Some(metadata)) = (&mut self.writer, &mut self.metadata) {
            for &sample in &frame.samples {
                writer
                    .write_sample(sample)
                    .context("Failed to write sample to WAV")?;
            }

            metadata.sample_count += frame.samples.len();
            metadata.duration_ms = frame.timestamp_ms + frame.duration_ms();
        }

        Ok(())
    }

    /// Finalize the WAV file
    pub fn finish(mut self) -> Result<TakeMetadata> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().context("Failed to finalize WAV file")?;
        }

        match self.metadata.take() {
            Some(metadata) => {
                info!(
                    "Take complete: {:.1}s ({} samples)",
                    metadata.duration_ms as f64 / 1000.0,
                    metadata.sample_count
                );
                Ok(metadata)
            }
            None => {
                warn!("No audio captured, take not written");
                Ok(TakeMetadata {
                    file_path: self.file_path.clone(),
                    sample_rate: 0,
                    channels: 0,
                    sample_count: 0,
                    duration_ms: 0,
                })
            }
        }
    }

    /// Record every frame from `frames` until the channel closes
    pub async fn record(mut self, mut frames: mpsc::Receiver<CaptureFrame>) -> Result<TakeMetadata> {
        while let Some(frame) = frames.recv().await {
            self.write_frame(&frame)?;
        }
        self.finish()
    }
}

impl Drop for TakeRecorder {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.finalize() {
                warn!("Failed to finalize WAV writer on drop: {}", e);
            }
        }
    }
}
