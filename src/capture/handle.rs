use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::device::CaptureDevice;
use super::take::{TakeMetadata, TakeRecorder};

/// A started capture device and the task recording its take
///
/// The task owns the device. It ends when `stop` is called, when the handle
/// is dropped (the stop channel closes), or when the device runs dry, and in
/// every case stops the device and finalizes the take before exiting.
pub struct CaptureHandle {
    device_name: String,
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<Result<TakeMetadata>>,
}

impl CaptureHandle {
    pub async fn start(mut device: Box<dyn CaptureDevice>, take_path: PathBuf) -> Result<Self> {
        let device_name = device.name().to_string();
        info!("Acquiring capture device: {}", device_name);

        let mut recorder = TakeRecorder::new(take_path)?;
        let mut frames = device
            .start()
            .await
            .context("Failed to start capture device")?;

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let name = device_name.clone();

        let task = tokio::spawn(async move {
            let mut write_result = Ok(());

            loop {
                // Frames already buffered are written before a stop is honored
                tokio::select! {
                    biased;
                    frame = frames.recv() => match frame {
                        Some(frame) => {
                            if let Err(e) = recorder.write_frame(&frame) {
                                error!("Failed to record capture frame: {}", e);
                                write_result = Err(e);
                                break;
                            }
                        }
                        None => break,
                    },
                    _ = &mut stop_rx => break,
                }
            }

            drop(frames);
            if let Err(e) = device.stop().await {
                error!("Failed to release capture device {}: {}", name, e);
            }
            info!("Capture device released: {}", name);

            write_result?;
            recorder.finish()
        });

        Ok(Self {
            device_name,
            stop_tx,
            task,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Stop capturing, release the device and return the finished take
    pub async fn stop(self) -> Result<TakeMetadata> {
        let Self { stop_tx, task, .. } = self;
        // The task may already have exited on its own
        let _ = stop_tx.send(());
        task.await.context("Capture task panicked")?
    }
}
