//! Microphone capture for the singer's take
//!
//! - `device`: capture device trait and frame types
//! - `file`: WAV-file-backed device for headless runs
//! - `take`: WAV writer for the recorded take
//! - `handle`: scoped acquisition with guaranteed release

pub mod device;
pub mod file;
pub mod handle;
pub mod take;

pub use device::{CaptureConfig, CaptureDevice, CaptureFrame};
pub use file::WavFileDevice;
pub use handle::CaptureHandle;
pub use take::{TakeMetadata, TakeRecorder};
