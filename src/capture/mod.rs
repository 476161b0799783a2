//! Frame acquisition boundary.
//!
//! The monitor never talks to a device directly; it goes through the
//! `FrameSource`/`FrameHandle` traits so the acquisition loop can be
//! exercised against scripted sources in tests. A real camera backend
//! implements these traits out of tree.

mod synthetic;

pub use synthetic::{SyntheticHandle, SyntheticSource};

use thiserror::Error;

/// Errors from the capture boundary.
///
/// The two variants matter to the supervisor's retry behavior: an
/// `Unavailable` source is retried on the longer open backoff, a
/// `ReadFailed` handle is dropped and the source reacquired on the
/// shorter read backoff.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Capture device unavailable: {0}")]
    Unavailable(String),

    #[error("Frame read failed: {0}")]
    ReadFailed(String),
}

/// A single grayscale frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Row-major 8-bit luma samples, `width * height` bytes.
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Mean luma over the whole frame, 0 for an empty frame.
    pub fn mean_luma(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.pixels.iter().map(|&p| p as u64).sum();
        sum as f32 / self.pixels.len() as f32
    }
}

/// A source of frames that can be (re)opened.
///
/// Exactly one handle is open at a time; the supervisor drops the old
/// handle before calling `open` again. Releasing the device is the
/// handle's `Drop` impl.
pub trait FrameSource: Send {
    type Handle: FrameHandle;

    /// Acquire the device. Failure is non-fatal to callers; the
    /// supervisor retries with backoff.
    fn open(&mut self) -> Result<Self::Handle, CaptureError>;
}

/// An open capture handle yielding frames until the device is lost.
pub trait FrameHandle: Send {
    /// Read the next frame. A `ReadFailed` result means the device was
    /// lost (disconnect, end of stream) and the handle is dead.
    fn read_frame(&mut self) -> Result<Frame, CaptureError>;
}
