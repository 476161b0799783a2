//! Deterministic in-process frame source.
//!
//! Stands in for a camera when none is attached: frames are generated
//! from a repeating luma pattern, and open/read failures can be
//! scripted so the supervisor's recovery paths can be driven without
//! hardware.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::{CaptureError, Frame, FrameHandle, FrameSource};

const FRAME_WIDTH: u32 = 64;
const FRAME_HEIGHT: u32 = 48;

/// Frame source producing uniform frames from a cycled luma pattern.
pub struct SyntheticSource {
    pattern: Vec<u8>,
    cursor: usize,
    /// Number of leading `open` calls that fail before one succeeds.
    failing_opens: u32,
    /// Frames each handle yields before reporting device loss.
    /// `None` means the handle never fails.
    reads_per_handle: Option<u32>,
    open_attempts: Arc<AtomicU32>,
}

impl SyntheticSource {
    /// Source of uniformly bright frames (classifies as present).
    pub fn bright() -> Self {
        Self::with_pattern(vec![200])
    }

    /// Source cycling through the given per-frame luma values.
    pub fn with_pattern(pattern: Vec<u8>) -> Self {
        assert!(!pattern.is_empty(), "pattern must not be empty");
        Self {
            pattern,
            cursor: 0,
            failing_opens: 0,
            reads_per_handle: None,
            open_attempts: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Fail the first `n` open attempts.
    pub fn fail_opens(mut self, n: u32) -> Self {
        self.failing_opens = n;
        self
    }

    /// Lose the device after every `n` successful reads.
    pub fn lose_after_reads(mut self, n: u32) -> Self {
        self.reads_per_handle = Some(n);
        self
    }

    /// Counter of `open` calls made so far, shared for test assertions.
    pub fn open_attempts(&self) -> Arc<AtomicU32> {
        self.open_attempts.clone()
    }
}

impl FrameSource for SyntheticSource {
    type Handle = SyntheticHandle;

    fn open(&mut self) -> Result<SyntheticHandle, CaptureError> {
        self.open_attempts.fetch_add(1, Ordering::SeqCst);

        if self.failing_opens > 0 {
            self.failing_opens -= 1;
            return Err(CaptureError::Unavailable(
                "synthetic device not ready".into(),
            ));
        }

        // Reacquired handles restart the pattern; fine for a repeating
        // sequence.
        Ok(SyntheticHandle {
            pattern: self.pattern.clone(),
            cursor: self.cursor,
            reads_left: self.reads_per_handle,
        })
    }
}

/// Open handle over a `SyntheticSource`.
pub struct SyntheticHandle {
    pattern: Vec<u8>,
    cursor: usize,
    reads_left: Option<u32>,
}

impl FrameHandle for SyntheticHandle {
    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        if let Some(left) = self.reads_left.as_mut() {
            if *left == 0 {
                return Err(CaptureError::ReadFailed("synthetic device lost".into()));
            }
            *left -= 1;
        }

        let luma = self.pattern[self.cursor % self.pattern.len()];
        self.cursor += 1;

        let pixels = vec![luma; (FRAME_WIDTH * FRAME_HEIGHT) as usize];
        Ok(Frame::new(FRAME_WIDTH, FRAME_HEIGHT, pixels))
    }
}
