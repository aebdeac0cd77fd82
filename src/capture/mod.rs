//! Frame types and the capture seam.
//!
//! [`FrameSource`] is the boundary between the sampling loop and the
//! platform: production code uses the [`ScreenSource`] backend, tests inject
//! scripted sources.

pub mod screen;

use crate::primitives::region::Region;
use crate::Result;

pub use screen::ScreenSource;

/// Raw RGBA pixels grabbed in one tick, before downsampling.
#[derive(Clone, Debug)]
pub struct CaptureFrame {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// One recorded frame. Never mutated after it enters the [`FrameBuffer`].
#[derive(Clone, Debug)]
pub struct Frame {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Milliseconds on the session's monotonic clock at capture time.
    pub timestamp_ms: u128,
}

/// Append-only frame sequence for one recording session.
///
/// Appended to exclusively by the capture thread; handed over frozen once the
/// session has joined that thread, so no lock is needed on the buffer itself.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    frames: Vec<Frame>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

/// Source of screen pixels for the capture loop.
///
/// `Ok(Some(_))` is a successful grab of the requested region. `Ok(None)`
/// means nothing could be captured this tick (degenerate rectangle, region
/// outside every monitor); the loop skips the tick and keeps running. `Err`
/// means the capture subsystem is unusable and terminates the loop.
pub trait FrameSource {
    fn capture(&mut self, region: Region) -> Result<Option<CaptureFrame>>;
}
