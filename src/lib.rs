//! gifcap: interval screen-region capture assembled into animated GIFs.
//!
//! This crate provides the capture-record-encode pipeline behind a region
//! screen recorder:
//! - Shared region tracking between the UI context and the capture thread
//! - A fixed-delay sampling loop with optional integer downsampling
//! - A recording session state machine with a blocking join on stop
//! - Frame-to-GIF assembly with atomic output placement

pub mod capture;
pub mod error;
pub mod gif;
pub mod primitives;
pub mod session;
pub mod session_ops;

// Re-export common types at crate root
pub use capture::{CaptureFrame, Frame, FrameBuffer, FrameSource, ScreenSource};
pub use error::{Error, Result};
pub use gif::assemble_gif;
pub use primitives::{Region, RegionTracker};
pub use session::{CaptureConfig, Clock, RecordingSession, SystemClock};
pub use session_ops::run_capture_loop;
