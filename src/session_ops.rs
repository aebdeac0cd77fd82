//! The sampling loop that turns wall-clock time into a frame sequence.

use crate::capture::{Frame, FrameBuffer, FrameSource};
use crate::error::Result;
use crate::primitives::frame_ops::downsample_rgba;
use crate::primitives::region::RegionTracker;
use crate::session::{CaptureConfig, Clock};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Run one recording session's capture loop until `stop` is set.
///
/// Each tick reads the tracker fresh, so a region moved or resized by the UI
/// mid-recording shifts subsequent frames (accepted drift, not frozen
/// geometry). Scheduling is fixed-delay: the full nominal interval is slept
/// after the append, so the effective frame period grows under capture
/// latency while the assembled GIF still plays at the nominal interval.
///
/// Ticks whose capture or downsample fails are skipped and logged; a fatal
/// source error ends the loop and is returned to the joining session.
pub fn run_capture_loop(
    config: &CaptureConfig,
    tracker: &RegionTracker,
    source: &mut dyn FrameSource,
    clock: &dyn Clock,
    stop: &AtomicBool,
) -> Result<FrameBuffer> {
    let mut buffer = FrameBuffer::new();

    while !stop.load(Ordering::SeqCst) {
        let region = tracker.get();

        match source.capture(region) {
            Ok(Some(raw)) => {
                match downsample_rgba(raw.rgba, raw.width, raw.height, config.downsample_factor) {
                    Ok((rgba, width, height)) => {
                        buffer.push(Frame {
                            rgba,
                            width,
                            height,
                            timestamp_ms: clock.now_ms(),
                        });
                    }
                    Err(err) => {
                        debug!("skipping tick, downsample failed: {}", err);
                    }
                }
            }
            Ok(None) => {
                debug!("skipping tick, nothing to capture for {:?}", region);
            }
            Err(err) => {
                warn!("capture subsystem failed, ending recording: {}", err);
                return Err(err);
            }
        }

        clock.sleep(config.frame_interval);
    }

    Ok(buffer)
}
