//! Recording session lifecycle: configuration, clock, and the state machine
//! coordinating the UI context with the capture thread.

use crate::capture::{FrameBuffer, FrameSource, ScreenSource};
use crate::error::{Error, Result};
use crate::primitives::region::{Region, RegionTracker};
use crate::session_ops::run_capture_loop;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Per-session capture parameters, fixed for the session's duration.
///
/// Reconfiguring while a recording is live is rejected; new values take
/// effect on the next session.
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    /// Nominal delay between ticks, and the display duration of every frame
    /// in the assembled GIF.
    pub frame_interval: Duration,
    /// Integer shrink factor applied to each captured frame; 1 is a no-op.
    pub downsample_factor: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(100),
            downsample_factor: 1,
        }
    }
}

impl CaptureConfig {
    pub fn new(frame_interval_secs: f64, downsample_factor: u32) -> Result<Self> {
        if !frame_interval_secs.is_finite() || frame_interval_secs <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "frame interval must be positive, got {}",
                frame_interval_secs
            )));
        }
        if downsample_factor == 0 {
            return Err(Error::InvalidConfig(
                "downsample factor must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            frame_interval: Duration::from_secs_f64(frame_interval_secs),
            downsample_factor,
        })
    }

    /// Convenience for UIs that expose a frame rate instead of an interval.
    pub fn from_frame_rate(fps: f64, downsample_factor: u32) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "frame rate must be positive, got {}",
                fps
            )));
        }
        Self::new(1.0 / fps, downsample_factor)
    }
}

/// Time source for the capture loop, injectable for tests.
pub trait Clock {
    fn now(&self) -> Instant;
    /// Milliseconds on this clock's monotonic epoch.
    fn now_ms(&self) -> u128;
    fn sleep(&self, duration: Duration);
}

/// Wall clock whose millisecond epoch is its own creation (session start).
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn now_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

enum State {
    Idle,
    Recording {
        started_at: Instant,
        stop: Arc<AtomicBool>,
        handle: JoinHandle<Result<FrameBuffer>>,
    },
}

/// The recording state machine.
///
/// One capture thread exists per `start()`..`stop()` cycle and never outlives
/// `stop()` returning: `stop()` raises the stop flag and blocking-joins the
/// thread before handing the frozen [`FrameBuffer`] to the caller, so GIF
/// assembly can never race with capture. The session is back to idle once
/// `stop()` returns and can be started again.
pub struct RecordingSession {
    tracker: RegionTracker,
    config: CaptureConfig,
    state: State,
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::with_tracker(RegionTracker::default())
    }

    /// Build a session around a tracker the UI already holds a clone of.
    pub fn with_tracker(tracker: RegionTracker) -> Self {
        Self {
            tracker,
            config: CaptureConfig::default(),
            state: State::Idle,
        }
    }

    /// Replace the capture rectangle; safe to call while recording.
    pub fn set_region(&self, region: Region) {
        self.tracker.set(region);
    }

    pub fn region(&self) -> Region {
        self.tracker.get()
    }

    pub fn tracker(&self) -> RegionTracker {
        self.tracker.clone()
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Set capture parameters for the next session. Rejected while recording.
    pub fn configure(&mut self, config: CaptureConfig) -> Result<()> {
        if self.is_recording() {
            return Err(Error::AlreadyRecording);
        }
        self.config = config;
        Ok(())
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, State::Recording { .. })
    }

    /// Seconds since `start()`, for the UI's timer display. 0 when idle.
    pub fn elapsed_seconds(&self) -> f64 {
        match &self.state {
            State::Recording { started_at, .. } => started_at.elapsed().as_secs_f64(),
            State::Idle => 0.0,
        }
    }

    /// Begin recording the tracked region from the screen.
    pub fn start(&mut self) -> Result<()> {
        self.start_with_source(Box::new(ScreenSource::new()))
    }

    /// Begin recording with a caller-supplied frame source.
    ///
    /// Fails with [`Error::AlreadyRecording`] without disturbing an active
    /// loop, and with [`Error::InvalidRegion`] when the tracked rectangle has
    /// zero area (the session stays idle).
    pub fn start_with_source(&mut self, mut source: Box<dyn FrameSource + Send>) -> Result<()> {
        if self.is_recording() {
            return Err(Error::AlreadyRecording);
        }

        let region = self.tracker.get();
        if region.is_degenerate() {
            return Err(Error::InvalidRegion);
        }

        let stop = Arc::new(AtomicBool::new(false));
        let stop_thread = Arc::clone(&stop);
        let tracker = self.tracker.clone();
        let config = self.config.clone();

        let handle = thread::spawn(move || {
            let clock = SystemClock::new();
            run_capture_loop(&config, &tracker, source.as_mut(), &clock, &stop_thread)
        });

        info!(
            "recording started: region {:?}, interval {:?}, downsample {}",
            region, self.config.frame_interval, self.config.downsample_factor
        );
        self.state = State::Recording {
            started_at: Instant::now(),
            stop,
            handle,
        };
        Ok(())
    }

    /// Stop recording and take the frozen frame sequence.
    ///
    /// Blocks until the capture thread has exited, so no append can happen
    /// after this returns. A fatal capture failure inside the loop surfaces
    /// here as [`Error::CaptureFailed`]; either way the session is idle
    /// afterwards. Calling while idle reports [`Error::NotRecording`].
    pub fn stop(&mut self) -> Result<FrameBuffer> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Recording { stop, handle, .. } => {
                stop.store(true, Ordering::SeqCst);
                let result = handle
                    .join()
                    .map_err(|_| Error::CaptureFailed("Capture thread panicked".to_string()))?;
                match &result {
                    Ok(buffer) => info!("recording stopped: {} frames", buffer.len()),
                    Err(err) => warn!("recording ended with capture failure: {}", err),
                }
                result
            }
            State::Idle => Err(Error::NotRecording),
        }
    }
}
