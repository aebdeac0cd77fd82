//! Screen-backed frame source using the `xcap` crate.

use crate::capture::{CaptureFrame, FrameSource};
use crate::error::{Error, Result};
use crate::primitives::frame_ops::crop_rgba;
use crate::primitives::region::Region;
use tracing::debug;
use xcap::Monitor;

/// Grabs the monitor under the region origin and crops to the region.
///
/// The monitor is looked up fresh on every tick so display topology changes
/// mid-recording are picked up. A region whose origin lies outside every
/// monitor yields no frame for that tick; an actual grab failure is treated
/// as the capture subsystem being gone and aborts the recording.
#[derive(Debug, Default)]
pub struct ScreenSource;

impl ScreenSource {
    pub fn new() -> Self {
        Self
    }
}

impl FrameSource for ScreenSource {
    fn capture(&mut self, region: Region) -> Result<Option<CaptureFrame>> {
        if region.is_degenerate() {
            return Ok(None);
        }

        let monitor = match Monitor::from_point(region.x, region.y) {
            Ok(monitor) => monitor,
            Err(err) => {
                debug!("no monitor under region origin {:?}: {}", region, err);
                return Ok(None);
            }
        };

        let monitor_x = monitor
            .x()
            .map_err(|e| Error::CaptureFailed(format!("Monitor geometry query failed: {}", e)))?;
        let monitor_y = monitor
            .y()
            .map_err(|e| Error::CaptureFailed(format!("Monitor geometry query failed: {}", e)))?;

        let image = monitor
            .capture_image()
            .map_err(|e| Error::CaptureFailed(format!("Monitor grab failed: {}", e)))?;
        let (image_width, image_height) = (image.width(), image.height());

        let bounds = Region::new(0, 0, image_width, image_height);
        let local = match region.translate(-monitor_x, -monitor_y).intersect(bounds) {
            Some(local) => local,
            None => {
                debug!("region {:?} does not overlap its monitor image", region);
                return Ok(None);
            }
        };

        let rgba = crop_rgba(image.as_raw(), image_width, image_height, local)?;
        Ok(Some(CaptureFrame {
            rgba,
            width: local.width,
            height: local.height,
        }))
    }
}
