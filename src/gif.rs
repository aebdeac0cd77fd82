//! Frame-to-GIF assembly.

use crate::capture::FrameBuffer;
use crate::error::{Error, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame as GifFrame, Rgba, RgbaImage};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::info;

/// Encode a frozen frame sequence as a looping animated GIF at `path`.
///
/// Every frame is displayed for the nominal `frame_interval`, not its
/// measured capture-to-capture delta. An empty buffer produces a single blank
/// 1x1 white frame, since the encoder cannot emit a zero-frame file. The
/// write is all-or-nothing: bytes are encoded in memory, written to a
/// temporary file next to the target, and moved into place only on success,
/// so a failure never leaves a partial file behind.
pub fn assemble_gif(
    frames: FrameBuffer,
    frame_interval: Duration,
    path: &Path,
) -> Result<PathBuf> {
    let delay = Delay::from_saturating_duration(frame_interval);
    let frame_count = frames.len().max(1);

    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| Error::EncodeFailed(e.to_string()))?;

        if frames.is_empty() {
            let blank = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
            encoder
                .encode_frame(GifFrame::from_parts(blank, 0, 0, delay))
                .map_err(|e| Error::EncodeFailed(e.to_string()))?;
        } else {
            for frame in frames.into_frames() {
                let image = RgbaImage::from_raw(frame.width, frame.height, frame.rgba)
                    .ok_or_else(|| {
                        Error::EncodeFailed(format!(
                            "Frame buffer does not match {}x{}",
                            frame.width, frame.height
                        ))
                    })?;
                encoder
                    .encode_frame(GifFrame::from_parts(image, 0, 0, delay))
                    .map_err(|e| Error::EncodeFailed(e.to_string()))?;
            }
        }
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    info!("wrote {} GIF frames to {}", frame_count, path.display());
    Ok(path.to_path_buf())
}
