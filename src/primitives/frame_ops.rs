use crate::error::{Error, Result};
use crate::primitives::region::Region;
use fast_image_resize::{
    images::{Image, ImageRef},
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
};
use std::sync::{Mutex, OnceLock};

static RESIZER: OnceLock<Mutex<Resizer>> = OnceLock::new();

/// Shrink an RGBA buffer by an integer factor.
///
/// Output dimensions are `(width / factor, height / factor)` with integer
/// floor; a factor of 1 returns the input unchanged. Fails when the floored
/// dimensions collapse to zero, which callers treat as a skipped tick.
pub fn downsample_rgba(
    rgba: Vec<u8>,
    width: u32,
    height: u32,
    factor: u32,
) -> Result<(Vec<u8>, u32, u32)> {
    if factor <= 1 {
        return Ok((rgba, width, height));
    }

    let dst_width = width / factor;
    let dst_height = height / factor;
    if dst_width == 0 || dst_height == 0 {
        return Err(Error::CaptureFailed(format!(
            "Region {}x{} collapses to zero at downsample factor {}",
            width, height, factor
        )));
    }

    let src_image = ImageRef::new(width, height, &rgba, PixelType::U8x4)
        .map_err(|e| Error::CaptureFailed(format!("Resize source error: {}", e)))?;
    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);
    let opts = ResizeOptions::new().resize_alg(ResizeAlg::Interpolation(FilterType::Bilinear));

    let resizer = RESIZER.get_or_init(|| Mutex::new(Resizer::new()));
    let mut resizer = resizer
        .lock()
        .map_err(|_| Error::CaptureFailed("Resize lock poisoned".into()))?;
    resizer
        .resize(&src_image, &mut dst_image, Some(&opts))
        .map_err(|e| Error::CaptureFailed(format!("Resize failed: {}", e)))?;

    Ok((dst_image.into_vec(), dst_width, dst_height))
}

/// Copy a sub-rectangle out of an RGBA buffer.
///
/// `region` is in buffer-local coordinates and must lie fully inside the
/// buffer; callers clamp against monitor bounds first.
pub fn crop_rgba(rgba: &[u8], width: u32, height: u32, region: Region) -> Result<Vec<u8>> {
    if region.x < 0
        || region.y < 0
        || region.x as u32 + region.width > width
        || region.y as u32 + region.height > height
    {
        return Err(Error::CaptureFailed(format!(
            "Crop region {:?} out of bounds for image {}x{}",
            region, width, height
        )));
    }

    let crop_x = region.x as u32;
    let crop_y = region.y as u32;
    let crop_w = region.width;
    let crop_h = region.height;

    let mut out = vec![0u8; (crop_w * crop_h * 4) as usize];
    let src_stride = (width * 4) as usize;
    let dst_stride = (crop_w * 4) as usize;

    for row in 0..crop_h {
        let src_start = ((crop_y + row) as usize * src_stride) + (crop_x * 4) as usize;
        let src_end = src_start + dst_stride;
        let dst_start = row as usize * dst_stride;
        out[dst_start..dst_start + dst_stride].copy_from_slice(&rgba[src_start..src_end]);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_rgba(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
        pixel
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect()
    }

    #[test]
    fn downsample_factor_one_is_noop() {
        let rgba = solid_rgba(4, 4, [10, 20, 30, 255]);
        let (out, w, h) = downsample_rgba(rgba.clone(), 4, 4, 1).expect("downsample");
        assert_eq!((w, h), (4, 4));
        assert_eq!(out, rgba);
    }

    #[test]
    fn downsample_floors_dimensions() {
        let rgba = solid_rgba(10, 7, [200, 100, 50, 255]);
        let (out, w, h) = downsample_rgba(rgba, 10, 7, 3).expect("downsample");
        assert_eq!((w, h), (3, 2));
        assert_eq!(out.len(), (3 * 2 * 4) as usize);
    }

    #[test]
    fn downsample_preserves_solid_color() {
        let rgba = solid_rgba(8, 8, [200, 100, 50, 255]);
        let (out, _, _) = downsample_rgba(rgba, 8, 8, 2).expect("downsample");
        assert_eq!(&out[..4], &[200, 100, 50, 255]);
    }

    #[test]
    fn downsample_rejects_zero_output() {
        let rgba = solid_rgba(3, 3, [0, 0, 0, 255]);
        assert!(downsample_rgba(rgba, 3, 3, 4).is_err());
    }

    #[test]
    fn crop_rgba_region() {
        let rgba: Vec<u8> = (0..64).collect();
        let region = Region::new(1, 1, 2, 2);
        let out = crop_rgba(&rgba, 4, 4, region).expect("crop");
        assert_eq!(out.len(), 16);
        assert_eq!(out[0], rgba[(4 * 4 + 4) as usize]);
    }

    #[test]
    fn crop_rgba_rejects_out_of_bounds() {
        let rgba = solid_rgba(4, 4, [0, 0, 0, 255]);
        assert!(crop_rgba(&rgba, 4, 4, Region::new(2, 2, 4, 4)).is_err());
        assert!(crop_rgba(&rgba, 4, 4, Region::new(-1, 0, 2, 2)).is_err());
    }
}
