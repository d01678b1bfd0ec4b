//! Captured frame type and region cropping

use anyhow::Result;
use image::RgbaImage;

use crate::domain::RectF;

/// Source of pixel data for a screen region.
///
/// The annotation core decides when a region is captured, never how; the
/// shell supplies an implementation backed by whatever the platform offers.
pub trait ScreenCapture {
    /// Extract the pixels covering `region` (global logical coordinates)
    fn capture_region(&self, region: RectF) -> Result<RgbaImage>;
}

/// A captured full-screen frame with its placement in logical space
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    pub rgba: RgbaImage,
    /// Top-left of the frame in global logical coordinates
    pub origin: (f32, f32),
    /// Pixels per logical unit
    pub scale: f32,
}

impl CapturedFrame {
    pub fn new(rgba: RgbaImage, origin: (f32, f32), scale: f32) -> Result<Self> {
        if scale <= 0.0 {
            anyhow::bail!("invalid frame scale {scale}");
        }
        Ok(Self {
            rgba,
            origin,
            scale,
        })
    }

    /// Get the width of the frame in pixels
    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    /// Get the height of the frame in pixels
    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    /// Crop the frame to a logical region, clamped to the frame bounds
    pub fn crop_region(&self, region: RectF) -> Result<RgbaImage> {
        let x = ((region.left - self.origin.0) * self.scale).max(0.0) as u32;
        let y = ((region.top - self.origin.1) * self.scale).max(0.0) as u32;
        let width = ((region.width() * self.scale) as u32).min(self.width().saturating_sub(x));
        let height = ((region.height() * self.scale) as u32).min(self.height().saturating_sub(y));
        if width == 0 || height == 0 {
            anyhow::bail!("selection lies outside the captured frame");
        }
        Ok(image::imageops::crop_imm(&self.rgba, x, y, width, height).to_image())
    }
}

impl ScreenCapture for CapturedFrame {
    fn capture_region(&self, region: RectF) -> Result<RgbaImage> {
        self.crop_region(region)
    }
}

/// Capture a region and encode it as PNG bytes
pub fn encode_region_png<C: ScreenCapture + ?Sized>(
    source: &C,
    region: RectF,
) -> Result<Vec<u8>> {
    let img = source.capture_region(region)?;
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker_frame() -> CapturedFrame {
        // 4x4 frame where each pixel's red channel encodes its x,
        // green channel its y
        let rgba = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        CapturedFrame::new(rgba, (0.0, 0.0), 1.0).unwrap()
    }

    #[test]
    fn test_crop_region_extracts_expected_pixels() {
        let frame = checker_frame();
        let cropped = frame.crop_region(RectF::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (2, 2));
        assert_eq!(cropped.get_pixel(0, 0), &Rgba([1, 2, 0, 255]));
        assert_eq!(cropped.get_pixel(1, 1), &Rgba([2, 3, 0, 255]));
    }

    #[test]
    fn test_crop_region_respects_frame_origin_and_scale() {
        let rgba = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let frame = CapturedFrame::new(rgba, (100.0, 100.0), 2.0).unwrap();

        // logical (101,101)-(103,103) maps to pixels (2,2)-(6,6)
        let cropped = frame
            .crop_region(RectF::new(101.0, 101.0, 103.0, 103.0))
            .unwrap();
        assert_eq!((cropped.width(), cropped.height()), (4, 4));
        assert_eq!(cropped.get_pixel(0, 0), &Rgba([2, 2, 0, 255]));
    }

    #[test]
    fn test_crop_outside_frame_is_an_error() {
        let frame = checker_frame();
        assert!(frame.crop_region(RectF::new(10.0, 10.0, 20.0, 20.0)).is_err());
    }

    #[test]
    fn test_invalid_scale_is_rejected() {
        let rgba = RgbaImage::new(2, 2);
        assert!(CapturedFrame::new(rgba, (0.0, 0.0), 0.0).is_err());
    }

    #[test]
    fn test_encode_region_png_produces_png_bytes() {
        let frame = checker_frame();
        let bytes = encode_region_png(&frame, RectF::new(0.0, 0.0, 4.0, 4.0)).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
