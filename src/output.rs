//! Image sink: turns a [`FrameBuffer`] into an 8-bit RGB image.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::{RasterError, Result};
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// Quantize a linear [0,1] color to 8 bits per channel, clamping overflow
/// from additive compositing.
#[inline]
pub fn to_rgb8(color: Vec3) -> Rgb<u8> {
    let c = color.clamp(0.0, 1.0) * 255.0;
    Rgb([c.x.round() as u8, c.y.round() as u8, c.z.round() as u8])
}

/// Copy the frame buffer into an image. The buffer is already stored top
/// row first, so rows map one to one.
pub fn to_image(buffer: &FrameBuffer) -> Result<RgbImage> {
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return Err(RasterError::EmptyFrame { width, height });
    }

    let colors = buffer.colors();
    Ok(RgbImage::from_fn(width, height, |x, y| {
        to_rgb8(colors[(y * width + x) as usize])
    }))
}

/// Save the frame buffer; the format is picked from the file extension.
pub fn save<P: AsRef<Path>>(buffer: &FrameBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    to_image(buffer)?.save(path)?;
    log::info!(
        "wrote {}x{} frame to {}",
        buffer.width(),
        buffer.height(),
        path.display()
    );
    Ok(())
}
