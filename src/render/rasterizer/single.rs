//! One sample per pixel, taken at the pixel center.

use super::edgefunction::{depth_at, inside_triangle};
use super::{visible_bbox, Rasterizer};
use crate::render::framebuffer::FrameBuffer;
use crate::triangle::Triangle;

/// Rasterizer without antialiasing.
///
/// Each pixel in the bounding box is tested at `(x + 0.5, y + 0.5)`. Covered
/// pixels that pass the depth test get a plain color write and a depth
/// update; the sample buffers are never read.
#[derive(Debug, Default, Clone, Copy)]
pub struct SingleSampleRasterizer;

impl SingleSampleRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for SingleSampleRasterizer {
    fn rasterize(&self, triangle: &Triangle, buffer: &mut FrameBuffer) {
        let v = triangle.to_vec3();
        let bbox = match visible_bbox(&v, buffer) {
            Some(bbox) => bbox,
            None => return,
        };
        let color = triangle.color();

        for (x, y) in bbox.pixels() {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if !inside_triangle(px, py, &v) {
                continue;
            }

            let depth = depth_at(px, py, triangle);
            if let Some(stored) = buffer.depth_at(x, y) {
                if depth < stored {
                    buffer.set_pixel(x, y, color);
                    buffer.set_depth(x, y, depth);
                }
            }
        }
    }
}
