//! Supersampling: four depth-tested color samples per pixel.

use super::edgefunction::{depth_at, inside_triangle, SAMPLE_OFFSETS};
use super::{visible_bbox, Rasterizer};
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;
use crate::triangle::Triangle;

/// SSAA rasterizer.
///
/// Every sample offset has its own color and depth slot, and each slot is
/// depth tested only against what earlier triangles left in that slot. After
/// a pixel's samples are updated, the pixel is resolved to the average of its
/// four sample colors through the composite write (over black).
///
/// Every pixel in the bounding box is resolved, covered or not, so pixels
/// previously written by other means are replaced by their sample average.
#[derive(Debug, Default, Clone, Copy)]
pub struct SupersampleRasterizer;

impl SupersampleRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for SupersampleRasterizer {
    fn rasterize(&self, triangle: &Triangle, buffer: &mut FrameBuffer) {
        let v = triangle.to_vec3();
        let bbox = match visible_bbox(&v, buffer) {
            Some(bbox) => bbox,
            None => return,
        };
        let color = triangle.color();

        for (x, y) in bbox.pixels() {
            for (i, &(ox, oy)) in SAMPLE_OFFSETS.iter().enumerate() {
                let (sx, sy) = (x as f32 + ox, y as f32 + oy);
                if !inside_triangle(sx, sy, &v) {
                    continue;
                }

                let depth = depth_at(sx, sy, triangle);
                if let Some((_, stored)) = buffer.sample_at(x, y, i) {
                    if depth < stored {
                        buffer.set_sample(x, y, i, color, depth);
                    }
                }
            }
            buffer.set_pixel_composite(x, y, Vec3::ZERO);
        }
    }
}
