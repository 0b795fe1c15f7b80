//! Multisampling: four coverage samples, one depth sample per pixel.

use super::edgefunction::{depth_at, inside_triangle, SAMPLE_OFFSETS};
use super::{visible_bbox, MsaaDepthPolicy, Rasterizer};
use crate::render::framebuffer::{FrameBuffer, SAMPLE_COUNT};
use crate::triangle::Triangle;

/// MSAA rasterizer.
///
/// Coverage is counted over the four sample offsets. A covered pixel is depth
/// tested once, at its center, against the main depth buffer and written with
/// the triangle color scaled by `coverage / 4`. What happens to the depth of a
/// partially covered pixel is decided by [`MsaaDepthPolicy`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MultisampleRasterizer {
    depth_policy: MsaaDepthPolicy,
}

impl MultisampleRasterizer {
    pub fn new(depth_policy: MsaaDepthPolicy) -> Self {
        Self { depth_policy }
    }

    pub fn depth_policy(&self) -> MsaaDepthPolicy {
        self.depth_policy
    }
}

impl Rasterizer for MultisampleRasterizer {
    fn rasterize(&self, triangle: &Triangle, buffer: &mut FrameBuffer) {
        let v = triangle.to_vec3();
        let bbox = match visible_bbox(&v, buffer) {
            Some(bbox) => bbox,
            None => return,
        };
        let color = triangle.color();

        for (x, y) in bbox.pixels() {
            let coverage = SAMPLE_OFFSETS
                .iter()
                .filter(|&&(ox, oy)| inside_triangle(x as f32 + ox, y as f32 + oy, &v))
                .count();

            if coverage > 0 {
                let depth = depth_at(x as f32 + 0.5, y as f32 + 0.5, triangle);
                if let Some(stored) = buffer.depth_at(x, y) {
                    if depth < stored {
                        let weight = coverage as f32 / SAMPLE_COUNT as f32;
                        buffer.set_pixel_composite(x, y, color * weight);
                        buffer.set_depth(x, y, depth);
                    }
                }
            }

            let partial = coverage < SAMPLE_COUNT;
            if partial && self.depth_policy == MsaaDepthPolicy::CoverageOverridesDepth {
                buffer.set_depth(x, y, f32::INFINITY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;

    fn flat(points: [(f32, f32); 3], depth: f32, color: Vec3) -> Triangle {
        Triangle::new(
            points.map(|(x, y)| Vec4::new(x, y, depth, 1.0)),
            color,
        )
    }

    /// Covers pixel (0, 1) fully and the left half of pixel (1, 1): the
    /// right edge runs through (1.5, 1.5) with a slight tilt.
    fn half_cover(depth: f32, color: Vec3) -> Triangle {
        flat([(0.35, -10.0), (2.35, 10.0), (-10.0, 0.0)], depth, color)
    }

    fn full_cover(depth: f32, color: Vec3) -> Triangle {
        flat([(-1.0, -1.0), (9.0, -1.0), (-1.0, 9.0)], depth, color)
    }

    #[test]
    fn color_is_scaled_by_coverage() {
        let mut fb = FrameBuffer::new(4, 4);
        let r = MultisampleRasterizer::new(MsaaDepthPolicy::Strict);

        r.rasterize(&half_cover(1.0, Vec3::ONE), &mut fb);

        let edge = fb.color_at(1, 1).unwrap();
        assert_relative_eq!(edge.x, 0.5, epsilon = 1e-6);
        assert_eq!(fb.color_at(0, 1), Some(Vec3::ONE));
    }

    #[test]
    fn full_coverage_keeps_depth_under_both_policies() {
        for policy in [MsaaDepthPolicy::CoverageOverridesDepth, MsaaDepthPolicy::Strict] {
            let mut fb = FrameBuffer::new(4, 4);
            let r = MultisampleRasterizer::new(policy);
            r.rasterize(&half_cover(3.0, Vec3::ONE), &mut fb);
            assert_relative_eq!(fb.depth_at(0, 1).unwrap(), 3.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn coverage_overrides_depth_resets_partial_pixels() {
        let mut fb = FrameBuffer::new(4, 4);
        let r = MultisampleRasterizer::new(MsaaDepthPolicy::CoverageOverridesDepth);

        r.rasterize(&half_cover(1.0, Vec3::ONE), &mut fb);
        assert_eq!(fb.depth_at(1, 1), Some(f32::INFINITY));

        // A farther triangle can therefore still draw over the edge pixel.
        let green = Vec3::new(0.0, 1.0, 0.0);
        r.rasterize(&full_cover(20.0, green), &mut fb);
        assert_eq!(fb.color_at(1, 1), Some(green));
        // The fully covered near pixel is protected.
        assert_eq!(fb.color_at(0, 1), Some(Vec3::ONE));
    }

    #[test]
    fn strict_policy_keeps_partial_depth() {
        let mut fb = FrameBuffer::new(4, 4);
        let r = MultisampleRasterizer::new(MsaaDepthPolicy::Strict);

        r.rasterize(&half_cover(1.0, Vec3::ONE), &mut fb);
        assert_relative_eq!(fb.depth_at(1, 1).unwrap(), 1.0, epsilon = 1e-5);
        let before = fb.color_at(1, 1);

        r.rasterize(&full_cover(20.0, Vec3::new(0.0, 1.0, 0.0)), &mut fb);
        assert_eq!(fb.color_at(1, 1), before);
    }

    #[test]
    fn uncovered_bbox_pixels_are_reset_by_default_policy() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set_depth(3, 3, 0.5);
        let r = MultisampleRasterizer::new(MsaaDepthPolicy::CoverageOverridesDepth);

        // Bounding box reaches (3, 3) but the triangle does not cover it.
        let corner = flat([(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)], 1.0, Vec3::ONE);
        r.rasterize(&corner, &mut fb);

        assert_eq!(fb.depth_at(3, 3), Some(f32::INFINITY));
        assert_eq!(fb.color_at(3, 3), Some(Vec3::ZERO));
    }

    #[test]
    fn offscreen_triangle_with_overlapping_box_resets_depth_only_by_default() {
        // Lies entirely in x + y < 0, but its clamped box is pixels (0..2, 0..2).
        let offscreen = flat([(-2.0, 2.0), (2.0, -2.0), (-3.0, -3.0)], 1.0, Vec3::ONE);

        for policy in [MsaaDepthPolicy::CoverageOverridesDepth, MsaaDepthPolicy::Strict] {
            let mut fb = FrameBuffer::new(4, 4);
            for y in 0..4 {
                for x in 0..4 {
                    fb.set_depth(x, y, 0.5);
                }
            }

            MultisampleRasterizer::new(policy).rasterize(&offscreen, &mut fb);

            let reset = policy == MsaaDepthPolicy::CoverageOverridesDepth;
            for y in 0..4 {
                for x in 0..4 {
                    let expected = if reset && x < 2 && y < 2 {
                        f32::INFINITY
                    } else {
                        0.5
                    };
                    assert_eq!(fb.depth_at(x, y), Some(expected), "{policy:?} ({x}, {y})");
                }
            }
            assert!(fb.colors().iter().all(|&c| c == Vec3::ZERO));
        }
    }
}
