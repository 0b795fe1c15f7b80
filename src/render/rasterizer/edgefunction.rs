//! Edge functions, coverage and depth interpolation shared by every policy.
//!
//! # Edge Function
//!
//! For an edge from vertex A to vertex B, the z component of the cross
//! product `(B - A) × (P - A)` tells on which side of the edge a point P
//! lies:
//!
//! ```text
//! E(P) = (B.x - A.x) * (P.y - A.y) - (B.y - A.y) * (P.x - A.x)
//! ```
//!
//! - Positive: P is to the left of AB
//! - Negative: P is to the right of AB
//! - Zero: P lies exactly on AB
//!
//! A point is inside when all three edges agree strictly. Points exactly on
//! an edge are outside, so two triangles sharing an edge may both skip the
//! pixels whose centers sit on it. Either winding order is accepted.
//!
//! # Barycentric Coordinates
//!
//! Computed with the 2D area-ratio formula from the screen-space x/y of the
//! vertices only. For a zero-area triangle the ratios divide by zero and
//! produce NaN; every depth comparison against NaN is false, so such
//! triangles never write anything.
//!
//! # Perspective-Correct Depth
//!
//! ```text
//! w_recip = 1 / (α/w0 + β/w1 + γ/w2)
//! z       = w_recip * (α·z0/w0 + β·z1/w1 + γ·z2/w2)
//! ```
//!
//! Vertices coming out of the viewport transform have `w = 1`, where this is
//! plain linear interpolation of the remapped depth. That is exact: after the
//! perspective divide, depth across a planar triangle is affine in screen
//! x/y.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::render::framebuffer::SAMPLE_COUNT;
use crate::triangle::Triangle;

/// Fixed sub-pixel sample positions, relative to the pixel's lower-left corner.
pub const SAMPLE_OFFSETS: [(f32, f32); SAMPLE_COUNT] =
    [(0.25, 0.25), (0.25, 0.75), (0.75, 0.25), (0.75, 0.75)];

/// Pixel-space rectangle a triangle can touch. `max_*` are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Bounding box of the triangle's x/y, truncated to integers and clamped
    /// to a `width` x `height` frame.
    ///
    /// Truncation plus the exclusive upper bound means a pixel whose index
    /// equals the exact max coordinate is never visited.
    pub fn of(v: &[Vec3; 3], width: u32, height: u32) -> Self {
        let min_x = v[0].x.min(v[1].x).min(v[2].x) as i32;
        let max_x = v[0].x.max(v[1].x).max(v[2].x) as i32;
        let min_y = v[0].y.min(v[1].y).min(v[2].y) as i32;
        let max_y = v[0].y.max(v[1].y).max(v[2].y) as i32;

        Self {
            min_x: min_x.max(0),
            min_y: min_y.max(0),
            max_x: max_x.min(width as i32),
            max_y: max_y.min(height as i32),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_y >= self.max_y
    }

    /// Every pixel inside the box, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..self.max_y).flat_map(move |y| (min_x..max_x).map(move |x| (x, y)))
    }
}

/// Signed edge function of P against edge A -> B.
#[inline]
fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    (b - a).cross(p - a).z
}

/// Strict same-sign test of (x, y) against all three edges.
#[inline]
pub fn inside_triangle(x: f32, y: f32, v: &[Vec3; 3]) -> bool {
    let p = Vec3::new(x, y, 0.0);
    let n1 = edge_function(v[0], v[1], p);
    let n2 = edge_function(v[1], v[2], p);
    let n3 = edge_function(v[2], v[0], p);
    (n1 > 0.0 && n2 > 0.0 && n3 > 0.0) || (n1 < 0.0 && n2 < 0.0 && n3 < 0.0)
}

/// Barycentric coordinates (α, β, γ) of (x, y) with respect to `v`.
pub fn compute_barycentric_2d(x: f32, y: f32, v: &[Vec3; 3]) -> (f32, f32, f32) {
    let [a, b, c] = *v;
    let c1 = (x * (b.y - c.y) + (c.x - b.x) * y + b.x * c.y - c.x * b.y)
        / (a.x * (b.y - c.y) + (c.x - b.x) * a.y + b.x * c.y - c.x * b.y);
    let c2 = (x * (c.y - a.y) + (a.x - c.x) * y + c.x * a.y - a.x * c.y)
        / (b.x * (c.y - a.y) + (a.x - c.x) * b.y + c.x * a.y - a.x * c.y);
    let c3 = (x * (a.y - b.y) + (b.x - a.x) * y + a.x * b.y - b.x * a.y)
        / (c.x * (a.y - b.y) + (b.x - a.x) * c.y + a.x * b.y - b.x * a.y);
    (c1, c2, c3)
}

/// Perspective-correct interpolation of vertex depth.
#[inline]
pub fn interpolate_depth((alpha, beta, gamma): (f32, f32, f32), v: &[Vec4; 3]) -> f32 {
    let w_reciprocal = 1.0 / (alpha / v[0].w + beta / v[1].w + gamma / v[2].w);
    let z_interpolated =
        alpha * v[0].z / v[0].w + beta * v[1].z / v[1].w + gamma * v[2].z / v[2].w;
    z_interpolated * w_reciprocal
}

/// Depth of `triangle` at screen position (x, y).
#[inline]
pub fn depth_at(x: f32, y: f32, triangle: &Triangle) -> f32 {
    let barycentric = compute_barycentric_2d(x, y, &triangle.to_vec3());
    interpolate_depth(barycentric, &triangle.to_vec4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DepthRange;
    use crate::math::mat4::Mat4;
    use crate::transform::Viewport;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn screen_triangle() -> [Vec3; 3] {
        [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(3.0, 1.0, 1.0),
            Vec3::new(2.0, 3.0, 1.0),
        ]
    }

    #[test]
    fn barycentric_at_vertices_is_unit() {
        let v = [
            Vec3::new(10.0, 20.0, 0.0),
            Vec3::new(50.0, 25.0, 0.0),
            Vec3::new(30.0, 70.0, 0.0),
        ];
        let expected = [(1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0)];

        for (vertex, (ea, eb, ec)) in v.iter().zip(expected) {
            let (a, b, c) = compute_barycentric_2d(vertex.x, vertex.y, &v);
            assert_relative_eq!(a, ea, epsilon = 1e-5);
            assert_relative_eq!(b, eb, epsilon = 1e-5);
            assert_relative_eq!(c, ec, epsilon = 1e-5);
        }
    }

    #[test]
    fn barycentric_weights_sum_to_one() {
        let v = screen_triangle();
        let (a, b, c) = compute_barycentric_2d(2.1, 1.7, &v);
        assert_relative_eq!(a + b + c, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn inside_test_accepts_both_windings() {
        let ccw = screen_triangle();
        let cw = [ccw[0], ccw[2], ccw[1]];
        assert!(inside_triangle(2.0, 1.5, &ccw));
        assert!(inside_triangle(2.0, 1.5, &cw));
        assert!(!inside_triangle(0.5, 0.5, &ccw));
        assert!(!inside_triangle(0.5, 0.5, &cw));
    }

    #[test]
    fn points_on_an_edge_are_outside() {
        let v = screen_triangle();
        // Midpoint of the bottom edge and a vertex.
        assert!(!inside_triangle(2.0, 1.0, &v));
        assert!(!inside_triangle(1.0, 1.0, &v));
    }

    #[test]
    fn degenerate_triangle_covers_nothing() {
        let v = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
        ];
        assert!(!inside_triangle(1.0, 1.0, &v));
        assert!(!inside_triangle(0.5, 1.0, &v));

        let (a, _, _) = compute_barycentric_2d(1.0, 0.5, &v);
        assert!(!a.is_finite());
    }

    #[test]
    fn uniform_depth_is_preserved() {
        let tri = Triangle::new(
            [
                Vec4::new(0.0, 0.0, 7.5, 2.0),
                Vec4::new(4.0, 0.0, 7.5, 3.0),
                Vec4::new(0.0, 4.0, 7.5, 5.0),
            ],
            Vec3::ONE,
        );
        assert_relative_eq!(depth_at(1.0, 1.0, &tri), 7.5, epsilon = 1e-5);
    }

    /// Screen point (`x`, `y`) of a 64x64 frame seen through a 90 degree
    /// square frustum hits the floor plane y = -1 at this eye-space point.
    fn floor_hit(x: f32, y: f32) -> Vec3 {
        let (ndc_x, ndc_y) = (x / 32.0 - 1.0, y / 32.0 - 1.0);
        let distance = -1.0 / ndc_y;
        Vec3::new(ndc_x * distance, -1.0, -distance)
    }

    #[test]
    fn slanted_triangle_depth_matches_projected_surface() {
        let viewport = Viewport::new(64, 64, DepthRange::default());
        let mvp = Mat4::perspective_rh(FRAC_PI_2, 1.0, 0.1, 50.0);
        let floor = Triangle::new(
            [
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(0.0, -1.0, -30.0),
            ]
            .map(|p| viewport.project(&mvp, p)),
            Vec3::ONE,
        );

        for (x, y) in [(32.5, 20.5), (30.5, 12.5), (34.5, 26.5)] {
            let expected = viewport.project(&mvp, floor_hit(x, y)).z;
            assert!(inside_triangle(x, y, &floor.to_vec3()));
            assert_relative_eq!(depth_at(x, y, &floor), expected, max_relative = 1e-4);
        }
    }

    #[test]
    fn bounding_box_truncates_and_excludes_max() {
        let bbox = BoundingBox::of(&screen_triangle(), 10, 10);
        assert_eq!(
            bbox,
            BoundingBox {
                min_x: 1,
                min_y: 1,
                max_x: 3,
                max_y: 3
            }
        );
        let pixels: Vec<_> = bbox.pixels().collect();
        assert_eq!(pixels, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn bounding_box_is_clamped_to_frame() {
        let v = [
            Vec3::new(-5.0, -5.0, 0.0),
            Vec3::new(20.0, -5.0, 0.0),
            Vec3::new(0.0, 20.0, 0.0),
        ];
        let bbox = BoundingBox::of(&v, 4, 3);
        assert_eq!((bbox.min_x, bbox.min_y), (0, 0));
        assert_eq!((bbox.max_x, bbox.max_y), (4, 3));
    }

    #[test]
    fn bounding_box_outside_frame_is_empty() {
        let v = [
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(12.0, 10.0, 0.0),
            Vec3::new(11.0, 12.0, 0.0),
        ];
        assert!(BoundingBox::of(&v, 4, 4).is_empty());
        assert_eq!(BoundingBox::of(&v, 4, 4).pixels().count(), 0);
    }
}
