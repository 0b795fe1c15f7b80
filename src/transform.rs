//! Vertex transform stage.
//!
//! [`TransformPipeline`] stores the model, view and projection matrices and
//! [`Viewport`] maps clip-space positions to screen space.

use crate::config::DepthRange;
use crate::math::{mat4::Mat4, vec3::Vec3, vec4::Vec4};

/// Model, view and projection matrices, all identity by default.
///
/// The setters replace a matrix without any validation; callers are
/// responsible for supplying sensible transforms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformPipeline {
    model: Mat4,
    view: Mat4,
    projection: Mat4,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_model(&mut self, m: Mat4) {
        self.model = m;
    }

    pub fn set_view(&mut self, v: Mat4) {
        self.view = v;
    }

    pub fn set_projection(&mut self, p: Mat4) {
        self.projection = p;
    }

    /// Combined `projection * view * model`.
    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// Maps NDC to pixel coordinates and the configured depth range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub depth_range: DepthRange,
}

impl Viewport {
    pub fn new(width: u32, height: u32, depth_range: DepthRange) -> Self {
        Self {
            width,
            height,
            depth_range,
        }
    }

    /// Transform an object-space point all the way to screen space.
    ///
    /// The point is promoted to w = 1, multiplied by `mvp`, divided through
    /// by its clip-space w and mapped with
    /// `x' = 0.5 * width * (x + 1)`, `y' = 0.5 * height * (y + 1)` and
    /// `z' = z * f1 + f2`. The returned `w` is always 1: the remapped depth
    /// is affine in screen x/y, so it needs no further correction.
    pub fn project(&self, mvp: &Mat4, position: Vec3) -> Vec4 {
        let ndc = (*mvp * Vec4::from_vec3(position, 1.0)).divide_by_w();
        Vec4::new(
            0.5 * self.width as f32 * (ndc.x + 1.0),
            0.5 * self.height as f32 * (ndc.y + 1.0),
            self.depth_range.remap(ndc.z),
            ndc.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_pipeline_is_identity() {
        let pipeline = TransformPipeline::new();
        assert_eq!(pipeline.mvp(), Mat4::identity());
    }

    #[test]
    fn mvp_applies_model_first() {
        let mut pipeline = TransformPipeline::new();
        pipeline.set_model(Mat4::scaling(2.0, 2.0, 2.0));
        pipeline.set_view(Mat4::translation(1.0, 0.0, 0.0));

        let p = pipeline.mvp() * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p, Vec4::new(3.0, 2.0, 2.0, 1.0));
    }

    #[test]
    fn viewport_maps_ndc_corners_to_pixels() {
        let viewport = Viewport::new(700, 500, DepthRange::default());
        let identity = Mat4::identity();

        let lower_left = viewport.project(&identity, Vec3::new(-1.0, -1.0, -1.0));
        assert_relative_eq!(lower_left.x, 0.0);
        assert_relative_eq!(lower_left.y, 0.0);
        assert_relative_eq!(lower_left.z, 0.1, epsilon = 1e-5);

        let upper_right = viewport.project(&identity, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(upper_right.x, 700.0);
        assert_relative_eq!(upper_right.y, 500.0);
        assert_relative_eq!(upper_right.z, 50.0, epsilon = 1e-4);
        assert_eq!(upper_right.w, 1.0);
    }

    #[test]
    fn perspective_divide_normalizes_w() {
        let viewport = Viewport::new(10, 10, DepthRange::default());
        // Scales w by 2, as a projection would for a point at distance 2.
        let mvp = Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 2.0],
        ]);

        let p = viewport.project(&mvp, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 7.5);
        assert_relative_eq!(p.y, 5.0);
        assert_eq!(p.w, 1.0);
    }
}
