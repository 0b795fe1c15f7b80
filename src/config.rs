//! Construction-time settings for an [`Engine`](crate::Engine).

use crate::render::rasterizer::{AntiAliasing, MsaaDepthPolicy};

/// Screen-space depth range that NDC z in `[-1, 1]` is remapped into.
///
/// Smaller values are nearer. The viewport transform computes
/// `z' = z * f1 + f2` with `f1 = (far - near) / 2` and `f2 = (far + near) / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub near: f32,
    pub far: f32,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 50.0,
        }
    }
}

impl DepthRange {
    pub fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    /// Scale applied to NDC z.
    #[inline]
    pub fn f1(&self) -> f32 {
        (self.far - self.near) / 2.0
    }

    /// Offset applied after scaling.
    #[inline]
    pub fn f2(&self) -> f32 {
        (self.far + self.near) / 2.0
    }

    /// Map an NDC z value into this range.
    #[inline]
    pub fn remap(&self, ndc_z: f32) -> f32 {
        ndc_z * self.f1() + self.f2()
    }
}

/// Settings for a rasterizer instance.
///
/// Setters consume and return `self` so a config reads as one expression:
///
/// ```ignore
/// let config = RasterConfig::new(700, 700)
///     .anti_aliasing(AntiAliasing::Supersample)
///     .msaa_depth_policy(MsaaDepthPolicy::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterConfig {
    pub width: u32,
    pub height: u32,
    pub anti_aliasing: AntiAliasing,
    pub msaa_depth_policy: MsaaDepthPolicy,
    pub depth_range: DepthRange,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self::new(700, 700)
    }
}

impl RasterConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            anti_aliasing: AntiAliasing::default(),
            msaa_depth_policy: MsaaDepthPolicy::default(),
            depth_range: DepthRange::default(),
        }
    }

    pub fn anti_aliasing(mut self, mode: AntiAliasing) -> Self {
        self.anti_aliasing = mode;
        self
    }

    pub fn msaa_depth_policy(mut self, policy: MsaaDepthPolicy) -> Self {
        self.msaa_depth_policy = policy;
        self
    }

    pub fn depth_range(mut self, range: DepthRange) -> Self {
        self.depth_range = range;
        self
    }

    /// Number of pixels in each full-frame buffer.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
