//! Triangle rasterization with selectable antialiasing.
//!
//! Every policy shares the same coverage math (see [`edgefunction`]) and
//! differs only in how samples are taken and resolved:
//! - [`SingleSampleRasterizer`]: one sample at the pixel center
//! - [`SupersampleRasterizer`]: four depth-tested color samples per pixel
//! - [`MultisampleRasterizer`]: four coverage samples, one depth test

pub mod edgefunction;
mod multisample;
mod single;
mod supersample;

pub use multisample::MultisampleRasterizer;
pub use single::SingleSampleRasterizer;
pub use supersample::SupersampleRasterizer;

use super::framebuffer::FrameBuffer;
use crate::math::vec3::Vec3;
use crate::triangle::Triangle;
use edgefunction::BoundingBox;

/// Trait for triangle rasterization policies.
///
/// Implementors scan a screen-space triangle into the frame buffer. This
/// allows swapping sampling strategies at runtime for testing and
/// benchmarking.
pub trait Rasterizer {
    /// Rasterize one triangle into `buffer`.
    fn rasterize(&self, triangle: &Triangle, buffer: &mut FrameBuffer);
}

/// Frame-clamped bounding box of `v`, or `None` when it is empty.
fn visible_bbox(v: &[Vec3; 3], buffer: &FrameBuffer) -> Option<BoundingBox> {
    let bbox = BoundingBox::of(v, buffer.width(), buffer.height());
    if bbox.is_empty() {
        log::trace!("triangle {:?} is off screen, skipped", v);
        return None;
    }
    log::trace!("rasterizing bbox {:?}", bbox);
    Some(bbox)
}

/// Antialiasing policy used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AntiAliasing {
    /// One sample per pixel at its center.
    #[default]
    None,
    /// SSAA: four independently depth-tested samples, averaged per pixel.
    Supersample,
    /// MSAA: four coverage samples scale the color, depth tested once.
    Multisample,
}

impl std::fmt::Display for AntiAliasing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AntiAliasing::None => write!(f, "None"),
            AntiAliasing::Supersample => write!(f, "SSAA"),
            AntiAliasing::Multisample => write!(f, "MSAA"),
        }
    }
}

/// What MSAA does to the depth of a pixel that is not fully covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MsaaDepthPolicy {
    /// Reset the pixel's depth to +infinity whenever coverage is below 4, so
    /// any later triangle can blend into the edge regardless of depth.
    /// Edge pixels may then show farther geometry drawn afterwards.
    ///
    /// Coverage 0 counts too: every pixel of the clamped bounding box loses
    /// its depth, even when the triangle itself lies entirely off screen.
    #[default]
    CoverageOverridesDepth,
    /// Keep whatever depth the pixel holds; edges are depth tested like
    /// interior pixels.
    Strict,
}

/// Holds one rasterizer per policy and forwards to the active one.
#[derive(Debug, Clone, Copy)]
pub struct RasterizerDispatcher {
    single: SingleSampleRasterizer,
    supersample: SupersampleRasterizer,
    multisample: MultisampleRasterizer,
    active: AntiAliasing,
}

impl RasterizerDispatcher {
    pub fn new(anti_aliasing: AntiAliasing, depth_policy: MsaaDepthPolicy) -> Self {
        Self {
            single: SingleSampleRasterizer::new(),
            supersample: SupersampleRasterizer::new(),
            multisample: MultisampleRasterizer::new(depth_policy),
            active: anti_aliasing,
        }
    }

    pub fn set_type(&mut self, anti_aliasing: AntiAliasing) {
        self.active = anti_aliasing;
    }

    pub fn active_type(&self) -> AntiAliasing {
        self.active
    }

    pub fn set_depth_policy(&mut self, depth_policy: MsaaDepthPolicy) {
        self.multisample = MultisampleRasterizer::new(depth_policy);
    }

    pub fn depth_policy(&self) -> MsaaDepthPolicy {
        self.multisample.depth_policy()
    }
}

impl Rasterizer for RasterizerDispatcher {
    #[inline]
    fn rasterize(&self, triangle: &Triangle, buffer: &mut FrameBuffer) {
        match self.active {
            AntiAliasing::None => self.single.rasterize(triangle, buffer),
            AntiAliasing::Supersample => self.supersample.rasterize(triangle, buffer),
            AntiAliasing::Multisample => self.multisample.rasterize(triangle, buffer),
        }
    }
}
