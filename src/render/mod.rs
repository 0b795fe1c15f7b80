//! Rasterization stage: frame storage and triangle scan conversion.

pub mod framebuffer;
pub mod rasterizer;

pub use framebuffer::{Buffers, FrameBuffer, SAMPLE_COUNT};
pub use rasterizer::{
    AntiAliasing, MsaaDepthPolicy, MultisampleRasterizer, Rasterizer, RasterizerDispatcher,
    SingleSampleRasterizer, SupersampleRasterizer,
};
