//! Core rendering engine.
//!
//! The [`Engine`] struct is the main entry point: it owns the geometry
//! buffers, the transform matrices and the frame buffer, and runs the
//! pipeline from object-space triangles to pixels on every [`Engine::draw`].

use std::path::Path;

use crate::buffers::{fetch, BufferKind, ColBufId, GeometryBuffers, IndBufId, PosBufId};
use crate::config::RasterConfig;
use crate::error::{RasterError, Result};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::mesh::MeshData;
use crate::output;
use crate::render::{
    AntiAliasing, Buffers, FrameBuffer, MsaaDepthPolicy, Rasterizer, RasterizerDispatcher,
};
use crate::transform::{TransformPipeline, Viewport};
use crate::triangle::Triangle;

/// How an index buffer is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Primitive {
    Line,
    /// Every index triple is an independent triangle.
    #[default]
    Triangle,
}

/// Handles returned by [`Engine::load_mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHandles {
    pub positions: PosBufId,
    pub indices: IndBufId,
    pub colors: ColBufId,
}

pub struct Engine {
    buffers: GeometryBuffers,
    transforms: TransformPipeline,
    viewport: Viewport,
    frame: FrameBuffer,
    rasterizer: RasterizerDispatcher,
}

impl Engine {
    /// Creates an engine with default settings and the given frame size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(RasterConfig::new(width, height))
    }

    pub fn with_config(config: RasterConfig) -> Self {
        log::debug!(
            "engine {}x{}, anti-aliasing {}, MSAA depth policy {:?}",
            config.width,
            config.height,
            config.anti_aliasing,
            config.msaa_depth_policy
        );
        Self {
            buffers: GeometryBuffers::new(),
            transforms: TransformPipeline::new(),
            viewport: Viewport::new(config.width, config.height, config.depth_range),
            frame: FrameBuffer::new(config.width, config.height),
            rasterizer: RasterizerDispatcher::new(config.anti_aliasing, config.msaa_depth_policy),
        }
    }

    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    pub fn height(&self) -> u32 {
        self.viewport.height
    }

    // ============ Geometry ============

    pub fn load_positions(&mut self, positions: Vec<Vec3>) -> PosBufId {
        self.buffers.load_positions(positions)
    }

    pub fn load_indices(&mut self, indices: Vec<[u32; 3]>) -> IndBufId {
        self.buffers.load_indices(indices)
    }

    pub fn load_colors(&mut self, colors: Vec<Vec3>) -> ColBufId {
        self.buffers.load_colors(colors)
    }

    /// Load an OBJ file into three fresh buffers.
    pub fn load_mesh<P: AsRef<Path>>(&mut self, path: P) -> Result<MeshHandles> {
        let mesh = MeshData::from_obj(path)?;
        Ok(self.load_mesh_data(mesh))
    }

    pub fn load_mesh_data(&mut self, mesh: MeshData) -> MeshHandles {
        MeshHandles {
            positions: self.load_positions(mesh.positions),
            indices: self.load_indices(mesh.indices),
            colors: self.load_colors(mesh.colors),
        }
    }

    // ============ Transforms ============

    pub fn set_model(&mut self, m: Mat4) {
        self.transforms.set_model(m);
    }

    pub fn set_view(&mut self, v: Mat4) {
        self.transforms.set_view(v);
    }

    pub fn set_projection(&mut self, p: Mat4) {
        self.transforms.set_projection(p);
    }

    pub fn transforms(&self) -> &TransformPipeline {
        &self.transforms
    }

    // ============ Rasterizer settings ============

    pub fn set_anti_aliasing(&mut self, mode: AntiAliasing) {
        self.rasterizer.set_type(mode);
    }

    pub fn anti_aliasing(&self) -> AntiAliasing {
        self.rasterizer.active_type()
    }

    pub fn set_msaa_depth_policy(&mut self, policy: MsaaDepthPolicy) {
        self.rasterizer.set_depth_policy(policy);
    }

    pub fn msaa_depth_policy(&self) -> MsaaDepthPolicy {
        self.rasterizer.depth_policy()
    }

    // ============ Frame ============

    pub fn clear(&mut self, buffers: Buffers) {
        self.frame.clear(buffers);
    }

    /// Final colors, top image row first.
    pub fn frame_buffer(&self) -> &[Vec3] {
        self.frame.colors()
    }

    /// Nearest depth per pixel, same layout as [`Engine::frame_buffer`].
    pub fn depth_buffer(&self) -> &[f32] {
        self.frame.depths()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn to_image(&self) -> Result<image::RgbImage> {
        output::to_image(&self.frame)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        output::save(&self.frame, path)
    }

    // ============ Drawing ============

    /// Transform and rasterize every triangle of an index buffer.
    ///
    /// All triangles are assembled before any is rasterized: a bad handle or
    /// an out-of-range index fails the whole call and leaves the frame as
    /// it was.
    pub fn draw(
        &mut self,
        pos_buffer: PosBufId,
        ind_buffer: IndBufId,
        col_buffer: ColBufId,
        primitive: Primitive,
    ) -> Result<()> {
        let triangles = match self.assemble(pos_buffer, ind_buffer, col_buffer, primitive) {
            Ok(triangles) => triangles,
            Err(e) => {
                log::warn!("draw rejected: {}", e);
                return Err(e);
            }
        };

        log::debug!(
            "drawing {} triangles with {} anti-aliasing",
            triangles.len(),
            self.rasterizer.active_type()
        );
        for triangle in &triangles {
            self.rasterizer.rasterize(triangle, &mut self.frame);
        }
        Ok(())
    }

    fn assemble(
        &self,
        pos_buffer: PosBufId,
        ind_buffer: IndBufId,
        col_buffer: ColBufId,
        primitive: Primitive,
    ) -> Result<Vec<Triangle>> {
        if primitive != Primitive::Triangle {
            return Err(RasterError::UnsupportedPrimitive(primitive));
        }

        let positions = self.buffers.positions(pos_buffer)?;
        let indices = self.buffers.indices(ind_buffer)?;
        let colors = self.buffers.colors(col_buffer)?;
        let mvp = self.transforms.mvp();

        indices
            .iter()
            .map(|face| {
                let mut t = Triangle::default();
                for (i, &index) in face.iter().enumerate() {
                    let position = fetch(positions, index, BufferKind::Position)?;
                    let color = fetch(colors, index, BufferKind::Color)?;
                    t.set_vertex(i, self.viewport.project(&mvp, position));
                    t.set_color(i, color);
                }
                Ok(t)
            })
            .collect()
    }
}
