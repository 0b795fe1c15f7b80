//! A CPU triangle rasterizer with optional antialiasing.
//!
//! Geometry is uploaded into handle-addressed buffers, transformed by
//! model/view/projection matrices, scan converted with edge functions and
//! depth tested into a frame buffer that can be written out as an image.
//!
//! # Quick Start
//!
//! ```ignore
//! use softrast::prelude::*;
//!
//! let mut engine = Engine::new(700, 700);
//! let pos = engine.load_positions(vec![
//!     Vec3::new(2.0, 0.0, -2.0),
//!     Vec3::new(0.0, 2.0, -2.0),
//!     Vec3::new(-2.0, 0.0, -2.0),
//! ]);
//! let ind = engine.load_indices(vec![[0, 1, 2]]);
//! let col = engine.load_colors(vec![Vec3::ONE; 3]);
//!
//! engine.set_view(Mat4::look_from(Vec3::new(0.0, 0.0, 5.0)));
//! engine.set_projection(Projection::from_degrees(45.0, 1.0, 0.1, 50.0).matrix());
//! engine.set_anti_aliasing(AntiAliasing::Supersample);
//! engine.clear(Buffers::COLOR | Buffers::DEPTH);
//! engine.draw(pos, ind, col, Primitive::Triangle)?;
//! engine.save("output.png")?;
//! ```

// Public API - exposed to library consumers
pub mod buffers;
pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod mesh;
pub mod output;
pub mod projection;
pub mod transform;
pub mod triangle;

// Rasterization internals, reachable through `bench` and the re-exports below
pub(crate) mod render;

// Re-export commonly needed types at crate root for convenience
pub use buffers::{ColBufId, IndBufId, PosBufId};
pub use config::{DepthRange, RasterConfig};
pub use engine::{Engine, MeshHandles, Primitive};
pub use error::{RasterError, Result};
pub use mesh::MeshData;
pub use projection::Projection;
pub use render::{AntiAliasing, Buffers, MsaaDepthPolicy};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softrast::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::engine::{Engine, MeshHandles, Primitive};

    // Configuration
    pub use crate::config::{DepthRange, RasterConfig};
    pub use crate::render::{AntiAliasing, Buffers, MsaaDepthPolicy};

    // Geometry
    pub use crate::buffers::{ColBufId, IndBufId, PosBufId};
    pub use crate::mesh::MeshData;

    // Projection
    pub use crate::projection::Projection;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        FrameBuffer, MultisampleRasterizer, MsaaDepthPolicy, Rasterizer, SingleSampleRasterizer,
        SupersampleRasterizer,
    };
    pub use crate::triangle::Triangle;
}
