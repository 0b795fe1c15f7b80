//! Small fixed-size linear algebra used by the pipeline.
//!
//! Only what the rasterizer needs: 3D/4D float vectors and a 4x4 matrix
//! acting on column vectors.

pub mod mat4;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use vec3::Vec3;
pub use vec4::Vec4;
