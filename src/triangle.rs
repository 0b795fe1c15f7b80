use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A triangle ready for rasterization in screen space.
///
/// `x`/`y` are pixel coordinates, `z` is depth in the remapped depth range
/// and `w` is 1 once the vertex has been through the perspective divide.
///
/// The triangle is flat shaded: it carries one color. The per-vertex setter
/// exists for callers that feed vertex colors one by one; every call
/// overwrites the same field, so the last write wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub v: [Vec4; 3],
    color: Vec3,
}

impl Default for Triangle {
    fn default() -> Self {
        Self {
            v: [Vec4::new(0.0, 0.0, 0.0, 1.0); 3],
            color: Vec3::ZERO,
        }
    }
}

impl Triangle {
    pub fn new(v: [Vec4; 3], color: Vec3) -> Self {
        Self { v, color }
    }

    pub fn set_vertex(&mut self, ind: usize, vertex: Vec4) {
        self.v[ind] = vertex;
    }

    /// Set the color of vertex `_ind`. Flat shading keeps a single color.
    // Gouraud interpolation would turn this into a per-vertex array.
    pub fn set_color(&mut self, _ind: usize, color: Vec3) {
        self.color = color;
    }

    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Homogeneous screen-space vertices.
    pub fn to_vec4(&self) -> [Vec4; 3] {
        self.v
    }

    /// Screen-space vertices with `w` dropped.
    pub fn to_vec3(&self) -> [Vec3; 3] {
        self.v.map(Vec4::to_vec3)
    }
}
