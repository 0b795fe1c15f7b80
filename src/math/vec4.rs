//! 4D vector for homogeneous coordinates.

use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a Vec4 from a Vec3 with specified w component.
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Convert to Vec3, discarding w.
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Perspective division of every component by w, leaving `w == 1`.
    pub fn divide_by_w(self) -> Self {
        Self::new(self.x / self.w, self.y / self.w, self.z / self.w, 1.0)
    }
}

impl From<Vec3> for Vec4 {
    /// Convert Vec3 to Vec4 as a point (w=1).
    fn from(v: Vec3) -> Self {
        Self::from_vec3(v, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_by_w_normalizes_w() {
        let v = Vec4::new(2.0, 4.0, 6.0, 2.0).divide_by_w();
        assert_eq!(v, Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn from_vec3_is_a_point() {
        let v: Vec4 = Vec3::new(1.0, 2.0, 3.0).into();
        assert_eq!(v.w, 1.0);
    }
}
