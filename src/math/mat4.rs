//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Example
//! ```ignore
//! let mvp = projection * view * model; // model applied first
//! let clip = mvp * Vec4::from(position);
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column (column-major convention).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation about the Z axis, angle in radians.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed, OpenGL-style perspective projection.
    ///
    /// The camera looks down -Z. `near` and `far` are positive distances.
    /// Points on the near plane land at NDC z = -1 and on the far plane at
    /// z = +1, so after the viewport depth remap smaller depth means nearer.
    /// The clip-space `w` of a point equals its distance in front of the eye.
    pub fn perspective_rh(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let t = near * (fov_y / 2.0).tan();
        let r = t * aspect_ratio;
        let a = -(far + near) / (far - near);
        let b = -2.0 * far * near / (far - near);
        Mat4::new([
            [near / r, 0.0, 0.0, 0.0],
            [0.0, near / t, 0.0, 0.0],
            [0.0, 0.0, a, b],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// View matrix for a camera at `eye` looking down -Z with +Y up.
    pub fn look_from(eye: Vec3) -> Self {
        Self::translation(-eye.x, -eye.y, -eye.z)
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x
                + self.data[r][1] * v.y
                + self.data[r][2] * v.z
                + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(Mat4::identity() * m, m);
        assert_eq!(m * Mat4::identity(), m);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        let point = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let direction = m * Vec4::new(1.0, 0.0, 0.0, 0.0);
        assert_eq!(point, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(direction, Vec4::new(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn chained_transforms_apply_right_to_left() {
        let m = Mat4::translation(1.0, 0.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
        let p = m * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p, Vec4::new(3.0, 2.0, 2.0, 1.0));
    }

    #[test]
    fn rotation_z_is_counter_clockwise() {
        let p = Mat4::rotation_z(FRAC_PI_2) * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let proj = Mat4::perspective_rh(FRAC_PI_4, 1.0, 0.1, 50.0);

        let near = proj * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert_relative_eq!(near.w, 0.1, epsilon = 1e-6);
        assert_relative_eq!(near.divide_by_w().z, -1.0, epsilon = 1e-4);

        let far = proj * Vec4::new(0.0, 0.0, -50.0, 1.0);
        assert_relative_eq!(far.w, 50.0, epsilon = 1e-4);
        assert_relative_eq!(far.divide_by_w().z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn look_from_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let p = Mat4::look_from(eye) * Vec4::from_vec3(eye, 1.0);
        assert_eq!(p, Vec4::new(0.0, 0.0, 0.0, 1.0));
    }
}
