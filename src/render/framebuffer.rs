//! Color, depth and antialiasing sample storage.
//!
//! All buffers are flat and `width * height` long. Pixels are addressed
//! through [`FrameBuffer::get_index`], which flips the y axis: raster row
//! `y = 0` is the bottom of the image, stored last.
//!
//! Out-of-bounds coordinates are ignored by every writer and reported as
//! `None` by every reader.

use bitflags::bitflags;

use crate::math::vec3::Vec3;

/// Number of sub-pixel samples kept per pixel for antialiasing.
pub const SAMPLE_COUNT: usize = 4;

bitflags! {
    /// Which buffers [`FrameBuffer::clear`] resets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buffers: u8 {
        const COLOR = 1;
        const DEPTH = 2;
    }
}

/// Owns the color and depth buffers of one rasterizer.
///
/// # Depth Buffer
///
/// Depth is the screen-space z after the viewport remap. Smaller values are
/// nearer; a cleared entry holds `f32::INFINITY`.
///
/// # Sample Buffers
///
/// Each pixel also has [`SAMPLE_COUNT`] sample colors and sample depths used
/// by supersampling. They are independent of the main depth buffer.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    color_buffer: Vec<Vec3>,
    depth_buffer: Vec<f32>,
    sample_colors: Vec<[Vec3; SAMPLE_COUNT]>,
    sample_depths: Vec<[f32; SAMPLE_COUNT]>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![Vec3::ZERO; size],
            depth_buffer: vec![f32::INFINITY; size],
            sample_colors: vec![[Vec3::ZERO; SAMPLE_COUNT]; size],
            sample_depths: vec![[f32::INFINITY; SAMPLE_COUNT]; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset the selected buffers. Color goes to black, depth to +infinity.
    /// The per-sample buffers are reset together with their main buffer.
    pub fn clear(&mut self, buffers: Buffers) {
        if buffers.contains(Buffers::COLOR) {
            self.color_buffer.fill(Vec3::ZERO);
            self.sample_colors.fill([Vec3::ZERO; SAMPLE_COUNT]);
        }
        if buffers.contains(Buffers::DEPTH) {
            self.depth_buffer.fill(f32::INFINITY);
            self.sample_depths.fill([f32::INFINITY; SAMPLE_COUNT]);
        }
    }

    /// Flat index of raster pixel (x, y): `(height - 1 - y) * width + x`.
    ///
    /// Returns `None` outside the frame.
    #[inline]
    pub fn get_index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let row = (self.height as i32 - 1 - y) as usize;
            Some(row * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Plain write: store `color` at (x, y), nothing else.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Vec3) {
        if let Some(idx) = self.get_index(x, y) {
            self.color_buffer[idx] = color;
        }
    }

    /// Antialiased write: store `color` plus the average of the pixel's
    /// sample colors.
    #[inline]
    pub fn set_pixel_composite(&mut self, x: i32, y: i32, color: Vec3) {
        if let Some(idx) = self.get_index(x, y) {
            self.color_buffer[idx] = color + self.sample_average(idx);
        }
    }

    #[inline]
    pub fn set_depth(&mut self, x: i32, y: i32, depth: f32) {
        if let Some(idx) = self.get_index(x, y) {
            self.depth_buffer[idx] = depth;
        }
    }

    #[inline]
    pub fn color_at(&self, x: i32, y: i32) -> Option<Vec3> {
        self.get_index(x, y).map(|idx| self.color_buffer[idx])
    }

    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.get_index(x, y).map(|idx| self.depth_buffer[idx])
    }

    /// Color and depth of sample `i` of pixel (x, y).
    #[inline]
    pub fn sample_at(&self, x: i32, y: i32, i: usize) -> Option<(Vec3, f32)> {
        if i >= SAMPLE_COUNT {
            return None;
        }
        self.get_index(x, y)
            .map(|idx| (self.sample_colors[idx][i], self.sample_depths[idx][i]))
    }

    /// Overwrite sample `i` of pixel (x, y).
    #[inline]
    pub fn set_sample(&mut self, x: i32, y: i32, i: usize, color: Vec3, depth: f32) {
        if i >= SAMPLE_COUNT {
            return;
        }
        if let Some(idx) = self.get_index(x, y) {
            self.sample_colors[idx][i] = color;
            self.sample_depths[idx][i] = depth;
        }
    }

    fn sample_average(&self, idx: usize) -> Vec3 {
        let sum = self.sample_colors[idx]
            .iter()
            .fold(Vec3::ZERO, |acc, &c| acc + c);
        sum / SAMPLE_COUNT as f32
    }

    /// Final colors in image order (top row first).
    pub fn colors(&self) -> &[Vec3] {
        &self.color_buffer
    }

    /// Depth values in image order (top row first).
    pub fn depths(&self) -> &[f32] {
        &self.depth_buffer
    }
}
