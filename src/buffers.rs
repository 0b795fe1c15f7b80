//! Handle-addressed storage for vertex positions, index triples and colors.
//!
//! Buffers are append-only: each load stores a list under a freshly minted
//! handle and nothing is ever removed. All three kinds share one
//! [`IdGenerator`], so a raw id is unique across kinds, not only within one.

use std::collections::HashMap;
use std::fmt;

use crate::error::{RasterError, Result};
use crate::math::vec3::Vec3;

/// Which of the three geometry buffers a handle or index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Position,
    Index,
    Color,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Position => write!(f, "position"),
            BufferKind::Index => write!(f, "index"),
            BufferKind::Color => write!(f, "color"),
        }
    }
}

/// Handle to a buffer of object-space vertex positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PosBufId(u32);

/// Handle to a buffer of triangle index triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndBufId(u32);

/// Handle to a buffer of per-vertex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColBufId(u32);

macro_rules! impl_raw_id {
    ($($ty:ty),*) => {
        $(impl $ty {
            /// The raw id minted for this handle.
            pub fn raw(self) -> u32 {
                self.0
            }
        })*
    };
}

impl_raw_id!(PosBufId, IndBufId, ColBufId);

/// Monotonic id source shared by all buffer kinds.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    /// Returns the next unused id. Ids are never handed out twice.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// The three geometry registries of one rasterizer instance.
#[derive(Debug, Default)]
pub struct GeometryBuffers {
    ids: IdGenerator,
    positions: HashMap<u32, Vec<Vec3>>,
    indices: HashMap<u32, Vec<[u32; 3]>>,
    colors: HashMap<u32, Vec<Vec3>>,
}

impl GeometryBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_positions(&mut self, positions: Vec<Vec3>) -> PosBufId {
        let id = self.ids.next_id();
        self.positions.insert(id, positions);
        PosBufId(id)
    }

    pub fn load_indices(&mut self, indices: Vec<[u32; 3]>) -> IndBufId {
        let id = self.ids.next_id();
        self.indices.insert(id, indices);
        IndBufId(id)
    }

    pub fn load_colors(&mut self, colors: Vec<Vec3>) -> ColBufId {
        let id = self.ids.next_id();
        self.colors.insert(id, colors);
        ColBufId(id)
    }

    pub fn positions(&self, id: PosBufId) -> Result<&[Vec3]> {
        self.positions
            .get(&id.0)
            .map(Vec::as_slice)
            .ok_or(RasterError::InvalidHandle {
                kind: BufferKind::Position,
                id: id.0,
            })
    }

    pub fn indices(&self, id: IndBufId) -> Result<&[[u32; 3]]> {
        self.indices
            .get(&id.0)
            .map(Vec::as_slice)
            .ok_or(RasterError::InvalidHandle {
                kind: BufferKind::Index,
                id: id.0,
            })
    }

    pub fn colors(&self, id: ColBufId) -> Result<&[Vec3]> {
        self.colors
            .get(&id.0)
            .map(Vec::as_slice)
            .ok_or(RasterError::InvalidHandle {
                kind: BufferKind::Color,
                id: id.0,
            })
    }
}

/// Fetch `data[index]`, reporting an out-of-range index as an error.
pub(crate) fn fetch<T: Copy>(data: &[T], index: u32, kind: BufferKind) -> Result<T> {
    data.get(index as usize)
        .copied()
        .ok_or(RasterError::IndexOutOfRange {
            kind,
            index,
            len: data.len(),
        })
}
