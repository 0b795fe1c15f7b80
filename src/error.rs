//! Error type shared by the whole pipeline.

use thiserror::Error;

use crate::buffers::BufferKind;
use crate::engine::Primitive;

/// Errors returned by [`Engine`](crate::Engine) operations.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("no {kind} buffer is registered under handle {id}")]
    InvalidHandle { kind: BufferKind, id: u32 },

    #[error("index {index} is out of range for a {kind} buffer of length {len}")]
    IndexOutOfRange {
        kind: BufferKind,
        index: u32,
        len: usize,
    },

    #[error("primitive {0:?} is not supported, only triangle lists are")]
    UnsupportedPrimitive(Primitive),

    #[error("cannot export a {width}x{height} frame")]
    EmptyFrame { width: u32, height: u32 },

    #[error("image output failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("OBJ loading failed: {0}")]
    Obj(#[from] tobj::LoadError),
}

pub type Result<T> = std::result::Result<T, RasterError>;
