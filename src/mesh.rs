//! Loading triangle meshes from Wavefront OBJ files.
//!
//! A loaded [`MeshData`] is exactly what the geometry buffers take: a flat
//! position list, index triples into it, and one color per position. All
//! objects in a file are merged into one list with their indices offset.

use std::io::BufRead;
use std::path::Path;

use crate::error::Result;
use crate::math::vec3::Vec3;

/// Color given to vertices when the OBJ file carries no vertex colors.
pub const DEFAULT_VERTEX_COLOR: Vec3 = Vec3::ONE;

/// Positions, index triples and per-vertex colors of a mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
    pub colors: Vec<Vec3>,
}

impl MeshData {
    /// Load and triangulate every object of an OBJ file.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &load_options())?;
        let mesh = Self::from_models(models);
        log::debug!(
            "loaded {} ({} vertices, {} triangles)",
            path.display(),
            mesh.positions.len(),
            mesh.indices.len()
        );
        Ok(mesh)
    }

    /// Load OBJ data from a reader. Material libraries are not resolved.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self> {
        let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Ok(Self::from_models(models))
    }

    fn from_models(models: Vec<tobj::Model>) -> Self {
        let mut mesh = MeshData::default();

        for model in models {
            let m = model.mesh;
            let offset = mesh.positions.len() as u32;
            let vertex_count = m.positions.len() / 3;

            mesh.positions.extend(
                m.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );

            if m.vertex_color.len() == m.positions.len() {
                mesh.colors.extend(
                    m.vertex_color
                        .chunks_exact(3)
                        .map(|c| Vec3::new(c[0], c[1], c[2])),
                );
            } else {
                mesh.colors
                    .extend(std::iter::repeat(DEFAULT_VERTEX_COLOR).take(vertex_count));
            }

            mesh.indices.extend(
                m.indices
                    .chunks_exact(3)
                    .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
            );
        }

        mesh
    }
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}
