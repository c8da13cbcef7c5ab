//! Opt-in checks for mesh buffers before they reach the kernels.
//!
//! The kernels trust their inputs; these functions let a pipeline catch bad
//! topology or mismatched buffer sizes once, at import time, instead of
//! getting NaNs or a slice-index panic deep in a batch.

use crate::error::MeshError;
use crate::types::{MeshFragment, TriangleSoA, TriangleUvSoA};

const SOA_NAMES: [&str; 9] = ["v1x", "v1y", "v1z", "v2x", "v2y", "v2z", "v3x", "v3y", "v3z"];
const UV_SOA_NAMES: [&str; 6] = ["u1x", "u1y", "u2x", "u2y", "u3x", "u3y"];

/// Index count is a multiple of 3 and every index is below `vertex_count`.
pub fn validate_indices(indices: &[u32], vertex_count: usize) -> Result<(), MeshError> {
    if !indices.len().is_multiple_of(3) {
        return Err(MeshError::IndexCountNotMultipleOfThree(indices.len()));
    }
    match indices
        .iter()
        .position(|&i| i as usize >= vertex_count)
    {
        Some(position) => Err(MeshError::IndexOutOfRange {
            position,
            index: indices[position],
            vertex_count,
        }),
        None => Ok(()),
    }
}

/// A per-vertex attribute array covers every vertex.
pub fn validate_attribute_len(
    name: &'static str,
    len: usize,
    vertex_count: usize,
) -> Result<(), MeshError> {
    if len < vertex_count {
        return Err(MeshError::AttributeLength {
            name,
            len,
            expected: vertex_count,
        });
    }
    Ok(())
}

fn validate_planar(names: &[&'static str], lens: &[usize]) -> Result<(), MeshError> {
    let expected = lens[0];
    for (&component, &len) in names.iter().zip(lens).skip(1) {
        if len != expected {
            return Err(MeshError::PlanarLengthMismatch {
                component,
                len,
                expected,
            });
        }
    }
    Ok(())
}

/// All nine planar arrays have the same length.
pub fn validate_triangle_soa(tri: &TriangleSoA<'_>) -> Result<(), MeshError> {
    validate_planar(&SOA_NAMES, &tri.components().map(<[f32]>::len))
}

/// All six planar UV arrays have the same length.
pub fn validate_uv_soa(uv: &TriangleUvSoA<'_>) -> Result<(), MeshError> {
    validate_planar(&UV_SOA_NAMES, &uv.components().map(<[f32]>::len))
}

/// Polygon face table for `generate_normals`.
pub fn validate_polygon_faces(
    counts: &[u32],
    offsets: &[u32],
    indices: &[u32],
    vertex_count: usize,
) -> Result<(), MeshError> {
    validate_attribute_len("offsets", offsets.len(), counts.len())?;
    for (face, (&count, &offset)) in counts.iter().zip(offsets).enumerate() {
        if count < 3 {
            return Err(MeshError::FaceTooSmall { face, count });
        }
        let end = offset as usize + count as usize;
        if end > indices.len() {
            return Err(MeshError::FaceOutOfRange {
                face,
                offset,
                count,
                index_len: indices.len(),
            });
        }
        if let Some(k) = indices[offset as usize..end]
            .iter()
            .position(|&i| i as usize >= vertex_count)
        {
            let position = offset as usize + k;
            return Err(MeshError::IndexOutOfRange {
                position,
                index: indices[position],
                vertex_count,
            });
        }
    }
    Ok(())
}

/// Result of [`validate_mesh`].
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub num_vertices: usize,
    pub num_triangles: usize,
    /// Every violated invariant, in check order.
    pub errors: Vec<MeshError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// One-line description of the issues found.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return format!(
                "OK ({} vertices, {} triangles)",
                self.num_vertices, self.num_triangles
            );
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ValidationReport {{ V={}, T={}, {} }}",
            self.num_vertices,
            self.num_triangles,
            self.summary()
        )
    }
}

/// Run every applicable check on a mesh fragment.
pub fn validate_mesh(mesh: &MeshFragment<'_>) -> ValidationReport {
    let num_vertices = mesh.vertices.len();
    let mut errors = Vec::new();

    if let Err(e) = validate_indices(mesh.indices, num_vertices) {
        errors.push(e);
    }
    if let Some(normals) = mesh.normals {
        if let Err(e) = validate_attribute_len("normals", normals.len(), num_vertices) {
            errors.push(e);
        }
    }
    if let Some(uv) = mesh.uv {
        if let Err(e) = validate_attribute_len("uv", uv.len(), num_vertices) {
            errors.push(e);
        }
    }

    ValidationReport {
        num_vertices,
        num_triangles: mesh.num_triangles(),
        errors,
    }
}
