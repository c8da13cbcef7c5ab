//! Layout conversion: indexed/interleaved triangle data to planar arrays.
//!
//! The SIMD tangent kernel wants one array per corner component so a chunk of
//! eight triangles is eight contiguous floats. These buffers are transient:
//! built, consumed and dropped inside a single call.

use glam::{Vec2, Vec3};

use crate::types::{TriangleSoA, TriangleUvSoA};

/// Owned nine-array planar copy of triangle corners.
#[derive(Debug, Clone, Default)]
pub struct PlanarTriangles {
    c: [Vec<f32>; 9],
}

impl PlanarTriangles {
    /// Transpose `indices.len() / 3` indexed triangles into planar form.
    pub fn from_indexed(vertices: &[Vec3], indices: &[u32]) -> Self {
        let num_triangles = indices.len() / 3;
        let mut c: [Vec<f32>; 9] = std::array::from_fn(|_| Vec::with_capacity(num_triangles));
        for tri in indices.chunks_exact(3) {
            for (k, &idx) in tri.iter().enumerate() {
                let v = vertices[idx as usize];
                c[k * 3].push(v.x);
                c[k * 3 + 1].push(v.y);
                c[k * 3 + 2].push(v.z);
            }
        }
        Self { c }
    }

    /// Transpose a flat array holding three corners per triangle.
    pub fn from_array(vertices: &[Vec3]) -> Self {
        let num_triangles = vertices.len() / 3;
        let mut c: [Vec<f32>; 9] = std::array::from_fn(|_| Vec::with_capacity(num_triangles));
        for tri in vertices.chunks_exact(3) {
            for (k, v) in tri.iter().enumerate() {
                c[k * 3].push(v.x);
                c[k * 3 + 1].push(v.y);
                c[k * 3 + 2].push(v.z);
            }
        }
        Self { c }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.c[0].len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.c[0].is_empty()
    }

    #[inline]
    pub fn as_soa(&self) -> TriangleSoA<'_> {
        TriangleSoA::from_arrays(std::array::from_fn(|i| self.c[i].as_slice()))
    }
}

/// Owned six-array planar copy of per-corner UVs.
#[derive(Debug, Clone, Default)]
pub struct PlanarUvs {
    c: [Vec<f32>; 6],
}

impl PlanarUvs {
    pub fn from_indexed(uv: &[Vec2], indices: &[u32]) -> Self {
        let num_triangles = indices.len() / 3;
        let mut c: [Vec<f32>; 6] = std::array::from_fn(|_| Vec::with_capacity(num_triangles));
        for tri in indices.chunks_exact(3) {
            for (k, &idx) in tri.iter().enumerate() {
                let u = uv[idx as usize];
                c[k * 2].push(u.x);
                c[k * 2 + 1].push(u.y);
            }
        }
        Self { c }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.c[0].len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.c[0].is_empty()
    }

    #[inline]
    pub fn as_soa(&self) -> TriangleUvSoA<'_> {
        TriangleUvSoA::from_arrays(std::array::from_fn(|i| self.c[i].as_slice()))
    }
}

/// Zero-initialized per-vertex tangent and binormal sums.
pub(crate) struct TangentScratch {
    pub tangents: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

impl TangentScratch {
    pub fn zeroed(num_vertices: usize) -> Self {
        Self {
            tangents: vec![Vec3::ZERO; num_vertices],
            binormals: vec![Vec3::ZERO; num_vertices],
        }
    }

    /// Non-finite contributions (degenerate UVs or zero-length edges) are
    /// dropped so they cannot poison the other triangles at a shared vertex.
    #[inline(always)]
    pub fn add(&mut self, vertex: u32, tangent: Vec3, binormal: Vec3) {
        if !(tangent.is_finite() && binormal.is_finite()) {
            return;
        }
        self.tangents[vertex as usize] += tangent;
        self.binormals[vertex as usize] += binormal;
    }
}
