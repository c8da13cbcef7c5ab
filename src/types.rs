//! Core data types shared by both backends.
//!
//! Vectors and matrices are glam's `Vec2`/`Vec3`/`Vec4`/`Mat4`. All of them are
//! `Pod` (glam's `bytemuck` feature) and tightly packed, so a `&[Vec3]` can be
//! viewed as a flat `&[f32]` of three times the length.

pub use glam::{Mat4, Vec2, Vec3, Vec4};

/// Nine parallel coordinate arrays, one element per triangle.
///
/// This is a view, not a validated container: the triangle count is
/// `v1x.len()` and every other array is expected to be at least that long.
/// Use [`crate::validation::validate_triangle_soa`] to check a view up front.
#[derive(Debug, Clone, Copy)]
pub struct TriangleSoA<'a> {
    pub v1x: &'a [f32],
    pub v1y: &'a [f32],
    pub v1z: &'a [f32],
    pub v2x: &'a [f32],
    pub v2y: &'a [f32],
    pub v2z: &'a [f32],
    pub v3x: &'a [f32],
    pub v3y: &'a [f32],
    pub v3z: &'a [f32],
}

impl<'a> TriangleSoA<'a> {
    /// Build a view from nine arrays in `v1x, v1y, v1z, v2x, .., v3z` order.
    #[inline]
    pub fn from_arrays(c: [&'a [f32]; 9]) -> Self {
        let [v1x, v1y, v1z, v2x, v2y, v2z, v3x, v3y, v3z] = c;
        Self {
            v1x,
            v1y,
            v1z,
            v2x,
            v2y,
            v2z,
            v3x,
            v3y,
            v3z,
        }
    }

    /// Number of triangles in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.v1x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.v1x.is_empty()
    }

    /// All nine arrays in `v1x..v3z` order.
    #[inline]
    pub fn components(&self) -> [&'a [f32]; 9] {
        [
            self.v1x, self.v1y, self.v1z, self.v2x, self.v2y, self.v2z, self.v3x, self.v3y,
            self.v3z,
        ]
    }

    /// The three corners of triangle `i`.
    #[inline]
    pub fn triangle(&self, i: usize) -> [Vec3; 3] {
        [
            Vec3::new(self.v1x[i], self.v1y[i], self.v1z[i]),
            Vec3::new(self.v2x[i], self.v2y[i], self.v2z[i]),
            Vec3::new(self.v3x[i], self.v3y[i], self.v3z[i]),
        ]
    }
}

/// Six parallel UV arrays, one element per triangle.
#[derive(Debug, Clone, Copy)]
pub struct TriangleUvSoA<'a> {
    pub u1x: &'a [f32],
    pub u1y: &'a [f32],
    pub u2x: &'a [f32],
    pub u2y: &'a [f32],
    pub u3x: &'a [f32],
    pub u3y: &'a [f32],
}

impl<'a> TriangleUvSoA<'a> {
    /// Build a view from six arrays in `u1x, u1y, u2x, u2y, u3x, u3y` order.
    #[inline]
    pub fn from_arrays(c: [&'a [f32]; 6]) -> Self {
        let [u1x, u1y, u2x, u2y, u3x, u3y] = c;
        Self {
            u1x,
            u1y,
            u2x,
            u2y,
            u3x,
            u3y,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.u1x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.u1x.is_empty()
    }

    #[inline]
    pub fn components(&self) -> [&'a [f32]; 6] {
        [self.u1x, self.u1y, self.u2x, self.u2y, self.u3x, self.u3y]
    }

    #[inline]
    pub fn triangle(&self, i: usize) -> [Vec2; 3] {
        [
            Vec2::new(self.u1x[i], self.u1y[i]),
            Vec2::new(self.u2x[i], self.u2y[i]),
            Vec2::new(self.u3x[i], self.u3y[i]),
        ]
    }
}

/// Result of scanning a triangle set with one ray.
///
/// `triangle` and `distance` only describe a real hit when `num_hits > 0`;
/// otherwise `distance` holds the `f32::MAX` sentinel and `triangle` is 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHits {
    /// Number of triangles the ray passes through.
    pub num_hits: usize,
    /// Index of the closest hit triangle.
    pub triangle: usize,
    /// Distance to the closest hit, in units of the ray direction's length.
    pub distance: f32,
}

impl RayHits {
    pub(crate) const NONE: Self = Self {
        num_hits: 0,
        triangle: 0,
        distance: f32::MAX,
    };

    /// Count a hit on triangle `i` at distance `d`.
    ///
    /// Strict less-than: on equal distances the earlier triangle is kept.
    #[inline(always)]
    pub(crate) fn record(&mut self, i: usize, d: f32) {
        self.num_hits += 1;
        if d < self.distance {
            self.distance = d;
            self.triangle = i;
        }
    }

    /// Closest hit as `(triangle, distance)`, if any triangle was hit.
    #[inline]
    pub fn closest(&self) -> Option<(usize, f32)> {
        (self.num_hits > 0).then_some((self.triangle, self.distance))
    }
}

impl Default for RayHits {
    fn default() -> Self {
        Self::NONE
    }
}

/// Borrowed triangle mesh buffers, as handed over by the asset model.
///
/// Only used by [`crate::validation`]; the kernels take the slices directly.
#[derive(Debug, Clone, Copy)]
pub struct MeshFragment<'a> {
    pub vertices: &'a [Vec3],
    pub normals: Option<&'a [Vec3]>,
    pub uv: Option<&'a [Vec2]>,
    pub indices: &'a [u32],
}

impl<'a> MeshFragment<'a> {
    #[inline]
    pub fn new(vertices: &'a [Vec3], indices: &'a [u32]) -> Self {
        Self {
            vertices,
            normals: None,
            uv: None,
            indices,
        }
    }

    #[inline]
    pub fn with_normals(mut self, normals: &'a [Vec3]) -> Self {
        self.normals = Some(normals);
        self
    }

    #[inline]
    pub fn with_uv(mut self, uv: &'a [Vec2]) -> Self {
        self.uv = Some(uv);
        self
    }

    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}
