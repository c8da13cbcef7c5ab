//! The unified operation set.
//!
//! Every function forwards to the backend picked at build time by the `simd`
//! feature. There is no runtime branch: `backend` is a module alias.
//!
//! Narrow-width `lerp2`/`lerp3`/`near_equal2`/`near_equal3` view their typed
//! slices as flat `f32` (the vector types are `Pod` with no padding) and
//! delegate to the scalar entry point.

use bytemuck::{cast_slice, cast_slice_mut};
use glam::{Mat4, Vec2, Vec3, Vec4};

#[cfg(not(feature = "simd"))]
use crate::generic as backend;
#[cfg(feature = "simd")]
use crate::simd as backend;
use crate::types::{RayHits, TriangleSoA, TriangleUvSoA};

/// Narrow `src` to half precision. `dst.len()` values are converted.
#[cfg(feature = "half")]
#[inline]
pub fn float_to_half(dst: &mut [half::f16], src: &[f32]) {
    backend::float_to_half(dst, src)
}

/// Widen `src` to single precision. `dst.len()` values are converted.
#[cfg(feature = "half")]
#[inline]
pub fn half_to_float(dst: &mut [f32], src: &[half::f16]) {
    backend::half_to_float(dst, src)
}

/// Negate x in place. Applying it twice restores the input exactly.
#[inline]
pub fn invert_x3(dst: &mut [Vec3]) {
    backend::invert_x3(dst)
}

#[inline]
pub fn invert_x4(dst: &mut [Vec4]) {
    backend::invert_x4(dst)
}

/// `v = 1 - v` for each texture coordinate.
#[inline]
pub fn invert_v(dst: &mut [Vec2]) {
    backend::invert_v(dst)
}

#[inline]
pub fn scale(dst: &mut [f32], s: f32) {
    backend::scale(dst, s)
}

#[inline]
pub fn scale3(dst: &mut [Vec3], s: f32) {
    backend::scale3(dst, s)
}

/// Rescale each vector to unit length.
///
/// A zero-length input is a caller error; its output is unspecified (NaN in
/// both backends).
#[inline]
pub fn normalize(dst: &mut [Vec3]) {
    backend::normalize(dst)
}

/// `dst = src1 * w + src2 * (1 - w)`. Exactly `src2` at `w = 0` and exactly
/// `src1` at `w = 1`.
#[inline]
pub fn lerp(dst: &mut [f32], src1: &[f32], src2: &[f32], w: f32) {
    backend::lerp(dst, src1, src2, w)
}

#[inline]
pub fn lerp2(dst: &mut [Vec2], src1: &[Vec2], src2: &[Vec2], w: f32) {
    lerp(cast_slice_mut(dst), cast_slice(src1), cast_slice(src2), w)
}

#[inline]
pub fn lerp3(dst: &mut [Vec3], src1: &[Vec3], src2: &[Vec3], w: f32) {
    lerp(cast_slice_mut(dst), cast_slice(src1), cast_slice(src2), w)
}

/// Componentwise bounds. An empty `src` leaves both outputs untouched.
#[inline]
pub fn min_max2(src: &[Vec2], dst_min: &mut Vec2, dst_max: &mut Vec2) {
    backend::min_max2(src, dst_min, dst_max)
}

#[inline]
pub fn min_max3(src: &[Vec3], dst_min: &mut Vec3, dst_max: &mut Vec3) {
    backend::min_max3(src, dst_min, dst_max)
}

/// `|a - b| <= eps` for every pair. Empty input is vacuously equal.
#[inline]
pub fn near_equal(src1: &[f32], src2: &[f32], eps: f32) -> bool {
    backend::near_equal(src1, src2, eps)
}

#[inline]
pub fn near_equal2(src1: &[Vec2], src2: &[Vec2], eps: f32) -> bool {
    near_equal(cast_slice(src1), cast_slice(src2), eps)
}

#[inline]
pub fn near_equal3(src1: &[Vec3], src2: &[Vec3], eps: f32) -> bool {
    near_equal(cast_slice(src1), cast_slice(src2), eps)
}

/// Transform points, translation included.
#[inline]
pub fn mul_points(m: &Mat4, src: &[Vec3], dst: &mut [Vec3]) {
    backend::mul_points(m, src, dst)
}

/// Transform directions, translation ignored.
#[inline]
pub fn mul_vectors(m: &Mat4, src: &[Vec3], dst: &mut [Vec3]) {
    backend::mul_vectors(m, src, dst)
}

/// Cast a ray against triangles `indices[3t..3t + 3]` into `vertices`.
///
/// Check `num_hits` before trusting `triangle`/`distance`.
#[inline]
pub fn ray_triangles_intersection_indexed(
    pos: Vec3,
    dir: Vec3,
    vertices: &[Vec3],
    indices: &[u32],
) -> RayHits {
    backend::ray_triangles_intersection_indexed(pos, dir, vertices, indices)
}

/// Cast a ray against triangles stored as three consecutive corners.
#[inline]
pub fn ray_triangles_intersection_array(pos: Vec3, dir: Vec3, vertices: &[Vec3]) -> RayHits {
    backend::ray_triangles_intersection_array(pos, dir, vertices)
}

/// Cast a ray against planar triangle arrays.
#[inline]
pub fn ray_triangles_intersection_soa(pos: Vec3, dir: Vec3, tri: &TriangleSoA<'_>) -> RayHits {
    backend::ray_triangles_intersection_soa(pos, dir, tri)
}

/// Even-odd point-in-polygon test on planar coordinates with a caller bound.
///
/// Points on a left/bottom edge count as inside, right/top as outside.
#[inline]
pub fn poly_inside_soa(px: &[f32], py: &[f32], minp: Vec2, maxp: Vec2, pos: Vec2) -> bool {
    backend::poly_inside_soa(px, py, minp, maxp, pos)
}

#[inline]
pub fn poly_inside_bounded(poly: &[Vec2], minp: Vec2, maxp: Vec2, pos: Vec2) -> bool {
    backend::poly_inside_bounded(poly, minp, maxp, pos)
}

/// Even-odd test; the bounding box is computed from `poly`.
#[inline]
pub fn poly_inside(poly: &[Vec2], pos: Vec2) -> bool {
    backend::poly_inside(poly, pos)
}

/// Per-vertex tangents with handedness in `w`. `dst.len()` is the vertex
/// count; `indices.len() / 3` triangles are processed.
#[inline]
pub fn generate_tangents_indexed(
    dst: &mut [Vec4],
    vertices: &[Vec3],
    normals: &[Vec3],
    uv: &[Vec2],
    indices: &[u32],
) {
    backend::generate_tangents_indexed(dst, vertices, normals, uv, indices)
}

/// Tangents from planar triangle data; `indices` maps corners to vertices.
#[inline]
pub fn generate_tangents_soa(
    dst: &mut [Vec4],
    tri: &TriangleSoA<'_>,
    uv: &TriangleUvSoA<'_>,
    normals: &[Vec3],
    indices: &[u32],
) {
    backend::generate_tangents_soa(dst, tri, uv, normals, indices)
}

/// Vertex normals for polygon faces described by `counts`/`offsets`.
#[inline]
pub fn generate_normals(
    dst: &mut [Vec3],
    points: &[Vec3],
    counts: &[u32],
    offsets: &[u32],
    indices: &[u32],
) {
    backend::generate_normals(dst, points, counts, offsets, indices)
}
