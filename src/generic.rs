//! Scalar reference backend.
//!
//! Every operation here defines the semantics the SIMD backend must match.
//! Element counts come from the destination (or first source) slice; sibling
//! slices must be at least that long.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::layout::TangentScratch;
use crate::shared::{self, Crossings};
use crate::timing::{LapTimer, TangentTimings};
use crate::types::{RayHits, TriangleSoA, TriangleUvSoA};

#[cfg(feature = "half")]
pub fn float_to_half(dst: &mut [half::f16], src: &[f32]) {
    let n = dst.len();
    for (d, &s) in dst.iter_mut().zip(&src[..n]) {
        *d = half::f16::from_f32(s);
    }
}

#[cfg(feature = "half")]
pub fn half_to_float(dst: &mut [f32], src: &[half::f16]) {
    let n = dst.len();
    for (d, &s) in dst.iter_mut().zip(&src[..n]) {
        *d = s.to_f32();
    }
}

pub fn invert_x3(dst: &mut [Vec3]) {
    for v in dst {
        v.x = -v.x;
    }
}

pub fn invert_x4(dst: &mut [Vec4]) {
    for v in dst {
        v.x = -v.x;
    }
}

/// Flip the V texture coordinate: `y = 1 - y`.
pub fn invert_v(dst: &mut [Vec2]) {
    for v in dst {
        v.y = 1.0 - v.y;
    }
}

pub fn scale(dst: &mut [f32], s: f32) {
    for v in dst {
        *v *= s;
    }
}

pub fn scale3(dst: &mut [Vec3], s: f32) {
    for v in dst {
        *v *= s;
    }
}

/// Zero-length vectors are a caller error and become NaN.
pub fn normalize(dst: &mut [Vec3]) {
    for v in dst {
        *v = v.normalize();
    }
}

/// `dst = src1 * w + src2 * (1 - w)`.
pub fn lerp(dst: &mut [f32], src1: &[f32], src2: &[f32], w: f32) {
    let iw = 1.0 - w;
    let n = dst.len();
    for ((d, &a), &b) in dst.iter_mut().zip(&src1[..n]).zip(&src2[..n]) {
        *d = a * w + b * iw;
    }
}

pub fn min_max2(src: &[Vec2], dst_min: &mut Vec2, dst_max: &mut Vec2) {
    shared::min_max2(src, dst_min, dst_max);
}

pub fn min_max3(src: &[Vec3], dst_min: &mut Vec3, dst_max: &mut Vec3) {
    let Some((&first, rest)) = src.split_first() else {
        return;
    };
    let (mut rmin, mut rmax) = (first, first);
    for &p in rest {
        rmin = rmin.min(p);
        rmax = rmax.max(p);
    }
    *dst_min = rmin;
    *dst_max = rmax;
}

/// True when every pair differs by at most `eps`. Stops at the first miss.
pub fn near_equal(src1: &[f32], src2: &[f32], eps: f32) -> bool {
    src1.iter()
        .zip(&src2[..src1.len()])
        .all(|(&a, &b)| (a - b).abs() <= eps)
}

/// Transform positions (translation applied).
pub fn mul_points(m: &Mat4, src: &[Vec3], dst: &mut [Vec3]) {
    let n = dst.len();
    for (d, &s) in dst.iter_mut().zip(&src[..n]) {
        *d = m.transform_point3(s);
    }
}

/// Transform directions (translation ignored).
pub fn mul_vectors(m: &Mat4, src: &[Vec3], dst: &mut [Vec3]) {
    let n = dst.len();
    for (d, &s) in dst.iter_mut().zip(&src[..n]) {
        *d = m.transform_vector3(s);
    }
}

#[inline(always)]
fn scan_triangles(
    pos: Vec3,
    dir: Vec3,
    num_triangles: usize,
    triangle: impl Fn(usize) -> [Vec3; 3],
) -> RayHits {
    let mut hits = RayHits::NONE;
    for i in 0..num_triangles {
        let [p1, p2, p3] = triangle(i);
        if let Some(d) = shared::ray_triangle(pos, dir, p1, p2, p3) {
            hits.record(i, d);
        }
    }
    hits
}

/// Ray against `indices.len() / 3` triangles indexing into `vertices`.
pub fn ray_triangles_intersection_indexed(
    pos: Vec3,
    dir: Vec3,
    vertices: &[Vec3],
    indices: &[u32],
) -> RayHits {
    scan_triangles(pos, dir, indices.len() / 3, |i| {
        [
            vertices[indices[i * 3] as usize],
            vertices[indices[i * 3 + 1] as usize],
            vertices[indices[i * 3 + 2] as usize],
        ]
    })
}

/// Ray against `vertices.len() / 3` triangles stored corner by corner.
pub fn ray_triangles_intersection_array(pos: Vec3, dir: Vec3, vertices: &[Vec3]) -> RayHits {
    scan_triangles(pos, dir, vertices.len() / 3, |i| {
        [vertices[i * 3], vertices[i * 3 + 1], vertices[i * 3 + 2]]
    })
}

pub fn ray_triangles_intersection_soa(pos: Vec3, dir: Vec3, tri: &TriangleSoA<'_>) -> RayHits {
    scan_triangles(pos, dir, tri.len(), |i| tri.triangle(i))
}

/// Even-odd test with planar polygon coordinates; `px.len()` is the vertex count.
pub fn poly_inside_soa(px: &[f32], py: &[f32], minp: Vec2, maxp: Vec2, pos: Vec2) -> bool {
    let n = px.len();
    poly_inside_by(n, minp, maxp, pos, |i| Vec2::new(px[i], py[i]))
}

pub fn poly_inside_bounded(poly: &[Vec2], minp: Vec2, maxp: Vec2, pos: Vec2) -> bool {
    poly_inside_by(poly.len(), minp, maxp, pos, |i| poly[i])
}

/// Even-odd test, bounding box computed from `poly`.
pub fn poly_inside(poly: &[Vec2], pos: Vec2) -> bool {
    let (mut minp, mut maxp) = (Vec2::ZERO, Vec2::ZERO);
    min_max2(poly, &mut minp, &mut maxp);
    poly_inside_bounded(poly, minp, maxp, pos)
}

#[inline(always)]
fn poly_inside_by(
    ngon: usize,
    minp: Vec2,
    maxp: Vec2,
    pos: Vec2,
    point: impl Fn(usize) -> Vec2,
) -> bool {
    if !shared::in_bounds(minp, maxp, pos) {
        return false;
    }
    let mut xc = Crossings::new();
    for i in 0..ngon {
        let j = if i + 1 == ngon { 0 } else { i + 1 };
        if let Some(x) = shared::edge_crossing(point(i), point(j), pos.y) {
            if !xc.push(x) {
                break;
            }
        }
    }
    xc.contains(pos.x)
}

/// Per-vertex tangents (`w` = handedness) for `indices.len() / 3` triangles.
/// `dst.len()` is the vertex count.
pub fn generate_tangents_indexed(
    dst: &mut [Vec4],
    vertices: &[Vec3],
    normals: &[Vec3],
    uv: &[Vec2],
    indices: &[u32],
) {
    let mut timings = TangentTimings::new("indexed", "generic");
    let mut lap = LapTimer::start();

    let mut scratch = TangentScratch::zeroed(dst.len());
    for tri in indices.chunks_exact(3) {
        let v = [0, 1, 2].map(|k| vertices[tri[k] as usize]);
        let u = [0, 1, 2].map(|k| uv[tri[k] as usize]);
        let (t, b) = shared::triangle_tangent(v, u);
        for k in 0..3 {
            scratch.add(tri[k], t[k], b[k]);
        }
    }
    timings.set_accumulate(lap.lap());

    orthogonalize_all(dst, &scratch, normals);
    timings.set_orthogonalize(lap.lap());
    timings.report(indices.len() / 3, dst.len());
}

/// Planar-input tangents. `indices` still maps triangle corners to vertices.
pub fn generate_tangents_soa(
    dst: &mut [Vec4],
    tri: &TriangleSoA<'_>,
    uv: &TriangleUvSoA<'_>,
    normals: &[Vec3],
    indices: &[u32],
) {
    let mut timings = TangentTimings::new("soa", "generic");
    let mut lap = LapTimer::start();

    let mut scratch = TangentScratch::zeroed(dst.len());
    for (ti, corners) in indices.chunks_exact(3).take(tri.len()).enumerate() {
        let (t, b) = shared::triangle_tangent(tri.triangle(ti), uv.triangle(ti));
        for k in 0..3 {
            scratch.add(corners[k], t[k], b[k]);
        }
    }
    timings.set_accumulate(lap.lap());

    orthogonalize_all(dst, &scratch, normals);
    timings.set_orthogonalize(lap.lap());
    timings.report(tri.len(), dst.len());
}

fn orthogonalize_all(dst: &mut [Vec4], scratch: &TangentScratch, normals: &[Vec3]) {
    let n = dst.len();
    for (((d, &t), &b), &nrm) in dst
        .iter_mut()
        .zip(&scratch.tangents)
        .zip(&scratch.binormals)
        .zip(&normals[..n])
    {
        *d = shared::orthogonalize_tangent(t, b, nrm);
    }
}

/// Area-weighted vertex normals for polygon faces.
///
/// Face `f` uses `indices[offsets[f]..offsets[f] + counts[f]]`; its first
/// three corners define the face normal. `dst.len()` is the vertex count.
pub fn generate_normals(
    dst: &mut [Vec3],
    points: &[Vec3],
    counts: &[u32],
    offsets: &[u32],
    indices: &[u32],
) {
    accumulate_face_normals(dst, points, counts, offsets, indices);
    normalize(dst);
}

pub(crate) fn accumulate_face_normals(
    dst: &mut [Vec3],
    points: &[Vec3],
    counts: &[u32],
    offsets: &[u32],
    indices: &[u32],
) {
    dst.fill(Vec3::ZERO);
    for (&count, &offset) in counts.iter().zip(&offsets[..counts.len()]) {
        let face = &indices[offset as usize..offset as usize + count as usize];
        let p0 = points[face[0] as usize];
        let p1 = points[face[1] as usize];
        let p2 = points[face[2] as usize];
        let n = (p1 - p0).cross(p2 - p0);
        for &i in face {
            dst[i as usize] += n;
        }
    }
}
