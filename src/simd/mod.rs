//! Lane-parallel backend (`std::simd`, eight `f32` lanes).
//!
//! Same operation set and signatures as [`crate::generic`]. Elementwise ops
//! view typed arrays as flat `f32` and walk them eight floats at a time, with
//! scalar tails. Geometric queries deinterleave into lanes first.

use std::simd::prelude::*;

use bytemuck::{cast_slice, cast_slice_mut};
use glam::{Mat4, Vec2, Vec3, Vec4};

mod lanes;
mod polygon;
mod ray;
mod tangents;

pub use lanes::LANES;
pub use polygon::{poly_inside, poly_inside_bounded, poly_inside_soa};
pub use ray::{
    ray_triangles_intersection_array, ray_triangles_intersection_indexed,
    ray_triangles_intersection_soa,
};
pub use tangents::{generate_tangents_indexed, generate_tangents_soa};

use crate::fp::normalize3;
use lanes::{load_vec3, store_vec3};

#[cfg(feature = "half")]
pub fn float_to_half(dst: &mut [half::f16], src: &[f32]) {
    use half::slice::HalfFloatSliceExt;
    let n = dst.len();
    dst.convert_from_f32_slice(&src[..n]);
}

#[cfg(feature = "half")]
pub fn half_to_float(dst: &mut [f32], src: &[half::f16]) {
    use half::slice::HalfFloatSliceExt;
    let n = dst.len();
    src[..n].convert_to_f32_slice(dst);
}

/// Sign pattern for x components across three consecutive 8-float blocks
/// (24 floats = 8 `Vec3`).
const NEG_X3: [f32x8; 3] = [
    f32x8::from_array([-1.0, 1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0]),
    f32x8::from_array([1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 1.0, -1.0]),
    f32x8::from_array([1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 1.0]),
];

const NEG_X4: f32x8 = f32x8::from_array([-1.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0, 1.0]);

pub fn invert_x3(dst: &mut [Vec3]) {
    let mut chunks = dst.chunks_exact_mut(LANES);
    for chunk in &mut chunks {
        let flat: &mut [f32] = cast_slice_mut(chunk);
        for (block, sign) in flat.chunks_exact_mut(LANES).zip(NEG_X3) {
            (f32x8::from_slice(block) * sign).copy_to_slice(block);
        }
    }
    for v in chunks.into_remainder() {
        v.x = -v.x;
    }
}

pub fn invert_x4(dst: &mut [Vec4]) {
    let flat: &mut [f32] = cast_slice_mut(dst);
    let mut chunks = flat.chunks_exact_mut(LANES);
    for block in &mut chunks {
        (f32x8::from_slice(block) * NEG_X4).copy_to_slice(block);
    }
    // A remainder is exactly one Vec4.
    if let Some(x) = chunks.into_remainder().first_mut() {
        *x = -*x;
    }
}

pub fn invert_v(dst: &mut [Vec2]) {
    let odd = mask32x8::from_array([false, true, false, true, false, true, false, true]);
    let one = f32x8::splat(1.0);
    let flat: &mut [f32] = cast_slice_mut(dst);
    let mut chunks = flat.chunks_exact_mut(LANES);
    for block in &mut chunks {
        let v = f32x8::from_slice(block);
        odd.select(one - v, v).copy_to_slice(block);
    }
    for pair in chunks.into_remainder().chunks_exact_mut(2) {
        pair[1] = 1.0 - pair[1];
    }
}

pub fn scale(dst: &mut [f32], s: f32) {
    let sv = f32x8::splat(s);
    let mut chunks = dst.chunks_exact_mut(LANES);
    for block in &mut chunks {
        (f32x8::from_slice(block) * sv).copy_to_slice(block);
    }
    for v in chunks.into_remainder() {
        *v *= s;
    }
}

pub fn scale3(dst: &mut [Vec3], s: f32) {
    scale(cast_slice_mut(dst), s);
}

pub fn normalize(dst: &mut [Vec3]) {
    // Tail goes through padded lanes too; padding is never stored.
    for chunk in dst.chunks_mut(LANES) {
        let v = normalize3(load_vec3(chunk));
        store_vec3(chunk, v);
    }
}

pub fn lerp(dst: &mut [f32], src1: &[f32], src2: &[f32], w: f32) {
    let n = dst.len();
    let (src1, src2) = (&src1[..n], &src2[..n]);
    let iw = 1.0 - w;
    let (wv, iwv) = (f32x8::splat(w), f32x8::splat(iw));

    let mut d = dst.chunks_exact_mut(LANES);
    let mut a = src1.chunks_exact(LANES);
    let mut b = src2.chunks_exact(LANES);
    for ((d, a), b) in (&mut d).zip(&mut a).zip(&mut b) {
        (f32x8::from_slice(a) * wv + f32x8::from_slice(b) * iwv).copy_to_slice(d);
    }
    for ((d, &a), &b) in d
        .into_remainder()
        .iter_mut()
        .zip(a.remainder())
        .zip(b.remainder())
    {
        *d = a * w + b * iw;
    }
}

pub fn min_max2(src: &[Vec2], dst_min: &mut Vec2, dst_max: &mut Vec2) {
    let Some(&first) = src.first() else {
        return;
    };
    // Lanes alternate x, y.
    let seed = f32x8::from_array([
        first.x, first.y, first.x, first.y, first.x, first.y, first.x, first.y,
    ]);
    let (mut lo, mut hi) = (seed, seed);
    let flat: &[f32] = cast_slice(src);
    let mut chunks = flat.chunks_exact(LANES);
    for block in &mut chunks {
        let v = f32x8::from_slice(block);
        lo = lo.simd_min(v);
        hi = hi.simd_max(v);
    }

    let (lo, hi) = (lo.to_array(), hi.to_array());
    let mut rmin = Vec2::new(lo[0], lo[1]);
    let mut rmax = Vec2::new(hi[0], hi[1]);
    for l in (2..LANES).step_by(2) {
        rmin = rmin.min(Vec2::new(lo[l], lo[l + 1]));
        rmax = rmax.max(Vec2::new(hi[l], hi[l + 1]));
    }
    for &p in cast_slice::<f32, Vec2>(chunks.remainder()) {
        rmin = rmin.min(p);
        rmax = rmax.max(p);
    }
    *dst_min = rmin;
    *dst_max = rmax;
}

pub fn min_max3(src: &[Vec3], dst_min: &mut Vec3, dst_max: &mut Vec3) {
    let Some(&first) = src.first() else {
        return;
    };
    // 24 floats per step; lane `l` of block `k` holds component `(8k + l) % 3`.
    let c = first.to_array();
    let seed: [f32x8; 3] =
        std::array::from_fn(|k| f32x8::from_array(std::array::from_fn(|l| c[(k * LANES + l) % 3])));
    let (mut lo, mut hi) = (seed, seed);

    let mut chunks = src.chunks_exact(LANES);
    for chunk in &mut chunks {
        let flat: &[f32] = cast_slice(chunk);
        for (k, block) in flat.chunks_exact(LANES).enumerate() {
            let v = f32x8::from_slice(block);
            lo[k] = lo[k].simd_min(v);
            hi[k] = hi[k].simd_max(v);
        }
    }

    let (mut rmin, mut rmax) = (first, first);
    for k in 0..3 {
        let (l_arr, h_arr) = (lo[k].to_array(), hi[k].to_array());
        for l in 0..LANES {
            let comp = (k * LANES + l) % 3;
            rmin[comp] = rmin[comp].min(l_arr[l]);
            rmax[comp] = rmax[comp].max(h_arr[l]);
        }
    }
    for &p in chunks.remainder() {
        rmin = rmin.min(p);
        rmax = rmax.max(p);
    }
    *dst_min = rmin;
    *dst_max = rmax;
}

pub fn near_equal(src1: &[f32], src2: &[f32], eps: f32) -> bool {
    let src2 = &src2[..src1.len()];
    let ev = f32x8::splat(eps);
    let mut a = src1.chunks_exact(LANES);
    let mut b = src2.chunks_exact(LANES);
    for (a, b) in (&mut a).zip(&mut b) {
        let diff = (f32x8::from_slice(a) - f32x8::from_slice(b)).abs();
        if !diff.simd_le(ev).all() {
            return false;
        }
    }
    a.remainder()
        .iter()
        .zip(b.remainder())
        .all(|(&a, &b)| (a - b).abs() <= eps)
}

#[inline(always)]
fn transform_x8(m: &Mat4, v: [f32x8; 3], translate: bool) -> [f32x8; 3] {
    let cols = m.to_cols_array_2d();
    std::array::from_fn(|r| {
        let c = |i: usize| f32x8::splat(cols[i][r]);
        let acc = c(0) * v[0] + c(1) * v[1] + c(2) * v[2];
        if translate {
            acc + c(3)
        } else {
            acc
        }
    })
}

pub fn mul_points(m: &Mat4, src: &[Vec3], dst: &mut [Vec3]) {
    let n = dst.len();
    for (d, s) in dst.chunks_mut(LANES).zip(src[..n].chunks(LANES)) {
        store_vec3(d, transform_x8(m, load_vec3(s), true));
    }
}

pub fn mul_vectors(m: &Mat4, src: &[Vec3], dst: &mut [Vec3]) {
    let n = dst.len();
    for (d, s) in dst.chunks_mut(LANES).zip(src[..n].chunks(LANES)) {
        store_vec3(d, transform_x8(m, load_vec3(s), false));
    }
}

/// Face sums are scattered serially (face sizes vary); normalization runs in lanes.
pub fn generate_normals(
    dst: &mut [Vec3],
    points: &[Vec3],
    counts: &[u32],
    offsets: &[u32],
    indices: &[u32],
) {
    crate::generic::accumulate_face_normals(dst, points, counts, offsets, indices);
    normalize(dst);
}
