//! Lane loads and stores between array layouts and `f32x8`.
//!
//! Partial chunks are zero-padded on load and truncated on store; callers mask
//! padded lanes out of any result that is not written back element-wise.

use std::simd::prelude::*;

use glam::Vec3;

/// Elements processed per lane-parallel step.
pub const LANES: usize = 8;

/// `true` for lanes `0..n`.
#[inline(always)]
pub(crate) fn active(n: usize) -> mask32x8 {
    let idx = i32x8::from_array([0, 1, 2, 3, 4, 5, 6, 7]);
    idx.simd_lt(i32x8::splat(n as i32))
}

/// Load up to eight floats, zero-padding the tail.
#[inline(always)]
pub(crate) fn load_f32(src: &[f32]) -> f32x8 {
    if src.len() >= LANES {
        f32x8::from_slice(src)
    } else {
        let mut buf = [0.0f32; LANES];
        buf[..src.len()].copy_from_slice(src);
        f32x8::from_array(buf)
    }
}

/// Lane `l` gets `f(l)` for `l < n`, zero otherwise.
#[inline(always)]
pub(crate) fn gather_f32(n: usize, f: impl Fn(usize) -> f32) -> f32x8 {
    let mut buf = [0.0f32; LANES];
    for (l, b) in buf.iter_mut().enumerate().take(n) {
        *b = f(l);
    }
    f32x8::from_array(buf)
}

/// Deinterleave `n` vectors into x/y/z lanes.
#[inline(always)]
pub(crate) fn gather_vec3(n: usize, f: impl Fn(usize) -> Vec3) -> [f32x8; 3] {
    let mut x = [0.0f32; LANES];
    let mut y = [0.0f32; LANES];
    let mut z = [0.0f32; LANES];
    for l in 0..n.min(LANES) {
        let v = f(l);
        x[l] = v.x;
        y[l] = v.y;
        z[l] = v.z;
    }
    [
        f32x8::from_array(x),
        f32x8::from_array(y),
        f32x8::from_array(z),
    ]
}

#[inline(always)]
pub(crate) fn load_vec3(src: &[Vec3]) -> [f32x8; 3] {
    gather_vec3(src.len(), |l| src[l])
}

/// Interleave lanes back into `dst` (at most eight elements).
#[inline(always)]
pub(crate) fn store_vec3(dst: &mut [Vec3], v: [f32x8; 3]) {
    let x = v[0].to_array();
    let y = v[1].to_array();
    let z = v[2].to_array();
    for (l, d) in dst.iter_mut().enumerate().take(LANES) {
        *d = Vec3::new(x[l], y[l], z[l]);
    }
}

/// Lane `l` of the result as a `Vec3`.
#[inline(always)]
pub(crate) fn lane_vec3(v: &[[f32; LANES]; 3], l: usize) -> Vec3 {
    Vec3::new(v[0][l], v[1][l], v[2][l])
}

/// Elementwise over eight lanes for functions with no lane form (e.g. `acos`).
#[inline(always)]
pub(crate) fn map_lanes(v: f32x8, f: impl Fn(f32) -> f32) -> f32x8 {
    f32x8::from_array(v.to_array().map(f))
}
