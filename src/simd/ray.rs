//! Eight triangles per step ray intersection.

use std::simd::prelude::*;

use glam::Vec3;

use super::lanes::{active, gather_vec3, load_f32, LANES};
use crate::fp::{cross3, dot3, sub3};
use crate::shared::{RAY_EPS_BARY, RAY_EPS_DET};
use crate::types::{RayHits, TriangleSoA};

type TriLanes = [[f32x8; 3]; 3];

#[derive(Clone, Copy)]
struct RayLanes {
    pos: [f32x8; 3],
    dir: [f32x8; 3],
}

impl RayLanes {
    #[inline(always)]
    fn new(pos: Vec3, dir: Vec3) -> Self {
        Self {
            pos: [f32x8::splat(pos.x), f32x8::splat(pos.y), f32x8::splat(pos.z)],
            dir: [f32x8::splat(dir.x), f32x8::splat(dir.y), f32x8::splat(dir.z)],
        }
    }

    /// Lane form of `shared::ray_triangle`: hit mask and distances.
    #[inline(always)]
    fn intersect(&self, [p1, p2, p3]: TriLanes) -> (mask32x8, f32x8) {
        let e1 = sub3(p2, p1);
        let e2 = sub3(p3, p1);
        let p = cross3(self.dir, e2);
        let det = dot3(e1, p);
        let inv_det = f32x8::splat(1.0) / det;
        let t = sub3(self.pos, p1);
        let u = dot3(t, p) * inv_det;
        let q = cross3(t, e1);
        let v = dot3(self.dir, q) * inv_det;
        let d = dot3(e2, q) * inv_det;

        let neg_eps = f32x8::splat(-RAY_EPS_BARY);
        let hit = det.abs().simd_gt(f32x8::splat(RAY_EPS_DET))
            & u.simd_gt(neg_eps)
            & v.simd_gt(neg_eps)
            & (u + v).simd_lt(f32x8::splat(1.0 + RAY_EPS_BARY))
            & d.simd_ge(f32x8::splat(0.0));
        (hit, d)
    }
}

/// Scan `num_triangles` in chunks; `fetch(base, n)` loads corners of
/// triangles `base..base + n` into lanes.
#[inline(always)]
fn scan(
    pos: Vec3,
    dir: Vec3,
    num_triangles: usize,
    fetch: impl Fn(usize, usize) -> TriLanes,
) -> RayHits {
    let ray = RayLanes::new(pos, dir);
    let mut hits = RayHits::NONE;

    let mut base = 0;
    while base < num_triangles {
        let n = (num_triangles - base).min(LANES);
        let (hit, d) = ray.intersect(fetch(base, n));
        let mut bits = (hit & active(n)).to_bitmask();
        if bits != 0 {
            let d = d.to_array();
            // Ascending lanes keep the first triangle on distance ties.
            while bits != 0 {
                let l = bits.trailing_zeros() as usize;
                hits.record(base + l, d[l]);
                bits &= bits - 1;
            }
        }
        base += LANES;
    }
    hits
}

pub fn ray_triangles_intersection_indexed(
    pos: Vec3,
    dir: Vec3,
    vertices: &[Vec3],
    indices: &[u32],
) -> RayHits {
    scan(pos, dir, indices.len() / 3, |base, n| {
        std::array::from_fn(|k| {
            gather_vec3(n, |l| vertices[indices[(base + l) * 3 + k] as usize])
        })
    })
}

pub fn ray_triangles_intersection_array(pos: Vec3, dir: Vec3, vertices: &[Vec3]) -> RayHits {
    scan(pos, dir, vertices.len() / 3, |base, n| {
        std::array::from_fn(|k| gather_vec3(n, |l| vertices[(base + l) * 3 + k]))
    })
}

pub fn ray_triangles_intersection_soa(pos: Vec3, dir: Vec3, tri: &TriangleSoA<'_>) -> RayHits {
    let c = tri.components();
    scan(pos, dir, tri.len(), |base, n| {
        let load = |k: usize| load_f32(&c[k][base..base + n]);
        [
            [load(0), load(1), load(2)],
            [load(3), load(4), load(5)],
            [load(6), load(7), load(8)],
        ]
    })
}
