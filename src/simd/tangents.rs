//! Tangent generation: eight triangles per step, then eight vertices per step.
//!
//! Indexed input is first transposed into planar buffers (one array per
//! corner component). Per-vertex sums are scattered serially in triangle
//! order, which keeps the accumulation order identical to the scalar path.

use std::simd::prelude::*;
use std::simd::StdFloat;

use glam::{Vec2, Vec3, Vec4};

use super::lanes::{lane_vec3, load_f32, load_vec3, map_lanes, LANES};
use crate::fp::{cross3, dot3, normalize3, scale3, sub3};
use crate::layout::{PlanarTriangles, PlanarUvs, TangentScratch};
use crate::shared::{self, TANGENT_EPS};
use crate::timing::{LapTimer, TangentTimings};
use crate::types::{TriangleSoA, TriangleUvSoA};

pub fn generate_tangents_indexed(
    dst: &mut [Vec4],
    vertices: &[Vec3],
    normals: &[Vec3],
    uv: &[Vec2],
    indices: &[u32],
) {
    let mut timings = TangentTimings::new("indexed", "simd");
    let mut lap = LapTimer::start();

    let tri = PlanarTriangles::from_indexed(vertices, indices);
    let uvs = PlanarUvs::from_indexed(uv, indices);
    timings.set_transpose(lap.lap());

    let mut scratch = TangentScratch::zeroed(dst.len());
    accumulate(&mut scratch, &tri.as_soa(), &uvs.as_soa(), indices);
    timings.set_accumulate(lap.lap());

    orthogonalize(dst, &scratch, normals);
    timings.set_orthogonalize(lap.lap());
    timings.report(tri.len(), dst.len());
}

pub fn generate_tangents_soa(
    dst: &mut [Vec4],
    tri: &TriangleSoA<'_>,
    uv: &TriangleUvSoA<'_>,
    normals: &[Vec3],
    indices: &[u32],
) {
    let mut timings = TangentTimings::new("soa", "simd");
    let mut lap = LapTimer::start();

    let mut scratch = TangentScratch::zeroed(dst.len());
    accumulate(&mut scratch, tri, uv, indices);
    timings.set_accumulate(lap.lap());

    orthogonalize(dst, &scratch, normals);
    timings.set_orthogonalize(lap.lap());
    timings.report(tri.len(), dst.len());
}

/// Lane form of `shared::corner_angle`.
#[inline(always)]
fn corner_angle(a: [f32x8; 3], b: [f32x8; 3]) -> f32x8 {
    let c = dot3(normalize3(a), normalize3(b)).simd_clamp(f32x8::splat(-1.0), f32x8::splat(1.0));
    map_lanes(c, f32::acos)
}

fn accumulate(
    scratch: &mut TangentScratch,
    tri: &TriangleSoA<'_>,
    uv: &TriangleUvSoA<'_>,
    indices: &[u32],
) {
    let num_triangles = tri.len().min(indices.len() / 3);
    let vc = tri.components();
    let uc = uv.components();

    let mut base = 0;
    while base < num_triangles {
        let n = (num_triangles - base).min(LANES);
        let v: [f32x8; 9] = std::array::from_fn(|i| load_f32(&vc[i][base..base + n]));
        let u: [f32x8; 6] = std::array::from_fn(|i| load_f32(&uc[i][base..base + n]));
        let v0 = [v[0], v[1], v[2]];
        let v1 = [v[3], v[4], v[5]];
        let v2 = [v[6], v[7], v[8]];

        let p = sub3(v1, v0);
        let q = sub3(v2, v0);
        let mut sx = u[2] - u[0];
        let mut sy = u[4] - u[0];
        let mut tx = u[3] - u[1];
        let mut ty = u[5] - u[1];

        let div = sx * ty - sy * tx;
        let area = div.abs();
        let rdiv = f32x8::splat(1.0) / div;
        sx *= rdiv;
        sy *= rdiv;
        tx *= rdiv;
        ty *= rdiv;

        let tangent = scale3(
            normalize3([
                ty * p[0] - tx * q[0],
                ty * p[1] - tx * q[1],
                ty * p[2] - tx * q[2],
            ]),
            area,
        );
        let binormal = scale3(
            normalize3([
                sx * q[0] - sy * p[0],
                sx * q[1] - sy * p[1],
                sx * q[2] - sy * p[2],
            ]),
            area,
        );

        let angles = [
            corner_angle(sub3(v2, v0), sub3(v1, v0)),
            corner_angle(sub3(v0, v1), sub3(v2, v1)),
            corner_angle(sub3(v1, v2), sub3(v0, v2)),
        ];
        let t = angles.map(|a| scale3(tangent, a).map(|c| c.to_array()));
        let b = angles.map(|a| scale3(binormal, a).map(|c| c.to_array()));

        for l in 0..n {
            let corners = &indices[(base + l) * 3..(base + l) * 3 + 3];
            for k in 0..3 {
                scratch.add(corners[k], lane_vec3(&t[k], l), lane_vec3(&b[k], l));
            }
        }
        base += LANES;
    }
}

fn orthogonalize(dst: &mut [Vec4], scratch: &TangentScratch, normals: &[Vec3]) {
    let num_vertices = dst.len();
    let eps = f32x8::splat(TANGENT_EPS);

    let mut base = 0;
    while base < num_vertices {
        let n = (num_vertices - base).min(LANES);
        let range = base..base + n;
        let t_in = load_vec3(&scratch.tangents[range.clone()]);
        let b_in = load_vec3(&scratch.binormals[range.clone()]);
        let nrm = load_vec3(&normals[range]);

        let mut t = sub3(t_in, scale3(nrm, dot3(nrm, t_in)));
        let mag_t = dot3(t, t).sqrt();
        t = t.map(|c| c / mag_t);

        let n_dot_b = dot3(nrm, b_in);
        let t_dot_b = dot3(t, b_in) * mag_t;
        let mut b = sub3(b_in, sub3(scale3(nrm, n_dot_b), scale3(t, t_dot_b)));
        let mag_b = dot3(b, b).sqrt();
        b = b.map(|c| c / mag_b);

        let ok = (mag_t.simd_gt(eps) & mag_b.simd_gt(eps)).to_bitmask();
        let sign = dot3(cross3(nrm, t), b)
            .simd_gt(f32x8::splat(0.0))
            .select(f32x8::splat(1.0), f32x8::splat(-1.0))
            .to_array();
        let t = t.map(|c| c.to_array());

        for (l, d) in dst[base..base + n].iter_mut().enumerate() {
            *d = if ok & (1 << l) != 0 {
                lane_vec3(&t, l).extend(sign[l])
            } else {
                let v = base + l;
                shared::orthogonalize_tangent(scratch.tangents[v], scratch.binormals[v], normals[v])
            };
        }
        base += LANES;
    }
}
