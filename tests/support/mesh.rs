#![allow(dead_code)]

use mesh_simd::{Vec2, Vec3, Vec4};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::f32::consts::TAU;

/// Element counts that hit the empty, single, sub-lane, whole-lane and
/// many-chunk paths of the lane backend.
pub const SIZES: [usize; 6] = [0, 1, 7, 9, 64, 4096];

pub fn random_floats(n: usize, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-100.0..100.0)).collect()
}

pub fn random_vec2s(n: usize, seed: u64) -> Vec<Vec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
        .collect()
}

pub fn random_vec3s(n: usize, seed: u64) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    random_vec3s_with_rng(n, &mut rng)
}

pub fn random_vec3s_with_rng<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Vec3> {
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            )
        })
        .collect()
}

/// Random vectors kept away from zero length, safe to normalize.
pub fn random_directions(n: usize, seed: u64) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let z: f32 = rng.gen_range(-1.0..1.0);
            let theta: f32 = rng.gen_range(0.0..TAU);
            let r = (1.0 - z * z).sqrt();
            let len: f32 = rng.gen_range(0.5..20.0);
            Vec3::new(r * theta.cos(), r * theta.sin(), z) * len
        })
        .collect()
}

/// Indexed triangle mesh with per-vertex normals and UVs.
pub struct GridMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uv: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl GridMesh {
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corners laid out triangle by triangle.
    pub fn unindexed(&self) -> Vec<Vec3> {
        self.indices
            .iter()
            .map(|&i| self.vertices[i as usize])
            .collect()
    }
}

/// `side x side` jittered heightfield over `[0, side)^2`, two triangles per cell.
pub fn grid_mesh(side: usize, seed: u64) -> GridMesh {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut vertices = Vec::with_capacity(side * side);
    let mut uv = Vec::with_capacity(side * side);
    for r in 0..side {
        for c in 0..side {
            vertices.push(Vec3::new(
                c as f32 + rng.gen_range(-0.2..0.2),
                r as f32 + rng.gen_range(-0.2..0.2),
                rng.gen_range(-0.5..0.5),
            ));
            uv.push(Vec2::new(c as f32 * 0.1, r as f32 * 0.1));
        }
    }
    let normals = vec![Vec3::Z; vertices.len()];

    let s = side as u32;
    let mut indices = Vec::new();
    for r in 0..s.saturating_sub(1) {
        for c in 0..s - 1 {
            let a = r * s + c;
            indices.extend_from_slice(&[a, a + 1, a + s, a + 1, a + s + 1, a + s]);
        }
    }
    GridMesh {
        vertices,
        normals,
        uv,
        indices,
    }
}

/// Star with `points` tips alternating between radius 1 and `inner`.
pub fn star_polygon(points: usize, inner: f32) -> Vec<Vec2> {
    let n = points * 2;
    (0..n)
        .map(|i| {
            let a = i as f32 / n as f32 * TAU;
            let r = if i % 2 == 0 { 1.0 } else { inner };
            Vec2::new(r * a.cos(), r * a.sin())
        })
        .collect()
}

pub fn unit_square() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ]
}

/// Relative-or-absolute closeness: `|a - b| <= tol * max(1, |a|, |b|)`.
pub fn close(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol * 1.0f32.max(a.abs()).max(b.abs())
}

pub fn assert_floats_close(a: &[f32], b: &[f32], tol: f32, what: &str) {
    assert_eq!(a.len(), b.len(), "{}: length", what);
    for (i, (&x, &y)) in a.iter().zip(b).enumerate() {
        assert!(close(x, y, tol), "{}[{}]: {} vs {}", what, i, x, y);
    }
}

pub fn assert_vec3s_close(a: &[Vec3], b: &[Vec3], tol: f32, what: &str) {
    assert_floats_close(
        bytemuck::cast_slice(a),
        bytemuck::cast_slice(b),
        tol,
        what,
    );
}

pub fn assert_vec4s_close(a: &[Vec4], b: &[Vec4], tol: f32, what: &str) {
    assert_floats_close(
        bytemuck::cast_slice(a),
        bytemuck::cast_slice(b),
        tol,
        what,
    );
}
