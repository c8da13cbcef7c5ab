//! Both backends must agree on every operation, across sizes that exercise
//! the empty, sub-lane, whole-lane and multi-chunk paths.

mod support;

use mesh_simd::layout::{PlanarTriangles, PlanarUvs};
use mesh_simd::{generic, simd, Mat4, Vec2, Vec3, Vec4};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use support::mesh::*;

const TOL: f32 = 1e-5;

#[test]
fn test_invert_ops_agree() {
    for n in SIZES {
        let src = random_vec3s(n, 1);
        let (mut a, mut b) = (src.clone(), src.clone());
        generic::invert_x3(&mut a);
        simd::invert_x3(&mut b);
        assert_eq!(a, b, "invert_x3 n={}", n);

        let src4: Vec<Vec4> = src.iter().map(|v| v.extend(n as f32)).collect();
        let (mut a, mut b) = (src4.clone(), src4);
        generic::invert_x4(&mut a);
        simd::invert_x4(&mut b);
        assert_eq!(a, b, "invert_x4 n={}", n);

        let uv = random_vec2s(n, 2);
        let (mut a, mut b) = (uv.clone(), uv);
        generic::invert_v(&mut a);
        simd::invert_v(&mut b);
        assert_eq!(a, b, "invert_v n={}", n);
    }
}

#[test]
fn test_scale_agrees() {
    for n in SIZES {
        let src = random_floats(n, 3);
        let (mut a, mut b) = (src.clone(), src);
        generic::scale(&mut a, -2.5);
        simd::scale(&mut b, -2.5);
        assert_eq!(a, b, "scale n={}", n);

        let src = random_vec3s(n, 4);
        let (mut a, mut b) = (src.clone(), src);
        generic::scale3(&mut a, 0.125);
        simd::scale3(&mut b, 0.125);
        assert_eq!(a, b, "scale3 n={}", n);
    }
}

#[test]
fn test_normalize_agrees() {
    for n in SIZES {
        let src = random_directions(n, 5);
        let (mut a, mut b) = (src.clone(), src);
        generic::normalize(&mut a);
        simd::normalize(&mut b);
        assert_vec3s_close(&a, &b, TOL, "normalize");
        for v in &b {
            assert!((v.length() - 1.0).abs() < 1e-5, "not unit: {:?}", v);
        }
    }
}

#[test]
fn test_lerp_agrees() {
    for n in SIZES {
        let s1 = random_floats(n, 6);
        let s2 = random_floats(n, 7);
        for w in [0.0, 0.3, 1.0] {
            let mut a = vec![0.0; n];
            let mut b = vec![0.0; n];
            generic::lerp(&mut a, &s1, &s2, w);
            simd::lerp(&mut b, &s1, &s2, w);
            assert_floats_close(&a, &b, TOL, "lerp");
        }
    }
}

#[test]
fn test_min_max_agrees() {
    for n in SIZES {
        let p2 = random_vec2s(n, 8);
        let sentinel2 = (Vec2::splat(-7.0), Vec2::splat(7.0));
        let (mut ga, mut gb) = sentinel2;
        let (mut sa, mut sb) = sentinel2;
        generic::min_max2(&p2, &mut ga, &mut gb);
        simd::min_max2(&p2, &mut sa, &mut sb);
        assert_eq!((ga, gb), (sa, sb), "min_max2 n={}", n);

        let p3 = random_vec3s(n, 9);
        let sentinel3 = (Vec3::splat(-7.0), Vec3::splat(7.0));
        let (mut ga, mut gb) = sentinel3;
        let (mut sa, mut sb) = sentinel3;
        generic::min_max3(&p3, &mut ga, &mut gb);
        simd::min_max3(&p3, &mut sa, &mut sb);
        assert_eq!((ga, gb), (sa, sb), "min_max3 n={}", n);
        if n == 0 {
            assert_eq!((sa, sb), sentinel3);
        }
    }
}

#[test]
fn test_near_equal_agrees() {
    for n in SIZES {
        let a = random_floats(n, 10);
        assert!(generic::near_equal(&a, &a, 0.0));
        assert!(simd::near_equal(&a, &a, 0.0));
        for k in [0, n / 2, n.saturating_sub(1)] {
            if n == 0 {
                continue;
            }
            let mut b = a.clone();
            b[k] += 0.5;
            assert!(!generic::near_equal(&a, &b, 0.25), "generic n={} k={}", n, k);
            assert!(!simd::near_equal(&a, &b, 0.25), "simd n={} k={}", n, k);
            assert!(simd::near_equal(&a, &b, 0.75), "simd n={} k={}", n, k);
        }
    }
}

#[test]
fn test_transforms_agree() {
    let m = Mat4::from_cols_array(&[
        0.8, 0.1, -0.3, 0.0, //
        -0.2, 1.1, 0.4, 0.0, //
        0.5, -0.6, 0.9, 0.0, //
        3.0, -4.0, 5.0, 1.0,
    ]);
    for n in SIZES {
        let src = random_vec3s(n, 11);
        let mut a = vec![Vec3::ZERO; n];
        let mut b = vec![Vec3::ZERO; n];
        generic::mul_points(&m, &src, &mut a);
        simd::mul_points(&m, &src, &mut b);
        assert_vec3s_close(&a, &b, TOL, "mul_points");

        generic::mul_vectors(&m, &src, &mut a);
        simd::mul_vectors(&m, &src, &mut b);
        assert_vec3s_close(&a, &b, TOL, "mul_vectors");
    }
}

#[cfg(feature = "half")]
#[test]
fn test_half_conversion_agrees() {
    for n in SIZES {
        let src = random_floats(n, 12);
        let mut ga = vec![half::f16::ZERO; n];
        let mut sa = vec![half::f16::ZERO; n];
        generic::float_to_half(&mut ga, &src);
        simd::float_to_half(&mut sa, &src);
        assert_eq!(ga, sa);

        let mut gb = vec![0.0f32; n];
        let mut sb = vec![0.0f32; n];
        generic::half_to_float(&mut gb, &ga);
        simd::half_to_float(&mut sb, &sa);
        assert_eq!(gb, sb);
    }
}

#[test]
fn test_ray_variants_agree() {
    let mesh = grid_mesh(24, 13);
    let planar = PlanarTriangles::from_indexed(&mesh.vertices, &mesh.indices);
    let soa = planar.as_soa();
    let corners = mesh.unindexed();
    let mut rng = ChaCha8Rng::seed_from_u64(14);

    let mut total_hits = 0;
    for _ in 0..200 {
        let pos = Vec3::new(rng.gen_range(-2.0..26.0), rng.gen_range(-2.0..26.0), 10.0);
        let dir = Vec3::new(rng.gen_range(-0.2..0.2), rng.gen_range(-0.2..0.2), -1.0);

        let g = generic::ray_triangles_intersection_indexed(pos, dir, &mesh.vertices, &mesh.indices);
        let results = [
            simd::ray_triangles_intersection_indexed(pos, dir, &mesh.vertices, &mesh.indices),
            simd::ray_triangles_intersection_array(pos, dir, &corners),
            simd::ray_triangles_intersection_soa(pos, dir, &soa),
            generic::ray_triangles_intersection_array(pos, dir, &corners),
            generic::ray_triangles_intersection_soa(pos, dir, &soa),
        ];
        for r in results {
            assert_eq!(r.num_hits, g.num_hits, "pos={:?} dir={:?}", pos, dir);
            if g.num_hits > 0 {
                assert_eq!(r.triangle, g.triangle);
                assert!(close(r.distance, g.distance, TOL));
            }
        }
        total_hits += g.num_hits;
    }
    assert!(total_hits > 100, "rays mostly missed the grid: {}", total_hits);
}

#[test]
fn test_ray_small_counts_agree() {
    let mesh = grid_mesh(4, 15);
    let pos = Vec3::new(1.3, 1.6, 5.0);
    for nt in [0, 1, 7, 8, 9, mesh.num_triangles()] {
        let indices = &mesh.indices[..nt * 3];
        let g = generic::ray_triangles_intersection_indexed(pos, Vec3::NEG_Z, &mesh.vertices, indices);
        let s = simd::ray_triangles_intersection_indexed(pos, Vec3::NEG_Z, &mesh.vertices, indices);
        assert_eq!(g, s, "nt={}", nt);
    }
}

#[test]
fn test_poly_inside_agrees() {
    let mut rng = ChaCha8Rng::seed_from_u64(16);
    for tips in [3, 4, 5, 12, 20] {
        let poly = star_polygon(tips, 0.45);
        let px: Vec<f32> = poly.iter().map(|p| p.x).collect();
        let py: Vec<f32> = poly.iter().map(|p| p.y).collect();
        let (mut lo, mut hi) = (Vec2::ZERO, Vec2::ZERO);
        generic::min_max2(&poly, &mut lo, &mut hi);

        let mut inside = 0;
        for _ in 0..500 {
            let q = Vec2::new(rng.gen_range(-1.2..1.2), rng.gen_range(-1.2..1.2));
            let g = generic::poly_inside(&poly, q);
            assert_eq!(simd::poly_inside(&poly, q), g, "tips={} q={:?}", tips, q);
            assert_eq!(simd::poly_inside_bounded(&poly, lo, hi, q), g);
            assert_eq!(simd::poly_inside_soa(&px, &py, lo, hi, q), g);
            assert_eq!(generic::poly_inside_soa(&px, &py, lo, hi, q), g);
            inside += g as usize;
        }
        assert!(inside > 0 && inside < 500, "tips={} inside={}", tips, inside);
    }
}

#[test]
fn test_tangents_agree() {
    for side in [2, 3, 5, 17] {
        let mesh = grid_mesh(side, 17 + side as u64);
        let nv = mesh.vertices.len();

        let mut g = vec![Vec4::ZERO; nv];
        let mut s = vec![Vec4::ZERO; nv];
        generic::generate_tangents_indexed(&mut g, &mesh.vertices, &mesh.normals, &mesh.uv, &mesh.indices);
        simd::generate_tangents_indexed(&mut s, &mesh.vertices, &mesh.normals, &mesh.uv, &mesh.indices);
        assert_vec4s_close(&g, &s, 1e-4, "tangents_indexed");

        let tri = PlanarTriangles::from_indexed(&mesh.vertices, &mesh.indices);
        let uvs = PlanarUvs::from_indexed(&mesh.uv, &mesh.indices);
        let mut gs = vec![Vec4::ZERO; nv];
        let mut ss = vec![Vec4::ZERO; nv];
        generic::generate_tangents_soa(&mut gs, &tri.as_soa(), &uvs.as_soa(), &mesh.normals, &mesh.indices);
        simd::generate_tangents_soa(&mut ss, &tri.as_soa(), &uvs.as_soa(), &mesh.normals, &mesh.indices);
        assert_vec4s_close(&gs, &ss, 1e-4, "tangents_soa");
        assert_vec4s_close(&g, &gs, 1e-4, "indexed vs soa");

        for t in &s {
            assert!((t.truncate().length() - 1.0).abs() < 1e-4, "{:?}", t);
            assert!(t.w == 1.0 || t.w == -1.0);
        }
    }
}

#[test]
fn test_tangents_agree_with_degenerate_uvs() {
    let mut mesh = grid_mesh(6, 19);
    // Collapse the UVs of one row so every triangle touching it is degenerate.
    for uv in &mut mesh.uv[12..18] {
        *uv = Vec2::new(0.5, 0.5);
    }
    let nv = mesh.vertices.len();
    let mut g = vec![Vec4::ZERO; nv];
    let mut s = vec![Vec4::ZERO; nv];
    generic::generate_tangents_indexed(&mut g, &mesh.vertices, &mesh.normals, &mesh.uv, &mesh.indices);
    simd::generate_tangents_indexed(&mut s, &mesh.vertices, &mesh.normals, &mesh.uv, &mesh.indices);
    assert_vec4s_close(&g, &s, 1e-4, "degenerate tangents");
    assert!(s.iter().all(|t| t.is_finite()));
}

#[test]
fn test_normals_agree() {
    let mesh = grid_mesh(9, 18);
    let nv = mesh.vertices.len();
    let counts = vec![3u32; mesh.num_triangles()];
    let offsets: Vec<u32> = (0..mesh.num_triangles() as u32).map(|f| f * 3).collect();

    let mut g = vec![Vec3::ZERO; nv];
    let mut s = vec![Vec3::ONE; nv];
    generic::generate_normals(&mut g, &mesh.vertices, &counts, &offsets, &mesh.indices);
    simd::generate_normals(&mut s, &mesh.vertices, &counts, &offsets, &mesh.indices);
    assert_vec3s_close(&g, &s, TOL, "generate_normals");
    // Counter-clockwise winding in the xy plane faces +z.
    assert!(s.iter().all(|n| n.z > 0.0));
}
