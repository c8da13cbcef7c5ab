//! Benchmark the generic and SIMD backends side by side.
//!
//! Run with: cargo run --release --features bench --bin bench_kernels
//!
//! Usage:
//!   bench_kernels                 Run default size (64k)
//!   bench_kernels 4k 256k 1m      Run multiple sizes
//!   bench_kernels -n 20           Take the best of 20 runs per kernel
//!   bench_kernels --only tangents Run kernels whose name contains "tangents"
//!
//! For per-phase tangent timings, add `--features timing` and a tracing
//! subscriber in the host process.

use clap::Parser;
use glam::Quat;
use mesh_simd::layout::{PlanarTriangles, PlanarUvs};
use mesh_simd::{generic, simd, Mat4, Vec2, Vec3, Vec4};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use std::time::Instant;

fn parse_count(s: &str) -> Result<usize, String> {
    let s = s.to_lowercase();
    let (num_str, multiplier) = if s.ends_with('m') {
        (&s[..s.len() - 1], 1_000_000)
    } else if s.ends_with('k') {
        (&s[..s.len() - 1], 1_000)
    } else {
        (s.as_str(), 1)
    };

    num_str
        .parse::<f64>()
        .map(|n| (n * multiplier as f64) as usize)
        .map_err(|e| format!("Invalid number '{}': {}", s, e))
}

fn format_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}k", n / 1_000)
    } else {
        format!("{}", n)
    }
}

#[derive(Parser)]
#[command(name = "bench_kernels")]
#[command(about = "Benchmark mesh-simd kernels on both backends")]
struct Args {
    /// Element counts to benchmark (e.g., 4k, 256k, 1m)
    #[arg(value_parser = parse_count)]
    sizes: Vec<usize>,

    /// Random seed
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Runs per kernel; the fastest is reported
    #[arg(short = 'n', long, default_value_t = 5)]
    repeat: usize,

    /// Only run kernels whose name contains this string
    #[arg(long)]
    only: Option<String>,
}

/// A jittered grid heightfield with roughly `n` vertices.
struct Grid {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    uv: Vec<Vec2>,
    indices: Vec<u32>,
}

fn generate_grid(n: usize, rng: &mut ChaCha8Rng) -> Grid {
    let side = ((n as f64).sqrt() as usize).max(2);
    let mut vertices = Vec::with_capacity(side * side);
    let mut uv = Vec::with_capacity(side * side);
    for r in 0..side {
        for c in 0..side {
            let x = c as f32 + rng.gen_range(-0.2..0.2);
            let y = r as f32 + rng.gen_range(-0.2..0.2);
            vertices.push(Vec3::new(x, y, rng.gen_range(-0.5..0.5)));
            uv.push(Vec2::new(c as f32 / side as f32, r as f32 / side as f32));
        }
    }
    let normals = vec![Vec3::Z; vertices.len()];
    let mut indices = Vec::with_capacity((side - 1) * (side - 1) * 6);
    for r in 0..side as u32 - 1 {
        for c in 0..side as u32 - 1 {
            let a = r * side as u32 + c;
            let b = a + 1;
            let d = a + side as u32;
            let e = d + 1;
            indices.extend_from_slice(&[a, b, d, b, e, d]);
        }
    }
    Grid {
        vertices,
        normals,
        uv,
        indices,
    }
}

fn best_ms(repeat: usize, mut f: impl FnMut()) -> f64 {
    f();
    (0..repeat.max(1))
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed().as_secs_f64() * 1000.0
        })
        .fold(f64::INFINITY, f64::min)
}

fn report(name: &str, generic_ms: f64, simd_ms: f64) {
    println!(
        "  {:<22} generic {:>9.3}ms   simd {:>9.3}ms   x{:.2}",
        name,
        generic_ms,
        simd_ms,
        generic_ms / simd_ms.max(1e-9)
    );
}

fn run_size(n: usize, args: &Args) {
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let grid = generate_grid(n, &mut rng);
    let nv = grid.vertices.len();
    let enabled = |name: &str| args.only.as_deref().map_or(true, |o| name.contains(o));

    println!(
        "n={} ({} vertices, {} triangles)",
        format_num(n),
        nv,
        grid.indices.len() / 3
    );

    if enabled("normalize") {
        let mut a = grid.vertices.clone();
        let mut b = grid.vertices.clone();
        let g = best_ms(args.repeat, || generic::normalize(black_box(&mut a)));
        let s = best_ms(args.repeat, || simd::normalize(black_box(&mut b)));
        report("normalize", g, s);
    }

    if enabled("mul_points") {
        let m = Mat4::from_rotation_translation(Quat::from_rotation_z(0.3), Vec3::new(1.0, 2.0, 3.0));
        let mut dst = vec![Vec3::ZERO; nv];
        let g = best_ms(args.repeat, || generic::mul_points(&m, &grid.vertices, black_box(&mut dst)));
        let s = best_ms(args.repeat, || simd::mul_points(&m, &grid.vertices, black_box(&mut dst)));
        report("mul_points", g, s);
    }

    if enabled("lerp") {
        let a: &[f32] = bytemuck::cast_slice(&grid.vertices);
        let b: &[f32] = bytemuck::cast_slice(&grid.normals);
        let mut dst = vec![0.0f32; a.len()];
        let g = best_ms(args.repeat, || generic::lerp(black_box(&mut dst), a, b, 0.3));
        let s = best_ms(args.repeat, || simd::lerp(black_box(&mut dst), a, b, 0.3));
        report("lerp", g, s);
    }

    if enabled("min_max3") {
        let (mut lo, mut hi) = (Vec3::ZERO, Vec3::ZERO);
        let g = best_ms(args.repeat, || generic::min_max3(&grid.vertices, &mut lo, &mut hi));
        let s = best_ms(args.repeat, || simd::min_max3(&grid.vertices, &mut lo, &mut hi));
        report("min_max3", g, s);
    }

    if enabled("ray_indexed") || enabled("ray_soa") {
        let pos = Vec3::new(nv as f32 * 0.001, 1.5, 10.0);
        let planar = PlanarTriangles::from_indexed(&grid.vertices, &grid.indices);
        let soa = planar.as_soa();
        if enabled("ray_indexed") {
            let g = best_ms(args.repeat, || {
                black_box(generic::ray_triangles_intersection_indexed(
                    pos,
                    Vec3::NEG_Z,
                    &grid.vertices,
                    &grid.indices,
                ));
            });
            let s = best_ms(args.repeat, || {
                black_box(simd::ray_triangles_intersection_indexed(
                    pos,
                    Vec3::NEG_Z,
                    &grid.vertices,
                    &grid.indices,
                ));
            });
            report("ray_indexed", g, s);
        }
        if enabled("ray_soa") {
            let g = best_ms(args.repeat, || {
                black_box(generic::ray_triangles_intersection_soa(pos, Vec3::NEG_Z, &soa));
            });
            let s = best_ms(args.repeat, || {
                black_box(simd::ray_triangles_intersection_soa(pos, Vec3::NEG_Z, &soa));
            });
            report("ray_soa", g, s);
        }
    }

    if enabled("poly_inside") {
        let ngon = 60;
        let poly: Vec<Vec2> = (0..ngon)
            .map(|i| {
                let a = i as f32 / ngon as f32 * std::f32::consts::TAU;
                let r = if i % 2 == 0 { 1.0 } else { 0.6 };
                Vec2::new(r * a.cos(), r * a.sin())
            })
            .collect();
        let queries: Vec<Vec2> = (0..nv.min(65_536))
            .map(|_| Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let g = best_ms(args.repeat, || {
            for &q in &queries {
                black_box(generic::poly_inside(&poly, q));
            }
        });
        let s = best_ms(args.repeat, || {
            for &q in &queries {
                black_box(simd::poly_inside(&poly, q));
            }
        });
        report("poly_inside", g, s);
    }

    if enabled("tangents") {
        let mut dst = vec![Vec4::ZERO; nv];
        let g = best_ms(args.repeat, || {
            generic::generate_tangents_indexed(
                black_box(&mut dst),
                &grid.vertices,
                &grid.normals,
                &grid.uv,
                &grid.indices,
            )
        });
        let s = best_ms(args.repeat, || {
            simd::generate_tangents_indexed(
                black_box(&mut dst),
                &grid.vertices,
                &grid.normals,
                &grid.uv,
                &grid.indices,
            )
        });
        report("tangents_indexed", g, s);

        let tri = PlanarTriangles::from_indexed(&grid.vertices, &grid.indices);
        let uvs = PlanarUvs::from_indexed(&grid.uv, &grid.indices);
        let g = best_ms(args.repeat, || {
            generic::generate_tangents_soa(
                black_box(&mut dst),
                &tri.as_soa(),
                &uvs.as_soa(),
                &grid.normals,
                &grid.indices,
            )
        });
        let s = best_ms(args.repeat, || {
            simd::generate_tangents_soa(
                black_box(&mut dst),
                &tri.as_soa(),
                &uvs.as_soa(),
                &grid.normals,
                &grid.indices,
            )
        });
        report("tangents_soa", g, s);
    }
}

fn main() {
    let args = Args::parse();
    let sizes = if args.sizes.is_empty() {
        vec![64_000]
    } else {
        args.sizes.clone()
    };

    println!(
        "mesh-simd kernels: {} lanes, crate-root backend = {}",
        mesh_simd::LANES,
        mesh_simd::ACTIVE_BACKEND.name()
    );
    for n in sizes {
        run_size(n, &args);
    }
}
