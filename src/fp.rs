//! Floating-point lane helpers (feature-gated FMA).
//!
//! The non-FMA forms keep the same left-associative order glam uses for
//! `Vec3::dot` and `Vec3::cross`, so the SIMD backend reproduces the scalar
//! backend bit for bit unless `fma` is enabled.

use std::simd::f32x8;
#[cfg(feature = "fma")]
use std::simd::StdFloat;

#[inline(always)]
pub(crate) fn dot3_f32x8(
    ax: f32x8,
    ay: f32x8,
    az: f32x8,
    bx: f32x8,
    by: f32x8,
    bz: f32x8,
) -> f32x8 {
    #[cfg(feature = "fma")]
    {
        let ab = ax.mul_add(bx, ay * by);
        az.mul_add(bz, ab)
    }
    #[cfg(not(feature = "fma"))]
    {
        (ax * bx + ay * by) + az * bz
    }
}

#[inline(always)]
pub(crate) fn dot3(a: [f32x8; 3], b: [f32x8; 3]) -> f32x8 {
    dot3_f32x8(a[0], a[1], a[2], b[0], b[1], b[2])
}

#[inline(always)]
fn diff_of_products(a: f32x8, b: f32x8, c: f32x8, d: f32x8) -> f32x8 {
    #[cfg(feature = "fma")]
    {
        a.mul_add(b, -(c * d))
    }
    #[cfg(not(feature = "fma"))]
    {
        a * b - c * d
    }
}

/// Lane-wise `a × b`.
#[inline(always)]
pub(crate) fn cross3(a: [f32x8; 3], b: [f32x8; 3]) -> [f32x8; 3] {
    [
        diff_of_products(a[1], b[2], b[1], a[2]),
        diff_of_products(a[2], b[0], b[2], a[0]),
        diff_of_products(a[0], b[1], b[0], a[1]),
    ]
}

#[inline(always)]
pub(crate) fn sub3(a: [f32x8; 3], b: [f32x8; 3]) -> [f32x8; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline(always)]
pub(crate) fn scale3(a: [f32x8; 3], s: f32x8) -> [f32x8; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

/// Lane-wise normalize, `v * (1 / |v|)` like `glam::Vec3::normalize`.
#[inline(always)]
pub(crate) fn normalize3(v: [f32x8; 3]) -> [f32x8; 3] {
    use std::simd::StdFloat as _;
    let len = dot3(v, v).sqrt();
    scale3(v, f32x8::splat(1.0) / len)
}
