//! Point-in-polygon with lane-parallel crossing discovery.
//!
//! Eight edges are tested against the scan line per step. Crossings land in
//! the same fixed buffer the scalar path uses, in edge order, so capacity
//! truncation and the final sorted interval test are shared verbatim.

use std::simd::prelude::*;

use glam::Vec2;

use super::lanes::{active, gather_f32, load_f32, LANES};
use crate::shared::{self, Crossings};

/// Edge endpoints for eight edges: `[p1x, p1y, p2x, p2y]`.
type EdgeLanes = [f32x8; 4];

#[inline(always)]
fn find_crossings(ngon: usize, pos: Vec2, fetch: impl Fn(usize, usize) -> EdgeLanes) -> Crossings {
    let mut xc = Crossings::new();
    let y = f32x8::splat(pos.y);

    let mut base = 0;
    while base < ngon {
        let n = (ngon - base).min(LANES);
        let [p1x, p1y, p2x, p2y] = fetch(base, n);

        let up = p1y.simd_le(y) & y.simd_lt(p2y);
        let down = p2y.simd_le(y) & y.simd_lt(p1y);
        let mut bits = ((up | down) & active(n)).to_bitmask();
        if bits != 0 {
            let x = ((y - p1y) / (p2y - p1y) * (p2x - p1x) + p1x).to_array();
            while bits != 0 {
                let l = bits.trailing_zeros() as usize;
                if !xc.push(x[l]) {
                    return xc;
                }
                bits &= bits - 1;
            }
        }
        base += LANES;
    }
    xc
}

/// `n` floats starting at `start`, wrapping past the end back to index 0.
#[inline(always)]
fn load_wrapped(src: &[f32], start: usize, n: usize) -> f32x8 {
    if start + n <= src.len() {
        load_f32(&src[start..start + n])
    } else {
        let len = src.len();
        gather_f32(n, |l| src[(start + l) % len])
    }
}

pub fn poly_inside_soa(px: &[f32], py: &[f32], minp: Vec2, maxp: Vec2, pos: Vec2) -> bool {
    if !shared::in_bounds(minp, maxp, pos) {
        return false;
    }
    let ngon = px.len();
    let py = &py[..ngon];
    find_crossings(ngon, pos, |base, n| {
        [
            load_f32(&px[base..base + n]),
            load_f32(&py[base..base + n]),
            load_wrapped(px, base + 1, n),
            load_wrapped(py, base + 1, n),
        ]
    })
    .contains(pos.x)
}

pub fn poly_inside_bounded(poly: &[Vec2], minp: Vec2, maxp: Vec2, pos: Vec2) -> bool {
    if !shared::in_bounds(minp, maxp, pos) {
        return false;
    }
    let ngon = poly.len();
    find_crossings(ngon, pos, |base, n| {
        let next = |l: usize| poly[(base + l + 1) % ngon];
        [
            gather_f32(n, |l| poly[base + l].x),
            gather_f32(n, |l| poly[base + l].y),
            gather_f32(n, |l| next(l).x),
            gather_f32(n, |l| next(l).y),
        ]
    })
    .contains(pos.x)
}

pub fn poly_inside(poly: &[Vec2], pos: Vec2) -> bool {
    let (mut minp, mut maxp) = (Vec2::ZERO, Vec2::ZERO);
    super::min_max2(poly, &mut minp, &mut maxp);
    poly_inside_bounded(poly, minp, maxp, pos)
}
