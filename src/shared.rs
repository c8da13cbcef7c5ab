//! Scalar math shared by every backend and layout variant.
//!
//! The SIMD backend produces its raw per-lane data differently but funnels
//! through these routines wherever there is no lane-parallel formulation:
//! the sorted crossing interval test, the degenerate-tangent fallback, and
//! the triangle/vertex tangent math itself in the generic backend.

use glam::{Vec2, Vec3, Vec4};

/// Determinant magnitude below which a ray is treated as parallel.
pub(crate) const RAY_EPS_DET: f32 = 1e-10;
/// Barycentric slack so hits on shared edges are not lost to rounding.
pub(crate) const RAY_EPS_BARY: f32 = 1e-4;

/// Maximum number of scan-line crossings collected per polygon query.
pub const MAX_CROSSINGS: usize = 64;

/// Tangent/binormal magnitude at or below which the frame is rebuilt.
pub(crate) const TANGENT_EPS: f32 = 1e-6;

/// Möller–Trumbore ray/triangle test. Returns the hit distance along `dir`.
#[inline(always)]
pub(crate) fn ray_triangle(pos: Vec3, dir: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Option<f32> {
    let e1 = p2 - p1;
    let e2 = p3 - p1;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    let inv_det = 1.0 / det;
    let t = pos - p1;
    let u = t.dot(p) * inv_det;
    let q = t.cross(e1);
    let v = dir.dot(q) * inv_det;
    let d = e2.dot(q) * inv_det;

    let hit = det.abs() > RAY_EPS_DET
        && u > -RAY_EPS_BARY
        && v > -RAY_EPS_BARY
        && u + v < 1.0 + RAY_EPS_BARY
        && d >= 0.0;
    hit.then_some(d)
}

#[inline(always)]
pub(crate) fn in_bounds(minp: Vec2, maxp: Vec2, pos: Vec2) -> bool {
    !(pos.x < minp.x || pos.x > maxp.x || pos.y < minp.y || pos.y > maxp.y)
}

/// X coordinate where edge `p1 -> p2` crosses the horizontal line at `y`.
///
/// Half-open in y, so a vertex lying on the line is counted by exactly one
/// of its two edges and horizontal edges never cross.
#[inline(always)]
pub(crate) fn edge_crossing(p1: Vec2, p2: Vec2, y: f32) -> Option<f32> {
    if (p1.y <= y && y < p2.y) || (p2.y <= y && y < p1.y) {
        Some((y - p1.y) / (p2.y - p1.y) * (p2.x - p1.x) + p1.x)
    } else {
        None
    }
}

/// Fixed-capacity buffer of scan-line crossings.
pub(crate) struct Crossings {
    xs: [f32; MAX_CROSSINGS],
    len: usize,
}

impl Crossings {
    #[inline]
    pub fn new() -> Self {
        Self {
            xs: [0.0; MAX_CROSSINGS],
            len: 0,
        }
    }

    /// Adds a crossing. Returns `false` once the buffer is full.
    #[inline(always)]
    pub fn push(&mut self, x: f32) -> bool {
        self.xs[self.len] = x;
        self.len += 1;
        self.len < MAX_CROSSINGS
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Even-odd classification: sort, then test `x` against `[x0, x1)`,
    /// `[x2, x3)`, ... An unpaired trailing crossing is ignored.
    pub fn contains(mut self, x: f32) -> bool {
        let xs = &mut self.xs[..self.len];
        xs.sort_unstable_by(f32::total_cmp);
        xs.chunks_exact(2).any(|pair| x >= pair[0] && x < pair[1])
    }
}

/// Componentwise bounds of a polygon. Leaves the outputs alone when empty.
#[inline]
pub(crate) fn min_max2(src: &[Vec2], dst_min: &mut Vec2, dst_max: &mut Vec2) {
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

/// Interior angle between `a` and `b`, both measured from the same corner.
#[inline(always)]
pub(crate) fn corner_angle(a: Vec3, b: Vec3) -> f32 {
    a.normalize().dot(b.normalize()).clamp(-1.0, 1.0).acos()
}

/// Per-corner tangent and binormal contributions of one triangle.
///
/// The UV gradient direction is weighted by the UV-space area and by each
/// corner's interior angle.
#[inline]
pub(crate) fn triangle_tangent(v: [Vec3; 3], uv: [Vec2; 3]) -> ([Vec3; 3], [Vec3; 3]) {
    let p = v[1] - v[0];
    let q = v[2] - v[0];
    let mut s = Vec2::new(uv[1].x - uv[0].x, uv[2].x - uv[0].x);
    let mut t = Vec2::new(uv[1].y - uv[0].y, uv[2].y - uv[0].y);

    let div = s.x * t.y - s.y * t.x;
    let area = div.abs();
    let rdiv = 1.0 / div;
    s *= rdiv;
    t *= rdiv;

    let tangent = Vec3::new(
        t.y * p.x - t.x * q.x,
        t.y * p.y - t.x * q.y,
        t.y * p.z - t.x * q.z,
    )
    .normalize()
        * area;
    let binormal = Vec3::new(
        s.x * q.x - s.y * p.x,
        s.x * q.y - s.y * p.y,
        s.x * q.z - s.y * p.z,
    )
    .normalize()
        * area;

    let angles = [
        corner_angle(v[2] - v[0], v[1] - v[0]),
        corner_angle(v[0] - v[1], v[2] - v[1]),
        corner_angle(v[1] - v[2], v[0] - v[2]),
    ];

    (angles.map(|a| tangent * a), angles.map(|a| binormal * a))
}

/// Frame for a vertex whose accumulated tangent or binormal collapsed:
/// the world axis least aligned with the normal, projected off it.
#[inline]
pub(crate) fn fallback_frame(normal: Vec3) -> (Vec3, Vec3) {
    let ax = normal.x.abs();
    let ay = normal.y.abs();
    let az = normal.z.abs();
    let axis = if ax <= ay && ax <= az {
        Vec3::X
    } else if ay <= az {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let tangent = (axis - normal * normal.dot(axis)).normalize();
    (tangent, normal.cross(tangent))
}

/// Gram-Schmidt a summed tangent/binormal pair against the vertex normal and
/// pack the handedness sign into `w`.
#[inline]
pub(crate) fn orthogonalize_tangent(tangent: Vec3, binormal: Vec3, normal: Vec3) -> Vec4 {
    let mut tangent = tangent - normal * normal.dot(tangent);
    let mag_t = tangent.length();
    tangent /= mag_t;

    let n_dot_b = normal.dot(binormal);
    let t_dot_b = tangent.dot(binormal) * mag_t;
    let mut binormal = binormal - (normal * n_dot_b - tangent * t_dot_b);
    let mag_b = binormal.length();
    binormal /= mag_b;

    // NaN magnitudes must also take the fallback.
    if !(mag_t > TANGENT_EPS && mag_b > TANGENT_EPS) {
        (tangent, binormal) = fallback_frame(normal);
    }

    tangent_with_sign(tangent, binormal, normal)
}

#[inline(always)]
pub(crate) fn tangent_with_sign(tangent: Vec3, binormal: Vec3, normal: Vec3) -> Vec4 {
    let w = if normal.cross(tangent).dot(binormal) > 0.0 {
        1.0
    } else {
        -1.0
    };
    tangent.extend(w)
}
