//! Characterization of the even-odd point-in-polygon test.
//!
//! Edges are half-open in y and crossing intervals are half-open in x, so
//! points on a left or bottom edge are inside and points on a right or top
//! edge are outside. The bounding-box rejection is inclusive.

mod support;

use mesh_simd::{generic, poly_inside, poly_inside_bounded, poly_inside_soa, simd, Vec2};
use support::mesh::{star_polygon, unit_square};

fn all_forms(poly: &[Vec2], pos: Vec2) -> bool {
    let px: Vec<f32> = poly.iter().map(|p| p.x).collect();
    let py: Vec<f32> = poly.iter().map(|p| p.y).collect();
    let (mut lo, mut hi) = (Vec2::ZERO, Vec2::ZERO);
    generic::min_max2(poly, &mut lo, &mut hi);

    let expected = poly_inside(poly, pos);
    for (name, got) in [
        ("bounded", poly_inside_bounded(poly, lo, hi, pos)),
        ("soa", poly_inside_soa(&px, &py, lo, hi, pos)),
        ("generic", generic::poly_inside(poly, pos)),
        ("simd", simd::poly_inside(poly, pos)),
    ] {
        assert_eq!(got, expected, "{} disagrees at {:?}", name, pos);
    }
    expected
}

#[test]
fn test_unit_square_interior_and_exterior() {
    let sq = unit_square();
    assert!(all_forms(&sq, Vec2::new(0.5, 0.5)));
    assert!(!all_forms(&sq, Vec2::new(1.5, 0.5)));
    assert!(!all_forms(&sq, Vec2::new(-0.5, 0.5)));
    assert!(!all_forms(&sq, Vec2::new(0.5, 2.0)));
}

#[test]
fn test_unit_square_boundary_convention() {
    let sq = unit_square();
    // Left and bottom edges are inside.
    assert!(all_forms(&sq, Vec2::new(0.0, 0.5)));
    assert!(all_forms(&sq, Vec2::new(0.5, 0.0)));
    assert!(all_forms(&sq, Vec2::new(0.0, 0.0)));
    // Right and top edges are outside.
    assert!(!all_forms(&sq, Vec2::new(1.0, 0.5)));
    assert!(!all_forms(&sq, Vec2::new(0.5, 1.0)));
    assert!(!all_forms(&sq, Vec2::new(1.0, 1.0)));
    assert!(!all_forms(&sq, Vec2::new(1.0, 0.0)));
}

#[test]
fn test_winding_does_not_matter() {
    let mut sq = unit_square();
    sq.reverse();
    assert!(all_forms(&sq, Vec2::new(0.5, 0.5)));
    assert!(all_forms(&sq, Vec2::new(0.0, 0.5)));
    assert!(!all_forms(&sq, Vec2::new(1.0, 0.5)));
}

#[test]
fn test_scanline_through_vertices() {
    // Diamond: the scan line y = 0 passes exactly through two vertices.
    let diamond = vec![
        Vec2::new(0.0, -1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(-1.0, 0.0),
    ];
    assert!(all_forms(&diamond, Vec2::new(0.0, 0.0)));
    assert!(all_forms(&diamond, Vec2::new(-1.0, 0.0)));
    assert!(!all_forms(&diamond, Vec2::new(1.0, 0.0)));
    assert!(all_forms(&diamond, Vec2::new(0.2, 0.5)));
    assert!(!all_forms(&diamond, Vec2::new(0.8, 0.8)));
}

#[test]
fn test_concave_l_shape() {
    let l = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(2.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 2.0),
        Vec2::new(0.0, 2.0),
    ];
    assert!(all_forms(&l, Vec2::new(0.5, 1.5)));
    assert!(all_forms(&l, Vec2::new(1.5, 0.5)));
    // Inside the bounding box but in the notch.
    assert!(!all_forms(&l, Vec2::new(1.5, 1.5)));
}

#[test]
fn test_star_tips_and_notches() {
    let star = star_polygon(5, 0.4);
    assert!(all_forms(&star, Vec2::ZERO));
    assert!(all_forms(&star, Vec2::new(0.8, 0.0)));
    // Between two tips, beyond the inner radius.
    let a = std::f32::consts::TAU / 10.0;
    assert!(!all_forms(&star, Vec2::new(0.7 * a.cos(), 0.7 * a.sin())));
}

#[test]
fn test_caller_bounds_reject_first() {
    let sq = unit_square();
    // A box that excludes the point wins even though the polygon contains it.
    let tight = (Vec2::ZERO, Vec2::splat(0.25));
    assert!(!poly_inside_bounded(&sq, tight.0, tight.1, Vec2::new(0.5, 0.5)));
    // The box is inclusive: a point on its edge proceeds to the crossing test.
    assert!(poly_inside_bounded(&sq, tight.0, tight.1, Vec2::new(0.25, 0.25)));
}

#[test]
fn test_degenerate_polygons() {
    assert!(!all_forms(&[], Vec2::ZERO));
    assert!(!all_forms(&[Vec2::ZERO], Vec2::ZERO));
    // Zero-area polygon along the x axis has no non-horizontal edges.
    let flat = vec![Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0)];
    assert!(!all_forms(&flat, Vec2::new(0.5, 0.0)));
}

#[test]
fn test_comb_beyond_crossing_capacity_does_not_panic() {
    // 40 teeth give 80 crossings on a scan line through the teeth.
    let teeth = 40;
    let mut comb = vec![Vec2::new(0.0, 0.0)];
    for i in 0..teeth {
        let x = i as f32;
        comb.push(Vec2::new(x, 2.0));
        comb.push(Vec2::new(x + 0.5, 2.0));
        comb.push(Vec2::new(x + 0.5, 1.0));
        comb.push(Vec2::new(x + 1.0, 1.0));
    }
    comb.push(Vec2::new(teeth as f32, 0.0));
    assert!(2 * teeth > mesh_simd::MAX_CROSSINGS);

    // Below the teeth the scan line only meets the two outer edges.
    assert!(all_forms(&comb, Vec2::new(20.25, 0.5)));
    // Early teeth are resolved from the stored crossings.
    assert!(all_forms(&comb, Vec2::new(0.25, 1.5)));
    assert!(!all_forms(&comb, Vec2::new(0.75, 1.5)));
    // The first 64 crossings, in edge order, reach x = 31.5.
    assert!(all_forms(&comb, Vec2::new(30.25, 1.5)));
    assert!(all_forms(&comb, Vec2::new(31.25, 1.5)));
    // Teeth past the stored crossings read as outside.
    assert!(!all_forms(&comb, Vec2::new(35.25, 1.5)));
}
