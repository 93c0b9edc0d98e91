//! Line clipping.
//!
//! Both algorithms take one segment and return the part inside the clip
//! rectangle, endpoints in the original order, or `None` when nothing is
//! left. Endpoints already inside come back untouched.

use super::{Boundary, ClipBounds};
use crate::math::vec3::Vec3;

/// Boundaries an outside endpoint may be moved onto, in the order they are
/// tried. An inside endpoint stays where it is.
fn candidates(code: u8) -> [Option<Boundary>; 2] {
    use Boundary::*;
    const LEFT: u8 = Left.code();
    const RIGHT: u8 = Right.code();
    const BOTTOM: u8 = Bottom.code();
    const TOP: u8 = Top.code();

    match code {
        0 => [None, None],
        LEFT => [Some(Left), Some(Left)],
        RIGHT => [Some(Right), Some(Right)],
        BOTTOM => [Some(Bottom), Some(Bottom)],
        TOP => [Some(Top), Some(Top)],
        c if c == LEFT | TOP => [Some(Left), Some(Top)],
        c if c == LEFT | BOTTOM => [Some(Left), Some(Bottom)],
        c if c == RIGHT | BOTTOM => [Some(Right), Some(Bottom)],
        _ => [Some(Right), Some(Top)],
    }
}

/// Moves `from` onto `boundary` along the segment `from -> towards`.
///
/// Fails when the crossing lies outside the other axis' range: the segment
/// meets the boundary line beyond the rectangle.
fn move_onto(boundary: Option<Boundary>, from: Vec3, towards: Vec3, bounds: &ClipBounds) -> Option<Vec3> {
    let Some(boundary) = boundary else {
        return Some(from);
    };
    let p = boundary.intersect(from, towards, bounds);
    let in_range = match boundary {
        Boundary::Left | Boundary::Right => p.y >= bounds.min.y && p.y <= bounds.max.y,
        Boundary::Bottom | Boundary::Top => p.x >= bounds.min.x && p.x <= bounds.max.x,
    };
    in_range.then_some(p)
}

/// Cohen-Sutherland clipping with region codes.
///
/// Trivially accepts when both codes are zero and trivially rejects when
/// they share a bit. Otherwise each outside endpoint is moved onto its
/// boundary; for an endpoint in a corner region both adjacent boundaries are
/// tried, in the order (first, first), (first, second), (second, first),
/// (second, second), and the first valid pair wins.
pub fn cohen_sutherland(a: Vec3, b: Vec3, bounds: &ClipBounds) -> Option<(Vec3, Vec3)> {
    let code_a = bounds.outcode(a);
    let code_b = bounds.outcode(b);

    if code_a | code_b == 0 {
        return Some((a, b));
    }
    if code_a & code_b != 0 {
        return None;
    }

    let try_a = candidates(code_a);
    let try_b = candidates(code_b);

    [(0, 0), (0, 1), (1, 0), (1, 1)].into_iter().find_map(|(i, j)| {
        let start = move_onto(try_a[i], a, b, bounds)?;
        let end = move_onto(try_b[j], b, a, bounds)?;
        Some((start, end))
    })
}

/// Liang-Barsky parametric clipping.
///
/// With the segment written as `a + u * (b - a)`, each boundary gives a
/// ratio `q / p`. Ratios where the segment enters the half-plane (`p < 0`)
/// raise the lower bound on `u`, ratios where it leaves (`p > 0`) lower the
/// upper bound. A segment parallel to a boundary (`p = 0`) and outside it
/// (`q < 0`) is rejected outright.
pub fn liang_barsky(a: Vec3, b: Vec3, bounds: &ClipBounds) -> Option<(Vec3, Vec3)> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    let p = [-dx, dx, -dy, dy];
    let q = [
        a.x - bounds.min.x,
        bounds.max.x - a.x,
        a.y - bounds.min.y,
        bounds.max.y - a.y,
    ];

    let mut entering = 0.0_f64;
    let mut leaving = 1.0_f64;

    for (&pk, &qk) in p.iter().zip(&q) {
        if pk == 0.0 {
            if qk < 0.0 {
                return None;
            }
            continue;
        }
        let ratio = qk / pk;
        if pk < 0.0 {
            entering = entering.max(ratio);
        } else {
            leaving = leaving.min(ratio);
        }
    }

    if entering > leaving {
        return None;
    }

    let at = |u: f64| {
        if u <= 0.0 {
            a
        } else if u >= 1.0 {
            b
        } else {
            bounds.clamp(a.lerp(b, u))
        }
    };
    Some((at(entering), at(leaving)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn bounds() -> ClipBounds {
        ClipBounds::new(Vec3::planar(-500.0, -500.0), Vec3::planar(500.0, 500.0))
    }

    #[test]
    fn inside_lines_are_untouched() {
        let a = Vec3::new(0.1, -499.9, 3.0);
        let b = Vec3::new(0.3, 499.7, -2.0);
        assert_eq!(cohen_sutherland(a, b, &bounds()), Some((a, b)));
        assert_eq!(liang_barsky(a, b, &bounds()), Some((a, b)));
    }

    #[test]
    fn lines_sharing_an_outside_region_are_rejected() {
        let a = Vec3::planar(-600.0, -100.0);
        let b = Vec3::planar(-700.0, 400.0);
        assert_eq!(cohen_sutherland(a, b, &bounds()), None);
        assert_eq!(liang_barsky(a, b, &bounds()), None);
    }

    #[test]
    fn lines_missing_the_corner_are_rejected() {
        // Passes below the bottom-left corner without sharing a region bit.
        let a = Vec3::planar(-600.0, -450.0);
        let b = Vec3::planar(-450.0, -600.0);
        assert_eq!(cohen_sutherland(a, b, &bounds()), None);
        assert_eq!(liang_barsky(a, b, &bounds()), None);
    }

    #[test]
    fn horizontal_line_through_both_sides() {
        let a = Vec3::new(-800.0, 100.0, 0.0);
        let b = Vec3::new(800.0, 100.0, 16.0);
        for clipped in [cohen_sutherland(a, b, &bounds()), liang_barsky(a, b, &bounds())] {
            let (start, end) = clipped.unwrap();
            assert_abs_diff_eq!(start, Vec3::new(-500.0, 100.0, 3.0), epsilon = 1e-9);
            assert_abs_diff_eq!(end, Vec3::new(500.0, 100.0, 13.0), epsilon = 1e-9);
        }
    }

    #[test]
    fn corner_regions_pick_the_right_boundary() {
        // Starts top-left, enters through the top edge, ends bottom-right
        // and leaves through the right edge.
        let a = Vec3::planar(-600.0, 900.0);
        let b = Vec3::planar(900.0, -600.0);
        let (start, end) = cohen_sutherland(a, b, &bounds()).unwrap();
        assert_abs_diff_eq!(start, Vec3::planar(-200.0, 500.0), epsilon = 1e-9);
        assert_abs_diff_eq!(end, Vec3::planar(500.0, -200.0), epsilon = 1e-9);
        let (start, end) = liang_barsky(a, b, &bounds()).unwrap();
        assert_abs_diff_eq!(start, Vec3::planar(-200.0, 500.0), epsilon = 1e-9);
        assert_abs_diff_eq!(end, Vec3::planar(500.0, -200.0), epsilon = 1e-9);
    }

    #[test]
    fn degenerate_point_segment() {
        let p = Vec3::planar(10.0, 10.0);
        assert_eq!(liang_barsky(p, p, &bounds()), Some((p, p)));
        assert_eq!(cohen_sutherland(p, p, &bounds()), Some((p, p)));
        let q = Vec3::planar(510.0, 10.0);
        assert_eq!(liang_barsky(q, q, &bounds()), None);
        assert_eq!(cohen_sutherland(q, q, &bounds()), None);
    }

    /// The two algorithms must agree on every random segment. The only
    /// tolerated difference is on emptiness for a segment that merely grazes
    /// the rectangle, where one side may return a sub-micron sliver.
    #[test]
    fn algorithms_agree_on_random_segments() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let bounds = bounds();
        let mut accepted = 0;

        for _ in 0..500 {
            let mut point = || {
                Vec3::planar(
                    rng.random_range(-1200.0..1200.0),
                    rng.random_range(-1200.0..1200.0),
                )
            };
            let (a, b) = (point(), point());

            match (cohen_sutherland(a, b, &bounds), liang_barsky(a, b, &bounds)) {
                (Some((s0, e0)), Some((s1, e1))) => {
                    accepted += 1;
                    assert_abs_diff_eq!(s0, s1, epsilon = 1e-6);
                    assert_abs_diff_eq!(e0, e1, epsilon = 1e-6);
                    assert!(bounds.contains(s1) && bounds.contains(e1));
                }
                (None, None) => {}
                (Some((s, e)), None) | (None, Some((s, e))) => {
                    assert!(s.distance(e) < 1e-6, "disagreement on {a} -> {b}");
                }
            }
        }
        assert!(accepted > 50);
    }
}
