//! Sutherland-Hodgman polygon clipping over an edge list.

use approx::abs_diff_eq;

use super::{Boundary, ClipBounds};
use crate::math::vec3::Vec3;

/// Endpoints closer than this are the same vertex when re-stitching a contour.
const STITCH_EPSILON: f64 = 1e-9;

/// Clips the edges of a polygon against one boundary.
///
/// An edge fully inside is kept, one crossing the boundary is cut at the
/// crossing, and one fully outside is dropped.
pub fn clip_against_boundary(edges: &[(Vec3, Vec3)], boundary: Boundary, bounds: &ClipBounds) -> Vec<(Vec3, Vec3)> {
    let mut output = Vec::with_capacity(edges.len());

    for &(a, b) in edges {
        let a_inside = boundary.is_inside(a, bounds);
        let b_inside = boundary.is_inside(b, bounds);

        match (a_inside, b_inside) {
            (true, true) => output.push((a, b)),
            // Leaving.
            (true, false) => output.push((a, boundary.intersect(a, b, bounds))),
            // Entering.
            (false, true) => output.push((boundary.intersect(a, b, bounds), b)),
            (false, false) => {}
        }
    }

    output
}

/// Re-closes a contour: wherever an edge does not end where the next one
/// starts, a connecting edge is inserted, including from the last edge
/// back to the first.
pub fn patch(edges: &[(Vec3, Vec3)]) -> Vec<(Vec3, Vec3)> {
    let mut output = Vec::with_capacity(edges.len() + 4);

    for (i, &edge) in edges.iter().enumerate() {
        output.push(edge);
        let next_start = edges[(i + 1) % edges.len()].0;
        if !abs_diff_eq!(edge.1, next_start, epsilon = STITCH_EPSILON) {
            output.push((edge.1, next_start));
        }
    }

    output
}

/// Clips against LEFT, RIGHT, BOTTOM and TOP in turn. With `fill` the
/// contour is patched after every pass so it stays a single closed loop.
pub fn sutherland_hodgman(edges: &[(Vec3, Vec3)], bounds: &ClipBounds, fill: bool) -> Vec<(Vec3, Vec3)> {
    let mut result = edges.to_vec();

    for boundary in Boundary::ALL {
        if result.is_empty() {
            break;
        }
        result = clip_against_boundary(&result, boundary, bounds);
        if fill && !result.is_empty() {
            result = patch(&result);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn bounds() -> ClipBounds {
        ClipBounds::new(Vec3::planar(-1.0, -1.0), Vec3::planar(1.0, 1.0))
    }

    fn ring(points: &[Vec3]) -> Vec<(Vec3, Vec3)> {
        (0..points.len())
            .map(|i| (points[i], points[(i + 1) % points.len()]))
            .collect()
    }

    fn assert_closed(edges: &[(Vec3, Vec3)]) {
        for i in 0..edges.len() {
            let next = edges[(i + 1) % edges.len()];
            assert_abs_diff_eq!(edges[i].1, next.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn inside_polygon_is_unchanged() {
        let square = ring(&[
            Vec3::planar(-0.5, -0.5),
            Vec3::planar(-0.5, 0.5),
            Vec3::planar(0.5, 0.5),
            Vec3::planar(0.5, -0.5),
        ]);
        assert_eq!(sutherland_hodgman(&square, &bounds(), true), square);
    }

    #[test]
    fn outside_polygon_vanishes() {
        let triangle = ring(&[Vec3::planar(2.0, 2.0), Vec3::planar(3.0, 2.0), Vec3::planar(2.5, 3.0)]);
        assert!(sutherland_hodgman(&triangle, &bounds(), true).is_empty());
    }

    #[test]
    fn filled_square_over_corner_becomes_closed_quad() {
        let square = ring(&[
            Vec3::planar(0.0, 0.0),
            Vec3::planar(0.0, 2.0),
            Vec3::planar(2.0, 2.0),
            Vec3::planar(2.0, 0.0),
        ]);
        let clipped = sutherland_hodgman(&square, &bounds(), true);
        assert_closed(&clipped);
        assert!(clipped
            .iter()
            .all(|(a, b)| bounds().contains(*a) && bounds().contains(*b)));

        let mut corners: Vec<Vec3> = clipped.iter().map(|e| e.0).collect();
        corners.dedup_by(|a, b| a.distance(*b) < 1e-9);
        assert!(corners.contains(&Vec3::planar(1.0, 1.0)));
        assert!(corners.contains(&Vec3::planar(0.0, 0.0)));
    }

    #[test]
    fn outline_is_not_patched() {
        let triangle = ring(&[Vec3::planar(0.0, -0.5), Vec3::planar(3.0, 0.0), Vec3::planar(0.0, 0.5)]);
        let clipped = sutherland_hodgman(&triangle, &bounds(), false);
        assert_eq!(clipped.len(), 3);
        let filled = sutherland_hodgman(&triangle, &bounds(), true);
        assert_eq!(filled.len(), 4);
        assert_closed(&filled);
    }

    #[test]
    fn crossings_are_pinned_to_the_boundary() {
        let edges = [(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 0.3, 8.0))];
        let clipped = clip_against_boundary(&edges, Boundary::Right, &bounds());
        assert_eq!(clipped[0].1.x, 1.0);
        assert_abs_diff_eq!(clipped[0].1.z, 2.0, epsilon = 1e-12);
    }
}
