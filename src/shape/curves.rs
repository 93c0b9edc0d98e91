//! Parametric curve and surface tessellation.
//!
//! Every evaluator works on the cubic power basis: a segment's geometry
//! `G` (four control points) is turned into coefficients `C = M * G` once,
//! and a sample at `t` is `[t³, t², t, 1] * C`. Samples are taken at
//! `t = step / steps` for `step` in `0..steps`, so `t = 1` is never emitted;
//! the next segment starts there.

use crate::error::GeometryError;
use crate::math::vec3::Vec3;
use crate::shape::ObjectType;

pub const BEZIER_BASIS: [[f64; 4]; 4] = [
    [-1.0, 3.0, -3.0, 1.0],
    [3.0, -6.0, 3.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];

/// Uniform cubic B-spline basis, already divided by 6.
pub const B_SPLINE_BASIS: [[f64; 4]; 4] = [
    [-1.0 / 6.0, 3.0 / 6.0, -3.0 / 6.0, 1.0 / 6.0],
    [3.0 / 6.0, -6.0 / 6.0, 3.0 / 6.0, 0.0],
    [-3.0 / 6.0, 0.0, 3.0 / 6.0, 0.0],
    [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0],
];

/// How spline segments are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplineStrategy {
    /// One basis evaluation per sample.
    Direct,
    /// One basis evaluation per segment, then three running sums per sample.
    #[default]
    ForwardDifferences,
}

type Geometry = [Vec3; 4];

/// `M * G`: the power-basis coefficients `[a, b, c, d]` of one segment.
fn coefficients(basis: &[[f64; 4]; 4], geometry: &Geometry) -> Geometry {
    let mut out = [Vec3::ZERO; 4];
    for (row, coefficient) in out.iter_mut().enumerate() {
        *coefficient = geometry
            .iter()
            .zip(basis[row])
            .fold(Vec3::ZERO, |acc, (&point, weight)| acc + point * weight);
    }
    out
}

fn evaluate(c: &Geometry, t: f64) -> Vec3 {
    // Horner form of a*t³ + b*t² + c*t + d.
    ((c[0] * t + c[1]) * t + c[2]) * t + c[3]
}

fn sample_direct(c: &Geometry, steps: usize, out: &mut Vec<Vec3>) {
    let steps_f = steps as f64;
    out.extend((0..steps).map(|step| evaluate(c, step as f64 / steps_f)));
}

fn sample_forward_differences(c: &Geometry, steps: usize, out: &mut Vec<Vec3>) {
    let delta = 1.0 / steps as f64;
    let (d1, d2, d3) = (delta, delta * delta, delta * delta * delta);

    let mut f = c[3];
    let mut df = c[0] * d3 + c[1] * d2 + c[2] * d1;
    let mut d2f = c[0] * (6.0 * d3) + c[1] * (2.0 * d2);
    let d3f = c[0] * (6.0 * d3);

    out.push(f);
    for _ in 1..steps {
        f = f + df;
        df = df + d2f;
        d2f = d2f + d3f;
        out.push(f);
    }
}

fn invalid(kind: ObjectType, count: usize, reason: &'static str) -> GeometryError {
    GeometryError::InvalidControlPoints {
        kind,
        count,
        reason,
    }
}

fn check_steps(kind: ObjectType, count: usize, steps: usize) -> Result<(), GeometryError> {
    if steps == 0 {
        return Err(invalid(kind, count, "at least one sample per segment is required"));
    }
    Ok(())
}

/// Tessellates a piecewise cubic Bézier curve.
///
/// Consecutive segments share their end points, so `points` must hold
/// `3k + 1` control points for `k >= 1` segments.
pub fn bezier(points: &[Vec3], steps: usize) -> Result<Vec<Vec3>, GeometryError> {
    let count = points.len();
    if count < 4 || (count - 1) % 3 != 0 {
        return Err(invalid(
            ObjectType::BezierCurve,
            count,
            "expected 3k + 1 points with k >= 1",
        ));
    }
    check_steps(ObjectType::BezierCurve, count, steps)?;

    let mut curve = Vec::with_capacity((count - 1) / 3 * steps);
    for start in (0..count - 1).step_by(3) {
        let geometry = [
            points[start],
            points[start + 1],
            points[start + 2],
            points[start + 3],
        ];
        sample_direct(&coefficients(&BEZIER_BASIS, &geometry), steps, &mut curve);
    }
    Ok(curve)
}

/// Number of segments a spline over `count` control points produces.
pub fn spline_segment_count(count: usize, closed: bool) -> usize {
    match (closed, count) {
        (_, 0..=3) => 0,
        (true, n) => n,
        (false, n) => n - 3,
    }
}

/// Tessellates a uniform cubic B-spline.
///
/// An open spline has one segment per window of four consecutive control
/// points. A closed spline keeps going past the end, wrapping the indices,
/// so it gets one segment per control point and its last sample runs back
/// into the first.
pub fn spline(
    points: &[Vec3],
    steps: usize,
    closed: bool,
    strategy: SplineStrategy,
) -> Result<Vec<Vec3>, GeometryError> {
    let count = points.len();
    if count < 4 {
        return Err(invalid(
            ObjectType::SplineCurve,
            count,
            "at least 4 points are required",
        ));
    }
    check_steps(ObjectType::SplineCurve, count, steps)?;

    let segments = spline_segment_count(count, closed);
    let mut curve = Vec::with_capacity(segments * steps);
    for i in 0..segments {
        let geometry = [
            points[i % count],
            points[(i + 1) % count],
            points[(i + 2) % count],
            points[(i + 3) % count],
        ];
        let c = coefficients(&B_SPLINE_BASIS, &geometry);
        match strategy {
            SplineStrategy::Direct => sample_direct(&c, steps, &mut curve),
            SplineStrategy::ForwardDifferences => sample_forward_differences(&c, steps, &mut curve),
        }
    }
    Ok(curve)
}

/// Number of 4x4 patches in a `rows x cols` control grid.
pub fn surface_patch_count(rows: usize, cols: usize) -> usize {
    rows.saturating_sub(3) * cols.saturating_sub(3)
}

/// Tessellates a bicubic B-spline surface.
///
/// `points` is a row-major `rows x cols` grid. Every 4x4 window of the grid
/// is one patch, and each patch contributes a `steps x steps` block of
/// samples, `s` major and `t` minor.
pub fn surface(
    points: &[Vec3],
    rows: usize,
    cols: usize,
    steps: usize,
) -> Result<Vec<Vec3>, GeometryError> {
    let count = points.len();
    if rows < 4 || cols < 4 {
        return Err(invalid(
            ObjectType::Surface,
            count,
            "the control grid must be at least 4x4",
        ));
    }
    if count != rows * cols {
        return Err(invalid(
            ObjectType::Surface,
            count,
            "point count does not match the grid dimensions",
        ));
    }
    check_steps(ObjectType::Surface, count, steps)?;

    let steps_f = steps as f64;
    let mut grid = Vec::with_capacity(surface_patch_count(rows, cols) * steps * steps);

    for patch_row in 0..rows - 3 {
        for patch_col in 0..cols - 3 {
            // C = M * G * M^T, one Vec3 per cell.
            let mut geometry = [[Vec3::ZERO; 4]; 4];
            for (i, row) in geometry.iter_mut().enumerate() {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = points[(patch_row + i) * cols + patch_col + j];
                }
            }
            let mut left = [[Vec3::ZERO; 4]; 4];
            for col in 0..4 {
                let column = [geometry[0][col], geometry[1][col], geometry[2][col], geometry[3][col]];
                let mixed = coefficients(&B_SPLINE_BASIS, &column);
                for row in 0..4 {
                    left[row][col] = mixed[row];
                }
            }
            let mut c = [[Vec3::ZERO; 4]; 4];
            for row in 0..4 {
                c[row] = coefficients(&B_SPLINE_BASIS, &left[row]);
            }

            for step_s in 0..steps {
                let s = step_s as f64 / steps_f;
                let s_basis = [s * s * s, s * s, s, 1.0];
                // Collapse the s direction first, leaving one cubic in t.
                let mut along_t = [Vec3::ZERO; 4];
                for (j, coefficient) in along_t.iter_mut().enumerate() {
                    *coefficient = (0..4).fold(Vec3::ZERO, |acc, i| acc + c[i][j] * s_basis[i]);
                }
                sample_direct(&along_t, steps, &mut grid);
            }
        }
    }
    Ok(grid)
}

/// Edges of a tessellated surface: each `t` iso-line is chained, and once a
/// row is complete it is stitched to the previous row of the same patch.
pub fn surface_topology(patches: usize, steps: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for patch in 0..patches {
        let base = patch * steps * steps;
        for row in 0..steps {
            let start = base + row * steps;
            edges.extend((start..start + steps - 1).map(|i| (i, i + 1)));
            if row > 0 {
                edges.extend((start..start + steps).map(|i| (i - steps, i)));
            }
        }
    }
    edges
}
