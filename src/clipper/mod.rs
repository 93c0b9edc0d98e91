//! Clipping against the window's normalized bounds.
//!
//! Every shape is clipped in the window's frame, after normalization, so the
//! clip region is a fixed axis-aligned rectangle:
//!
//! - [`line`]: per-segment clipping, either with Cohen-Sutherland outcodes
//!   or Liang-Barsky parametric bounds. The active algorithm is chosen at
//!   runtime through [`LineClipMethod`].
//! - [`polygon`]: Sutherland-Hodgman against the four boundaries, with
//!   contour patching for filled shapes.
//!
//! Nothing here fails: a shape entirely outside the window clips to an
//! empty segment list.

pub mod line;
pub mod polygon;

use std::fmt;

use crate::math::vec3::Vec3;
use crate::shape::{ObjectType, Shape, Style};
use crate::window::Window;

/// One of the four edges of the clip rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// x >= min.x
    Left,
    /// x <= max.x
    Right,
    /// y >= min.y
    Bottom,
    /// y <= max.y
    Top,
}

impl Boundary {
    /// Sutherland-Hodgman pass order.
    pub const ALL: [Boundary; 4] = [Boundary::Left, Boundary::Right, Boundary::Bottom, Boundary::Top];

    /// Region-code bit for points beyond this boundary.
    pub const fn code(self) -> u8 {
        match self {
            Boundary::Left => 0b0001,
            Boundary::Right => 0b0010,
            Boundary::Bottom => 0b0100,
            Boundary::Top => 0b1000,
        }
    }

    /// Signed distance to the boundary line, positive (or zero) inside.
    pub fn signed_distance(self, p: Vec3, bounds: &ClipBounds) -> f64 {
        match self {
            Boundary::Left => p.x - bounds.min.x,
            Boundary::Right => bounds.max.x - p.x,
            Boundary::Bottom => p.y - bounds.min.y,
            Boundary::Top => bounds.max.y - p.y,
        }
    }

    pub fn is_inside(self, p: Vec3, bounds: &ClipBounds) -> bool {
        self.signed_distance(p, bounds) >= 0.0
    }

    /// Where segment `a -> b` crosses the boundary line. The crossing
    /// coordinate is pinned exactly onto the boundary; z is interpolated.
    ///
    /// Callers must ensure the endpoints lie on opposite sides.
    pub fn intersect(self, a: Vec3, b: Vec3, bounds: &ClipBounds) -> Vec3 {
        let da = self.signed_distance(a, bounds);
        let db = self.signed_distance(b, bounds);
        let mut p = a.lerp(b, da / (da - db));
        match self {
            Boundary::Left => p.x = bounds.min.x,
            Boundary::Right => p.x = bounds.max.x,
            Boundary::Bottom => p.y = bounds.min.y,
            Boundary::Top => p.y = bounds.max.y,
        }
        p
    }
}

/// The axis-aligned clip rectangle. Only x and y are clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ClipBounds {
    /// Bounds spanned by two opposite corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub fn from_window(window: &Window) -> Self {
        Self::new(window.normalized_origin(), window.normalized_extension())
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Vec3) -> bool {
        Boundary::ALL.iter().all(|b| b.is_inside(p, self))
    }

    /// 4-bit Cohen-Sutherland region code.
    pub fn outcode(&self, p: Vec3) -> u8 {
        Boundary::ALL
            .iter()
            .filter(|b| !b.is_inside(p, self))
            .fold(0, |code, b| code | b.code())
    }

    /// Pulls x and y onto the rectangle, leaving z alone.
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
            p.z,
        )
    }
}

/// Which algorithm clips open line work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineClipMethod {
    CohenSutherland,
    #[default]
    LiangBarsky,
}

impl fmt::Display for LineClipMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineClipMethod::CohenSutherland => f.write_str("Cohen-Sutherland"),
            LineClipMethod::LiangBarsky => f.write_str("Liang-Barsky"),
        }
    }
}

/// A clipped line in the window's frame, tagged with its shape's style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    pub style: Style,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Clipper {
    method: LineClipMethod,
}

impl Clipper {
    pub fn new(method: LineClipMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> LineClipMethod {
        self.method
    }

    pub fn set_method(&mut self, method: LineClipMethod) {
        self.method = method;
    }

    /// Switches to the other line algorithm and returns it.
    pub fn toggle_method(&mut self) -> LineClipMethod {
        self.method = match self.method {
            LineClipMethod::CohenSutherland => LineClipMethod::LiangBarsky,
            LineClipMethod::LiangBarsky => LineClipMethod::CohenSutherland,
        };
        log::info!("line clipping switched to {}", self.method);
        self.method
    }

    /// Clips one segment with the active line algorithm.
    pub fn clip_line(&self, a: Vec3, b: Vec3, bounds: &ClipBounds) -> Option<(Vec3, Vec3)> {
        match self.method {
            LineClipMethod::CohenSutherland => line::cohen_sutherland(a, b, bounds),
            LineClipMethod::LiangBarsky => line::liang_barsky(a, b, bounds),
        }
    }

    /// Clips a shape's current `vector_lines` against the window.
    pub fn clip(&self, window: &Window, shape: &Shape) -> Vec<Segment> {
        let bounds = ClipBounds::from_window(window);
        let style = shape.style();
        let to_segment = |(start, end): (Vec3, Vec3)| Segment { start, end, style };

        let segments: Vec<Segment> = if shape.object_type() == ObjectType::Point {
            match shape.normalized_coords().first() {
                Some(Some(p)) if bounds.contains(*p) => {
                    shape.vector_lines().first().copied().map(to_segment).into_iter().collect()
                }
                _ => Vec::new(),
            }
        } else if uses_polygon_clipping(shape) {
            polygon::sutherland_hodgman(shape.vector_lines(), &bounds, shape.fill())
                .into_iter()
                .map(to_segment)
                .collect()
        } else {
            shape
                .vector_lines()
                .iter()
                .filter_map(|&(a, b)| self.clip_line(a, b, &bounds))
                .map(to_segment)
                .collect()
        };

        log::trace!(
            "{} '{}': {} of {} edges survive clipping",
            shape.object_type(),
            shape.name(),
            segments.len(),
            shape.vector_lines().len()
        );
        segments
    }
}

/// Filled shapes and closed planar outlines go through Sutherland-Hodgman;
/// everything else is clipped edge by edge.
fn uses_polygon_clipping(shape: &Shape) -> bool {
    let kind = shape.kind();
    kind.is_planar_outline() && shape.coords().len() >= 3 && (shape.fill() || kind.is_closed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameGenerator;
    use crate::shape::SplineStrategy;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn framed(mut shapes: Vec<Shape>) -> (Window, Vec<Shape>) {
        let mut window = Window::default();
        FrameGenerator::generate_frame(&mut window, &mut shapes).unwrap();
        (window, shapes)
    }

    #[test]
    fn outcodes() {
        let bounds = ClipBounds::new(Vec3::planar(-1.0, -1.0), Vec3::planar(1.0, 1.0));
        assert_eq!(bounds.outcode(Vec3::ZERO), 0);
        assert_eq!(bounds.outcode(Vec3::planar(1.0, -1.0)), 0);
        assert_eq!(bounds.outcode(Vec3::planar(-2.0, 0.0)), 0b0001);
        assert_eq!(bounds.outcode(Vec3::planar(2.0, -2.0)), 0b0110);
        assert_eq!(bounds.outcode(Vec3::planar(-2.0, 2.0)), 0b1001);
    }

    #[test]
    fn liang_barsky_clamps_to_right_boundary() {
        let line = Shape::line(Vec3::new(600.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0)).unwrap();
        let (window, shapes) = framed(vec![line]);
        let clipper = Clipper::new(LineClipMethod::LiangBarsky);
        let segments = clipper.clip(&window, &shapes[0]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start.x, 500.0);
        assert_relative_eq!(segments[0].start.y, 0.0);
        assert_abs_diff_eq!(segments[0].end.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(segments[0].end.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn points_are_kept_only_inside() {
        let inside = Shape::point(Vec3::new(500.0, -500.0, 0.0)).unwrap();
        let outside = Shape::point(Vec3::new(501.0, 0.0, 0.0)).unwrap();
        let (window, shapes) = framed(vec![inside, outside]);
        let clipper = Clipper::default();
        assert_eq!(clipper.clip(&window, &shapes[0]).len(), 1);
        assert!(clipper.clip(&window, &shapes[1]).is_empty());
    }

    #[test]
    fn segments_carry_the_shape_style() {
        let line = Shape::line(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0))
            .unwrap()
            .with_color(0xFF112233)
            .with_line_width(3.0);
        let (window, shapes) = framed(vec![line]);
        let segments = Clipper::default().clip(&window, &shapes[0]);
        assert_eq!(segments[0].style.color, 0xFF112233);
        assert_eq!(segments[0].style.line_width, 3.0);
    }

    #[test]
    fn filled_triangle_across_boundary_stays_closed() {
        let triangle = Shape::triangle(
            Vec3::new(300.0, -200.0, 0.0),
            Vec3::new(800.0, 0.0, 0.0),
            Vec3::new(300.0, 200.0, 0.0),
        )
        .unwrap()
        .with_fill(true);
        let (window, shapes) = framed(vec![triangle]);
        let segments = Clipper::default().clip(&window, &shapes[0]);

        assert!(segments.len() >= 4);
        let first = segments[0].start;
        let last = segments[segments.len() - 1].end;
        assert_abs_diff_eq!(first, last, epsilon = 1e-9);
        for pair in segments.windows(2) {
            assert_abs_diff_eq!(pair[0].end, pair[1].start, epsilon = 1e-9);
        }
        assert!(segments.iter().all(|s| s.start.x <= 500.0 && s.end.x <= 500.0));
    }

    #[test]
    fn open_curves_use_line_clipping() {
        let points = vec![
            Vec3::new(-1500.0, 0.0, 0.0),
            Vec3::new(-900.0, 300.0, 0.0),
            Vec3::new(-300.0, -300.0, 0.0),
            Vec3::new(300.0, 300.0, 0.0),
            Vec3::new(900.0, -300.0, 0.0),
            Vec3::new(1500.0, 0.0, 0.0),
        ];
        let spline = Shape::spline(points, 20, false, SplineStrategy::Direct).unwrap();
        assert!(!uses_polygon_clipping(&spline));
        let (window, shapes) = framed(vec![spline]);
        let bounds = ClipBounds::from_window(&window);
        for method in [LineClipMethod::CohenSutherland, LineClipMethod::LiangBarsky] {
            let segments = Clipper::new(method).clip(&window, &shapes[0]);
            assert!(!segments.is_empty());
            assert!(segments.len() < shapes[0].vector_lines().len());
            assert!(segments.iter().all(|s| bounds.contains(s.start) && bounds.contains(s.end)));
        }
    }

    #[test]
    fn toggle_cycles_between_methods() {
        let mut clipper = Clipper::default();
        assert_eq!(clipper.method(), LineClipMethod::LiangBarsky);
        assert_eq!(clipper.toggle_method(), LineClipMethod::CohenSutherland);
        assert_eq!(clipper.toggle_method(), LineClipMethod::LiangBarsky);
        assert_eq!(LineClipMethod::CohenSutherland.to_string(), "Cohen-Sutherland");
    }
}
