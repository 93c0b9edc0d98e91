//! Renderable shapes.
//!
//! A [`Shape`] owns its world-space coordinates, the index topology joining
//! them, and one [`Transform`]. Each frame the coordinates are projected
//! through the camera window, normalized into the window's frame, and
//! resolved into `vector_lines` for the clipper.

pub mod curves;

use std::fmt;

use crate::colors;
use crate::error::GeometryError;
use crate::math::vec3::Vec3;
use crate::transform::{ProjectionPass, Transform};

pub use curves::SplineStrategy;

/// The closed set of shape tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Point,
    Line,
    Triangle,
    Rectangle,
    Polygon,
    Polygon3D,
    BezierCurve,
    SplineCurve,
    Parallelepiped,
    Surface,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Point => "point",
            ObjectType::Line => "line",
            ObjectType::Triangle => "triangle",
            ObjectType::Rectangle => "rectangle",
            ObjectType::Polygon => "polygon",
            ObjectType::Polygon3D => "3D polygon",
            ObjectType::BezierCurve => "Bézier curve",
            ObjectType::SplineCurve => "spline curve",
            ObjectType::Parallelepiped => "parallelepiped",
            ObjectType::Surface => "surface",
        };
        f.write_str(name)
    }
}

/// A shape tag plus whatever that kind needs to rebuild its topology.
///
/// Curve and surface kinds keep their control points; they are transformed
/// together with the tessellated coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Point,
    Line,
    Triangle,
    Rectangle,
    Polygon,
    Polygon3D {
        edges: Vec<(usize, usize)>,
    },
    BezierCurve {
        control_points: Vec<Vec3>,
        steps: usize,
    },
    SplineCurve {
        control_points: Vec<Vec3>,
        steps: usize,
        closed: bool,
        strategy: SplineStrategy,
    },
    Parallelepiped,
    Surface {
        control_points: Vec<Vec3>,
        rows: usize,
        cols: usize,
        steps: usize,
    },
}

const PARALLELEPIPED_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
];

fn chain(count: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..count).map(|i| (i - 1, i))
}

fn ring(count: usize) -> Vec<(usize, usize)> {
    let mut edges: Vec<_> = chain(count).collect();
    if count > 1 {
        edges.push((count - 1, 0));
    }
    edges
}

impl ShapeKind {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ShapeKind::Point => ObjectType::Point,
            ShapeKind::Line => ObjectType::Line,
            ShapeKind::Triangle => ObjectType::Triangle,
            ShapeKind::Rectangle => ObjectType::Rectangle,
            ShapeKind::Polygon => ObjectType::Polygon,
            ShapeKind::Polygon3D { .. } => ObjectType::Polygon3D,
            ShapeKind::BezierCurve { .. } => ObjectType::BezierCurve,
            ShapeKind::SplineCurve { .. } => ObjectType::SplineCurve,
            ShapeKind::Parallelepiped => ObjectType::Parallelepiped,
            ShapeKind::Surface { .. } => ObjectType::Surface,
        }
    }

    /// Index pairs joining `vertex_count` tessellated coordinates.
    pub fn topology(&self, vertex_count: usize) -> Vec<(usize, usize)> {
        match self {
            ShapeKind::Point | ShapeKind::Line => vec![(0, 1)],
            ShapeKind::Triangle | ShapeKind::Rectangle | ShapeKind::Polygon => ring(vertex_count),
            ShapeKind::Polygon3D { edges } => edges.clone(),
            ShapeKind::BezierCurve { .. } => chain(vertex_count).collect(),
            ShapeKind::SplineCurve { closed: true, .. } => ring(vertex_count),
            ShapeKind::SplineCurve { closed: false, .. } => chain(vertex_count).collect(),
            ShapeKind::Parallelepiped => PARALLELEPIPED_EDGES.to_vec(),
            ShapeKind::Surface { rows, cols, steps, .. } => {
                curves::surface_topology(curves::surface_patch_count(*rows, *cols), *steps)
            }
        }
    }

    /// Whether the outline encloses an area: clipping such shapes must keep
    /// the contour closed.
    pub fn is_closed(&self) -> bool {
        match self {
            ShapeKind::Triangle | ShapeKind::Rectangle | ShapeKind::Polygon => true,
            ShapeKind::SplineCurve { closed, .. } => *closed,
            _ => false,
        }
    }

    /// Kinds whose vertices trace a single planar outline.
    pub fn is_planar_outline(&self) -> bool {
        matches!(
            self,
            ShapeKind::Triangle
                | ShapeKind::Rectangle
                | ShapeKind::Polygon
                | ShapeKind::SplineCurve { .. }
        )
    }

    fn control_points_mut(&mut self) -> Option<&mut Vec<Vec3>> {
        match self {
            ShapeKind::BezierCurve { control_points, .. }
            | ShapeKind::SplineCurve { control_points, .. }
            | ShapeKind::Surface { control_points, .. } => Some(control_points),
            _ => None,
        }
    }
}

/// Drawing attributes handed to the paint backend with every clipped segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    /// ARGB8888.
    pub color: u32,
    pub line_width: f64,
    pub fill: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: colors::SHAPE,
            line_width: 1.0,
            fill: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Shape {
    name: String,
    style: Style,
    kind: ShapeKind,
    coords: Vec<Vec3>,
    projected_coords: Vec<Option<Vec3>>,
    normalized_coords: Vec<Option<Vec3>>,
    lines: Vec<(usize, usize)>,
    vector_lines: Vec<(Vec3, Vec3)>,
    transform: Transform,
}

impl Shape {
    fn build(kind: ShapeKind, coords: Vec<Vec3>) -> Result<Self, GeometryError> {
        let anchor = centroid(&coords)?;
        Ok(Self::anchored(kind, coords, anchor))
    }

    /// Builds a shape whose transform starts at `anchor` instead of the
    /// centroid.
    pub(crate) fn anchored(kind: ShapeKind, coords: Vec<Vec3>, anchor: Vec3) -> Self {
        let transform = Transform::new(anchor);
        let lines = kind.topology(coords.len());
        let visible: Vec<_> = coords.iter().copied().map(Some).collect();

        let mut shape = Self {
            name: String::new(),
            style: Style::default(),
            kind,
            coords,
            projected_coords: visible.clone(),
            normalized_coords: visible,
            lines,
            vector_lines: Vec::new(),
            transform,
        };
        shape.generate_vector_lines();
        shape
    }

    // ============ Constructors ============

    /// A point, drawn as a unit-length segment starting at `position`.
    pub fn point(position: Vec3) -> Result<Self, GeometryError> {
        Self::build(ShapeKind::Point, vec![position, position + Vec3::RIGHT])
    }

    pub fn line(a: Vec3, b: Vec3) -> Result<Self, GeometryError> {
        Self::build(ShapeKind::Line, vec![a, b])
    }

    pub fn triangle(a: Vec3, b: Vec3, c: Vec3) -> Result<Self, GeometryError> {
        Self::build(ShapeKind::Triangle, vec![a, b, c])
    }

    /// An axis-aligned rectangle in the `origin.z` plane, corners listed
    /// counter-clockwise from `origin`: origin, top-left, extension,
    /// bottom-right.
    pub fn rectangle(origin: Vec3, extension: Vec3) -> Result<Self, GeometryError> {
        Self::build(
            ShapeKind::Rectangle,
            vec![
                origin,
                Vec3::new(origin.x, extension.y, origin.z),
                Vec3::new(extension.x, extension.y, origin.z),
                Vec3::new(extension.x, origin.y, origin.z),
            ],
        )
    }

    /// A closed polygon through `points` in order.
    pub fn polygon(points: Vec<Vec3>) -> Result<Self, GeometryError> {
        Self::build(ShapeKind::Polygon, points)
    }

    /// A free-form wireframe with explicit edges.
    pub fn polygon_3d(points: Vec<Vec3>, edges: Vec<(usize, usize)>) -> Result<Self, GeometryError> {
        Self::build(ShapeKind::Polygon3D { edges }, points)
    }

    pub fn bezier(control_points: Vec<Vec3>, steps: usize) -> Result<Self, GeometryError> {
        let coords = curves::bezier(&control_points, steps)?;
        Self::build(
            ShapeKind::BezierCurve {
                control_points,
                steps,
            },
            coords,
        )
    }

    pub fn spline(
        control_points: Vec<Vec3>,
        steps: usize,
        closed: bool,
        strategy: SplineStrategy,
    ) -> Result<Self, GeometryError> {
        let coords = curves::spline(&control_points, steps, closed, strategy)?;
        Self::build(
            ShapeKind::SplineCurve {
                control_points,
                steps,
                closed,
                strategy,
            },
            coords,
        )
    }

    /// A box spanned by two opposite corners. The face at `origin.z` comes
    /// first, in the same corner order as [`Shape::rectangle`].
    pub fn parallelepiped(origin: Vec3, extension: Vec3) -> Result<Self, GeometryError> {
        let face = |z: f64| {
            [
                Vec3::new(origin.x, origin.y, z),
                Vec3::new(origin.x, extension.y, z),
                Vec3::new(extension.x, extension.y, z),
                Vec3::new(extension.x, origin.y, z),
            ]
        };
        let mut coords = face(origin.z).to_vec();
        coords.extend(face(extension.z));
        Self::build(ShapeKind::Parallelepiped, coords)
    }

    /// A bicubic B-spline surface over a row-major `rows x cols` grid.
    pub fn surface(
        control_points: Vec<Vec3>,
        rows: usize,
        cols: usize,
        steps: usize,
    ) -> Result<Self, GeometryError> {
        let coords = curves::surface(&control_points, rows, cols, steps)?;
        Self::build(
            ShapeKind::Surface {
                control_points,
                rows,
                cols,
                steps,
            },
            coords,
        )
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.style.color = color;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.style.line_width = line_width;
        self
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.style.fill = fill;
        self
    }

    // ============ Accessors ============

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn object_type(&self) -> ObjectType {
        self.kind.object_type()
    }

    pub fn fill(&self) -> bool {
        self.style.fill
    }

    pub fn closed(&self) -> bool {
        self.kind.is_closed()
    }

    pub fn coords(&self) -> &[Vec3] {
        &self.coords
    }

    /// Camera-space coordinates, index-aligned with [`Shape::coords`].
    /// Culled points are `None`.
    pub fn projected_coords(&self) -> &[Option<Vec3>] {
        &self.projected_coords
    }

    /// Window-frame coordinates, index-aligned with [`Shape::coords`].
    pub fn normalized_coords(&self) -> &[Option<Vec3>] {
        &self.normalized_coords
    }

    pub fn lines(&self) -> &[(usize, usize)] {
        &self.lines
    }

    pub fn vector_lines(&self) -> &[(Vec3, Vec3)] {
        &self.vector_lines
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation()
    }

    pub fn scale(&self) -> Vec3 {
        self.transform.scale()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mean of the current coordinates.
    pub fn centroid(&self) -> Result<Vec3, GeometryError> {
        centroid(&self.coords)
    }

    // ============ Transformations ============

    pub fn translate(&mut self, direction: Vec3) {
        self.transform_with(&[], |t, points| t.translate(direction, points));
    }

    /// Rotates by `delta` degrees about `anchor`, or about the shape's own
    /// position.
    pub fn rotate(&mut self, delta: Vec3, anchor: Option<Vec3>) {
        self.transform_with(&[], |t, points| t.rotate(delta, points, anchor));
    }

    pub fn rescale(&mut self, factor: Vec3) {
        self.transform_with(&[], |t, points| t.rescale(factor, points, None));
    }

    /// Runs one transform operation over the coordinates, the control points
    /// and `extra`, in that order, and hands back the transformed `extra`.
    pub(crate) fn transform_with<F>(&mut self, extra: &[Vec3], op: F) -> Vec<Vec3>
    where
        F: FnOnce(&mut Transform, &[Vec3]) -> Vec<Vec3>,
    {
        let coords_len = self.coords.len();
        let mut batch = self.coords.clone();
        let control_len = match self.kind.control_points_mut() {
            Some(control_points) => {
                batch.extend_from_slice(control_points);
                control_points.len()
            }
            None => 0,
        };
        batch.extend_from_slice(extra);

        let mut transformed = op(&mut self.transform, &batch);
        let extra_out = transformed.split_off(coords_len + control_len);
        let control_out = transformed.split_off(coords_len);
        if let Some(control_points) = self.kind.control_points_mut() {
            *control_points = control_out;
        }
        self.coords = transformed;
        extra_out
    }

    // ============ Per-frame pipeline ============

    /// Projects the coordinates through `cop` looking along `normal`.
    pub fn project(&mut self, cop: Vec3, normal: Vec3, cop_distance: f64) {
        self.project_pass(cop, normal, cop_distance, ProjectionPass::Perspective, &[]);
    }

    /// Projects the coordinates followed by `extra`, keeps the coordinate
    /// part and returns the projections of `extra`.
    pub(crate) fn project_pass(
        &mut self,
        cop: Vec3,
        normal: Vec3,
        cop_distance: f64,
        pass: ProjectionPass,
        extra: &[Vec3],
    ) -> Vec<Option<Vec3>> {
        let mut batch = self.coords.clone();
        batch.extend_from_slice(extra);
        let mut projected = Transform::project_points(cop, normal, cop_distance, &batch, pass);
        let extra_out = projected.split_off(self.coords.len());
        self.projected_coords = projected;

        let culled = self.projected_coords.iter().filter(|p| p.is_none()).count();
        if culled > 0 {
            log::trace!(
                "{} '{}': {} of {} points behind the camera",
                self.object_type(),
                self.name,
                culled,
                self.coords.len()
            );
        }
        extra_out
    }

    /// Maps the projected coordinates into the window frame.
    pub fn normalize(&mut self, window_center: Vec3, window_roll: f64, window_scale: Vec3) {
        let visible: Vec<Vec3> = self.projected_coords.iter().flatten().copied().collect();
        let mut normalized =
            Transform::normalize(window_center, window_roll, window_scale.recip(), &visible).into_iter();
        self.normalized_coords = self
            .projected_coords
            .iter()
            .map(|p| p.and_then(|_| normalized.next()))
            .collect();
    }

    /// Resolves the index topology against the normalized coordinates.
    ///
    /// Edges touching a culled point are left out. An edge whose index is
    /// past the end of the coordinate list is skipped with a warning.
    pub fn generate_vector_lines(&mut self) {
        self.vector_lines.clear();
        for &(a, b) in &self.lines {
            match (self.normalized_coords.get(a), self.normalized_coords.get(b)) {
                (Some(Some(start)), Some(Some(end))) => self.vector_lines.push((*start, *end)),
                (Some(_), Some(_)) => {}
                _ => log::warn!(
                    "{} '{}': edge ({}, {}) references a missing point, {} available",
                    self.object_type(),
                    self.name,
                    a,
                    b,
                    self.normalized_coords.len()
                ),
            }
        }
    }
}

fn centroid(points: &[Vec3]) -> Result<Vec3, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyShape);
    }
    let sum = points.iter().fold(Vec3::ZERO, |acc, &p| acc + p);
    Ok(sum / points.len() as f64)
}
