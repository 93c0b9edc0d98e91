//! The camera window.
//!
//! A [`Window`] is a rectangle in world space plus a center of projection.
//! The rectangle's normal is the view direction, the rectangle itself
//! bounds the visible region, and its normalized corners are the clipping
//! bounds for every frame.

use crate::colors;
use crate::math::vec3::Vec3;
use crate::shape::{Shape, ShapeKind};
use crate::transform::ProjectionPass;

pub const DEFAULT_ORIGIN: Vec3 = Vec3::new(-500.0, -500.0, 0.0);
pub const DEFAULT_EXTENSION: Vec3 = Vec3::new(500.0, 500.0, 0.0);
pub const DEFAULT_COP: Vec3 = Vec3::new(0.0, 0.0, -500.0);

const ORIGIN: usize = 0;
const TOP_LEFT: usize = 1;
const EXTENSION: usize = 2;

#[derive(Debug, Clone)]
pub struct Window {
    frame: Shape,
    cop: Vec3,
    projected_cop: Vec3,
    projected_position: Vec3,
    home: Vec3,
}

impl Default for Window {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN, DEFAULT_EXTENSION, DEFAULT_COP)
    }
}

impl Window {
    /// Creates a window spanning `origin`..`extension` in the `origin.z`
    /// plane, projecting through `cop`.
    pub fn new(origin: Vec3, extension: Vec3, cop: Vec3) -> Self {
        let corners = vec![
            origin,
            Vec3::new(origin.x, extension.y, origin.z),
            Vec3::new(extension.x, extension.y, origin.z),
            Vec3::new(extension.x, origin.y, origin.z),
        ];
        let center = Vec3::new(
            (origin.x + extension.x) / 2.0,
            (origin.y + extension.y) / 2.0,
            origin.z,
        );
        let frame = Shape::anchored(ShapeKind::Rectangle, corners, center)
            .with_name("Window")
            .with_color(colors::WINDOW_FRAME)
            .with_line_width(2.0);

        Self {
            frame,
            cop,
            projected_cop: cop,
            projected_position: center,
            home: center,
        }
    }

    /// The rectangle outline, drawable like any other shape.
    pub fn frame(&self) -> &Shape {
        &self.frame
    }

    pub fn coords(&self) -> &[Vec3] {
        self.frame.coords()
    }

    pub fn cop(&self) -> Vec3 {
        self.cop
    }

    pub fn projected_cop(&self) -> Vec3 {
        self.projected_cop
    }

    pub fn projected_position(&self) -> Vec3 {
        self.projected_position
    }

    pub fn position(&self) -> Vec3 {
        self.frame.position()
    }

    pub fn rotation(&self) -> Vec3 {
        self.frame.rotation()
    }

    pub fn scale(&self) -> Vec3 {
        self.frame.scale()
    }

    /// Centre of the window when it was created.
    pub fn home(&self) -> Vec3 {
        self.home
    }

    // ============ Corners and axes ============

    fn corner(&self, index: usize) -> Vec3 {
        self.frame.coords()[index]
    }

    fn projected_corner(&self, index: usize) -> Vec3 {
        self.frame.projected_coords()[index].unwrap_or_else(|| self.corner(index))
    }

    fn normalized_corner(&self, index: usize) -> Vec3 {
        self.frame.normalized_coords()[index].unwrap_or_else(|| self.corner(index))
    }

    pub fn origin(&self) -> Vec3 {
        self.corner(ORIGIN)
    }

    pub fn extension(&self) -> Vec3 {
        self.corner(EXTENSION)
    }

    /// Lower-left clipping bound.
    pub fn normalized_origin(&self) -> Vec3 {
        self.normalized_corner(ORIGIN)
    }

    /// Upper-right clipping bound.
    pub fn normalized_extension(&self) -> Vec3 {
        self.normalized_corner(EXTENSION)
    }

    pub fn x_axis(&self) -> Vec3 {
        self.corner(EXTENSION) - self.corner(TOP_LEFT)
    }

    /// Points from the bottom edge to the top edge.
    pub fn y_vector(&self) -> Vec3 {
        self.corner(TOP_LEFT) - self.corner(ORIGIN)
    }

    /// The window normal, used as the view direction.
    pub fn z_vector(&self) -> Vec3 {
        (self.x_axis() / 2.0).cross(self.y_vector() / 2.0)
    }

    pub fn projected_x_axis(&self) -> Vec3 {
        self.projected_corner(EXTENSION) - self.projected_corner(TOP_LEFT)
    }

    pub fn projected_y_vector(&self) -> Vec3 {
        self.projected_corner(TOP_LEFT) - self.projected_corner(ORIGIN)
    }

    pub fn projected_z_vector(&self) -> Vec3 {
        (self.projected_x_axis() / 2.0).cross(self.projected_y_vector() / 2.0)
    }

    /// Distance between the projected centre and the projected cop.
    pub fn cop_distance(&self) -> f64 {
        (self.projected_position - self.projected_cop).magnitude()
    }

    /// Angle in degrees by which the projected up vector is turned away from
    /// +Y, counter-clockwise positive.
    pub fn roll(&self) -> f64 {
        let up = self.projected_y_vector();
        if up.x == 0.0 && up.y == 0.0 {
            return 0.0;
        }
        (-up.x).atan2(up.y).to_degrees()
    }

    // ============ Camera movement ============

    pub fn translate(&mut self, direction: Vec3) {
        let cop = self.frame.transform_with(&[self.cop], |t, points| t.translate(direction, points));
        self.cop = cop[0];
    }

    pub fn rotate(&mut self, delta: Vec3, anchor: Option<Vec3>) {
        let cop = self
            .frame
            .transform_with(&[self.cop], |t, points| t.rotate(delta, points, anchor));
        self.cop = cop[0];
    }

    /// Scales the window in its own frame. A factor with a zero or
    /// non-finite component would collapse an axis for good and is ignored.
    pub fn rescale(&mut self, factor: Vec3) {
        let components = [factor.x, factor.y, factor.z];
        if components.iter().any(|c| *c == 0.0 || !c.is_finite()) {
            log::warn!("ignoring window rescale by {factor}");
            return;
        }
        let cop = self
            .frame
            .transform_with(&[self.cop], |t, points| t.rescale(factor, points, None));
        self.cop = cop[0];
    }

    /// Moves the window back to where it was created.
    pub fn reset_position(&mut self) {
        self.translate(self.home - self.position());
    }

    /// Undoes every rotation, keeping the current position.
    pub fn reset_rotation(&mut self) {
        self.rotate(-self.rotation(), None);
    }

    /// Undoes every rescale, keeping the current position and rotation.
    pub fn reset_scale(&mut self) {
        self.rescale(self.scale().recip());
    }

    /// Sets the absolute per-axis scale, relative to the construction size.
    pub fn resize(&mut self, scale: Vec3) {
        let current = self.scale();
        self.rescale(Vec3::new(
            scale.x / current.x,
            scale.y / current.y,
            scale.z / current.z,
        ));
    }

    // ============ Per-frame pipeline ============

    /// Projects the corners, the cop and the centre without perspective,
    /// leaving them in the camera's frame.
    pub fn project(&mut self, normal: Vec3) {
        let extra = [self.cop, self.position()];
        let projected =
            self.frame
                .project_pass(self.cop, normal, 0.0, ProjectionPass::Window, &extra);
        self.projected_cop = projected[0].unwrap_or(self.cop);
        self.projected_position = projected[1].unwrap_or(extra[1]);
    }

    pub fn normalize(&mut self) {
        let (center, roll, scale) = (self.projected_position, self.roll(), self.scale());
        self.frame.normalize(center, roll, scale);
    }

    pub fn generate_vector_lines(&mut self) {
        self.frame.generate_vector_lines();
    }
}
