//! Affine state of a renderable entity.
//!
//! A [`Transform`] keeps one composed matrix. Every operation folds a delta
//! into that matrix and returns freshly transformed copies of the points it
//! was given, so callers can swap their coordinate lists (and any caches that
//! depend on them) in one step. Position, rotation and scale are read back by
//! decomposing the matrix.

use crate::math::{mat4::Mat4, vec3::Vec3, vec4::Vec4};

/// Which variant of the camera projection to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionPass {
    /// Align with the view direction only. Used for the window itself, whose
    /// corners must stay in the projection plane.
    Window,
    /// Align, then apply the perspective matrix and the homogeneous divide.
    Perspective,
}

/// A composed `T * R * S` matrix plus the operators that grow it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Transform {
    /// Creates a transform positioned at `anchor` with no rotation and unit scale.
    pub fn new(anchor: Vec3) -> Self {
        Self {
            matrix: Mat4::translation(anchor),
        }
    }

    // ============ Readback ============

    pub fn position(&self) -> Vec3 {
        self.matrix.translation_part()
    }

    /// Euler angles in degrees, in `Mat4::euler_zyx` form.
    pub fn rotation(&self) -> Vec3 {
        self.matrix.euler_angles()
    }

    pub fn scale(&self) -> Vec3 {
        self.matrix.scale_factors()
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// The pure rotation part of the composed matrix.
    pub fn orientation(&self) -> Mat4 {
        self.matrix.orientation()
    }

    // ============ Operators ============

    /// Moves the transform and returns `points` offset by `direction`.
    pub fn translate(&mut self, direction: Vec3, points: &[Vec3]) -> Vec<Vec3> {
        let translation = Mat4::translation(direction);
        self.matrix = translation * self.matrix;
        translation.transform_points(points)
    }

    /// Rotates by `delta` degrees (`Rx * Ry * Rz`) around `anchor`, or around
    /// the current position when no anchor is given.
    ///
    /// The position is carried by the composed matrix, so rotating about a
    /// foreign anchor moves it together with the points.
    pub fn rotate(&mut self, delta: Vec3, points: &[Vec3], anchor: Option<Vec3>) -> Vec<Vec3> {
        let anchor = anchor.unwrap_or_else(|| self.position());
        let rotation = Mat4::translation(anchor) * Mat4::euler_xyz(delta) * Mat4::translation(-anchor);
        self.matrix = rotation * self.matrix;
        rotation.transform_points(points)
    }

    /// Undoes [`Transform::rotate`] with the same `delta` and anchor.
    ///
    /// The inverse of `Rx * Ry * Rz` is `Rz' * Ry' * Rx'` with negated
    /// angles, so `rotate(-delta)` only undoes a single-axis delta.
    pub fn unrotate(&mut self, delta: Vec3, points: &[Vec3], anchor: Option<Vec3>) -> Vec<Vec3> {
        let anchor = anchor.unwrap_or_else(|| self.position());
        let rotation = Mat4::translation(anchor) * Mat4::euler_zyx(-delta) * Mat4::translation(-anchor);
        self.matrix = rotation * self.matrix;
        rotation.transform_points(points)
    }

    /// Scales by `factor` along the entity's own axes, about `anchor` or the
    /// current position.
    ///
    /// The scale is applied in the local frame (`R * S * R^T`), which keeps the
    /// composed matrix in `T * R * S` form so it stays decomposable.
    pub fn rescale(&mut self, factor: Vec3, points: &[Vec3], anchor: Option<Vec3>) -> Vec<Vec3> {
        let anchor = anchor.unwrap_or_else(|| self.position());
        let orientation = self.orientation();
        let scaling = Mat4::translation(anchor)
            * orientation
            * Mat4::scaling(factor)
            * orientation.transpose()
            * Mat4::translation(-anchor);
        self.matrix = scaling * self.matrix;
        scaling.transform_points(points)
    }

    // ============ Camera ============

    /// Maps projected points into the window's local frame: translate by
    /// `-window_center`, undo the window roll about Z, then apply the window's
    /// inverse scale.
    pub fn normalize(
        window_center: Vec3,
        window_roll: f64,
        window_inverse_scale: Vec3,
        points: &[Vec3],
    ) -> Vec<Vec3> {
        let normalization = Mat4::scaling(window_inverse_scale)
            * Mat4::rotation_z(-window_roll)
            * Mat4::translation(-window_center);
        normalization.transform_points(points)
    }

    /// Projects points through the center of projection `cop` looking along
    /// `normal`, keeping only the survivors.
    pub fn project(
        cop: Vec3,
        normal: Vec3,
        cop_distance: f64,
        points: &[Vec3],
        pass: ProjectionPass,
    ) -> Vec<Vec3> {
        Self::project_points(cop, normal, cop_distance, points, pass)
            .into_iter()
            .flatten()
            .collect()
    }

    /// Like [`Transform::project`], but index-aligned with the input: a point
    /// behind the center of projection (`z < 0`) or at/through it (`w <= 0`)
    /// comes back as `None`.
    pub fn project_points(
        cop: Vec3,
        normal: Vec3,
        cop_distance: f64,
        points: &[Vec3],
        pass: ProjectionPass,
    ) -> Vec<Option<Vec3>> {
        let view = Mat4::look_along(cop, normal);

        match pass {
            ProjectionPass::Window => points.iter().map(|&p| Some(view * p)).collect(),
            ProjectionPass::Perspective => {
                let transformation = Mat4::perspective(cop_distance) * view;
                points
                    .iter()
                    .map(|&p| {
                        let clip = transformation * Vec4::from(p);
                        if clip.z < 0.0 || clip.w <= 0.0 {
                            return None;
                        }
                        Some(Vec3::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w))
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn sample_points() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-40.0, 15.5, 0.0),
            Vec3::new(250.0, -100.0, -75.0),
        ]
    }

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.matrix(), Mat4::identity());
    }

    #[test]
    fn translate_round_trip() {
        let mut t = Transform::new(Vec3::new(5.0, 5.0, 0.0));
        let d = Vec3::new(12.0, -7.0, 3.5);
        let moved = t.translate(d, &sample_points());
        let back = t.translate(-d, &moved);
        for (p, q) in sample_points().iter().zip(&back) {
            assert_abs_diff_eq!(*p, *q, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(t.position(), Vec3::new(5.0, 5.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn translate_returns_new_list() {
        let mut t = Transform::default();
        let original = sample_points();
        let moved = t.translate(Vec3::ONE, &original);
        assert_eq!(original, sample_points());
        assert_ne!(moved, original);
    }

    #[test]
    fn rotate_round_trip_per_axis() {
        let anchor = Some(Vec3::new(10.0, -3.0, 2.0));
        for delta in [
            Vec3::new(33.0, 0.0, 0.0),
            Vec3::new(0.0, -71.0, 0.0),
            Vec3::new(0.0, 0.0, 145.0),
        ] {
            let mut t = Transform::new(Vec3::new(1.0, 1.0, 1.0));
            let rotated = t.rotate(delta, &sample_points(), anchor);
            let back = t.rotate(-delta, &rotated, anchor);
            for (p, q) in sample_points().iter().zip(&back) {
                assert_abs_diff_eq!(*p, *q, epsilon = 1e-9);
            }
            assert_abs_diff_eq!(t.position(), Vec3::new(1.0, 1.0, 1.0), epsilon = 1e-9);
        }
    }

    #[test]
    fn unrotate_undoes_multi_axis_rotation() {
        let delta = Vec3::new(30.0, 40.0, 50.0);
        let point = [Vec3::new(100.0, 20.0, -30.0)];
        let mut t = Transform::new(Vec3::new(1.0, 1.0, 1.0));
        let rotated = t.rotate(delta, &point, Some(Vec3::ZERO));
        let back = t.unrotate(delta, &rotated, Some(Vec3::ZERO));
        assert_abs_diff_eq!(back[0], point[0], epsilon = 1e-9);
        assert_abs_diff_eq!(t.position(), Vec3::new(1.0, 1.0, 1.0), epsilon = 1e-9);
        assert_abs_diff_eq!(t.rotation(), Vec3::ZERO, epsilon = 1e-9);
    }

    #[test]
    fn negated_multi_axis_rotate_is_not_its_own_inverse() {
        // Per-axis only: Rx * Ry * Rz is not undone by the same order negated.
        let delta = Vec3::new(30.0, 40.0, 50.0);
        let point = [Vec3::new(100.0, 20.0, -30.0)];
        let mut t = Transform::default();
        let rotated = t.rotate(delta, &point, None);
        let back = t.rotate(-delta, &rotated, None);
        assert!(back[0].distance(point[0]) > 1.0);
    }

    #[test]
    fn negated_rotation_readback_resets_from_identity() {
        let mut t = Transform::new(Vec3::new(4.0, -2.0, 9.0));
        let point = [Vec3::new(7.0, 3.0, -1.0)];
        let rotated = t.rotate(Vec3::new(25.0, -60.0, 110.0), &point, None);
        let back = t.rotate(-t.rotation(), &rotated, None);
        assert_abs_diff_eq!(back[0], point[0], epsilon = 1e-9);
        assert_abs_diff_eq!(t.rotation(), Vec3::ZERO, epsilon = 1e-9);
    }

    #[test]
    fn rotate_about_own_position_keeps_position() {
        let mut t = Transform::new(Vec3::new(3.0, 4.0, 0.0));
        t.rotate(Vec3::new(0.0, 0.0, 90.0), &[], None);
        assert_abs_diff_eq!(t.position(), Vec3::new(3.0, 4.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(t.rotation().z, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn rotate_about_foreign_anchor_moves_position() {
        let mut t = Transform::new(Vec3::new(1.0, 0.0, 0.0));
        let moved = t.rotate(Vec3::new(0.0, 0.0, 90.0), &[Vec3::new(2.0, 0.0, 0.0)], Some(Vec3::ZERO));
        assert_abs_diff_eq!(t.position(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(moved[0], Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rescale_round_trip() {
        let mut t = Transform::new(Vec3::new(-2.0, 8.0, 1.0));
        t.rotate(Vec3::new(0.0, 0.0, 30.0), &[], None);
        let factor = Vec3::new(2.0, 0.5, 4.0);
        let scaled = t.rescale(factor, &sample_points(), None);
        let back = t.rescale(factor.recip(), &scaled, None);
        for (p, q) in sample_points().iter().zip(&back) {
            assert_abs_diff_eq!(*p, *q, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(t.scale(), Vec3::ONE, epsilon = 1e-12);
    }

    #[test]
    fn rescale_happens_in_local_frame() {
        let mut t = Transform::default();
        t.rotate(Vec3::new(0.0, 0.0, 90.0), &[], None);
        // Local X now points along world Y.
        let scaled = t.rescale(Vec3::new(2.0, 1.0, 1.0), &[Vec3::UP], None);
        assert_abs_diff_eq!(scaled[0], Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(t.scale(), Vec3::new(2.0, 1.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(t.rotation().z, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn perspective_drops_points_behind_cop() {
        let cop = Vec3::new(0.0, 0.0, -500.0);
        let points = [
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(10.0, 10.0, -600.0),
            Vec3::new(10.0, 10.0, -500.0),
        ];
        let projected = Transform::project_points(cop, Vec3::FORWARD, 500.0, &points, ProjectionPass::Perspective);
        assert!(projected[0].is_some());
        assert!(projected[1].is_none());
        assert!(projected[2].is_none());
        let survivors = Transform::project(cop, Vec3::FORWARD, 500.0, &points, ProjectionPass::Perspective);
        assert_eq!(survivors.len(), 1);
    }

    #[test]
    fn perspective_keeps_window_plane_points_fixed() {
        let cop = Vec3::new(0.0, 0.0, -500.0);
        let projected = Transform::project(
            cop,
            Vec3::FORWARD,
            500.0,
            &[Vec3::new(600.0, -20.0, 0.0), Vec3::new(600.0, -20.0, 500.0)],
            ProjectionPass::Perspective,
        );
        assert_abs_diff_eq!(projected[0], Vec3::new(600.0, -20.0, 500.0), epsilon = 1e-9);
        // Twice as far from the cop: half the size.
        assert_abs_diff_eq!(projected[1], Vec3::new(300.0, -10.0, 500.0), epsilon = 1e-9);
    }

    #[test]
    fn normalize_undoes_window_roll_and_scale() {
        let center = Vec3::new(100.0, 50.0, 0.0);
        let window_corner = center + Mat4::rotation_z(30.0) * Vec3::new(200.0, 0.0, 0.0);
        let normalized = Transform::normalize(center, 30.0, Vec3::new(0.5, 0.5, 1.0), &[window_corner]);
        assert_abs_diff_eq!(normalized[0], Vec3::new(100.0, 0.0, 0.0), epsilon = 1e-9);
    }
}
