//! Per-frame geometry pass.

use crate::error::GeometryError;
use crate::shape::Shape;
use crate::window::Window;

/// Closer than this, the cop sits on the window plane and nothing can be
/// projected.
const MIN_COP_DISTANCE: f64 = 1e-9;

/// Runs project, normalize and line generation over a scene.
pub struct FrameGenerator;

impl FrameGenerator {
    /// Brings `window` and every shape up to date for clipping.
    ///
    /// On [`GeometryError::DegenerateCamera`] nothing has been touched except
    /// the window's own projection, and the frame should be skipped.
    pub fn generate_frame(window: &mut Window, shapes: &mut [Shape]) -> Result<(), GeometryError> {
        let cop_distance = Self::project(window, shapes)?;
        Self::normalize(window, shapes);
        Self::generate_vector_lines(window, shapes);

        log::debug!(
            "frame: {} shapes, cop distance {:.2}, roll {:.2}",
            shapes.len(),
            cop_distance,
            window.roll()
        );
        Ok(())
    }

    /// Projects the window without perspective, then every shape through
    /// the window's cop. Returns the cop distance used.
    pub fn project(window: &mut Window, shapes: &mut [Shape]) -> Result<f64, GeometryError> {
        let normal = window.z_vector();
        window.project(normal);

        let distance = window.cop_distance();
        if !distance.is_finite() || distance < MIN_COP_DISTANCE {
            log::warn!("skipping frame, cop is {distance} units from the window");
            return Err(GeometryError::DegenerateCamera { distance });
        }

        let cop = window.cop();
        for shape in shapes.iter_mut() {
            shape.project(cop, normal, distance);
        }
        Ok(distance)
    }

    /// Re-expresses projected coordinates in the window's frame: centred on
    /// the window, with its roll and scale undone.
    pub fn normalize(window: &mut Window, shapes: &mut [Shape]) {
        let center = window.projected_position();
        let roll = window.roll();
        let scale = window.scale();

        window.normalize();
        for shape in shapes.iter_mut() {
            shape.normalize(center, roll, scale);
        }
    }

    pub fn generate_vector_lines(window: &mut Window, shapes: &mut [Shape]) {
        window.generate_vector_lines();
        for shape in shapes.iter_mut() {
            shape.generate_vector_lines();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3::Vec3;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_window_keeps_plane_coordinates() {
        let mut window = Window::default();
        let mut shapes = vec![Shape::line(Vec3::new(-100.0, 50.0, 0.0), Vec3::new(600.0, 0.0, 0.0)).unwrap()];
        FrameGenerator::generate_frame(&mut window, &mut shapes).unwrap();

        let (a, b) = shapes[0].vector_lines()[0];
        assert_abs_diff_eq!(a, Vec3::new(-100.0, 50.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(b, Vec3::new(600.0, 0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(window.normalized_origin(), Vec3::new(-500.0, -500.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(window.normalized_extension(), Vec3::new(500.0, 500.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn moving_the_window_moves_the_scene_the_other_way() {
        let mut window = Window::default();
        window.translate(Vec3::new(200.0, 0.0, 0.0));
        let mut shapes = vec![Shape::point(Vec3::new(0.0, 0.0, 0.0)).unwrap()];
        FrameGenerator::generate_frame(&mut window, &mut shapes).unwrap();
        assert_abs_diff_eq!(shapes[0].normalized_coords()[0].unwrap(), Vec3::new(-200.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn zooming_in_enlarges_the_scene() {
        let mut window = Window::default();
        window.rescale(Vec3::new(0.5, 0.5, 0.5));
        let mut shapes = vec![Shape::point(Vec3::new(100.0, 0.0, 0.0)).unwrap()];
        FrameGenerator::generate_frame(&mut window, &mut shapes).unwrap();
        // The cop moved to half the distance, which keeps plane points
        // in place, and the halved window doubles them on normalization.
        assert_abs_diff_eq!(shapes[0].normalized_coords()[0].unwrap(), Vec3::new(200.0, 0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(window.normalized_extension(), Vec3::new(500.0, 500.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn rolled_window_sees_the_scene_rotated_back() {
        let mut window = Window::default();
        window.rotate(Vec3::new(0.0, 0.0, 90.0), None);
        let mut shapes = vec![Shape::point(Vec3::new(0.0, 100.0, 0.0)).unwrap()];
        FrameGenerator::generate_frame(&mut window, &mut shapes).unwrap();
        assert_abs_diff_eq!(shapes[0].normalized_coords()[0].unwrap(), Vec3::new(100.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn collapsed_camera_is_an_error() {
        let mut window = Window::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0), Vec3::ZERO);
        let mut shapes = vec![];
        let err = FrameGenerator::generate_frame(&mut window, &mut shapes).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateCamera { .. }));
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        let mut window = Window::default();
        let mut shapes = vec![Shape::line(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -800.0)).unwrap()];
        FrameGenerator::generate_frame(&mut window, &mut shapes).unwrap();
        assert!(shapes[0].projected_coords()[1].is_none());
        assert!(shapes[0].vector_lines().is_empty());
    }
}
