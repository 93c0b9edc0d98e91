//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotations are **right-handed** and take angles in **degrees**
//!
//! # Euler angles
//! Two compositions are provided and they undo each other under negation:
//! `euler_xyz(-e) * euler_zyx(e) == identity`. Rotation deltas are applied
//! with [`Mat4::euler_xyz`]; [`Mat4::euler_angles`] recovers the angles of the
//! [`Mat4::euler_zyx`] form.

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// Below this, `sqrt(r00² + r10²)` means the Y rotation sits at ±90°.
const GIMBAL_LOCK_THRESHOLD: f64 = 1e-6;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f64; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column (column-major convention).
    pub fn translation(offset: Vec3) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, offset.x],
            [0.0, 1.0, 0.0, offset.y],
            [0.0, 0.0, 1.0, offset.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a non-uniform scale matrix.
    pub fn scaling(factor: Vec3) -> Self {
        Mat4::new([
            [factor.x, 0.0, 0.0, 0.0],
            [0.0, factor.y, 0.0, 0.0],
            [0.0, 0.0, factor.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// `Rx * Ry * Rz`: Z is applied first, X last.
    pub fn euler_xyz(angles: Vec3) -> Self {
        Mat4::rotation_x(angles.x) * Mat4::rotation_y(angles.y) * Mat4::rotation_z(angles.z)
    }

    /// `Rz * Ry * Rx`: X is applied first, Z last.
    pub fn euler_zyx(angles: Vec3) -> Self {
        Mat4::rotation_z(angles.z) * Mat4::rotation_y(angles.y) * Mat4::rotation_x(angles.x)
    }

    /// Perspective matrix for a center of projection at the origin looking
    /// down +Z, with the projection plane `distance` units away.
    ///
    /// The bottom row is `[0, 0, 1/distance, 0]`, so `w = z / distance`.
    pub fn perspective(distance: f64) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0 / distance, 0.0],
        ])
    }

    /// View transform that moves `eye` to the origin and turns `normal` onto +Z.
    ///
    /// Two single-axis rotations are used: a Y rotation that zeroes the X
    /// component of the normal's shadow on the XZ plane, then an X rotation
    /// that zeroes the remaining Y component.
    pub fn look_along(eye: Vec3, normal: Vec3) -> Self {
        let shadow_xz = Vec3::new(normal.x, 0.0, normal.z);
        let mut yaw = Vec3::FORWARD.angle_between(shadow_xz);
        if normal.x > 0.0 {
            yaw = 360.0 - yaw;
        }
        let yaw_rotation = Mat4::rotation_y(yaw);

        let aligned = yaw_rotation.transform_direction(normal);
        let mut pitch = Vec3::FORWARD.angle_between(aligned);
        if aligned.y < 0.0 {
            pitch = 360.0 - pitch;
        }

        Mat4::rotation_x(pitch) * yaw_rotation * Mat4::translation(-eye)
    }

    /// Returns a new matrix with transpose applied: `self.transpose()`.
    pub fn transpose(&self) -> Self {
        let mut data = [[0.0; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4 { data }
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    /// The translation stored in the last column.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.data[0][3], self.data[1][3], self.data[2][3])
    }

    /// The first three rows of column `col`.
    pub fn column(&self, col: usize) -> Vec3 {
        Vec3::new(self.data[0][col], self.data[1][col], self.data[2][col])
    }

    /// Per-axis scale: the norms of the three basis columns.
    pub fn scale_factors(&self) -> Vec3 {
        Vec3::new(
            self.column(0).magnitude(),
            self.column(1).magnitude(),
            self.column(2).magnitude(),
        )
    }

    /// The rotation part with scale divided out of every basis column.
    ///
    /// A collapsed axis (zero norm) is left as is.
    pub fn orientation(&self) -> Mat4 {
        let scale = self.scale_factors();
        let norms = [scale.x, scale.y, scale.z];
        let mut rotation = Mat4::identity();
        for (col, norm) in norms.into_iter().enumerate() {
            let divisor = if norm == 0.0 { 1.0 } else { norm };
            for row in 0..3 {
                rotation.data[row][col] = self.data[row][col] / divisor;
            }
        }
        rotation
    }

    /// Decomposes the rotation part into `euler_zyx` angles, in degrees.
    ///
    /// At gimbal lock the Z angle is pinned to zero and the whole residual
    /// rotation is folded into X.
    pub fn euler_angles(&self) -> Vec3 {
        let r = self.orientation();
        let sy = (r.get(0, 0).powi(2) + r.get(1, 0).powi(2)).sqrt();

        let (x, y, z) = if sy >= GIMBAL_LOCK_THRESHOLD {
            (
                r.get(2, 1).atan2(r.get(2, 2)),
                (-r.get(2, 0)).atan2(sy),
                r.get(1, 0).atan2(r.get(0, 0)),
            )
        } else {
            (
                (-r.get(1, 2)).atan2(r.get(1, 1)),
                (-r.get(2, 0)).atan2(sy),
                0.0,
            )
        };

        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    /// Transforms a direction (w=0), ignoring translation.
    pub fn transform_direction(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(v, 0.0)).to_vec3()
    }

    /// Transforms every point, returning a fresh list.
    pub fn transform_points(&self, points: &[Vec3]) -> Vec<Vec3> {
        points.iter().map(|&p| *self * p).collect()
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x + self.data[r][1] * v.y + self.data[r][2] * v.z + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

/// Transform a point: Mat4 * Vec3 (treats Vec3 as column vector with w=1).
///
/// Applies perspective division if w != 1.
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        (self * Vec4::from(v)).to_vec3_perspective()
    }
}
