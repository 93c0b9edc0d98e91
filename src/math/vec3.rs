use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};

use crate::error::GeometryError;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point on the z = 0 plane.
    pub const fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    pub fn add(&self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    pub fn subtract(&self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// A zero vector has no direction, so this fails with
    /// [`GeometryError::DegenerateVector`] instead of producing NaNs.
    pub fn normalize(&self) -> Result<Self, GeometryError> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(GeometryError::DegenerateVector);
        }
        Ok(Self {
            x: self.x / magnitude,
            y: self.y / magnitude,
            z: self.z / magnitude,
        })
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Unsigned angle between two vectors, in degrees.
    ///
    /// Undefined when either vector has zero length; returns 0 in that case.
    pub fn angle_between(&self, other: Self) -> f64 {
        let magnitude = self.magnitude() * other.magnitude();
        if magnitude == 0.0 {
            return 0.0;
        }
        // Rounding can push the cosine a hair outside [-1, 1].
        (self.dot(other) / magnitude).clamp(-1.0, 1.0).acos().to_degrees()
    }

    pub fn distance(&self, other: Self) -> f64 {
        (*self - other).magnitude()
    }

    pub fn lerp(&self, other: Self, t: f64) -> Self {
        *self + (other - *self) * t
    }

    /// Component-wise reciprocal.
    pub fn recip(&self) -> Self {
        Self::new(1.0 / self.x, 1.0 / self.y, 1.0 / self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Scalar multiplication of a vector.
impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

/// Scalar division of a vector.
impl Div<f64> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// Negation of a vector.
impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl AbsDiffEq for Vec3 {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn operators_do_not_mutate_operands() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        let sum = a + b;
        let diff = b - a;
        assert_eq!(sum, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(diff, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn cross_of_x_and_y_is_z() {
        assert_eq!(Vec3::RIGHT.cross(Vec3::UP), Vec3::FORWARD);
    }

    #[test]
    fn normalize_zero_vector_fails() {
        assert_eq!(Vec3::ZERO.normalize(), Err(GeometryError::DegenerateVector));
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Vec3::new(3.0, 4.0, 12.0).normalize().unwrap();
        assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn angle_between_with_zero_vector_is_zero() {
        assert_eq!(Vec3::ZERO.angle_between(Vec3::UP), 0.0);
        assert_eq!(Vec3::UP.angle_between(Vec3::ZERO), 0.0);
    }

    #[test]
    fn angle_between_perpendicular_vectors() {
        assert_relative_eq!(Vec3::RIGHT.angle_between(Vec3::UP), 90.0, epsilon = 1e-12);
        assert_relative_eq!(Vec3::UP.angle_between(-Vec3::UP), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Vec3::ZERO.lerp(Vec3::new(2.0, 4.0, -6.0), 0.5);
        assert_eq!(mid, Vec3::new(1.0, 2.0, -3.0));
    }
}
