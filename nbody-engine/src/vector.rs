// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Three-component vector used for positions, velocities and accelerations
//!
//! All kinematic state in the engine is stored as [`Vector3`] with
//! double-precision components. The type is `Copy` and laid out as three
//! contiguous `f64` values so collections of particles stay cache friendly.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 3D vector with double-precision components
///
/// # Examples
///
/// ```
/// use nbody_engine::vector::Vector3;
///
/// let a = Vector3::new(1.0, 0.0, 0.0);
/// let b = Vector3::new(0.0, 1.0, 1.0);
/// assert_eq!((a - b).norm(), 3.0_f64.sqrt());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector3 {
    /// Create a new vector with the given components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vector3::new(0.0, 0.0, 0.0)
    }

    /// Get the x component
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y component
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get the z component
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Squared Euclidean norm
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Dot product
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Get the vector as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Relative fuzzy comparison
    ///
    /// Returns true when `|self - other| <= precision * min(|self|, |other|)`.
    /// Like any relative comparison it is only true against the zero vector
    /// when `self` is exactly zero; compare the norm against an absolute
    /// tolerance when the expected value is zero.
    pub fn is_approx(&self, other: &Vector3, precision: f64) -> bool {
        (*self - *other).norm() <= precision * self.norm().min(other.norm())
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Sum for Vector3 {
    fn sum<I: Iterator<Item = Vector3>>(iter: I) -> Vector3 {
        iter.fold(Vector3::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_creation() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v.y(), 2.0);
        assert_eq!(v.z(), 3.0);
        assert_eq!(Vector3::default(), Vector3::zero());
    }

    #[test]
    fn test_vector_norm() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(v.norm(), 5.0); // 3-4-5 triangle
        assert_eq!(v.norm_squared(), 25.0);
    }

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(0.5, -1.0, 2.0);

        assert_eq!(a + b, Vector3::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Vector3::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a / 2.0, Vector3::new(0.5, 1.0, 1.5));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(&b), 0.5 - 2.0 + 6.0);

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_vector_sum() {
        let total: Vector3 = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, Vector3::new(1.0, 1.0, 1.0));

        let empty: Vector3 = std::iter::empty().sum();
        assert_eq!(empty, Vector3::zero());
    }

    #[test]
    fn test_vector_validation() {
        assert!(Vector3::new(1.0, 2.0, 3.0).is_valid());
        assert!(!Vector3::new(f64::NAN, 2.0, 3.0).is_valid());
        assert!(!Vector3::new(1.0, f64::INFINITY, 3.0).is_valid());
    }

    #[test]
    fn test_vector_array_conversion() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.as_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_is_approx() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        assert!(a.is_approx(&Vector3::new(1.005, 0.0, 0.0), 0.01));
        assert!(!a.is_approx(&Vector3::new(1.1, 0.0, 0.0), 0.01));

        // Relative comparison against zero only holds for exact zero
        assert!(Vector3::zero().is_approx(&Vector3::zero(), 0.01));
        assert!(!Vector3::new(1e-12, 0.0, 0.0).is_approx(&Vector3::zero(), 0.01));
    }
}
