//! Runtime-dimensioned vectors for spatial and sensor-plane points.
//!
//! The engine moves the same point collections through 3D space and onto a
//! 2D sensor, so [`Vector`] carries its dimension (2 or 3) at runtime and
//! surfaces dimension misuse as [`GeometryError::DimensionMismatch`] at the
//! operations where it matters (`cross`, frame transforms, sensor-bounds
//! tests) rather than encoding it in the type.

use crate::spatial::{float_equals, GeometryError};
use nalgebra::DVector;
use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

/// A fixed-dimension numeric tuple in 2D (sensor plane) or 3D (space).
///
/// Arithmetic is closed: adding, subtracting, negating, or scaling a vector
/// yields a vector of the same dimension. Binary operations between vectors
/// of different dimensions panic, inheriting `nalgebra`'s `DVector`
/// semantics; the fallible entry points (`cross`, `normalize`, and the
/// consumers in `frame` and `camera`) return [`GeometryError`] instead.
///
/// Equality is tolerance-based: two vectors compare equal when each pair of
/// components differs by less than [`crate::spatial::FLOAT_TOLERANCE`]. For
/// that reason `Vector` deliberately implements no `Hash`.
#[derive(Debug, Clone)]
pub struct Vector {
    data: DVector<f64>,
}

impl Vector {
    /// Creates a 2D vector, typically an image-plane point in pixels.
    pub fn new2(x: f64, y: f64) -> Self {
        Self {
            data: DVector::from_vec(vec![x, y]),
        }
    }

    /// Creates a 3D vector, typically a position in meters.
    pub fn new3(x: f64, y: f64, z: f64) -> Self {
        Self {
            data: DVector::from_vec(vec![x, y, z]),
        }
    }

    /// The 3D zero vector.
    pub fn zero3() -> Self {
        Self::new3(0.0, 0.0, 0.0)
    }

    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.data.norm()
    }

    /// Returns the unit vector pointing in the same direction.
    ///
    /// # Errors
    ///
    /// [`GeometryError::ZeroVectorNormalize`] if the vector has zero length.
    pub fn normalize(&self) -> Result<Self, GeometryError> {
        let norm = self.norm();
        if norm == 0.0 {
            return Err(GeometryError::ZeroVectorNormalize);
        }
        Ok(Self {
            data: &self.data / norm,
        })
    }

    /// Dot product with another vector of the same dimension.
    pub fn dot(&self, other: &Self) -> f64 {
        self.data.dot(&other.data)
    }

    /// Cross product, defined for 3D vectors only.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DimensionMismatch`] if either operand is not 3D.
    pub fn cross(&self, other: &Self) -> Result<Self, GeometryError> {
        self.require_dimension(3)?;
        other.require_dimension(3)?;
        let (a, b) = (&self.data, &other.data);
        Ok(Self::new3(
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ))
    }

    /// Checks this vector has dimension `expected`.
    pub fn require_dimension(&self, expected: usize) -> Result<(), GeometryError> {
        if self.dimension() != expected {
            return Err(GeometryError::DimensionMismatch {
                expected,
                actual: self.dimension(),
            });
        }
        Ok(())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, other: &Vector) -> Vector {
        Vector {
            data: &self.data + &other.data,
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        &self + &other
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, other: &Vector) -> Vector {
        Vector {
            data: &self.data - &other.data,
        }
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        &self - &other
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector { data: -&self.data }
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        -&self
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, factor: f64) -> Vector {
        Vector {
            data: &self.data * factor,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, factor: f64) -> Vector {
        &self * factor
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        if self.dimension() != other.dimension() {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| float_equals(*a, *b))
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components: Vec<String> = self.data.iter().map(|el| format!("{el:.2}")).collect();
        write!(f, "({})", components.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arithmetic_is_closed() {
        let a = Vector::new3(1.0, 2.0, 3.0);
        let b = Vector::new3(-1.0, 0.5, 2.0);

        let sum = &a + &b;
        let diff = &a - &b;
        let scaled = &a * 2.0;
        let negated = -&a;

        assert_eq!(sum.dimension(), 3);
        assert_eq!(sum, Vector::new3(0.0, 2.5, 5.0));
        assert_eq!(diff, Vector::new3(2.0, 1.5, 1.0));
        assert_eq!(scaled, Vector::new3(2.0, 4.0, 6.0));
        assert_eq!(negated, Vector::new3(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_equality_uses_tolerance() {
        let a = Vector::new2(1.0, 2.0);
        let b = Vector::new2(1.0 + 5e-4, 2.0 - 5e-4);
        let c = Vector::new2(1.01, 2.0);

        assert_eq!(a, b);
        assert_ne!(a, c);
        // Different dimensions never compare equal.
        assert_ne!(Vector::new2(0.0, 0.0), Vector::zero3());
    }

    #[test]
    fn test_normalize_returns_unit_vector() {
        let v = Vector::new3(3.0, 4.0, 0.0);
        let unit = v.normalize().unwrap();
        assert_relative_eq!(unit.norm(), 1.0, epsilon = 1e-12);
        assert_eq!(unit, Vector::new3(0.6, 0.8, 0.0));
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        let err = Vector::zero3().normalize().unwrap_err();
        assert!(matches!(err, GeometryError::ZeroVectorNormalize));
    }

    #[test]
    fn test_cross_matches_hand_computation() {
        let x = Vector::new3(1.0, 0.0, 0.0);
        let y = Vector::new3(0.0, 1.0, 0.0);
        let z = x.cross(&y).unwrap();
        assert_eq!(z, Vector::new3(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_cross_rejects_2d_vectors() {
        let a = Vector::new2(1.0, 0.0);
        let b = Vector::new3(0.0, 1.0, 0.0);
        let err = a.cross(&b).unwrap_err();
        assert!(matches!(
            err,
            GeometryError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }
}
