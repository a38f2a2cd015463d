//! Planetary body model.
//!
//! The observed body is modeled as an oblate spheroid reduced to its mean
//! radius for visibility geometry. Oblateness beyond the mean-radius
//! approximation is out of scope.

use serde::{Deserialize, Serialize};

use crate::spatial::{GeometryError, Vector};

/// WGS84 equatorial radius in meters.
pub const EARTH_EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

/// WGS84 polar radius in meters.
pub const EARTH_POLAR_RADIUS_M: f64 = 6_356_752.3;

/// An oblate spheroid described by its equatorial and polar radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spheroid {
    equatorial_radius: f64,
    polar_radius: f64,
}

impl Spheroid {
    pub fn new(equatorial_radius: f64, polar_radius: f64) -> Self {
        Self {
            equatorial_radius,
            polar_radius,
        }
    }

    /// The WGS84 Earth spheroid.
    pub fn wgs84() -> Self {
        Self::new(EARTH_EQUATORIAL_RADIUS_M, EARTH_POLAR_RADIUS_M)
    }

    pub fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    pub fn polar_radius(&self) -> f64 {
        self.polar_radius
    }

    /// Mean radius `(2·R_eq + R_polar) / 3`, the radius of the sphere the
    /// visibility geometry is computed against.
    pub fn mean_radius(&self) -> f64 {
        (2.0 * self.equatorial_radius + self.polar_radius) / 3.0
    }

    /// Square of the first eccentricity.
    pub fn eccentricity_squared(&self) -> f64 {
        1.0 - (self.polar_radius / self.equatorial_radius).powi(2)
    }

    /// Angular radius of the body in radians as seen from `position`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::CameraInsideBody`] if `position` is at or below the
    /// mean radius, [`GeometryError::DimensionMismatch`] if it is not 3D.
    pub fn angular_radius(&self, position: &Vector) -> Result<f64, GeometryError> {
        position.require_dimension(3)?;
        let distance = position.norm();
        let radius = self.mean_radius();
        if distance <= radius {
            return Err(GeometryError::CameraInsideBody { distance, radius });
        }
        Ok((radius / distance).asin())
    }

    /// True iff `position` lies at or below the mean radius.
    pub fn encloses(&self, position: &Vector) -> bool {
        position.norm() <= self.mean_radius()
    }
}

impl Default for Spheroid {
    fn default() -> Self {
        Self::wgs84()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_mean_radius() {
        let spheroid = Spheroid::wgs84();
        let expected = (2.0 * EARTH_EQUATORIAL_RADIUS_M + EARTH_POLAR_RADIUS_M) / 3.0;
        assert_relative_eq!(spheroid.mean_radius(), expected);
        assert!(spheroid.mean_radius() < EARTH_EQUATORIAL_RADIUS_M);
        assert!(spheroid.mean_radius() > EARTH_POLAR_RADIUS_M);
    }

    #[test]
    fn test_eccentricity_of_a_sphere_is_zero() {
        let sphere = Spheroid::new(1000.0, 1000.0);
        assert_relative_eq!(sphere.eccentricity_squared(), 0.0);
    }

    #[test]
    fn test_angular_radius_shrinks_with_distance() {
        let spheroid = Spheroid::wgs84();
        let near = Vector::new3(8_000_000.0, 0.0, 0.0);
        let far = Vector::new3(20_000_000.0, 0.0, 0.0);
        let near_radius = spheroid.angular_radius(&near).unwrap();
        let far_radius = spheroid.angular_radius(&far).unwrap();
        assert!(near_radius > far_radius);
    }

    #[test]
    fn test_angular_radius_inside_body_fails() {
        let spheroid = Spheroid::wgs84();
        let inside = Vector::new3(1_000_000.0, 0.0, 0.0);
        let err = spheroid.angular_radius(&inside).unwrap_err();
        assert!(matches!(err, GeometryError::CameraInsideBody { .. }));
        assert!(spheroid.encloses(&inside));
    }
}
