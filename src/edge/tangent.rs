//! Exact tangent-circle horizon for an idealized sphere.

use rand::RngCore;
use std::f64::consts::TAU;

use crate::edge::{plane_basis, EdgePoints, EdgeProvider, HorizonCircle};
use crate::spatial::{GeometryError, Vector};

/// Computes the horizon of a sphere exactly.
///
/// From a camera at distance `d` from the center of a sphere of radius `R`,
/// the sightlines tangent to the sphere touch it on a circle. With
/// `α = asin(R/d)` and tangent length `t = √(d² - R²)`, that circle sits
/// `d - t·cos(α)` from the sphere center along the camera direction and has
/// radius `t·sin(α)`. Every point this provider emits lies on the sphere to
/// floating tolerance.
#[derive(Debug, Clone)]
pub struct TangentCircleProvider {
    center: Vector,
    radius_vector: Vector,
    radius_vector2: Vector,
    circle_radius: f64,
    angular_radius: f64,
}

impl TangentCircleProvider {
    /// Creates the provider for a camera at `position` observing a sphere of
    /// `body_radius` centered at the origin.
    ///
    /// # Errors
    ///
    /// [`GeometryError::CameraInsideBody`] if `position` is at or below the
    /// sphere surface, [`GeometryError::DimensionMismatch`] if it is not 3D.
    pub fn new(position: &Vector, body_radius: f64) -> Result<Self, GeometryError> {
        position.require_dimension(3)?;
        let distance = position.norm();
        if distance <= body_radius {
            return Err(GeometryError::CameraInsideBody {
                distance,
                radius: body_radius,
            });
        }

        // Step 1: locate the circle center along the camera direction.
        let alpha = (body_radius / distance).asin();
        let tangent_len = (distance * distance - body_radius * body_radius).sqrt();
        let center_len = distance - tangent_len * alpha.cos();
        let towards_camera = position.normalize()?;
        let center = &towards_camera * center_len;

        // Step 2: span the circle plane with two orthogonal radius vectors.
        let circle_radius = tangent_len * alpha.sin();
        let (u, v) = plane_basis(&towards_camera);
        let radius_vector = &u * circle_radius;
        let radius_vector2 = &v * circle_radius;

        Ok(Self {
            center,
            radius_vector,
            radius_vector2,
            circle_radius,
            angular_radius: alpha,
        })
    }
}

impl EdgeProvider for TangentCircleProvider {
    /// Samples the tangent circle at `num_points` evenly spaced angles over
    /// `[0, 2π)`. Deterministic; `rng` is unused.
    fn surface_points(&self, _rng: &mut dyn RngCore, num_points: usize) -> EdgePoints {
        let points = (0..num_points)
            .map(|i| {
                let theta = TAU * i as f64 / num_points as f64;
                &self.center
                    + &(&(&self.radius_vector * theta.sin())
                        + &(&self.radius_vector2 * theta.cos()))
            })
            .collect();
        EdgePoints {
            center: self.center.clone(),
            points,
        }
    }

    fn horizon_circle(&self) -> HorizonCircle {
        HorizonCircle {
            center: self.center.clone(),
            radius: self.circle_radius,
            angular_radius: self.angular_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BODY_RADIUS: f64 = 6_378_137.0;

    #[test]
    fn test_every_point_lies_on_the_sphere() {
        let position = Vector::new3(2_000_000.0, -7_000_000.0, 3_000_000.0);
        let provider = TangentCircleProvider::new(&position, BODY_RADIUS).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let edge = provider.surface_points(&mut rng, 720);

        assert_eq!(edge.points.len(), 720);
        for point in &edge.points {
            assert_relative_eq!(point.norm(), BODY_RADIUS, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_circle_center_lies_along_camera_direction() {
        let position = Vector::new3(10_000_000.0, 0.0, 0.0);
        let provider = TangentCircleProvider::new(&position, BODY_RADIUS).unwrap();
        let circle = provider.horizon_circle();

        let distance = position.norm();
        let alpha = (BODY_RADIUS / distance).asin();
        let tangent_len = (distance * distance - BODY_RADIUS * BODY_RADIUS).sqrt();

        assert_relative_eq!(circle.angular_radius, alpha, epsilon = 1e-12);
        assert_relative_eq!(circle.radius, tangent_len * alpha.sin(), epsilon = 1e-6);
        assert_eq!(
            circle.center,
            Vector::new3(distance - tangent_len * alpha.cos(), 0.0, 0.0)
        );
    }

    #[test]
    fn test_first_and_last_samples_are_distinct() {
        // The sweep covers [0, 2π) with the endpoint excluded, so the ring
        // has no duplicated seam point.
        let position = Vector::new3(10_000_000.0, 0.0, 0.0);
        let provider = TangentCircleProvider::new(&position, BODY_RADIUS).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let edge = provider.surface_points(&mut rng, 360);
        assert_ne!(edge.points[0], edge.points[359]);
    }

    #[test]
    fn test_camera_inside_body_is_rejected() {
        let position = Vector::new3(BODY_RADIUS / 2.0, 0.0, 0.0);
        let err = TangentCircleProvider::new(&position, BODY_RADIUS).unwrap_err();
        assert!(matches!(err, GeometryError::CameraInsideBody { .. }));

        // A camera exactly on the surface has no horizon either.
        let position = Vector::new3(BODY_RADIUS, 0.0, 0.0);
        let err = TangentCircleProvider::new(&position, BODY_RADIUS).unwrap_err();
        assert!(matches!(err, GeometryError::CameraInsideBody { .. }));
    }
}
