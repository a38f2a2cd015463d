//! Monte-Carlo disk sampling with an analytic horizon cone.

use rand::{Rng, RngCore};
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::body::Spheroid;
use crate::edge::{plane_basis, EdgePoints, EdgeProvider, HorizonCircle};
use crate::spatial::{GeometryError, Vector};

/// Samples the visible disk of the mean-radius spheroid and derives the
/// horizon from the sighting cone.
///
/// Disk points are drawn area-uniformly inside the angular disk of radius
/// `asin(R/d)` (the `√uniform` transform), converted to ray directions, and
/// intersected with the sphere; each surface point is an independent
/// ray/sphere intersection, so points are only approximately equidistant
/// from the body center. The horizon circle itself is exact: it lies on the
/// cone with apex at the camera whose half-angle complements the horizon
/// angle `acos(R/d)`, which reproduces the tangent-circle geometry through
/// different intermediate angles.
#[derive(Debug, Clone)]
pub struct SampledDiskProvider {
    position: Vector,
    body_radius: f64,
    to_body: Vector,
    plane_u: Vector,
    plane_v: Vector,
    angular_radius: f64,
    circle_center: Vector,
    circle_radius: f64,
}

impl SampledDiskProvider {
    /// Creates the provider for a camera at `position` observing `spheroid`
    /// (reduced to its mean radius) centered at the origin.
    ///
    /// # Errors
    ///
    /// [`GeometryError::CameraInsideBody`] if `position` is at or below the
    /// mean radius, [`GeometryError::DimensionMismatch`] if it is not 3D.
    pub fn new(position: &Vector, spheroid: &Spheroid) -> Result<Self, GeometryError> {
        position.require_dimension(3)?;
        let distance = position.norm();
        let body_radius = spheroid.mean_radius();
        if distance <= body_radius {
            return Err(GeometryError::CameraInsideBody {
                distance,
                radius: body_radius,
            });
        }

        let angular_radius = (body_radius / distance).asin();
        let to_body = (-position).normalize()?;
        let (plane_u, plane_v) = plane_basis(&to_body);

        // The horizon circle lies on a cone with apex at the camera, axis
        // along the viewing direction, and half-angle complementary to the
        // horizon angle.
        let tangent_distance = (distance * distance - body_radius * body_radius).sqrt();
        let horizon_angle = (body_radius / distance).acos();
        let cone_half_angle = FRAC_PI_2 - horizon_angle;
        let circle_radius = tangent_distance * cone_half_angle.sin();
        let circle_center =
            position + &(&to_body * (tangent_distance * cone_half_angle.cos()));

        Ok(Self {
            position: position.clone(),
            body_radius,
            to_body,
            plane_u,
            plane_v,
            angular_radius,
            circle_center,
            circle_radius,
        })
    }

    /// Angular radius of the body in radians as seen from the camera.
    pub fn angular_radius(&self) -> f64 {
        self.angular_radius
    }

    /// Points on the horizon circle at `num_points` evenly spaced angles
    /// over `[0, 2π)`. Deterministic companion to the sampled disk.
    pub fn horizon_ring(&self, num_points: usize) -> Vec<Vector> {
        (0..num_points)
            .map(|i| {
                let angle = TAU * i as f64 / num_points as f64;
                &self.circle_center
                    + &(&(&self.plane_u * (self.circle_radius * angle.cos()))
                        + &(&self.plane_v * (self.circle_radius * angle.sin())))
            })
            .collect()
    }
}

impl EdgeProvider for SampledDiskProvider {
    /// Draws up to `num_points` surface points inside the visible disk.
    ///
    /// Samples whose rays miss the sphere (a numerical edge case at the very
    /// rim) are skipped, so the result may be slightly shorter than
    /// `num_points`.
    fn surface_points(&self, rng: &mut dyn RngCore, num_points: usize) -> EdgePoints {
        let mut points = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            // Area-uniform draw inside the angular disk.
            let r = rng.gen::<f64>().sqrt();
            let theta = rng.gen_range(0.0..TAU);
            let angular_x = r * self.angular_radius * theta.cos();
            let angular_y = r * self.angular_radius * theta.sin();

            // Small-angle conversion of the angular offset to a ray
            // direction.
            let direction = &(&self.to_body + &(&self.plane_u * angular_x))
                + &(&self.plane_v * angular_y);
            let direction = match direction.normalize() {
                Ok(direction) => direction,
                Err(_) => continue,
            };

            // Intersect the ray with the sphere: |p + t·dir|² = R².
            let b = 2.0 * self.position.dot(&direction);
            let c = self.position.dot(&self.position) - self.body_radius * self.body_radius;
            let discriminant = b * b - 4.0 * c;
            if discriminant < 0.0 {
                continue;
            }
            // The smaller root is the near side of the sphere.
            let t = (-b - discriminant.sqrt()) / 2.0;
            if t > 0.0 {
                points.push(&self.position + &(&direction * t));
            }
        }
        EdgePoints {
            center: self.circle_center.clone(),
            points,
        }
    }

    fn horizon_circle(&self) -> HorizonCircle {
        HorizonCircle {
            center: self.circle_center.clone(),
            radius: self.circle_radius,
            angular_radius: self.angular_radius,
        }
    }
}
