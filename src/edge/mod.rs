//! Visible-edge (horizon) providers.
//!
//! Two interchangeable strategies compute the apparent edge of the body as
//! seen from a satellite position:
//!
//! - [`TangentCircleProvider`] solves the tangent circle of an idealized
//!   sphere exactly; every surface point it emits lies on the sphere.
//! - [`SampledDiskProvider`] Monte-Carlo samples the visible disk of the
//!   mean-radius spheroid and derives the horizon from the analytic sighting
//!   cone; its surface points are independent ray/sphere intersections.
//!
//! Both implement [`EdgeProvider`], so projection glue is written once.

pub mod sampled;
pub mod tangent;

pub use sampled::SampledDiskProvider;
pub use tangent::TangentCircleProvider;

use rand::RngCore;

use crate::spatial::Vector;

/// Number of edge points generated when the caller has no preference.
pub const DEFAULT_EDGE_POINTS: usize = 360 * 10;

/// Surface points from an edge provider, in the celestial frame.
#[derive(Debug, Clone)]
pub struct EdgePoints {
    /// Center of the visible edge (the horizon-circle center).
    pub center: Vector,
    /// Ordered surface points on the body.
    pub points: Vec<Vector>,
}

/// Analytic description of the horizon circle, for overlays and statistics.
#[derive(Debug, Clone)]
pub struct HorizonCircle {
    /// Circle center in the celestial frame.
    pub center: Vector,
    /// Circle radius in meters.
    pub radius: f64,
    /// Angular radius of the body in radians as seen from the camera.
    pub angular_radius: f64,
}

/// A strategy producing the visible edge of the body from a camera position.
pub trait EdgeProvider {
    /// Generates surface points representing the visible edge or disk.
    ///
    /// Deterministic providers ignore `rng`. Sampling providers may return
    /// fewer than `num_points` points when individual samples miss the body.
    fn surface_points(&self, rng: &mut dyn RngCore, num_points: usize) -> EdgePoints;

    /// The analytic horizon circle for this position.
    fn horizon_circle(&self) -> HorizonCircle;
}

/// Two orthonormal vectors spanning the plane perpendicular to `direction`
/// (which must be a 3D unit vector).
///
/// The seed axis is +z unless `direction` is nearly parallel to it, in which
/// case +x is used instead.
pub(crate) fn plane_basis(direction: &Vector) -> (Vector, Vector) {
    let seed = if direction[2].abs() < 0.9 {
        Vector::new3(0.0, 0.0, 1.0)
    } else {
        Vector::new3(1.0, 0.0, 0.0)
    };
    let u = direction
        .cross(&seed)
        .and_then(|v| v.normalize())
        .expect("seed axis is never parallel to direction");
    let v = direction
        .cross(&u)
        .expect("plane basis vectors are 3D");
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_basis_is_orthonormal() {
        for direction in [
            Vector::new3(1.0, 0.0, 0.0),
            Vector::new3(0.0, 0.0, 1.0),
            Vector::new3(0.577, 0.577, 0.577).normalize().unwrap(),
            Vector::new3(-0.2, 0.3, 0.93).normalize().unwrap(),
        ] {
            let (u, v) = plane_basis(&direction);
            assert_relative_eq!(u.norm(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(u.dot(&direction), 0.0, epsilon = 1e-9);
            assert_relative_eq!(v.dot(&direction), 0.0, epsilon = 1e-9);
            assert_relative_eq!(u.dot(&v), 0.0, epsilon = 1e-9);
        }
    }
}
