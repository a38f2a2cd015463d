//! Projection glue: runs an edge provider's output through a camera and
//! gathers the statistics a renderer or analyzer needs.
//!
//! Advisory conditions found along the way (field of view possibly too
//! narrow to hold the whole horizon, camera below the low-orbit threshold,
//! points dropped behind the focal plane) never halt the capture: the best-
//! effort result is returned with flags set and a warning logged.

use log::warn;
use rand::RngCore;
use serde::Serialize;

use crate::camera::PinholeCamera;
use crate::edge::{EdgeProvider, HorizonCircle, DEFAULT_EDGE_POINTS};
use crate::spatial::{GeometryError, Vector};

/// Lowest low-orbit altitude in meters; positions below it are flagged.
pub const DEFAULT_LEO_THRESHOLD_M: f64 = 2_000_000.0;

/// Knobs for a capture.
#[derive(Debug, Clone, Copy)]
pub struct CaptureOptions {
    /// How many surface points to request from the provider.
    pub num_points: usize,
    /// Altitude floor for the below-low-orbit advisory, in meters from the
    /// body center.
    pub leo_threshold: f64,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            num_points: DEFAULT_EDGE_POINTS,
            leo_threshold: DEFAULT_LEO_THRESHOLD_M,
        }
    }
}

/// A projected point with its sensor-bounds verdict.
#[derive(Debug, Clone)]
pub struct ProjectedPoint {
    /// Sensor coordinates in pixels, origin at the image center.
    pub position: Vector,
    /// Whether the point lands on the sensor.
    pub in_bounds: bool,
}

/// Non-fatal conditions noticed during a capture.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Advisories {
    /// The sensor may be too narrow to hold the whole horizon.
    pub fov_may_clip_horizon: bool,
    /// The camera sits below the low-orbit threshold.
    pub below_leo_threshold: bool,
    /// Some provider points fell behind the focal plane and were dropped.
    pub points_behind_focal_plane: bool,
}

/// Everything a renderer or analyzer needs from one simulated exposure.
#[derive(Debug, Clone)]
pub struct SceneProjection {
    /// Projected surface points, in provider order, with per-point
    /// in-bounds booleans. Points behind the focal plane are absent.
    pub points: Vec<ProjectedPoint>,
    /// Projection of the horizon-circle center, if it survived projection.
    pub center: Option<Vector>,
    /// Analytic horizon metadata from the provider, for overlays.
    pub horizon: HorizonCircle,
    /// Fraction of the projected points that land on the sensor.
    pub visible_fraction: f64,
    /// Number of provider points dropped behind the focal plane.
    pub dropped_points: usize,
    pub advisories: Advisories,
}

impl SceneProjection {
    /// Projects `provider`'s visible edge through `camera`.
    ///
    /// # Errors
    ///
    /// Propagates [`GeometryError`] from the frame transform and projection;
    /// advisory conditions are never errors.
    pub fn capture(
        camera: &PinholeCamera,
        provider: &dyn EdgeProvider,
        rng: &mut dyn RngCore,
        options: &CaptureOptions,
    ) -> Result<Self, GeometryError> {
        let position = camera.frame().origin();
        let horizon = provider.horizon_circle();

        let mut advisories = Advisories::default();

        if position.norm() < options.leo_threshold {
            advisories.below_leo_threshold = true;
            warn!(
                "camera position {position} is below the low-orbit threshold ({:.0} m)",
                options.leo_threshold
            );
        }

        // Compare the sensor's angular span against the horizon circle's
        // apparent size; a smaller span cannot capture the full edge head-on.
        let intrinsics = camera.intrinsics();
        let sensor_span = intrinsics.pixel_size
            * intrinsics.x_resolution.max(intrinsics.y_resolution)
            / intrinsics.focal_length;
        let apparent_size = horizon.radius / (position - &horizon.center).norm();
        if sensor_span < apparent_size {
            advisories.fov_may_clip_horizon = true;
            warn!(
                "camera parameters may not capture the full horizon \
                 (sensor span ratio {sensor_span:.3}, apparent edge ratio {apparent_size:.3})"
            );
        }

        // Provider output -> camera frame -> sensor plane.
        let edge = provider.surface_points(rng, options.num_points);
        let camera_points = camera.to_camera_space(&edge.points)?;
        let camera_center = camera.to_camera_space(std::slice::from_ref(&edge.center))?;

        let projected = camera.spatial_to_camera(&camera_points)?;
        let projected_center = camera.spatial_to_camera(&camera_center)?.pop();

        let dropped_points = camera_points.len() - projected.len();
        if dropped_points > 0 {
            advisories.points_behind_focal_plane = true;
            warn!("{dropped_points} edge points fell behind the focal plane and were dropped");
        }

        let mut points = Vec::with_capacity(projected.len());
        let mut in_bounds_count = 0usize;
        for position in projected {
            let in_bounds = camera.in_camera(&position)?;
            if in_bounds {
                in_bounds_count += 1;
            }
            points.push(ProjectedPoint { position, in_bounds });
        }

        let visible_fraction = if points.is_empty() {
            0.0
        } else {
            in_bounds_count as f64 / points.len() as f64
        };

        Ok(Self {
            points,
            center: projected_center,
            horizon,
            visible_fraction,
            dropped_points,
            advisories,
        })
    }

    /// True iff at least one projected point lands on the sensor.
    pub fn captures_edge(&self) -> bool {
        self.points.iter().any(|point| point.in_bounds)
    }

    /// Flattens the capture into a serializable report.
    pub fn to_report(&self) -> SceneReport {
        SceneReport {
            points: self
                .points
                .iter()
                .map(|p| [p.position[0], p.position[1]])
                .collect(),
            in_bounds: self.points.iter().map(|p| p.in_bounds).collect(),
            center: self.center.as_ref().map(|c| [c[0], c[1]]),
            horizon_radius_m: self.horizon.radius,
            horizon_angular_radius_rad: self.horizon.angular_radius,
            visible_fraction: self.visible_fraction,
            dropped_points: self.dropped_points,
            advisories: self.advisories,
        }
    }
}

/// Serializable view of a [`SceneProjection`] for downstream tools.
#[derive(Debug, Clone, Serialize)]
pub struct SceneReport {
    pub points: Vec<[f64; 2]>,
    pub in_bounds: Vec<bool>,
    pub center: Option<[f64; 2]>,
    pub horizon_radius_m: f64,
    pub horizon_angular_radius_rad: f64,
    pub visible_fraction: f64,
    pub dropped_points: usize,
    pub advisories: Advisories,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::EARTH_EQUATORIAL_RADIUS_M;
    use crate::camera::CameraIntrinsics;
    use crate::edge::TangentCircleProvider;
    use crate::spatial::Attitude;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn head_on_setup(focal_length: f64) -> (PinholeCamera, TangentCircleProvider, Vector) {
        let position = Vector::new3(EARTH_EQUATORIAL_RADIUS_M + 1_000_000.0, 0.0, 0.0);
        let camera = PinholeCamera::new(
            position.clone(),
            &Attitude::from_degrees(180.0, 0.0, 0.0),
            CameraIntrinsics {
                focal_length,
                ..Default::default()
            },
        )
        .unwrap();
        let provider = TangentCircleProvider::new(&position, EARTH_EQUATORIAL_RADIUS_M).unwrap();
        (camera, provider, position)
    }

    #[test]
    fn test_head_on_horizon_projects_to_centered_circle() {
        let focal_length = 0.012;
        let (camera, provider, position) = head_on_setup(focal_length);

        let mut rng = StdRng::seed_from_u64(1);
        let scene = SceneProjection::capture(
            &camera,
            &provider,
            &mut rng,
            &CaptureOptions {
                num_points: 360,
                ..Default::default()
            },
        )
        .unwrap();

        // The circle center projects onto the image origin.
        let center = scene.center.as_ref().unwrap();
        assert_relative_eq!(center[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(center[1], 0.0, epsilon = 1e-6);

        // Every horizon point lands on a circle of the predicted radius.
        let circle = &scene.horizon;
        let depth = (&position - &circle.center).norm();
        let expected_radius =
            circle.radius * focal_length / depth / camera.intrinsics().pixel_size;
        for point in &scene.points {
            let image_radius =
                (point.position[0].powi(2) + point.position[1].powi(2)).sqrt();
            assert_relative_eq!(image_radius, expected_radius, max_relative = 1e-6);
        }

        assert_eq!(scene.dropped_points, 0);
        assert!(!scene.advisories.points_behind_focal_plane);
        assert!(scene.captures_edge());
        assert_relative_eq!(scene.visible_fraction, 1.0);
    }

    #[test]
    fn test_narrow_fov_sets_advisory_without_failing() {
        // A one-meter focal length sees a few hundredths of a degree; the
        // horizon cannot fit, but the capture still succeeds.
        let (camera, provider, _) = head_on_setup(1.0);

        let mut rng = StdRng::seed_from_u64(2);
        let scene = SceneProjection::capture(
            &camera,
            &provider,
            &mut rng,
            &CaptureOptions {
                num_points: 90,
                ..Default::default()
            },
        )
        .unwrap();

        assert!(scene.advisories.fov_may_clip_horizon);
        assert!(scene.visible_fraction < 1.0);
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let (camera, provider, _) = head_on_setup(0.012);
        let mut rng = StdRng::seed_from_u64(3);
        let scene = SceneProjection::capture(
            &camera,
            &provider,
            &mut rng,
            &CaptureOptions {
                num_points: 12,
                ..Default::default()
            },
        )
        .unwrap();

        let json = serde_json::to_string(&scene.to_report()).unwrap();
        assert!(json.contains("\"visible_fraction\""));
        assert!(json.contains("\"horizon_radius_m\""));
    }
}
