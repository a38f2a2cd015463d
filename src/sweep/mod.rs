//! Systematic sweep parameter generation.
//!
//! Given a camera standoff distance and sensor parameters, computes the
//! boresight angles at which the body's edge crosses the frame, padded by an
//! edge-padding fraction, and renders them as the argument strings a sweep
//! driver passes to the image generator. The subprocess orchestration itself
//! lives outside this crate.

use serde::Serialize;
use std::f64::consts::PI;

use crate::body::Spheroid;
use crate::spatial::GeometryError;

/// Inputs for a sweep over camera angles at a fixed standoff distance.
#[derive(Debug, Clone, Copy)]
pub struct SweepParams {
    /// Camera distance from the body center in meters.
    pub distance: f64,
    /// Focal length in meters.
    pub focal_length: f64,
    /// Sensor resolution in pixels (square sensor).
    pub resolution: f64,
    /// Physical pixel size in meters.
    pub pixel_size: f64,
    /// Number of boresight angles to generate.
    pub num_angles: usize,
    /// Edge-padding fraction in [0, 1]: how far inside the frame edge the
    /// horizon is kept.
    pub padding: f64,
}

/// One sweep entry: a boresight angle and the generator arguments for it.
#[derive(Debug, Clone, Serialize)]
pub struct SweepEntry {
    /// Boresight offset from the body center direction, in degrees.
    pub boresight_angle_deg: f64,
    /// `--position` argument string.
    pub position_args: String,
    /// `--orientation` argument string (ra, de, roll in degrees).
    pub orientation_args: String,
}

/// Coverage diagnostics for a standoff distance.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Coverage {
    pub inscribed_angle_rad: f64,
    pub inscribed_angle_deg: f64,
    pub angular_diameter_deg: f64,
    pub distance_km: f64,
    pub altitude_km: f64,
}

/// Boresight angles in radians that keep the body's edge inside the padded
/// frame.
///
/// The range runs from the inscribed angle minus the padded half field of
/// view up to the inscribed angle plus it, floored so the edge never leaves
/// through the opposite side of the frame.
///
/// # Errors
///
/// [`GeometryError::CameraInsideBody`] when `distance` is at or below the
/// body's mean radius.
pub fn camera_angles(params: &SweepParams, body: &Spheroid) -> Result<Vec<f64>, GeometryError> {
    let radius = body.mean_radius();
    if params.distance <= radius {
        return Err(GeometryError::CameraInsideBody {
            distance: params.distance,
            radius,
        });
    }

    let half_fov =
        ((params.resolution * params.pixel_size) / (2.0 * params.focal_length)).atan();
    let inscribed_angle = (radius / params.distance).asin();

    let upper = inscribed_angle + half_fov * (1.0 - params.padding);
    let lower = inscribed_angle - half_fov * (1.0 - params.padding);
    let absolute_lower = -inscribed_angle + half_fov * (1.0 + params.padding);
    let lower = lower.max(absolute_lower);

    Ok(linspace(lower, upper, params.num_angles))
}

/// Renders the sweep as position/orientation argument pairs.
///
/// The camera sits on the negative x axis at the standoff distance; the spin
/// orientation is fixed at π, splitting each boresight angle into its
/// right-ascension and declination components with zero roll.
pub fn sweep_entries(params: &SweepParams, body: &Spheroid) -> Result<Vec<SweepEntry>, GeometryError> {
    let spin = PI;
    let entries = camera_angles(params, body)?
        .into_iter()
        .map(|angle| {
            let angle_deg = angle.to_degrees();
            let ra_component = spin.sin() * angle_deg;
            let de_component = spin.cos() * angle_deg;
            SweepEntry {
                boresight_angle_deg: angle_deg,
                position_args: format!("{} 0 0", -params.distance),
                orientation_args: format!("{ra_component:.2} {de_component:.2} 0"),
            }
        })
        .collect();
    Ok(entries)
}

/// Coverage diagnostics for a standoff distance.
///
/// # Errors
///
/// [`GeometryError::CameraInsideBody`] when `distance` is at or below the
/// body's mean radius.
pub fn coverage(distance: f64, body: &Spheroid) -> Result<Coverage, GeometryError> {
    let radius = body.mean_radius();
    if distance <= radius {
        return Err(GeometryError::CameraInsideBody { distance, radius });
    }
    let inscribed_angle = (radius / distance).asin();
    Ok(Coverage {
        inscribed_angle_rad: inscribed_angle,
        inscribed_angle_deg: inscribed_angle.to_degrees(),
        angular_diameter_deg: (2.0 * inscribed_angle).to_degrees(),
        distance_km: distance / 1000.0,
        altitude_km: (distance - radius) / 1000.0,
    })
}

fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..count)
            .map(|i| start + (end - start) * i as f64 / (count - 1) as f64)
            .collect(),
    }
}
