//! Horizon Tools Library
//!
//! A Rust library for simulating what a body-fixed pinhole camera aboard a
//! satellite observes of a spherical or oblate-spheroid planet. The crate
//! provides:
//! - Vector, attitude, and coordinate-frame primitives with the astronomy
//!   (right ascension, declination, roll) convention
//! - An ideal pinhole camera model with sensor-bounds and field-of-view
//!   diagnostics
//! - Two interchangeable visible-edge strategies: an exact tangent-circle
//!   solution and Monte-Carlo disk sampling with an analytic horizon cone
//! - Scene projection glue producing the 2D points and horizon metadata a
//!   renderer or distance-estimation pipeline consumes
//! - Matched attitude-pair generation for the calibration workflow and
//!   sweep parameter generation for systematic simulation runs
//!
//! Rendering, telemetry-file parsing, and subprocess orchestration are
//! external collaborators and not part of this crate.

pub mod body;
pub mod calibrate;
pub mod camera;
pub mod edge;
pub mod scene;
pub mod spatial;
pub mod sweep;

// Re-export commonly used types
pub use body::{Spheroid, EARTH_EQUATORIAL_RADIUS_M, EARTH_POLAR_RADIUS_M};
pub use camera::{CameraError, CameraIntrinsics, PinholeCamera};
pub use edge::{
    EdgePoints, EdgeProvider, HorizonCircle, SampledDiskProvider, TangentCircleProvider,
};
pub use scene::{CaptureOptions, SceneProjection};
pub use spatial::{Attitude, CoordinateFrame, GeometryError, RotationBasis, Vector};
