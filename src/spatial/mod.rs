//! Spatial primitives: vectors, attitudes, rotation bases, and coordinate
//! frames.
//!
//! Everything in this module works in the celestial (planet-centered,
//! inertial) frame unless a [`CoordinateFrame`] says otherwise. Angles are
//! astronomy-style: right ascension and declination locate the boresight on
//! the celestial sphere, roll spins the sensor about it.

pub mod attitude;
pub mod frame;
pub mod vector;

pub use attitude::{Attitude, RotationBasis};
pub use frame::CoordinateFrame;
pub use vector::Vector;

/// Maximum absolute difference for two scalars to compare equal.
///
/// Positions are in meters, so this tolerance is far below anything the
/// simulation can resolve while still absorbing accumulated floating-point
/// error in chained transforms.
pub const FLOAT_TOLERANCE: f64 = 1e-3;

/// Returns true iff `a` and `b` differ by less than [`FLOAT_TOLERANCE`].
pub fn float_equals(a: f64, b: f64) -> bool {
    (a - b).abs() < FLOAT_TOLERANCE
}

/// Errors raised by the geometry engine.
///
/// These all signal invalid input or configuration, never a transient
/// condition: callers should not retry them. Advisory conditions (field of
/// view possibly too narrow, horizon partially visible) are not errors and
/// are reported as flags on result types instead.
#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    #[error("expected a vector of dimension {expected}, but got dimension {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("camera position is inside the body (distance from center {distance:.0} m, body radius {radius:.0} m)")]
    CameraInsideBody { distance: f64, radius: f64 },
    #[error("cannot normalize a zero-length vector")]
    ZeroVectorNormalize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_equals_within_tolerance() {
        assert!(float_equals(1.0, 1.0 + 5e-4));
        assert!(float_equals(-2.5, -2.5));
        assert!(!float_equals(1.0, 1.002));
    }
}
