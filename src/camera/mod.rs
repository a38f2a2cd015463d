//! Pinhole camera: intrinsics, projection, and sensor-bounds tests.

pub mod pinhole;

pub use pinhole::PinholeCamera;

use serde::{Deserialize, Serialize};

use crate::spatial::GeometryError;

/// Default focal length in meters.
pub const DEFAULT_FOCAL_LENGTH_M: f64 = 0.085;

/// Default physical pixel size in meters.
pub const DEFAULT_PIXEL_SIZE_M: f64 = 20e-6;

/// Default sensor resolution in pixels (square sensor).
pub const DEFAULT_RESOLUTION_PX: f64 = 6000.0;

/// Physical sensor parameters of a pinhole camera.
///
/// All four values must be strictly positive; constructors and the YAML
/// loader validate this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length in meters.
    pub focal_length: f64,
    /// Physical pixel size in meters.
    pub pixel_size: f64,
    /// Horizontal sensor resolution in pixels.
    pub x_resolution: f64,
    /// Vertical sensor resolution in pixels.
    pub y_resolution: f64,
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self {
            focal_length: DEFAULT_FOCAL_LENGTH_M,
            pixel_size: DEFAULT_PIXEL_SIZE_M,
            x_resolution: DEFAULT_RESOLUTION_PX,
            y_resolution: DEFAULT_RESOLUTION_PX,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CameraError {
    #[error("Focal length must be positive")]
    FocalLengthMustBePositive,
    #[error("Pixel size must be positive")]
    PixelSizeMustBePositive,
    #[error("Resolution must be positive")]
    ResolutionMustBePositive,
    #[error("Invalid camera parameters: {0}")]
    InvalidParams(String),
    #[error("Failed to load YAML: {0}")]
    YamlError(String),
    #[error("IO Error: {0}")]
    IOError(String),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::IOError(err.to_string())
    }
}

impl From<yaml_rust::ScanError> for CameraError {
    fn from(err: yaml_rust::ScanError) -> Self {
        CameraError::YamlError(err.to_string())
    }
}

/// Common validation functions for camera parameters
pub mod validation {
    use super::*;

    pub fn validate_intrinsics(intrinsics: &CameraIntrinsics) -> Result<(), CameraError> {
        if intrinsics.focal_length <= 0.0 {
            return Err(CameraError::FocalLengthMustBePositive);
        }
        if intrinsics.pixel_size <= 0.0 {
            return Err(CameraError::PixelSizeMustBePositive);
        }
        if intrinsics.x_resolution <= 0.0 || intrinsics.y_resolution <= 0.0 {
            return Err(CameraError::ResolutionMustBePositive);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_intrinsics_are_valid() {
        validation::validate_intrinsics(&CameraIntrinsics::default()).unwrap();
    }

    #[test]
    fn test_validation_rejects_nonpositive_values() {
        let intrinsics = CameraIntrinsics {
            focal_length: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            validation::validate_intrinsics(&intrinsics),
            Err(CameraError::FocalLengthMustBePositive)
        ));

        let intrinsics = CameraIntrinsics {
            pixel_size: -1e-6,
            ..Default::default()
        };
        assert!(matches!(
            validation::validate_intrinsics(&intrinsics),
            Err(CameraError::PixelSizeMustBePositive)
        ));

        let intrinsics = CameraIntrinsics {
            y_resolution: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            validation::validate_intrinsics(&intrinsics),
            Err(CameraError::ResolutionMustBePositive)
        ));
    }
}
