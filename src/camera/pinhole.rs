//! The pinhole camera model.
//!
//! A [`PinholeCamera`] couples a [`CoordinateFrame`] (the camera pose) with
//! [`CameraIntrinsics`] and projects 3D camera-frame points onto the sensor
//! plane. The model is an ideal pinhole: all rays pass through the focal
//! point, no lens distortion.

use std::fs;
use std::io::Write;
use std::path::Path;
use yaml_rust::YamlLoader;

use crate::camera::{validation, CameraError, CameraIntrinsics};
use crate::spatial::{Attitude, CoordinateFrame, GeometryError, Vector};

/// An ideal pinhole camera at a fixed pose.
///
/// Sensor coordinates are in pixels with the origin at the image center,
/// x to the right and y up; the sensor spans `±resolution/2` on each axis.
/// The camera looks down its frame's `x̂` axis, so the first camera-frame
/// coordinate of a point is its depth.
#[derive(Debug, Clone, PartialEq)]
pub struct PinholeCamera {
    frame: CoordinateFrame,
    intrinsics: CameraIntrinsics,
}

impl PinholeCamera {
    /// Creates a camera at `position` oriented by `orientation`.
    ///
    /// # Errors
    ///
    /// [`CameraError::FocalLengthMustBePositive`] (or the pixel-size and
    /// resolution analogues) for invalid intrinsics, and a wrapped
    /// [`GeometryError`] if `position` is not 3D.
    pub fn new(
        position: Vector,
        orientation: &Attitude,
        intrinsics: CameraIntrinsics,
    ) -> Result<Self, CameraError> {
        validation::validate_intrinsics(&intrinsics)?;
        let frame = CoordinateFrame::new(position, orientation)?;
        Ok(Self { frame, intrinsics })
    }

    pub fn frame(&self) -> &CoordinateFrame {
        &self.frame
    }

    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    /// Expresses celestial-frame points in the camera frame.
    pub fn to_camera_space(&self, points: &[Vector]) -> Result<Vec<Vector>, GeometryError> {
        self.frame.to_frame(points)
    }

    /// Projects camera-frame points through the pinhole onto the sensor.
    ///
    /// For each point with depth (first coordinate) at least the focal
    /// length, the image point is
    /// `focal_length / depth / pixel_size · (lateral_1, lateral_2)`.
    /// Points closer than the focal plane are dropped from the output
    /// entirely rather than marked invalid: callers detect loss by
    /// comparing input and output lengths, and an all-dropped batch yields
    /// an empty vector.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DimensionMismatch`] if any input point is not 3D.
    pub fn spatial_to_camera(&self, points: &[Vector]) -> Result<Vec<Vector>, GeometryError> {
        let mut projected = Vec::with_capacity(points.len());
        for point in points {
            point.require_dimension(3)?;
            let depth = point[0];
            if depth < self.intrinsics.focal_length {
                continue;
            }
            let factor = self.intrinsics.focal_length / depth / self.intrinsics.pixel_size;
            projected.push(Vector::new2(factor * point[1], factor * point[2]));
        }
        Ok(projected)
    }

    /// True iff a projected 2D point lands on the sensor.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DimensionMismatch`] unless `point` is strictly 2D.
    pub fn in_camera(&self, point: &Vector) -> Result<bool, GeometryError> {
        point.require_dimension(2)?;
        let x_limit = self.intrinsics.x_resolution / 2.0;
        let y_limit = self.intrinsics.y_resolution / 2.0;
        Ok(point[0].abs() <= x_limit && point[1].abs() <= y_limit)
    }

    /// Horizontal field of view in radians. Diagnostics only; projection
    /// never consults it.
    pub fn fov_horizontal(&self) -> f64 {
        let sensor_width = self.intrinsics.x_resolution * self.intrinsics.pixel_size;
        2.0 * (sensor_width / (2.0 * self.intrinsics.focal_length)).atan()
    }

    /// Vertical field of view in radians.
    pub fn fov_vertical(&self) -> f64 {
        let sensor_height = self.intrinsics.y_resolution * self.intrinsics.pixel_size;
        2.0 * (sensor_height / (2.0 * self.intrinsics.focal_length)).atan()
    }

    /// Diagonal field of view in radians.
    pub fn fov_diagonal(&self) -> f64 {
        let sensor_width = self.intrinsics.x_resolution * self.intrinsics.pixel_size;
        let sensor_height = self.intrinsics.y_resolution * self.intrinsics.pixel_size;
        let sensor_diagonal = (sensor_width * sensor_width + sensor_height * sensor_height).sqrt();
        2.0 * (sensor_diagonal / (2.0 * self.intrinsics.focal_length)).atan()
    }
}

impl CameraIntrinsics {
    /// Loads camera intrinsics from a YAML file.
    ///
    /// The file carries a `cam0` block with `focal_length` and `pixel_size`
    /// in meters and a two-element `resolution` array in pixels:
    ///
    /// ```yaml
    /// cam0:
    ///   camera_model: pinhole
    ///   focal_length: 0.085
    ///   pixel_size: 0.00002
    ///   resolution: [6000, 6000]
    /// ```
    ///
    /// # Errors
    ///
    /// [`CameraError::IOError`] for unreadable files,
    /// [`CameraError::YamlError`] for malformed YAML,
    /// [`CameraError::InvalidParams`] for missing or mistyped fields, and
    /// the validation errors for non-positive values.
    pub fn load_from_yaml(path: &str) -> Result<Self, CameraError> {
        let contents = fs::read_to_string(path)?;
        let docs = YamlLoader::load_from_str(&contents)?;
        let doc = &docs[0];

        let focal_length = doc["cam0"]["focal_length"].as_f64().ok_or_else(|| {
            CameraError::InvalidParams("YAML missing 'focal_length' or not a float".to_string())
        })?;
        let pixel_size = doc["cam0"]["pixel_size"].as_f64().ok_or_else(|| {
            CameraError::InvalidParams("YAML missing 'pixel_size' or not a float".to_string())
        })?;
        let resolution_yaml = doc["cam0"]["resolution"].as_vec().ok_or_else(|| {
            CameraError::InvalidParams("YAML missing 'resolution' or not an array".to_string())
        })?;
        if resolution_yaml.len() != 2 {
            return Err(CameraError::InvalidParams(
                "Invalid resolution: expected two entries".to_string(),
            ));
        }
        let x_resolution = yaml_number(&resolution_yaml[0])
            .ok_or_else(|| CameraError::InvalidParams("Invalid x resolution".to_string()))?;
        let y_resolution = yaml_number(&resolution_yaml[1])
            .ok_or_else(|| CameraError::InvalidParams("Invalid y resolution".to_string()))?;

        let intrinsics = CameraIntrinsics {
            focal_length,
            pixel_size,
            x_resolution,
            y_resolution,
        };

        validation::validate_intrinsics(&intrinsics)?;

        Ok(intrinsics)
    }

    /// Saves the intrinsics to a YAML file in the format
    /// [`load_from_yaml`](Self::load_from_yaml) reads.
    pub fn save_to_yaml(&self, path: &str) -> Result<(), CameraError> {
        let yaml = serde_yaml::to_value(serde_yaml::Mapping::from_iter([(
            serde_yaml::Value::String("cam0".to_string()),
            serde_yaml::to_value(serde_yaml::Mapping::from_iter([
                (
                    serde_yaml::Value::String("camera_model".to_string()),
                    serde_yaml::Value::String("pinhole".to_string()),
                ),
                (
                    serde_yaml::Value::String("focal_length".to_string()),
                    serde_yaml::to_value(self.focal_length)
                        .map_err(|e| CameraError::YamlError(e.to_string()))?,
                ),
                (
                    serde_yaml::Value::String("pixel_size".to_string()),
                    serde_yaml::to_value(self.pixel_size)
                        .map_err(|e| CameraError::YamlError(e.to_string()))?,
                ),
                (
                    serde_yaml::Value::String("resolution".to_string()),
                    serde_yaml::to_value(vec![self.x_resolution, self.y_resolution])
                        .map_err(|e| CameraError::YamlError(e.to_string()))?,
                ),
            ]))
            .map_err(|e| CameraError::YamlError(e.to_string()))?,
        )]))
        .map_err(|e| CameraError::YamlError(e.to_string()))?;

        let yaml_string =
            serde_yaml::to_string(&yaml).map_err(|e| CameraError::YamlError(e.to_string()))?;

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| CameraError::IOError(e.to_string()))?;
            }
        }
        let mut file =
            fs::File::create(path).map_err(|e| CameraError::IOError(e.to_string()))?;
        file.write_all(yaml_string.as_bytes())
            .map_err(|e| CameraError::IOError(e.to_string()))?;

        Ok(())
    }
}

fn yaml_number(value: &yaml_rust::Yaml) -> Option<f64> {
    value.as_f64().or_else(|| value.as_i64().map(|v| v as f64))
}
