//! Coordinate frames: an origin plus an orthonormal basis built from an
//! attitude.

use nalgebra::{Matrix3, Vector3};

use crate::spatial::{Attitude, GeometryError, Vector};

/// A positioned, oriented coordinate frame in the celestial system.
///
/// The basis is constructed directly from the attitude angles:
///
/// 1. the boresight `x̂ = (cos(de)·cos(ra), cos(de)·sin(ra), sin(de))`,
/// 2. `ŷ_nominal = (-sin(ra), cos(ra), 0)`,
/// 3. `ẑ_nominal = x̂ × ŷ_nominal`,
/// 4. `(ŷ, ẑ)` are `(ŷ_nominal, ẑ_nominal)` rotated within their plane by
///    the negated roll angle.
///
/// The default frame is the celestial frame itself: identity basis, origin
/// at the body center.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateFrame {
    origin: Vector,
    basis: [Vector; 3],
}

impl CoordinateFrame {
    /// Creates a frame at `origin` oriented by `attitude`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DimensionMismatch`] if `origin` is not 3D.
    pub fn new(origin: Vector, attitude: &Attitude) -> Result<Self, GeometryError> {
        origin.require_dimension(3)?;

        let ra = attitude.right_ascension_rad();
        let de = attitude.declination_rad();
        // Roll is negated because it turns clockwise about the boresight.
        let roll = -attitude.roll_rad();

        // Step 1: form the unit x vector from right ascension and declination.
        let x_hat = Vector::new3(de.cos() * ra.cos(), de.cos() * ra.sin(), de.sin());

        // Step 2: form the nominal y vector from right ascension only.
        let y_hat_nominal = Vector::new3(-ra.sin(), ra.cos(), 0.0);

        // Step 3: form the nominal z vector by crossing x with nominal y.
        let z_hat_nominal = x_hat
            .cross(&y_hat_nominal)
            .expect("basis vectors are 3D by construction");

        // Steps 4 and 5: rotate the nominal y and z vectors about the
        // boresight by the roll angle.
        let z_hat = &(&z_hat_nominal * roll.cos()) - &(&y_hat_nominal * roll.sin());
        let y_hat = &(&y_hat_nominal * roll.cos()) + &(&z_hat_nominal * roll.sin());

        // Step 6: store the basis and origin.
        Ok(Self {
            origin,
            basis: [x_hat, y_hat, z_hat],
        })
    }

    pub fn origin(&self) -> &Vector {
        &self.origin
    }

    /// The basis axes `(x̂, ŷ, ẑ)` expressed in the celestial frame.
    pub fn basis(&self) -> &[Vector; 3] {
        &self.basis
    }

    /// Expresses celestial-frame points in this frame.
    ///
    /// Each point is translated by the frame origin and then re-expressed in
    /// the basis by solving `B · local = point - origin` exactly, with the
    /// basis vectors as the columns of `B`. This is an exact change of
    /// basis, not a projection; `B` is always invertible because the basis
    /// is orthonormal by construction.
    ///
    /// # Errors
    ///
    /// [`GeometryError::DimensionMismatch`] if any point is not 3D.
    pub fn to_frame(&self, points: &[Vector]) -> Result<Vec<Vector>, GeometryError> {
        let basis = Matrix3::from_columns(&[
            axis_as_vector3(&self.basis[0]),
            axis_as_vector3(&self.basis[1]),
            axis_as_vector3(&self.basis[2]),
        ]);
        let decomposition = basis.lu();

        let mut transformed = Vec::with_capacity(points.len());
        for point in points {
            point.require_dimension(3)?;
            let relative = point - &self.origin;
            let local = decomposition
                .solve(&axis_as_vector3(&relative))
                .expect("orthonormal basis is always invertible");
            transformed.push(Vector::new3(local[0], local[1], local[2]));
        }
        Ok(transformed)
    }
}

impl Default for CoordinateFrame {
    fn default() -> Self {
        Self {
            origin: Vector::zero3(),
            basis: [
                Vector::new3(1.0, 0.0, 0.0),
                Vector::new3(0.0, 1.0, 0.0),
                Vector::new3(0.0, 0.0, 1.0),
            ],
        }
    }
}

fn axis_as_vector3(v: &Vector) -> Vector3<f64> {
    Vector3::new(v[0], v[1], v[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::RotationBasis;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_frame_is_celestial() {
        let frame = CoordinateFrame::default();
        assert_eq!(frame.origin(), &Vector::zero3());
        assert_eq!(frame.basis()[0], Vector::new3(1.0, 0.0, 0.0));
        assert_eq!(frame.basis()[1], Vector::new3(0.0, 1.0, 0.0));
        assert_eq!(frame.basis()[2], Vector::new3(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_basis_is_orthonormal_for_arbitrary_attitudes() {
        for &(ra, de, roll) in &[
            (0.0, 0.0, 0.0),
            (45.0, 30.0, 60.0),
            (180.0, 0.0, 0.0),
            (300.0, -75.0, 200.0),
            (123.4, 56.7, 89.0),
            (10.0, 90.0, 0.0),
        ] {
            let attitude = Attitude::from_degrees(ra, de, roll);
            let frame = CoordinateFrame::new(Vector::zero3(), &attitude).unwrap();
            let [x, y, z] = frame.basis().clone();

            assert_relative_eq!(x.norm(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(y.norm(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(z.norm(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(x.dot(&y), 0.0, epsilon = 1e-6);
            assert_relative_eq!(y.dot(&z), 0.0, epsilon = 1e-6);
            assert_relative_eq!(z.dot(&x), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_frame_construction_agrees_with_rotation_basis() {
        for &(ra, de, roll) in &[(0.0, 0.0, 0.0), (45.0, 30.0, 60.0), (280.0, -40.0, 120.0)] {
            let attitude = Attitude::from_degrees(ra, de, roll);
            let frame = CoordinateFrame::new(Vector::zero3(), &attitude).unwrap();
            let axes = RotationBasis::from_attitude(&attitude).axes();

            for (frame_axis, basis_axis) in frame.basis().iter().zip(axes.iter()) {
                for i in 0..3 {
                    assert_relative_eq!(frame_axis[i], basis_axis[i], epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_head_on_attitude_points_back_along_x() {
        let attitude = Attitude::from_degrees(180.0, 0.0, 0.0);
        let frame = CoordinateFrame::new(Vector::new3(1000.0, 0.0, 0.0), &attitude).unwrap();

        assert_eq!(frame.basis()[0], Vector::new3(-1.0, 0.0, 0.0));

        // The body center sits 1000 m down the boresight.
        let local = frame.to_frame(&[Vector::zero3()]).unwrap();
        assert_eq!(local[0], Vector::new3(1000.0, 0.0, 0.0));
    }

    #[test]
    fn test_to_frame_is_exact_for_rotated_frames() {
        let attitude = Attitude::from_degrees(45.0, 30.0, 60.0);
        let origin = Vector::new3(10.0, -20.0, 5.0);
        let frame = CoordinateFrame::new(origin.clone(), &attitude).unwrap();

        // A point one unit along each basis axis must come back as the
        // canonical coordinates (1, 0, 0), (0, 1, 0), (0, 0, 1).
        let [x, y, z] = frame.basis().clone();
        let world = vec![&origin + &x, &origin + &y, &origin + &z];
        let local = frame.to_frame(&world).unwrap();

        assert_eq!(local[0], Vector::new3(1.0, 0.0, 0.0));
        assert_eq!(local[1], Vector::new3(0.0, 1.0, 0.0));
        assert_eq!(local[2], Vector::new3(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_to_frame_rejects_2d_points() {
        let frame = CoordinateFrame::default();
        let err = frame.to_frame(&[Vector::new2(1.0, 2.0)]).unwrap_err();
        assert!(matches!(err, GeometryError::DimensionMismatch { .. }));
    }
}
