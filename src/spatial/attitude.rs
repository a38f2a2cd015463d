//! Attitude angles and orthonormal rotation bases.
//!
//! An [`Attitude`] is the astronomy-style Euler triple (right ascension,
//! declination, roll). A [`RotationBasis`] is the equivalent direction-cosine
//! matrix, used wherever rotations have to be composed or inverted.
//!
//! The attitude/euler sign convention (declination and roll negated on the
//! way into the intrinsic Z-Y-X composition, negated again on the way back)
//! appears at several call sites across the crate. It lives in exactly one
//! place, [`euler_zyx_from_attitude`] / [`attitude_from_euler_zyx`], so the
//! convention cannot drift between modules.

use nalgebra::{Quaternion, Rotation3, UnitQuaternion};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

use crate::spatial::Vector;

const FULL_TURN_DEG: f64 = 360.0;
const HALF_TURN_DEG: f64 = 180.0;

/// Orientation on the celestial sphere as (right ascension, declination,
/// roll), stored in degrees.
///
/// Construction normalizes each angle independently by iterative wraparound
/// (repeatedly adding or subtracting a full turn), never by clamping, so
/// arbitrarily large or negative inputs are accepted. After construction:
///
/// - right ascension ∈ [0, 360)
/// - declination ∈ (-180, 180]
/// - roll ∈ [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    right_ascension: f64,
    declination: f64,
    roll: f64,
}

impl Attitude {
    /// Creates an attitude from angles in degrees, normalizing each angle
    /// into its canonical range.
    pub fn from_degrees(right_ascension: f64, declination: f64, roll: f64) -> Self {
        let mut ra = right_ascension;
        while ra >= FULL_TURN_DEG {
            ra -= FULL_TURN_DEG;
        }
        while ra < 0.0 {
            ra += FULL_TURN_DEG;
        }

        let mut de = declination;
        while de > HALF_TURN_DEG {
            de -= FULL_TURN_DEG;
        }
        while de <= -HALF_TURN_DEG {
            de += FULL_TURN_DEG;
        }

        let mut roll = roll;
        while roll >= FULL_TURN_DEG {
            roll -= FULL_TURN_DEG;
        }
        while roll < 0.0 {
            roll += FULL_TURN_DEG;
        }

        Self {
            right_ascension: ra,
            declination: de,
            roll,
        }
    }

    /// Creates an attitude from angles in radians.
    pub fn from_radians(right_ascension: f64, declination: f64, roll: f64) -> Self {
        Self::from_degrees(
            right_ascension.to_degrees(),
            declination.to_degrees(),
            roll.to_degrees(),
        )
    }

    pub fn right_ascension(&self) -> f64 {
        self.right_ascension
    }

    pub fn declination(&self) -> f64 {
        self.declination
    }

    pub fn roll(&self) -> f64 {
        self.roll
    }

    pub fn right_ascension_rad(&self) -> f64 {
        self.right_ascension.to_radians()
    }

    pub fn declination_rad(&self) -> f64 {
        self.declination.to_radians()
    }

    pub fn roll_rad(&self) -> f64 {
        self.roll.to_radians()
    }
}

impl fmt::Display for Attitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}, {:.2})",
            self.right_ascension, self.declination, self.roll
        )
    }
}

/// Maps an attitude to the intrinsic Z-Y-X euler triple `(yaw, pitch, roll)`
/// in radians, applying the crate-wide sign convention: declination and roll
/// are negated before composing into basis vectors.
pub fn euler_zyx_from_attitude(attitude: &Attitude) -> (f64, f64, f64) {
    (
        attitude.right_ascension_rad(),
        -attitude.declination_rad(),
        -attitude.roll_rad(),
    )
}

/// Inverse of [`euler_zyx_from_attitude`]: maps an intrinsic Z-Y-X euler
/// triple in radians back to an attitude, negating pitch and roll again on
/// the way out.
pub fn attitude_from_euler_zyx(yaw: f64, pitch: f64, roll: f64) -> Attitude {
    Attitude::from_radians(yaw, -pitch, -roll)
}

/// An orthonormal 3x3 rotation (direction-cosine matrix) between two frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationBasis {
    rotation: Rotation3<f64>,
}

impl RotationBasis {
    pub fn identity() -> Self {
        Self {
            rotation: Rotation3::identity(),
        }
    }

    /// Builds the basis that [`attitude`](Attitude) describes.
    ///
    /// Equivalent to the explicit six-step construction in
    /// [`CoordinateFrame::new`](crate::spatial::CoordinateFrame::new); the
    /// basis axes are the columns of the rotation matrix.
    pub fn from_attitude(attitude: &Attitude) -> Self {
        let (yaw, pitch, roll) = euler_zyx_from_attitude(attitude);
        Self {
            // nalgebra composes from_euler_angles as Rz(yaw) * Ry(pitch) * Rx(roll).
            rotation: Rotation3::from_euler_angles(roll, pitch, yaw),
        }
    }

    /// Recovers the attitude this basis represents.
    ///
    /// At declination ±90° the yaw/roll split is degenerate (gimbal lock);
    /// the euler extraction then follows nalgebra's convention of assigning
    /// the full in-plane angle to yaw.
    pub fn to_attitude(&self) -> Attitude {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        attitude_from_euler_zyx(yaw, pitch, roll)
    }

    /// Draws a uniformly distributed random rotation from `rng`.
    pub fn random(rng: &mut dyn RngCore) -> Self {
        // Shoemake's subgroup algorithm: three uniforms to a uniform unit
        // quaternion.
        let u1: f64 = rng.gen();
        let u2: f64 = rng.gen();
        let u3: f64 = rng.gen();

        let a = (1.0 - u1).sqrt();
        let b = u1.sqrt();
        let quaternion = Quaternion::new(
            b * (TAU * u3).cos(),
            a * (TAU * u2).sin(),
            a * (TAU * u2).cos(),
            b * (TAU * u3).sin(),
        );

        Self {
            rotation: Rotation3::from(UnitQuaternion::from_quaternion(quaternion)),
        }
    }

    /// Composes this rotation with another.
    ///
    /// With `inverse == false` the result is `self * other`; with
    /// `inverse == true` the inverse of `self` is pre-multiplied instead,
    /// undoing this rotation from `other`.
    pub fn rotate(&self, other: &RotationBasis, inverse: bool) -> RotationBasis {
        let rotation = if inverse {
            self.rotation.inverse() * other.rotation
        } else {
            self.rotation * other.rotation
        };
        RotationBasis { rotation }
    }

    /// The basis axes (the columns of the rotation matrix) as 3D vectors.
    pub fn axes(&self) -> [Vector; 3] {
        let m = self.rotation.matrix();
        [
            Vector::new3(m[(0, 0)], m[(1, 0)], m[(2, 0)]),
            Vector::new3(m[(0, 1)], m[(1, 1)], m[(2, 1)]),
            Vector::new3(m[(0, 2)], m[(1, 2)], m[(2, 2)]),
        ]
    }
}

impl Default for RotationBasis {
    fn default() -> Self {
        Self::identity()
    }
}
