//! Matched attitude-pair generation for the calibration workflow.
//!
//! A calibration rotation `C` relates the reference orientation (what the
//! downstream estimator is told) to the local orientation (what the image
//! generator renders). This module produces one calibration pair and any
//! number of test pairs that all satisfy `local = C · reference`, plus the
//! pre-formatted command-line strings the two downstream tools consume.

use rand::RngCore;
use std::fmt::Write;

use crate::spatial::{Attitude, RotationBasis};

#[derive(thiserror::Error, Debug)]
pub enum CalibrateError {
    #[error("Must generate at least 1 test attitude pair")]
    NoPairsRequested,
}

/// One matched local/reference attitude pair.
#[derive(Debug, Clone)]
pub struct AttitudePair {
    pub local: Attitude,
    pub reference: Attitude,
}

/// Output of [`produce_attitude_pairs`].
#[derive(Debug, Clone)]
pub struct CalibrationSet {
    /// The calibration rotation itself, as an attitude.
    pub calibration: Attitude,
    /// The pair to feed the calibration step: the reference orientation is
    /// the identity-frame draw, the local one has the calibration rotation
    /// applied.
    pub calibration_pair: AttitudePair,
    /// Test pairs for the distance-estimation step.
    pub test_pairs: Vec<AttitudePair>,
}

/// Produces the calibration pair and `num_pairs` test pairs.
///
/// The first test pair keeps the supplied `local` orientation (a random one
/// is drawn when absent) and derives its reference by applying the inverse
/// calibration rotation; every further pair draws a fresh random reference
/// and derives the local side forward. All pairs therefore satisfy
/// `local = calibration.rotate(reference)` to within euler round-trip
/// tolerance (about 1e-2 degrees).
///
/// # Errors
///
/// [`CalibrateError::NoPairsRequested`] when `num_pairs` is zero.
pub fn produce_attitude_pairs(
    local: Option<RotationBasis>,
    calibration: &RotationBasis,
    num_pairs: usize,
    rng: &mut dyn RngCore,
) -> Result<CalibrationSet, CalibrateError> {
    if num_pairs < 1 {
        return Err(CalibrateError::NoPairsRequested);
    }

    // The calibration pair: a random reference with the calibration rotation
    // applied on the local side.
    let reference_cal = RotationBasis::random(rng);
    let local_cal = calibration.rotate(&reference_cal, false);
    let calibration_pair = AttitudePair {
        local: local_cal.to_attitude(),
        reference: reference_cal.to_attitude(),
    };

    let mut test_pairs = Vec::with_capacity(num_pairs);

    // The first test pair honors the supplied local orientation and works
    // backwards to its reference.
    let local_basis = local.unwrap_or_else(|| RotationBasis::random(rng));
    let reference_basis = calibration.rotate(&local_basis, true);
    test_pairs.push(AttitudePair {
        local: local_basis.to_attitude(),
        reference: reference_basis.to_attitude(),
    });

    // The rest draw a reference and derive the local side forward.
    for _ in 1..num_pairs {
        let reference_basis = RotationBasis::random(rng);
        let local_basis = calibration.rotate(&reference_basis, false);
        test_pairs.push(AttitudePair {
            local: local_basis.to_attitude(),
            reference: reference_basis.to_attitude(),
        });
    }

    Ok(CalibrationSet {
        calibration: calibration.to_attitude(),
        calibration_pair,
        test_pairs,
    })
}

/// Formats an attitude as the space-separated argument triple the image
/// generator accepts.
///
/// Angles are printed with `f64`'s shortest round-trip representation, so
/// the downstream tool parses back the exact same values.
pub fn generator_args(attitude: &Attitude) -> String {
    format!(
        "{} {} {}",
        attitude.right_ascension(),
        attitude.declination(),
        attitude.roll()
    )
}

/// Formats an attitude as the quoted argument the distance estimator
/// accepts.
pub fn estimator_args(attitude: &Attitude) -> String {
    format!("\"{}\"", generator_args(attitude))
}

impl AttitudePair {
    /// The image-generator invocation for this pair's local orientation.
    pub fn generator_command(&self) -> String {
        let mut cmd = String::new();
        let _ = writeln!(cmd, "Generator Command:");
        let _ = writeln!(cmd, "generator --position <position> \\");
        let _ = writeln!(cmd, "--orientation {} \\", generator_args(&self.local));
        let _ = writeln!(cmd, "<camera_parameters> \\");
        let _ = write!(cmd, "--filename <generated_image_name>");
        cmd
    }

    /// The distance-estimator invocation for this pair's reference
    /// orientation.
    pub fn estimator_command(&self) -> String {
        let mut cmd = String::new();
        let _ = writeln!(cmd, "Distance Command:");
        let _ = writeln!(cmd, "estimator distance \\");
        let _ = writeln!(cmd, "--calibration-data <calibration_file_name>.cal \\");
        let _ = writeln!(
            cmd,
            "--reference-orientation {} \\",
            estimator_args(&self.reference)
        );
        let _ = writeln!(cmd, "<camera_parameters> \\");
        let _ = write!(cmd, "--image <generated_image_name>");
        cmd
    }
}

impl CalibrationSet {
    /// The calibration invocation for the calibration pair.
    pub fn calibration_command(&self) -> String {
        let mut cmd = String::new();
        let _ = writeln!(cmd, "Calibration Command:");
        let _ = writeln!(cmd, "estimator calibration \\");
        let _ = writeln!(
            cmd,
            "--reference-orientation {} \\",
            estimator_args(&self.calibration_pair.reference)
        );
        let _ = writeln!(
            cmd,
            "--local-orientation {} \\",
            estimator_args(&self.calibration_pair.local)
        );
        let _ = write!(cmd, "--output-file <calibration_file_name>.cal");
        cmd
    }
}
