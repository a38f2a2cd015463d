//! Attitude Pairs Demo
//!
//! Generates the matched local/reference attitude pairs for a calibration
//! run and prints the ready-to-edit commands for the downstream image
//! generator and distance estimator.
//!
//! Usage:
//! ```bash
//! cargo run --example attitude_pairs -- \
//!   --calibration-attitude 30 10 45 \
//!   --num-attitude-pairs 3
//! ```

use clap::Parser;
use horizon_tools::calibrate::{produce_attitude_pairs, AttitudePair};
use horizon_tools::{Attitude, RotationBasis};
use rand::rngs::StdRng;
use rand::SeedableRng;

const CALIBRATION_BANNER: &str = "========== CALIBRATION ATTITUDES ==========";
const DISTANCE_BANNER: &str = "========== DISTANCE ATTITUDES ==========";

/// Calibration attitude-pair generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Local orientation (ra, de, roll) in degrees for the first test pair;
    /// random when omitted
    #[arg(long, num_args = 3, allow_negative_numbers = true)]
    local_attitude: Option<Vec<f64>>,

    /// Euler angles of the calibration rotation, to reuse a particular
    /// calibration; random when omitted
    #[arg(long, num_args = 3, allow_negative_numbers = true)]
    calibration_attitude: Option<Vec<f64>>,

    /// Number of test attitude pairs to generate (at least 1)
    #[arg(long, default_value_t = 1)]
    num_attitude_pairs: usize,

    /// Seed for the random attitude source
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn print_attitude(banner: &str, attitude: &Attitude) {
    println!(
        "{banner:25} RA: {:>7.3}, DE: {:>7.3}, ROLL: {:>7.3}",
        attitude.right_ascension(),
        attitude.declination(),
        attitude.roll()
    );
}

fn print_pair(pair: &AttitudePair) {
    print_attitude("Local Attitude: ", &pair.local);
    print_attitude("Reference Attitude: ", &pair.reference);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let basis_from_args = |args: &Option<Vec<f64>>, rng: &mut StdRng| match args {
        Some(angles) => {
            RotationBasis::from_attitude(&Attitude::from_degrees(angles[0], angles[1], angles[2]))
        }
        None => RotationBasis::random(rng),
    };

    let local = basis_from_args(&cli.local_attitude, &mut rng);
    let calibration = basis_from_args(&cli.calibration_attitude, &mut rng);

    let set = produce_attitude_pairs(
        Some(local),
        &calibration,
        cli.num_attitude_pairs,
        &mut rng,
    )?;

    println!("\n{CALIBRATION_BANNER}\n");
    print_attitude("Calibration Attitude: ", &set.calibration);
    print_pair(&set.calibration_pair);
    println!("{}\n\n", set.calibration_command());

    println!("{DISTANCE_BANNER}\n");
    for (i, pair) in set.test_pairs.iter().enumerate() {
        println!("===== TEST PAIR {} =====\n", i + 1);
        print_pair(pair);
        println!("{}\n", pair.generator_command());
        println!("{}", pair.estimator_command());
        if i != set.test_pairs.len() - 1 {
            println!("\n");
        }
    }

    Ok(())
}
