//! Horizon Projection Demo
//!
//! Simulates one exposure: places a pinhole camera at a satellite position,
//! computes the planet's visible edge with the chosen strategy, projects it
//! onto the sensor, and prints capture statistics (or the full JSON report).
//!
//! Usage:
//! ```bash
//! cargo run --example horizon_projection -- \
//!   --position 7378137 0 0 \
//!   --orientation 180 0 0 \
//!   --focal-length 0.012
//! ```

use clap::Parser;
use horizon_tools::scene::{CaptureOptions, SceneProjection, DEFAULT_LEO_THRESHOLD_M};
use horizon_tools::{
    Attitude, CameraIntrinsics, EdgeProvider, PinholeCamera, SampledDiskProvider, Spheroid,
    TangentCircleProvider, Vector,
};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Satellite horizon projection tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Satellite position (x, y, z) in meters
    #[arg(long, num_args = 3, required = true, allow_negative_numbers = true)]
    position: Vec<f64>,

    /// Camera orientation (ra, de, roll) in degrees
    #[arg(long, num_args = 3, required = true, allow_negative_numbers = true)]
    orientation: Vec<f64>,

    /// Edge strategy: tangent (exact circle) or sampled (Monte-Carlo disk)
    #[arg(long, default_value = "tangent")]
    method: String,

    /// Focal length in meters
    #[arg(long, default_value_t = horizon_tools::camera::DEFAULT_FOCAL_LENGTH_M)]
    focal_length: f64,

    /// Pixel size in meters
    #[arg(long, default_value_t = horizon_tools::camera::DEFAULT_PIXEL_SIZE_M)]
    pixel_size: f64,

    /// Horizontal resolution in pixels
    #[arg(long, default_value_t = horizon_tools::camera::DEFAULT_RESOLUTION_PX)]
    x_resolution: f64,

    /// Vertical resolution in pixels
    #[arg(long, default_value_t = horizon_tools::camera::DEFAULT_RESOLUTION_PX)]
    y_resolution: f64,

    /// Lowest orbit altitude above the body center (in meters)
    #[arg(long, default_value_t = DEFAULT_LEO_THRESHOLD_M)]
    leo_threshold: f64,

    /// Number of edge points to generate
    #[arg(long, default_value_t = horizon_tools::edge::DEFAULT_EDGE_POINTS)]
    num_points: usize,

    /// Seed for the sampling random source
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the full capture report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let position = Vector::new3(cli.position[0], cli.position[1], cli.position[2]);
    let orientation = Attitude::from_degrees(
        cli.orientation[0],
        cli.orientation[1],
        cli.orientation[2],
    );
    let intrinsics = CameraIntrinsics {
        focal_length: cli.focal_length,
        pixel_size: cli.pixel_size,
        x_resolution: cli.x_resolution,
        y_resolution: cli.y_resolution,
    };

    let spheroid = Spheroid::wgs84();
    let camera = PinholeCamera::new(position.clone(), &orientation, intrinsics)?;
    info!(
        "camera at {position}, fov {:.1} x {:.1} deg",
        camera.fov_horizontal().to_degrees(),
        camera.fov_vertical().to_degrees()
    );

    let provider: Box<dyn EdgeProvider> = match cli.method.as_str() {
        "tangent" => Box::new(TangentCircleProvider::new(
            &position,
            spheroid.mean_radius(),
        )?),
        "sampled" => Box::new(SampledDiskProvider::new(&position, &spheroid)?),
        other => {
            return Err(format!(
                "Unsupported method: {other}. Supported methods: tangent, sampled"
            )
            .into());
        }
    };

    let options = CaptureOptions {
        num_points: cli.num_points,
        leo_threshold: cli.leo_threshold,
    };
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let scene = SceneProjection::capture(&camera, provider.as_ref(), &mut rng, &options)?;

    if !scene.captures_edge() {
        error!("the produced image does not capture the body's edge");
        std::process::exit(1);
    }
    if scene.dropped_points > 0 {
        warn!("the produced image cuts off {} points", scene.dropped_points);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&scene.to_report())?);
    } else {
        println!(
            "{:.1}% of the horizon is in the camera",
            scene.visible_fraction * 100.0
        );
        println!(
            "horizon circle: radius {:.0} m, angular radius {:.3} deg",
            scene.horizon.radius,
            scene.horizon.angular_radius.to_degrees()
        );
        if let Some(center) = &scene.center {
            println!("projected center: {center} px");
        }
    }

    Ok(())
}
