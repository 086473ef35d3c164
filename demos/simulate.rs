use std::{
    error::Error,
    io::{self, StdoutLock, Write},
};

use clap::{Parser, ValueEnum};
use halferth_orbits::{body_presets, Clock, Embedding, HalferthDate, OrbitTrait, System};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simulate")]
#[command(about = "Prints where the bodies of the Halferth system are, frame by frame")]
struct Cli {
    /// How the moons' orbital planes are placed in the scene
    #[arg(short, long, value_enum, default_value_t = Scene::Flat)]
    scene: Scene,

    /// Number of frames to print
    #[arg(short, long, default_value_t = 10)]
    frames: u64,

    /// Frames per real second during playback
    #[arg(long, default_value_t = 100.0)]
    fps: f64,

    /// Real seconds one Halferth year takes during playback
    #[arg(long, default_value_t = 60.0)]
    duration: f64,

    /// Place Halferth on a solar orbit with this semi-major axis, in km
    #[arg(long)]
    solar_distance: Option<f64>,

    /// Frames to skip between printed frames
    #[arg(long, default_value_t = 0)]
    skip: u64,

    /// Load the system from a TOML file instead of the presets
    #[cfg(feature = "serde")]
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scene {
    /// Top-down plot of the moons
    Flat,
    /// Moons only, with Halferth's pole pointing up
    Upright,
    /// Moons tilted with Halferth's axis
    Tilted,
}

impl Scene {
    fn embedding(self) -> Embedding {
        match self {
            Scene::Flat => Embedding::Flat,
            Scene::Upright => Embedding::Upright,
            Scene::Tilted => body_presets::halferth_tilt(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut system = build_system(&cli)?;

    describe_system(&system);

    let mut lock = io::stdout().lock();
    eprintln!("Simulating {} frames...", cli.frames);
    for frame in 0..cli.frames {
        let time = system.clock.time();
        writeln!(&mut lock, "=== Frame {frame} (t = {time:.3} days) ===")?;
        if let Some(date) = HalferthDate::from_days(time) {
            writeln!(
                &mut lock,
                "Day {} of the year, {} season, {date}",
                date.day_of_year(),
                date.season()
            )?;
        }
        print_all_body_positions(&mut lock, &system)?;

        system.warp(cli.skip + 1);
    }

    Ok(())
}

fn build_system(cli: &Cli) -> Result<System, Box<dyn Error>> {
    if let Some(system) = load_config(cli)? {
        return Ok(system);
    }

    let clock = Clock::from_playback(body_presets::HALFERTH_YEAR_DAYS, cli.fps, cli.duration)?;
    let mut system = System::new(clock);

    let halferth = system.add_body(body_presets::halferth(cli.solar_distance)?, None)?;

    let embedding = cli.scene.embedding();
    system.add_body(
        body_presets::mother().with_embedding(embedding),
        Some(halferth),
    )?;
    system.add_body(
        body_presets::daughter().with_embedding(embedding),
        Some(halferth),
    )?;

    Ok(system)
}

#[cfg(feature = "serde")]
fn load_config(cli: &Cli) -> Result<Option<System>, Box<dyn Error>> {
    let Some(path) = &cli.config else {
        return Ok(None);
    };

    let document = std::fs::read_to_string(path)?;
    let config = halferth_orbits::config::SystemConfig::from_toml_str(&document)?;
    Ok(Some(config.build()?))
}

#[cfg(not(feature = "serde"))]
fn load_config(_cli: &Cli) -> Result<Option<System>, Box<dyn Error>> {
    Ok(None)
}

fn describe_system(system: &System) {
    println!("{system}");
    for id in system.get_body_ids() {
        let Some(body) = system.get_body(id) else {
            continue;
        };
        println!("    {}: {:?}", id, body.name);
        println!("      Radius: {}", body.radius);
        println!("      Embedding: {:?}", body.embedding);
        if let Some(period) = body.get_spin_period() {
            println!("      Spin period: {period}");
        }
        if let Some(orbit) = &body.orbit {
            println!("      Position: {:?}", system.get_body_position(id));
            println!("        Semi-major axis: {}", orbit.get_semi_major_axis());
            println!("        Eccentricity: {}", orbit.get_eccentricity());
            println!("        Period: {}", orbit.get_orbital_period());
            println!("        Periapsis: {}", orbit.get_periapsis());
            println!("        Apoapsis: {}", orbit.get_apoapsis());
            println!(
                "        Mean anomaly at epoch: {}",
                orbit.get_mean_anomaly_at_epoch()
            );
        }
    }
}

fn print_all_body_positions(lock: &mut StdoutLock, system: &System) -> io::Result<()> {
    for (id, position) in system.positions() {
        let Some(body) = system.get_body(id) else {
            continue;
        };
        if body.get_spin_period().is_some() {
            let rotation = system.get_body_rotation(id).unwrap_or_default();
            writeln!(lock, "{}: {position:?}, turned {rotation:.3} rad", body.name)?;
        } else {
            writeln!(lock, "{}: {position:?}", body.name)?;
        }
    }

    Ok(())
}
