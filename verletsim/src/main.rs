use verletsim::{Scenario, ScenarioConfig, Simulation};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Headless fixed-timestep N-body driver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file, resolved under `scenarios/` unless it is an existing path
    #[arg(short, default_value = "three_body.yaml")]
    file_name: String,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Override the real-time duration of the run, in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Override the simulation speed multiplier
    #[arg(short, long)]
    speed: Option<f64>,
}

/// One of trace, debug, info, warn, error (case-insensitive)
fn parse_log_level(level: &str) -> Result<Level> {
    level
        .parse::<Level>()
        .with_context(|| format!("unknown log level {level:?} (expected trace, debug, info, warn or error)"))
}

fn init_logging(level: &str) -> Result<()> {
    let level = parse_log_level(level)?;

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn report(sim: &Simulation) {
    for (i, b) in sim.bodies().iter().enumerate() {
        let (x, y) = (b.position().x, b.position().y);
        let (vx, vy) = (b.velocity().x, b.velocity().y);
        println!(
            "body {i}: m = {:.4e}  x = ({x:.6e}, {y:.6e})  v = ({vx:.6e}, {vy:.6e})  trail = {}",
            b.mass(),
            b.trail().len()
        );
    }
    let com = sim.center_of_mass();
    println!(
        "center of mass: M = {:.4e}  x = ({:.6e}, {:.6e})  v = ({:.6e}, {:.6e})",
        com.total_mass(),
        com.position().x,
        com.position().y,
        com.velocity().x,
        com.velocity().y
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(duration) = args.duration {
        scenario_cfg.driver.duration = duration;
    }
    if let Some(speed) = args.speed {
        scenario_cfg.driver.speed = speed;
    }

    let Scenario { driver, mut simulation } =
        Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;

    info!(
        bodies = simulation.bodies().len(),
        dt = simulation.parameters().dt,
        fps = driver.fps,
        duration = driver.duration,
        "Starting simulation"
    );

    // Latch the energy baseline at t = 0
    simulation.energy_drift_percent();

    let frame_dt = driver.frame_dt();
    let frames_per_report = driver.fps.round().max(1.0) as u64;

    for frame in 1..=driver.frames() {
        simulation.advance(frame_dt);

        if frame % frames_per_report == 0 {
            let drift = simulation.energy_drift_percent();
            let com = simulation.center_of_mass();
            info!(
                t = simulation.time(),
                steps = simulation.steps(),
                drift_percent = drift,
                com_x = com.position().x,
                com_y = com.position().y,
                "Progress"
            );
        }
    }

    let drift = simulation.energy_drift_percent();
    info!(
        t = simulation.time(),
        steps = simulation.steps(),
        drift_percent = drift,
        max_sampled_drift = simulation.energy().max_abs_drift(),
        "Finished"
    );
    report(&simulation);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_is_parsed_case_insensitively() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
    }

    #[test]
    fn unknown_log_level_is_an_error() {
        let err = parse_log_level("verbose").unwrap_err();
        assert!(format!("{err}").contains("verbose"));
        assert!(parse_log_level("").is_err());
    }
}
