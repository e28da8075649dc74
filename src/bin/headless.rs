//! Run the simulation without a window and log diagnostics.
//!
//! Usage: `headless [ticks] [width] [height] [seed]`
//! Defaults: 1000 ticks in a 1280x720 plane, random seed.
//! Set `RUST_LOG=debug` for placement and resize details.

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use ballsim::{SimConfig, Simulation};
use log::{error, info};

const REPORT_EVERY: u64 = 100;

/// Parse the positional argument at `index`, or fall back to `default` when absent.
fn arg<T>(args: &[String], index: usize, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("could not parse argument {index}: {raw:?}")),
        None => Ok(default),
    }
}

fn run(args: &[String]) -> Result<()> {
    let ticks: u64 = arg(args, 1, 1000)?;
    let width: f64 = arg(args, 2, 1280.0)?;
    let height: f64 = arg(args, 3, 720.0)?;
    let seed = match args.get(4) {
        Some(_) => Some(arg::<u64>(args, 4, 0)?),
        None => None,
    };

    let mut sim = Simulation::new(&SimConfig::default(), [width, height], seed)
        .with_context(|| format!("could not set up a {width}x{height} simulation"))?;
    let e0 = sim.kinetic_energy();
    info!("initial kinetic energy {e0:.6}, momentum {:?}", sim.momentum());

    while sim.tick() < ticks {
        sim.step();
        if sim.tick() % REPORT_EVERY == 0 || sim.tick() == ticks {
            let e = sim.kinetic_energy();
            info!(
                "tick {}: energy {e:.6} (drift {:.3e}), momentum {:?}, overlapping pairs {}",
                sim.tick(),
                (e - e0) / e0.max(f64::MIN_POSITIVE),
                sim.momentum(),
                sim.overlapping_pairs()
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
