//! Blickers headless runner
//!
//! Drives the simulation at a fixed timestep without a window and logs
//! conservation diagnostics. Rendering front ends read `Simulation::snapshot`
//! between steps instead.

use blickers::Settings;
use blickers::sim::Simulation;

/// Ticks to run
const RUN_TICKS: u64 = 2000;
/// Diagnostics interval
const REPORT_EVERY: u64 = 250;

fn main() {
    env_logger::init();
    log::info!("Blickers (headless) starting...");

    if let Err(err) = run(&Settings::default()) {
        log::error!("Simulation aborted: {err}");
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> blickers::Result<()> {
    let config = settings.to_config()?;
    let mut sim = Simulation::new(&config)?;

    let p0 = sim.total_momentum();
    let e0 = sim.total_energy();
    let mut contacts = 0;

    while sim.ticks() < RUN_TICKS {
        contacts += sim.step()?.contacts;
        if sim.ticks() % REPORT_EVERY == 0 {
            log::debug!(
                "t={:.2} energy={:.3} (start {:.3}) momentum drift={:.3e} contacts={}",
                sim.time(),
                sim.total_energy(),
                e0,
                (sim.total_momentum() - p0).length(),
                contacts
            );
            contacts = 0;
        }
    }

    log::info!(
        "Finished {} ticks ({} particles, {} boundary)",
        sim.ticks(),
        sim.particles().len(),
        sim.topology().as_str()
    );
    Ok(())
}
