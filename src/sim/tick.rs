//! Fixed timestep simulation tick
//!
//! One tick, in order:
//! 1. zero every particle's force
//! 2. accumulate the force fields
//! 3. kick: `v += f / m * dt`
//! 4. drift: `x += v * dt`, then map back into the domain
//! 5. resolve overlaps left by the drift
//!
//! Velocity is updated before position uses it (semi-implicit Euler).

use super::state::Simulation;
use crate::error::{Result, SimError};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Overlapping pairs resolved
    pub contacts: usize,
}

/// Advance the simulation by `dt`
pub fn tick(sim: &mut Simulation, dt: f64) -> Result<TickStats> {
    let Simulation {
        domain,
        topology,
        forces,
        collisions,
        particles,
        ..
    } = sim;

    for p in particles.iter_mut() {
        p.force = glam::DVec2::ZERO;
    }

    forces.accumulate(particles, topology, domain);

    for p in particles.iter_mut() {
        p.vel += p.force / p.mass * dt;
    }

    for p in particles.iter_mut() {
        p.pos += p.vel * dt;
        topology.confine(domain, &mut p.pos, &mut p.vel);
    }

    let contacts = collisions.resolve(particles, topology, domain);

    sim.time_ticks += 1;
    sim.time += dt;

    if let Some((index, quantity)) = sim
        .particles
        .iter()
        .enumerate()
        .find_map(|(i, p)| p.non_finite().map(|q| (i, q)))
    {
        log::error!(
            "Non-finite {} on particle {} at tick {} (dt={})",
            quantity,
            index,
            sim.time_ticks,
            dt
        );
        return Err(SimError::NonFinite {
            index,
            quantity,
            tick: sim.time_ticks,
        });
    }

    log::trace!("Tick {}: {} contacts", sim.time_ticks, contacts);
    Ok(TickStats { contacts })
}
