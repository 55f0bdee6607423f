//! Simulation container
//!
//! Owns the particle collection and the strategies chosen at construction.
//! `step` is the only way to advance or mutate the particles.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::CollisionResolver;
use super::config::{SimConfig, validate_collisions, validate_forces};
use super::force::ForceSet;
use super::particle::Particle;
use super::snapshot::ParticleView;
use super::tick::{TickStats, tick};
use super::topology::{BoundaryTopology, Domain};
use crate::error::{Result, SimError, ensure_positive};

#[derive(Debug, Clone)]
pub struct Simulation {
    pub(super) seed: u64,
    pub(super) domain: Domain,
    pub(super) topology: BoundaryTopology,
    pub(super) forces: ForceSet,
    pub(super) collisions: CollisionResolver,
    pub(super) dt: f64,
    /// Completed ticks
    pub(super) time_ticks: u64,
    /// Simulated time
    pub(super) time: f64,
    /// Stable order; pairs are visited `i < j`
    pub(super) particles: Vec<Particle>,
}

impl Simulation {
    /// Build a simulation with a randomly seeded particle set
    pub fn new(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(config.seed);

        let particles = (0..config.particle_count)
            .map(|i| {
                let mass = sample(&mut rng, config.mass_range);
                let pos = DVec2::new(
                    sample(&mut rng, [0.0, config.width]),
                    sample(&mut rng, [0.0, config.height]),
                );
                let vel = DVec2::new(
                    sample(&mut rng, config.velocity_range),
                    sample(&mut rng, config.velocity_range),
                );
                Particle::new(i as u32 + 1, pos, vel, mass, mass * config.radius_per_mass)
            })
            .collect();

        let sim = Self::assemble(config, particles)?;
        log::info!(
            "Simulation seeded: {} particles, {}x{} {} domain, dt={}, seed={}",
            sim.particles.len(),
            sim.domain.width,
            sim.domain.height,
            sim.topology.as_str(),
            sim.dt,
            sim.seed
        );
        Ok(sim)
    }

    /// Build a simulation from explicit particles, using the domain and
    /// strategies of `config` (its seeding fields are ignored)
    pub fn with_particles(config: &SimConfig, particles: Vec<Particle>) -> Result<Self> {
        ensure_positive("dt", config.dt)?;
        validate_collisions(&config.collisions)?;
        validate_forces(&config.forces)?;
        for p in &particles {
            validate_particle(p)?;
        }
        Self::assemble(config, particles)
    }

    fn assemble(config: &SimConfig, mut particles: Vec<Particle>) -> Result<Self> {
        let domain = config.domain()?;
        for p in particles.iter_mut() {
            p.force = DVec2::ZERO;
            config.topology.confine(&domain, &mut p.pos, &mut p.vel);
        }
        Ok(Self {
            seed: config.seed,
            domain,
            topology: config.topology,
            forces: config.forces.clone(),
            collisions: config.collisions,
            dt: config.dt,
            time_ticks: 0,
            time: 0.0,
            particles,
        })
    }

    /// Advance by the fixed timestep
    pub fn step(&mut self) -> Result<TickStats> {
        let dt = self.dt;
        tick(self, dt)
    }

    /// Advance by an explicit timestep
    pub fn step_with(&mut self, dt: f64) -> Result<TickStats> {
        ensure_positive("dt", dt)?;
        tick(self, dt)
    }

    pub fn set_dt(&mut self, dt: f64) -> Result<()> {
        ensure_positive("dt", dt)?;
        self.dt = dt;
        Ok(())
    }

    /// Owned copy of positions and radii for rendering
    pub fn snapshot(&self) -> Vec<ParticleView> {
        self.particles.iter().map(ParticleView::from).collect()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn topology(&self) -> BoundaryTopology {
        self.topology
    }

    pub fn forces(&self) -> &ForceSet {
        &self.forces
    }

    pub fn collisions(&self) -> &CollisionResolver {
        &self.collisions
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.particles.iter().map(Particle::momentum).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    pub fn potential_energy(&self) -> f64 {
        self.forces
            .potential_energy(&self.particles, &self.topology, &self.domain)
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}

/// Uniform sample from `[min, max)`, or `min` for a degenerate range
fn sample(rng: &mut Pcg32, [min, max]: [f64; 2]) -> f64 {
    if min < max { rng.random_range(min..max) } else { min }
}

fn validate_particle(p: &Particle) -> Result<()> {
    ensure_positive("particle mass", p.mass)?;
    if !(p.radius.is_finite() && p.radius >= 0.0) {
        return Err(SimError::OutOfRange {
            field: "particle radius",
            value: p.radius,
            expected: "[0, inf)",
        });
    }
    if !(p.pos.is_finite() && p.vel.is_finite()) {
        return Err(SimError::OutOfRange {
            field: "particle state",
            value: f64::NAN,
            expected: "finite position and velocity",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_inside_domain() {
        let cfg = SimConfig::default();
        let sim = Simulation::new(&cfg).unwrap();
        assert_eq!(sim.particles().len(), cfg.particle_count);
        for p in sim.particles() {
            assert!(sim.domain().contains(p.pos));
            assert!(p.mass >= cfg.mass_range[0] && p.mass < cfg.mass_range[1]);
            assert_eq!(p.radius, p.mass);
            assert!(p.vel.x >= cfg.velocity_range[0] && p.vel.x < cfg.velocity_range[1]);
            assert_eq!(p.force, DVec2::ZERO);
        }
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let cfg = SimConfig {
            seed: 42,
            ..Default::default()
        };
        let a = Simulation::new(&cfg).unwrap();
        let b = Simulation::new(&cfg).unwrap();
        assert_eq!(a.particles(), b.particles());

        let c = Simulation::new(&SimConfig { seed: 43, ..cfg }).unwrap();
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn test_degenerate_ranges_are_constant() {
        let cfg = SimConfig {
            mass_range: [5.0, 5.0],
            velocity_range: [0.0, 0.0],
            ..Default::default()
        };
        let sim = Simulation::new(&cfg).unwrap();
        assert!(sim.particles().iter().all(|p| p.mass == 5.0 && p.vel == DVec2::ZERO));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let cfg = SimConfig {
            height: -1.0,
            ..Default::default()
        };
        assert!(Simulation::new(&cfg).is_err());
    }

    #[test]
    fn test_with_particles_validates() {
        let cfg = SimConfig::default();
        let bad_mass = vec![Particle::new(1, DVec2::ZERO, DVec2::ZERO, 0.0, 1.0)];
        assert!(Simulation::with_particles(&cfg, bad_mass).is_err());

        let bad_radius = vec![Particle::new(1, DVec2::ZERO, DVec2::ZERO, 1.0, -1.0)];
        assert!(Simulation::with_particles(&cfg, bad_radius).is_err());

        let bad_pos = vec![Particle::new(1, DVec2::new(f64::NAN, 0.0), DVec2::ZERO, 1.0, 1.0)];
        assert!(Simulation::with_particles(&cfg, bad_pos).is_err());
    }

    #[test]
    fn test_with_particles_wraps_into_domain() {
        let cfg = SimConfig::default();
        let ps = vec![Particle::new(1, DVec2::new(-10.0, 1300.0), DVec2::ZERO, 1.0, 1.0)];
        let sim = Simulation::with_particles(&cfg, ps).unwrap();
        assert_eq!(sim.particles()[0].pos, DVec2::new(1590.0, 100.0));
    }

    #[test]
    fn test_set_dt() {
        let mut sim = Simulation::new(&SimConfig::default()).unwrap();
        assert!(sim.set_dt(0.0).is_err());
        sim.set_dt(0.005).unwrap();
        assert_eq!(sim.dt(), 0.005);
        assert!(sim.step_with(-1.0).is_err());
        assert_eq!(sim.ticks(), 0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut sim = Simulation::new(&SimConfig::default()).unwrap();
        let before = sim.snapshot();
        assert_eq!(before.len(), sim.particles().len());
        sim.step().unwrap();
        let after = sim.snapshot();
        assert_ne!(before, after);
    }
}
