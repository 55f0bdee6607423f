//! Construction parameters for a simulation run

use serde::{Deserialize, Serialize};

use super::collision::CollisionResolver;
use super::force::{ForceField, ForceSet, PairPotential};
use super::topology::{BoundaryTopology, Domain};
use crate::consts::*;
use crate::error::{Result, SimError, ensure_positive, ensure_range};

/// Everything needed to seed and run a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for the initial particle set
    pub seed: u64,
    pub particle_count: usize,
    pub width: f64,
    pub height: f64,
    /// Masses drawn uniformly from `[min, max)`
    pub mass_range: [f64; 2],
    /// Each velocity component drawn uniformly from `[min, max)`
    pub velocity_range: [f64; 2],
    /// Radius as a multiple of mass
    pub radius_per_mass: f64,
    pub dt: f64,
    pub topology: BoundaryTopology,
    pub forces: ForceSet,
    pub collisions: CollisionResolver,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            particle_count: DEFAULT_PARTICLE_COUNT,
            width: DOMAIN_WIDTH,
            height: DOMAIN_HEIGHT,
            mass_range: [DEFAULT_MASS_MULTIPLIER, DEFAULT_MASS_MULTIPLIER * MASS_SPREAD],
            velocity_range: [-DEFAULT_VELOCITY_MULTIPLIER, DEFAULT_VELOCITY_MULTIPLIER],
            radius_per_mass: 1.0,
            dt: SIM_DT,
            topology: BoundaryTopology::Toroidal,
            forces: ForceSet::new().with(ForceField::Pairwise(PairPotential::default())),
            collisions: CollisionResolver::default(),
        }
    }
}

impl SimConfig {
    pub fn domain(&self) -> Result<Domain> {
        Domain::new(self.width, self.height)
    }

    /// Reject configurations that can't produce a valid initial state
    pub fn validate(&self) -> Result<()> {
        self.domain()?;
        ensure_positive("dt", self.dt)?;
        ensure_range("mass", self.mass_range)?;
        ensure_positive("minimum mass", self.mass_range[0])?;
        ensure_range("velocity", self.velocity_range)?;
        if !(self.radius_per_mass.is_finite() && self.radius_per_mass >= 0.0) {
            return Err(SimError::OutOfRange {
                field: "radius per mass",
                value: self.radius_per_mass,
                expected: "[0, inf)",
            });
        }
        validate_collisions(&self.collisions)?;
        validate_forces(&self.forces)
    }
}

pub(crate) fn validate_collisions(collisions: &CollisionResolver) -> Result<()> {
    ensure_positive("collision correction", collisions.correction)?;
    if collisions.correction > 1.0 {
        return Err(SimError::OutOfRange {
            field: "collision correction",
            value: collisions.correction,
            expected: "(0, 1]",
        });
    }
    if !(0.0..=1.0).contains(&collisions.restitution) {
        return Err(SimError::OutOfRange {
            field: "restitution",
            value: collisions.restitution,
            expected: "[0, 1]",
        });
    }
    Ok(())
}

/// Strength signs are free; only shape parameters must be sane
pub(crate) fn validate_forces(forces: &ForceSet) -> Result<()> {
    for field in &forces.fields {
        match field {
            ForceField::None => {}
            ForceField::Pairwise(p) => {
                if !p.strength.is_finite() {
                    return Err(SimError::OutOfRange {
                        field: "potential strength",
                        value: p.strength,
                        expected: "a finite number",
                    });
                }
                ensure_positive("sigma scale", p.sigma_scale)?;
                ensure_positive("potential cutoff", p.cutoff)?;
                ensure_positive("minimum separation", p.min_separation)?;
            }
            ForceField::Uniform(u) => {
                if !(u.direction.is_finite() && u.magnitude.is_finite()) {
                    return Err(SimError::OutOfRange {
                        field: "uniform field magnitude",
                        value: u.magnitude,
                        expected: "a finite vector",
                    });
                }
            }
        }
    }
    Ok(())
}
