//! Settings dialog values
//!
//! Plain numbers collected before a run. A front end may persist them as JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::sim::{BoundaryTopology, SimConfig};

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub particle_count: usize,
    /// Lower mass bound; masses span `[m, 1.4 m)`
    pub mass_multiplier: f64,
    /// Velocity components span `[-v, v)`
    pub velocity_multiplier: f64,
    /// Collision restitution (1 = elastic)
    pub impulse: f64,
    pub topology: BoundaryTopology,
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            mass_multiplier: DEFAULT_MASS_MULTIPLIER,
            velocity_multiplier: DEFAULT_VELOCITY_MULTIPLIER,
            impulse: DEFAULT_IMPULSE,
            topology: BoundaryTopology::Toroidal,
            seed: 0,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        log::info!("Loaded settings: {} particles, {}", settings.particle_count, settings.topology.as_str());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Map onto a full simulation config (validated)
    pub fn to_config(&self) -> Result<SimConfig> {
        let defaults = SimConfig::default();
        let v = self.velocity_multiplier.abs();
        let config = SimConfig {
            seed: self.seed,
            particle_count: self.particle_count,
            mass_range: [self.mass_multiplier, self.mass_multiplier * MASS_SPREAD],
            velocity_range: [-v, v],
            topology: self.topology,
            collisions: crate::sim::CollisionResolver {
                restitution: self.impulse,
                ..defaults.collisions
            },
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }
}
