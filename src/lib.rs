//! Blickers - 2D disk particle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (forces, collisions, boundary topology)
//! - `settings`: Plain numeric settings collected by a front end
//! - `error`: Configuration and invariant errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::Settings;
pub use sim::{Simulation, SimConfig};

/// Simulation configuration constants
pub mod consts {
    /// Default domain size
    pub const DOMAIN_WIDTH: f64 = 1600.0;
    pub const DOMAIN_HEIGHT: f64 = 1200.0;

    /// Fixed simulation timestep
    pub const SIM_DT: f64 = 0.01;

    /// Settings dialog defaults
    pub const DEFAULT_PARTICLE_COUNT: usize = 100;
    pub const DEFAULT_MASS_MULTIPLIER: f64 = 10.0;
    pub const DEFAULT_VELOCITY_MULTIPLIER: f64 = 12.0;
    pub const DEFAULT_IMPULSE: f64 = 1.0;

    /// Upper mass bound as a multiple of the mass multiplier
    pub const MASS_SPREAD: f64 = 1.4;

    /// Fraction of an overlap removed per collision
    pub const COLLISION_CORRECTION: f64 = 0.95;

    /// Lennard-Jones well depth
    pub const POTENTIAL_STRENGTH: f64 = 1.0;
    /// Cutoff distance in units of sigma
    pub const POTENTIAL_CUTOFF: f64 = 2.5;
    /// Distance floor in units of sigma
    pub const MIN_SEPARATION: f64 = 0.5;

    /// Below this length a separation is treated as coincident
    pub const COINCIDENT_EPSILON: f64 = 1e-9;
}
