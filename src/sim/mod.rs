//! Deterministic simulation module
//!
//! The integration, force and collision core. This module must stay pure and deterministic:
//! - Fixed timestep per call
//! - Seeded RNG only (at construction)
//! - Stable pair order (`i < j` over the particle collection)
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod force;
pub mod particle;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod topology;

pub use collision::{CollisionResolver, Contact, exchange_normal_speeds};
pub use config::SimConfig;
pub use force::{ForceField, ForceSet, PairPotential, UniformField};
pub use particle::Particle;
pub use snapshot::ParticleView;
pub use state::Simulation;
pub use tick::{TickStats, tick};
pub use topology::{BoundaryTopology, Domain, Image, projective_image, toroidal_displacement};
