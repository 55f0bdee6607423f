//! Per-particle physical record

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A disk-shaped particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: DVec2,
    pub vel: DVec2,
    /// Force accumulated during the current tick only (zeroed at tick start)
    #[serde(skip)]
    pub force: DVec2,
    pub mass: f64,
    pub radius: f64,
}

impl Particle {
    pub fn new(id: u32, pos: DVec2, vel: DVec2, mass: f64, radius: f64) -> Self {
        Self {
            id,
            pos,
            vel,
            force: DVec2::ZERO,
            mass,
            radius,
        }
    }

    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.vel * self.mass
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// First non-finite quantity, if any
    pub fn non_finite(&self) -> Option<&'static str> {
        if !self.pos.is_finite() {
            Some("position")
        } else if !self.vel.is_finite() {
            Some("velocity")
        } else if !self.force.is_finite() {
            Some("force")
        } else {
            None
        }
    }
}

/// Borrow two distinct particles mutably (`i < j`)
#[inline]
pub(crate) fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
