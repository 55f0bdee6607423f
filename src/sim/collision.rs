//! Hard-disk collision detection and response
//!
//! Overlapping pairs are pushed apart along the contact normal (heavier
//! particle moves less) and their normal velocity components are exchanged as
//! a 1D two-body collision. Tangential components are left alone.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::particle::{Particle, pair_mut};
use super::topology::{BoundaryTopology, Domain};
use crate::consts::*;

/// Collision response parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionResolver {
    /// Fraction of the overlap removed per resolve, in (0, 1]
    pub correction: f64,
    /// Coefficient of restitution in [0, 1]; 1 is perfectly elastic
    pub restitution: f64,
    /// Leave the velocities of already-separating pairs untouched
    pub skip_separating: bool,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self {
            correction: COLLISION_CORRECTION,
            restitution: 1.0,
            skip_separating: true,
        }
    }
}

/// Outcome of a single pair check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first particle toward the second
    pub normal: DVec2,
    /// Penetration depth before correction
    pub overlap: f64,
    /// Whether the velocity exchange was applied
    pub exchanged: bool,
}

/// Post-collision normal speeds for masses `m1`, `m2` with restitution `e`
#[inline]
pub fn exchange_normal_speeds(m1: f64, v1: f64, m2: f64, v2: f64, e: f64) -> (f64, f64) {
    let total = m1 + m2;
    let p = m1 * v1 + m2 * v2;
    let v1_new = (p + m2 * e * (v2 - v1)) / total;
    let v2_new = (p + m1 * e * (v1 - v2)) / total;
    (v1_new, v2_new)
}

impl CollisionResolver {
    /// Resolve every overlapping pair once, in `i < j` order.
    ///
    /// Returns the number of contacts handled.
    pub fn resolve(&self, particles: &mut [Particle], topology: &BoundaryTopology, domain: &Domain) -> usize {
        let n = particles.len();
        let mut contacts = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(particles, i, j);
                if self.resolve_pair(a, b, topology, domain).is_some() {
                    contacts += 1;
                }
            }
        }
        contacts
    }

    /// Resolve a single pair if it overlaps
    pub fn resolve_pair(
        &self,
        a: &mut Particle,
        b: &mut Particle,
        topology: &BoundaryTopology,
        domain: &Domain,
    ) -> Option<Contact> {
        let contact_distance = a.radius + b.radius;
        let img = topology.image(domain, a.pos, b.pos);
        let distance = img.delta.length();
        if distance >= contact_distance {
            return None;
        }

        // Coincident centres have no defined normal
        let normal = if distance > COINCIDENT_EPSILON {
            img.delta / distance
        } else {
            DVec2::X
        };
        let overlap = contact_distance - distance;
        let total_mass = a.mass + b.mass;

        // Work in the frame of b's image next to a
        let vel_b = img.orientation * b.vel;
        let v1 = a.vel.dot(normal);
        let v2 = vel_b.dot(normal);
        let separating = v2 - v1 > 0.0;

        let exchanged = !(self.skip_separating && separating);
        if exchanged {
            let (v1_new, v2_new) = exchange_normal_speeds(a.mass, v1, b.mass, v2, self.restitution);
            a.vel += normal * (v1_new - v1);
            b.vel = img.orientation * (vel_b + normal * (v2_new - v2));
        }

        let shift = normal * (overlap * self.correction);
        a.pos -= shift * (b.mass / total_mass);
        b.pos += img.orientation * (shift * (a.mass / total_mass));
        topology.confine(domain, &mut a.pos, &mut a.vel);
        topology.confine(domain, &mut b.pos, &mut b.vel);

        Some(Contact {
            normal,
            overlap,
            exchanged,
        })
    }
}
