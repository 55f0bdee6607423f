//! Force fields
//!
//! Every field only adds into `Particle::force`; positions and velocities are
//! read-only here. Pairs are enumerated `i < j` in collection order, so the
//! summation order (and therefore the result) is deterministic.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::particle::{Particle, pair_mut};
use super::topology::{BoundaryTopology, Domain};
use crate::consts::*;

/// Lennard-Jones style pair law.
///
/// `V(r) = 4ε[(σ/r)^12 - (σ/r)^6]` with `σ = sigma_scale * (r_i + r_j)`.
/// Steeply repulsive below contact, weakly attractive out to `cutoff * σ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairPotential {
    /// Well depth ε. Negative values invert the law.
    pub strength: f64,
    pub sigma_scale: f64,
    /// Interaction range in units of σ
    pub cutoff: f64,
    /// Distance floor in units of σ
    pub min_separation: f64,
}

impl Default for PairPotential {
    fn default() -> Self {
        Self {
            strength: POTENTIAL_STRENGTH,
            sigma_scale: 1.0,
            cutoff: POTENTIAL_CUTOFF,
            min_separation: MIN_SEPARATION,
        }
    }
}

impl PairPotential {
    /// Effective interaction scale for two radii
    #[inline]
    pub fn sigma(&self, radius_a: f64, radius_b: f64) -> f64 {
        self.sigma_scale * (radius_a + radius_b)
    }

    /// Clamped distance used in the power terms
    #[inline]
    fn floored(&self, r: f64, sigma: f64) -> f64 {
        r.max(self.min_separation * sigma).max(COINCIDENT_EPSILON)
    }

    /// Radial force magnitude `-dV/dr` (positive = repulsive)
    pub fn force_magnitude(&self, r: f64, sigma: f64) -> f64 {
        if sigma <= 0.0 || r >= self.cutoff * sigma {
            return 0.0;
        }
        let r = self.floored(r, sigma);
        let s6 = (sigma / r).powi(6);
        24.0 * self.strength / r * (2.0 * s6 * s6 - s6)
    }

    pub fn energy(&self, r: f64, sigma: f64) -> f64 {
        if sigma <= 0.0 || r >= self.cutoff * sigma {
            return 0.0;
        }
        let r = self.floored(r, sigma);
        let s6 = (sigma / r).powi(6);
        4.0 * self.strength * (s6 * s6 - s6)
    }

    fn accumulate(&self, particles: &mut [Particle], topology: &BoundaryTopology, domain: &Domain) {
        let n = particles.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(particles, i, j);
                let sigma = self.sigma(a.radius, b.radius);
                let img = topology.image(domain, a.pos, b.pos);
                let r = img.delta.length();
                // Coincident pairs have no direction; the collision pass separates them
                if r <= COINCIDENT_EPSILON {
                    continue;
                }
                let magnitude = self.force_magnitude(r, sigma);
                if magnitude == 0.0 {
                    continue;
                }
                let f = img.delta / r * magnitude;
                a.force -= f;
                b.force += img.orientation * f;
            }
        }
    }

    fn energy_of(&self, particles: &[Particle], topology: &BoundaryTopology, domain: &Domain) -> f64 {
        let mut total = 0.0;
        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                let r = topology.displacement(domain, a.pos, b.pos).length();
                total += self.energy(r, self.sigma(a.radius, b.radius));
            }
        }
        total
    }
}

/// Constant external field, e.g. gravity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformField {
    pub direction: DVec2,
    pub magnitude: f64,
}

impl UniformField {
    pub fn new(direction: DVec2, magnitude: f64) -> Self {
        Self {
            direction,
            magnitude,
        }
    }

    #[inline]
    pub fn vector(&self) -> DVec2 {
        self.direction * self.magnitude
    }
}

/// A single additive force contribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ForceField {
    None,
    Pairwise(PairPotential),
    Uniform(UniformField),
}

impl ForceField {
    /// Add this field's contribution to every particle's force
    pub fn accumulate(&self, particles: &mut [Particle], topology: &BoundaryTopology, domain: &Domain) {
        match self {
            ForceField::None => {}
            ForceField::Pairwise(potential) => potential.accumulate(particles, topology, domain),
            ForceField::Uniform(field) => {
                let f = field.vector();
                for p in particles.iter_mut() {
                    p.force += f;
                }
            }
        }
    }

    /// Potential energy of the pair law; external fields report zero since a
    /// wrapped domain has no consistent height reference
    pub fn potential_energy(&self, particles: &[Particle], topology: &BoundaryTopology, domain: &Domain) -> f64 {
        match self {
            ForceField::Pairwise(potential) => potential.energy_of(particles, topology, domain),
            ForceField::None | ForceField::Uniform(_) => 0.0,
        }
    }
}

/// Ordered collection of force fields applied each tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceSet {
    pub fields: Vec<ForceField>,
}

impl ForceSet {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with(mut self, field: ForceField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn accumulate(&self, particles: &mut [Particle], topology: &BoundaryTopology, domain: &Domain) {
        for field in &self.fields {
            field.accumulate(particles, topology, domain);
        }
    }

    pub fn potential_energy(&self, particles: &[Particle], topology: &BoundaryTopology, domain: &Domain) -> f64 {
        self.fields
            .iter()
            .map(|f| f.potential_energy(particles, topology, domain))
            .sum()
    }

    /// Whether any field pushes every particle the same way
    pub fn has_external(&self) -> bool {
        self.fields.iter().any(|f| matches!(f, ForceField::Uniform(_)))
    }
}

impl From<Vec<ForceField>> for ForceSet {
    fn from(fields: Vec<ForceField>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Domain {
        Domain::new(1600.0, 1200.0).unwrap()
    }

    fn two(a: DVec2, b: DVec2) -> Vec<Particle> {
        vec![
            Particle::new(1, a, DVec2::ZERO, 10.0, 10.0),
            Particle::new(2, b, DVec2::ZERO, 12.0, 10.0),
        ]
    }

    #[test]
    fn test_repulsive_inside_contact() {
        let pot = PairPotential::default();
        assert!(pot.force_magnitude(15.0, 20.0) > 0.0);
        // Attractive just beyond the minimum at 2^(1/6) σ
        assert!(pot.force_magnitude(25.0, 20.0) < 0.0);
        // Zero past the cutoff
        assert_eq!(pot.force_magnitude(50.0, 20.0), 0.0);
        assert_eq!(pot.energy(50.0, 20.0), 0.0);
    }

    #[test]
    fn test_distance_floor_keeps_force_finite() {
        let pot = PairPotential::default();
        let at_floor = pot.force_magnitude(10.0, 20.0);
        assert!(at_floor.is_finite());
        assert_eq!(pot.force_magnitude(0.0, 20.0), at_floor);
        assert_eq!(pot.force_magnitude(1e-300, 20.0), at_floor);
        assert!(pot.energy(0.0, 20.0).is_finite());
    }

    #[test]
    fn test_zero_radius_pair_does_not_interact() {
        let pot = PairPotential::default();
        assert_eq!(pot.force_magnitude(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_pairwise_newton_third_law() {
        let d = domain();
        let mut ps = two(DVec2::new(100.0, 100.0), DVec2::new(115.0, 108.0));
        ForceField::Pairwise(PairPotential::default()).accumulate(&mut ps, &BoundaryTopology::Toroidal, &d);
        assert!(ps[0].force.length() > 0.0);
        assert_eq!(ps[0].force, -ps[1].force);
        // Repulsion pushes the first particle away from the second
        assert!(ps[0].force.dot(ps[1].pos - ps[0].pos) < 0.0);
    }

    #[test]
    fn test_pairwise_across_periodic_edge() {
        let d = domain();
        let mut ps = two(DVec2::new(2.0, 600.0), DVec2::new(1590.0, 600.0));
        ForceField::Pairwise(PairPotential::default()).accumulate(&mut ps, &BoundaryTopology::Toroidal, &d);
        // 12 apart through the seam: the first is pushed right, the second left
        assert!(ps[0].force.x > 0.0);
        assert!(ps[1].force.x < 0.0);

        let mut ps = two(DVec2::new(2.0, 600.0), DVec2::new(1590.0, 600.0));
        ForceField::Pairwise(PairPotential::default()).accumulate(&mut ps, &BoundaryTopology::Reflective, &d);
        assert_eq!(ps[0].force, DVec2::ZERO);
    }

    #[test]
    fn test_coincident_pair_yields_no_force() {
        let d = domain();
        let mut ps = two(DVec2::new(50.0, 50.0), DVec2::new(50.0, 50.0));
        ForceField::Pairwise(PairPotential::default()).accumulate(&mut ps, &BoundaryTopology::Toroidal, &d);
        assert_eq!(ps[0].force, DVec2::ZERO);
        assert_eq!(ps[1].force, DVec2::ZERO);
    }

    #[test]
    fn test_negative_strength_attracts() {
        let d = domain();
        let pot = PairPotential {
            strength: -1.0,
            ..Default::default()
        };
        let mut ps = two(DVec2::new(100.0, 100.0), DVec2::new(115.0, 100.0));
        ForceField::Pairwise(pot).accumulate(&mut ps, &BoundaryTopology::Toroidal, &d);
        assert!(ps[0].force.x > 0.0);
    }

    #[test]
    fn test_uniform_field_and_set() {
        let d = domain();
        let mut ps = two(DVec2::new(100.0, 100.0), DVec2::new(900.0, 100.0));
        let set = ForceSet::new()
            .with(ForceField::None)
            .with(ForceField::Uniform(UniformField::new(DVec2::new(0.0, 1.0), 9.8)));
        set.accumulate(&mut ps, &BoundaryTopology::Toroidal, &d);
        for p in &ps {
            assert_eq!(p.force, DVec2::new(0.0, 9.8));
        }
        assert!(set.has_external());
        assert_eq!(set.potential_energy(&ps, &BoundaryTopology::Toroidal, &d), 0.0);
    }

    #[test]
    fn test_potential_energy_sums_pairs() {
        let d = domain();
        let ps = two(DVec2::new(100.0, 100.0), DVec2::new(120.0, 100.0));
        let field = ForceField::Pairwise(PairPotential::default());
        // r == σ puts the pair at the zero crossing
        assert!(field.potential_energy(&ps, &BoundaryTopology::Toroidal, &d).abs() < 1e-12);
    }
}
