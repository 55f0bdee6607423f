//! Boundary topologies for the rectangular domain
//!
//! A topology maps positions that left `[0,W) x [0,H)` back inside and picks
//! the shortest separation between two particles consistent with how the
//! domain's edges are identified.
//!
//! The projective plane glues each pair of opposite edges with a half-turn:
//! `(W, y) ~ (0, H - y)` and `(x, H) ~ (W - x, 0)`. Anything carried across
//! the left/right seam comes back mirrored top-to-bottom, and vice versa.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ensure_positive};

/// Rectangular simulation domain anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub width: f64,
    pub height: f64,
}

impl Domain {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        ensure_positive("domain width", width)?;
        ensure_positive("domain height", height)?;
        Ok(Self { width, height })
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Whether `p` lies in the half-open rectangle
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }
}

/// How the domain's edges are identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryTopology {
    /// No confinement; particles may leave for good
    None,
    /// Hard walls
    Reflective,
    /// Periodic wrap, opposite edges identified directly
    #[default]
    Toroidal,
    /// Periodic wrap with the half-turn (RP²) gluing
    Projective,
}

/// Separation from `a` to the nearest image of `b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Image {
    pub delta: DVec2,
    /// Per-axis ±1 taking vectors at `b` into the frame of its image next to `a`.
    /// Self-inverse, so the same factor maps image-frame vectors back onto `b`.
    pub orientation: DVec2,
}

impl Image {
    fn direct(delta: DVec2) -> Self {
        Self {
            delta,
            orientation: DVec2::ONE,
        }
    }
}

impl BoundaryTopology {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryTopology::None => "None",
            BoundaryTopology::Reflective => "Reflective",
            BoundaryTopology::Toroidal => "Toroidal",
            BoundaryTopology::Projective => "Projective",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(BoundaryTopology::None),
            "reflective" | "walls" => Some(BoundaryTopology::Reflective),
            "toroidal" | "torus" | "periodic" => Some(BoundaryTopology::Toroidal),
            "projective" | "rp2" => Some(BoundaryTopology::Projective),
            _ => None,
        }
    }

    /// Map a position back into the domain
    pub fn wrap(&self, domain: &Domain, pos: DVec2) -> DVec2 {
        let mut pos = pos;
        let mut vel = DVec2::ZERO;
        self.confine(domain, &mut pos, &mut vel);
        pos
    }

    /// Map a position back into the domain, reorienting the velocity to match.
    ///
    /// Reflective walls turn the offending velocity component inward; the
    /// projective seams mirror the component along the seam.
    pub fn confine(&self, domain: &Domain, pos: &mut DVec2, vel: &mut DVec2) {
        match self {
            BoundaryTopology::None => {}
            BoundaryTopology::Reflective => {
                if pos.x < 0.0 {
                    pos.x = 0.0;
                    vel.x = vel.x.abs();
                } else if pos.x >= domain.width {
                    pos.x = just_below(domain.width);
                    vel.x = -vel.x.abs();
                }
                if pos.y < 0.0 {
                    pos.y = 0.0;
                    vel.y = vel.y.abs();
                } else if pos.y >= domain.height {
                    pos.y = just_below(domain.height);
                    vel.y = -vel.y.abs();
                }
            }
            BoundaryTopology::Toroidal => {
                pos.x = wrap_axis(pos.x, domain.width).0;
                pos.y = wrap_axis(pos.y, domain.height).0;
            }
            BoundaryTopology::Projective => {
                let (x, crossed_x) = wrap_axis(pos.x, domain.width);
                let y = if crossed_x {
                    vel.y = -vel.y;
                    domain.height - pos.y
                } else {
                    pos.y
                };
                let (y, crossed_y) = wrap_axis(y, domain.height);
                let x = if crossed_y {
                    vel.x = -vel.x;
                    mirror(x, domain.width)
                } else {
                    x
                };
                *pos = DVec2::new(x, y);
            }
        }
    }

    /// Shortest separation vector from `a` to `b`
    #[inline]
    pub fn displacement(&self, domain: &Domain, a: DVec2, b: DVec2) -> DVec2 {
        self.image(domain, a, b).delta
    }

    /// Nearest image of `b` as seen from `a`
    pub fn image(&self, domain: &Domain, a: DVec2, b: DVec2) -> Image {
        match self {
            BoundaryTopology::None | BoundaryTopology::Reflective => Image::direct(b - a),
            BoundaryTopology::Toroidal => Image::direct(toroidal_displacement(a, b, domain.size())),
            BoundaryTopology::Projective => projective_image(a, b, domain.size()),
        }
    }
}

/// Minimum-image separation on the torus, chosen per axis
pub fn toroidal_displacement(a: DVec2, b: DVec2, size: DVec2) -> DVec2 {
    DVec2::new(
        nearest_periodic(b.x - a.x, size.x),
        nearest_periodic(b.y - a.y, size.y),
    )
}

/// Minimum-image separation on the projective plane.
///
/// Candidates are `b` itself, its images across either seam (mirrored along
/// the seam) and its images across both seams (point-reflected). Ties go to
/// the earlier candidate, so the direct separation wins when equally short.
pub fn projective_image(a: DVec2, b: DVec2, size: DVec2) -> Image {
    let (w, h) = (size.x, size.y);
    let flip_y = DVec2::new(1.0, -1.0);
    let flip_x = DVec2::new(-1.0, 1.0);

    let candidates = [
        (b, DVec2::ONE),
        (DVec2::new(b.x + w, h - b.y), flip_y),
        (DVec2::new(b.x - w, h - b.y), flip_y),
        (DVec2::new(w - b.x, b.y + h), flip_x),
        (DVec2::new(w - b.x, b.y - h), flip_x),
        (DVec2::new(-b.x, -b.y), DVec2::NEG_ONE),
        (DVec2::new(-b.x, 2.0 * h - b.y), DVec2::NEG_ONE),
        (DVec2::new(2.0 * w - b.x, -b.y), DVec2::NEG_ONE),
        (DVec2::new(2.0 * w - b.x, 2.0 * h - b.y), DVec2::NEG_ONE),
    ];

    let mut best = Image::direct(b - a);
    let mut best_len = best.delta.length_squared();
    for &(point, orientation) in &candidates[1..] {
        let delta = point - a;
        let len = delta.length_squared();
        if len < best_len {
            best = Image { delta, orientation };
            best_len = len;
        }
    }
    best
}

/// Pick `d`, `d - size` or `d + size`, whichever is shortest
#[inline]
fn nearest_periodic(d: f64, size: f64) -> f64 {
    let half = 0.5 * size;
    if d > half {
        d - size
    } else if d < -half {
        d + size
    } else {
        d
    }
}

/// Wrap `v` into `[0, size)`; also reports whether an odd number of edges was crossed
fn wrap_axis(v: f64, size: f64) -> (f64, bool) {
    let mut k = (v / size).floor();
    let mut w = v - k * size;
    if w >= size {
        w -= size;
        k += 1.0;
    }
    if w < 0.0 {
        w = 0.0;
    }
    (w, k.rem_euclid(2.0) == 1.0)
}

/// `size - v` for `v` in `[0, size)`, kept inside the half-open range
#[inline]
fn mirror(v: f64, size: f64) -> f64 {
    let m = size - v;
    if m >= size || m < 0.0 { 0.0 } else { m }
}

/// Largest float strictly below a positive finite `v`
#[inline]
fn just_below(v: f64) -> f64 {
    f64::from_bits(v.to_bits() - 1)
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_inside() -> impl Strategy<Value = DVec2> {
        (0.0..1600.0_f64, 0.0..1200.0_f64).prop_map(|(x, y)| DVec2::new(x, y))
    }

    fn arb_anywhere() -> impl Strategy<Value = DVec2> {
        (-5000.0..5000.0_f64, -5000.0..5000.0_f64).prop_map(|(x, y)| DVec2::new(x, y))
    }

    fn arb_topology() -> impl Strategy<Value = BoundaryTopology> {
        prop_oneof![
            Just(BoundaryTopology::None),
            Just(BoundaryTopology::Reflective),
            Just(BoundaryTopology::Toroidal),
            Just(BoundaryTopology::Projective),
        ]
    }

    proptest! {
        #[test]
        fn wrap_is_identity_inside(p in arb_inside(), t in arb_topology()) {
            let d = Domain::new(1600.0, 1200.0).unwrap();
            prop_assert_eq!(t.wrap(&d, p), p);
        }

        #[test]
        fn wrap_lands_inside(p in arb_anywhere()) {
            let d = Domain::new(1600.0, 1200.0).unwrap();
            for t in [BoundaryTopology::Reflective, BoundaryTopology::Toroidal, BoundaryTopology::Projective] {
                let w = t.wrap(&d, p);
                prop_assert!(d.contains(w), "{:?} mapped {:?} to {:?}", t, p, w);
            }
        }

        #[test]
        fn toroidal_displacement_is_antisymmetric(a in arb_inside(), b in arb_inside()) {
            let d = Domain::new(1600.0, 1200.0).unwrap();
            let t = BoundaryTopology::Toroidal;
            prop_assert_eq!(t.displacement(&d, a, b), -t.displacement(&d, b, a));
        }

        #[test]
        fn minimum_image_never_longer_than_direct(a in arb_inside(), b in arb_inside()) {
            let d = Domain::new(1600.0, 1200.0).unwrap();
            let direct = (b - a).length();
            for t in [BoundaryTopology::Toroidal, BoundaryTopology::Projective] {
                prop_assert!(t.displacement(&d, a, b).length() <= direct + 1e-9);
            }
        }
    }
}
