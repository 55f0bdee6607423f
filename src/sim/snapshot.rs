//! Read-only particle view handed to renderers

use bytemuck::{Pod, Zeroable};

use super::particle::Particle;

/// Position and radius of one particle, laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleView {
    pub position: [f32; 2],
    pub radius: f32,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            position: [p.pos.x as f32, p.pos.y as f32],
            radius: p.radius as f32,
        }
    }
}

/// Raw bytes of a snapshot (for vertex/instance buffers)
pub fn as_bytes(views: &[ParticleView]) -> &[u8] {
    bytemuck::cast_slice(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_view_from_particle() {
        let p = Particle::new(1, DVec2::new(12.5, 40.0), DVec2::ONE, 3.0, 3.0);
        let v = ParticleView::from(&p);
        assert_eq!(v.position, [12.5, 40.0]);
        assert_eq!(v.radius, 3.0);
    }

    #[test]
    fn test_bytes_are_tightly_packed() {
        let views = [ParticleView::zeroed(); 4];
        assert_eq!(std::mem::size_of::<ParticleView>(), 12);
        assert_eq!(as_bytes(&views).len(), 48);
    }
}
