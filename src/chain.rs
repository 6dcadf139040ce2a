//! Vine chain: an anchored line of Verlet particles and distance constraints.

use crate::attachment::AttachmentState;
use crate::config::VineConfig;
use crate::constraint::DistanceConstraint;
use crate::error::VineError;
use crate::particle::Particle;
use crate::vec::Vec2;
use alloc::vec::Vec;

/// A hanging vine.
///
/// Particle 0 is the anchor and the only pinned particle. Every adjacent pair
/// shares the same rest length.
#[derive(Clone, Debug)]
pub struct VineChain {
    particles: Vec<Particle>,
    constraints: Vec<DistanceConstraint>,
    rest_length: f64,
    stiffness: f64,
    damping: f64,
    attachment: AttachmentState,
}

impl VineChain {
    /// Build a vine hanging straight down from `anchor` with `count` particles
    /// spaced `config.segment_length` apart.
    pub fn new(anchor: Vec2, count: usize, config: &VineConfig) -> Result<Self, VineError> {
        config.validate()?;
        if count < 2 {
            return Err(VineError::InsufficientSegments { count });
        }

        let rest_length = config.segment_length;
        let mut particles = Vec::with_capacity(count);
        particles.push(Particle::pinned(anchor));
        for i in 1..count {
            let pos = Vec2::new(anchor.x, anchor.y + rest_length * i as f64);
            particles.push(Particle::new(pos));
        }

        let constraints = (1..count)
            .map(|i| DistanceConstraint::new(i - 1, i, rest_length, config.stiffness))
            .collect();

        Ok(VineChain {
            particles,
            constraints,
            rest_length,
            stiffness: config.stiffness,
            damping: config.damping,
            attachment: AttachmentState::Free,
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always false for a constructed chain.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn rest_length(&self) -> f64 { self.rest_length }
    pub fn stiffness(&self) -> f64 { self.stiffness }
    pub fn damping(&self) -> f64 { self.damping }

    pub fn attachment(&self) -> AttachmentState {
        self.attachment
    }

    pub(crate) fn set_attachment(&mut self, attachment: AttachmentState) {
        self.attachment = attachment;
    }

    pub fn is_grabbed(&self) -> bool {
        self.attachment.is_grabbed()
    }

    /// Whether `index` may be grabbed: anything but the anchor.
    pub fn is_grabbable(&self, index: usize) -> bool {
        index >= 1 && index < self.particles.len()
    }

    pub fn anchor(&self) -> Vec2 {
        self.particles[0].pos
    }

    pub fn particle(&self, index: usize) -> &Particle {
        &self.particles[index]
    }

    pub(crate) fn particle_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub(crate) fn split_mut(&mut self) -> (&mut [Particle], &[DistanceConstraint]) {
        (&mut self.particles, &self.constraints)
    }

    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    /// Sprite rotation for each segment, one entry per particle after the
    /// anchor. A segment hanging straight down reads as zero.
    pub fn segment_angles(&self) -> Vec<f64> {
        self.particles
            .windows(2)
            .map(|w| (w[1].pos - w[0].pos).angle() - core::f64::consts::FRAC_PI_2)
            .collect()
    }

    /// Mean absolute deviation of adjacent distances from the rest length.
    pub fn mean_stretch(&self) -> f64 {
        if self.constraints.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .constraints
            .iter()
            .map(|c| {
                let e = c.error(&self.particles);
                if e < 0.0 { -e } else { e }
            })
            .sum();
        total / self.constraints.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_single_particle() {
        let err = VineChain::new(Vec2::ZERO, 1, &VineConfig::default()).unwrap_err();
        assert_eq!(err, VineError::InsufficientSegments { count: 1 });
    }

    #[test]
    fn rejects_invalid_config() {
        let config = VineConfig::new().with_damping(1.5);
        let err = VineChain::new(Vec2::ZERO, 5, &config).unwrap_err();
        assert_eq!(err, VineError::InvalidDamping);
    }

    #[test]
    fn only_anchor_is_pinned() {
        let chain = VineChain::new(Vec2::new(1.0, 2.0), 6, &VineConfig::default()).unwrap();
        assert!(chain.particle(0).pinned);
        assert!(chain.particles()[1..].iter().all(|p| !p.pinned));
        assert_eq!(chain.segment_count(), 5);
        assert_eq!(chain.mean_stretch(), 0.0);
    }

    #[test]
    fn grabbable_range_excludes_anchor() {
        let chain = VineChain::new(Vec2::ZERO, 4, &VineConfig::default()).unwrap();
        assert!(!chain.is_grabbable(0));
        assert!(chain.is_grabbable(1));
        assert!(chain.is_grabbable(3));
        assert!(!chain.is_grabbable(4));
    }

    #[test]
    fn straight_vine_has_zero_angles() {
        let chain = VineChain::new(Vec2::ZERO, 4, &VineConfig::default()).unwrap();
        let angles = chain.segment_angles();
        assert_eq!(angles.len(), 3);
        assert!(angles.iter().all(|a| a.abs() < 1e-12));
    }
}
