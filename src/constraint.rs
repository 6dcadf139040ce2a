//! Distance constraint between two adjacent vine particles.

use crate::particle::Particle;

/// Pulls two particles toward a fixed separation.
///
/// Each unpinned endpoint moves by half of the correction regardless of what
/// the other endpoint does, so a segment hanging from the anchor is corrected
/// only halfway per pass. Particle masses are uniform along a vine.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint {
    pub a: usize,
    pub b: usize,
    pub rest_length: f64,
    pub stiffness: f64,
}

impl DistanceConstraint {
    pub fn new(a: usize, b: usize, rest_length: f64, stiffness: f64) -> Self {
        DistanceConstraint { a, b, rest_length, stiffness }
    }

    /// Apply one relaxation to the pair.
    ///
    /// Coincident particles have no direction to push along and are skipped.
    pub fn solve(&self, particles: &mut [Particle]) {
        let delta = particles[self.b].pos - particles[self.a].pos;
        let dist = delta.length();
        if dist == 0.0 {
            return;
        }

        let fraction = (self.rest_length - dist) / dist * self.stiffness;
        let half = delta.scale(fraction * 0.5);

        if !particles[self.a].pinned {
            particles[self.a].pos -= half;
        }
        if !particles[self.b].pinned {
            particles[self.b].pos += half;
        }
    }

    /// Signed stretch of the pair: positive when longer than rest.
    pub fn error(&self, particles: &[Particle]) -> f64 {
        particles[self.a].pos.distance(particles[self.b].pos) - self.rest_length
    }
}
