//! Verlet mass points for vine chains.

use crate::vec::Vec2;

/// A Verlet particle: position-based dynamics with implicit velocity.
///
/// Velocity is never stored; it is `pos - prev_pos` per simulation step.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub pinned: bool,
}

impl Particle {
    /// A free particle at rest.
    pub fn new(pos: Vec2) -> Self {
        Particle { pos, prev_pos: pos, pinned: false }
    }

    /// A particle fixed in world space.
    pub fn pinned(pos: Vec2) -> Self {
        Particle { pos, prev_pos: pos, pinned: true }
    }

    /// Advance one step: damp the implicit velocity, then add it and `offset`.
    ///
    /// Pinned particles are left untouched.
    pub fn integrate(&mut self, damping: f64, offset: Vec2) {
        if self.pinned {
            return;
        }
        let velocity = (self.pos - self.prev_pos).scale(damping);
        self.prev_pos = self.pos;
        self.pos = self.pos + velocity + offset;
    }

    /// Implicit per-step velocity.
    pub fn velocity_raw(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    /// Shift the current position without touching `prev_pos`, which turns the
    /// shift into velocity on the next integration.
    pub fn displace(&mut self, delta: Vec2) {
        if !self.pinned {
            self.pos += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_particle_ignores_integration() {
        let mut p = Particle::pinned(Vec2::new(5.0, 5.0));
        p.prev_pos = Vec2::new(0.0, 0.0);
        p.integrate(1.0, Vec2::new(0.0, 100.0));
        assert_eq!(p.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn integrate_carries_damped_velocity() {
        let mut p = Particle::new(Vec2::new(10.0, 0.0));
        p.prev_pos = Vec2::new(8.0, 0.0);
        p.integrate(0.5, Vec2::new(0.0, 0.5));
        assert_eq!(p.prev_pos, Vec2::new(10.0, 0.0));
        assert!((p.pos.x - 11.0).abs() < 1e-12);
        assert!((p.pos.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn displace_becomes_velocity() {
        let mut p = Particle::new(Vec2::new(0.0, 0.0));
        p.displace(Vec2::new(2.0, 0.0));
        assert_eq!(p.velocity_raw(), Vec2::new(2.0, 0.0));
    }
}
