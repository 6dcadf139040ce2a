//! Verlet integration step for vine chains.

use crate::chain::VineChain;
use crate::config::VineConfig;
use crate::vec::Vec2;

/// Advances every non-pinned particle of a chain by one step.
///
/// The gravity offset is a fixed displacement added on every step, whatever
/// the frame time. The frame time only decides whether a step happens at all:
/// zero or negative frames are skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct Integrator {
    pub gravity_offset: Vec2,
    pub max_step_ms: f64,
}

impl Integrator {
    pub fn new(gravity_offset: Vec2, max_step_ms: f64) -> Self {
        Integrator { gravity_offset, max_step_ms }
    }

    pub fn from_config(config: &VineConfig) -> Self {
        Self::new(config.gravity_offset, config.max_step_ms)
    }

    /// Clamp a raw frame time into `[0, max_step_ms]`. NaN counts as zero.
    pub fn clamp_step(&self, dt_ms: f64) -> f64 {
        if dt_ms > 0.0 {
            dt_ms.min(self.max_step_ms)
        } else {
            0.0
        }
    }

    /// Integrate `chain` over a raw frame time. Returns the clamped step
    /// actually simulated; zero means nothing moved.
    pub fn step(&self, chain: &mut VineChain, dt_ms: f64) -> f64 {
        let dt = self.clamp_step(dt_ms);
        if dt == 0.0 {
            return 0.0;
        }
        let damping = chain.damping();
        for p in chain.particles_mut() {
            p.integrate(damping, self.gravity_offset);
        }
        dt
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::from_config(&VineConfig::default())
    }
}
