//! Tuning parameters for vines, body coupling, and auto-grab.

use crate::error::VineError;
use crate::vec::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chain shape and simulation parameters.
///
/// # Builder Pattern
/// ```
/// use vinekit::config::VineConfig;
///
/// let config = VineConfig::new()
///     .with_segment_length(12.0)
///     .with_stiffness(0.9)
///     .with_iterations(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct VineConfig {
    /// Rest distance between adjacent particles. Default: 15.
    pub segment_length: f64,
    /// Fraction of the distance error corrected per pass, (0, 1]. Default: 0.8.
    pub stiffness: f64,
    /// Implicit velocity retained per step, (0, 1]. Default: 0.95.
    pub damping: f64,
    /// Displacement added on every step. Softer than the platformer gravity
    /// so the rope stays slack. Default: (0, 0.5).
    pub gravity_offset: Vec2,
    /// Relaxation passes per frame. Default: 3.
    pub iterations: usize,
    /// Upper bound on the reported simulated step, in ms. Default: 16.
    pub max_step_ms: f64,
}

impl VineConfig {
    pub fn new() -> Self {
        VineConfig {
            segment_length: 15.0,
            stiffness: 0.8,
            damping: 0.95,
            gravity_offset: Vec2::new(0.0, 0.5),
            iterations: 3,
            max_step_ms: 16.0,
        }
    }

    pub fn with_segment_length(mut self, segment_length: f64) -> Self {
        self.segment_length = segment_length;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_gravity_offset(mut self, gravity_offset: Vec2) -> Self {
        self.gravity_offset = gravity_offset;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_max_step_ms(mut self, max_step_ms: f64) -> Self {
        self.max_step_ms = max_step_ms;
        self
    }

    /// Reject parameters that would make the rope diverge or freeze.
    pub fn validate(&self) -> Result<(), VineError> {
        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            return Err(VineError::InvalidSegmentLength);
        }
        if !(self.stiffness > 0.0 && self.stiffness <= 1.0) {
            return Err(VineError::InvalidStiffness);
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(VineError::InvalidDamping);
        }
        Ok(())
    }
}

impl Default for VineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Gains and limits for the two-way exchange between a grabbed vine and the body.
///
/// Body velocities are in units per second; particle velocities are per step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CouplingConfig {
    /// Horizontal body speed above which the swing is driven. Default: 10.
    pub swing_threshold: f64,
    /// Fraction of body horizontal speed added to the particle. Default: 0.004.
    pub swing_gain: f64,
    /// Fraction subtracted from the particle's previous x. Default: 0.001.
    pub swing_inertia_gain: f64,
    /// Vertical body speed above which the grab point shifts. Default: 100.
    pub climb_threshold: f64,
    /// Per-frame blend toward the grabbed particle. Default: 0.3.
    pub follow_blend: f64,
    /// Body hangs this far below the grabbed particle. Default: 15.
    pub follow_offset: f64,
    /// Particle-to-body horizontal velocity gain. Default: 10.
    pub feedback_x: f64,
    /// Particle-to-body vertical velocity gain. Default: 30.
    pub feedback_y: f64,
    /// Hard cap on the body's speed after feedback. Default: 300.
    pub max_swing_speed: f64,
    /// Vertical speed set by climb input. Default: 150.
    pub climb_speed: f64,
    /// Body run speed. Default: 300.
    pub run_speed: f64,
    /// Fraction of run speed used for swing input on a vine. Default: 0.65.
    pub swing_input_factor: f64,
    /// Horizontal speed kept per frame with no swing input. Default: 0.95.
    pub coast_factor: f64,
    /// Vertical velocity set when jumping off. Default: -750.
    pub jump_velocity: f64,
    /// Scale applied to external forces on the grabbed particle. Default: 0.1.
    pub force_gain: f64,
}

impl CouplingConfig {
    pub fn new() -> Self {
        CouplingConfig {
            swing_threshold: 10.0,
            swing_gain: 0.004,
            swing_inertia_gain: 0.001,
            climb_threshold: 100.0,
            follow_blend: 0.3,
            follow_offset: 15.0,
            feedback_x: 10.0,
            feedback_y: 30.0,
            max_swing_speed: 300.0,
            climb_speed: 150.0,
            run_speed: 300.0,
            swing_input_factor: 0.65,
            coast_factor: 0.95,
            jump_velocity: -750.0,
            force_gain: 0.1,
        }
    }

    pub fn with_max_swing_speed(mut self, max_swing_speed: f64) -> Self {
        self.max_swing_speed = max_swing_speed;
        self
    }

    pub fn with_follow(mut self, blend: f64, offset: f64) -> Self {
        self.follow_blend = blend;
        self.follow_offset = offset;
        self
    }

    pub fn with_climb(mut self, threshold: f64, speed: f64) -> Self {
        self.climb_threshold = threshold;
        self.climb_speed = speed;
        self
    }

    pub fn with_jump_velocity(mut self, jump_velocity: f64) -> Self {
        self.jump_velocity = jump_velocity;
        self
    }

    /// Reject limits that would flip or unbound the body's velocity.
    pub fn validate(&self) -> Result<(), VineError> {
        positive("max_swing_speed", self.max_swing_speed)?;
        positive("climb_threshold", self.climb_threshold)?;
        positive("climb_speed", self.climb_speed)?;
        positive("run_speed", self.run_speed)?;
        if !(self.follow_blend > 0.0 && self.follow_blend <= 1.0) {
            return Err(VineError::InvalidLimit { name: "follow_blend" });
        }
        Ok(())
    }
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Auto-grab gate.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ProximityConfig {
    /// Maximum body-to-particle distance. Default: 40.
    pub grab_radius: f64,
    /// The body must be moving up faster than this. Default: 200.
    pub min_upward_speed: f64,
    /// Time after a release during which auto-grab is refused, in ms. Default: 500.
    pub cooldown_ms: f64,
}

impl ProximityConfig {
    pub fn new() -> Self {
        ProximityConfig {
            grab_radius: 40.0,
            min_upward_speed: 200.0,
            cooldown_ms: 500.0,
        }
    }

    pub fn with_grab_radius(mut self, grab_radius: f64) -> Self {
        self.grab_radius = grab_radius;
        self
    }

    pub fn with_min_upward_speed(mut self, min_upward_speed: f64) -> Self {
        self.min_upward_speed = min_upward_speed;
        self
    }

    pub fn with_cooldown_ms(mut self, cooldown_ms: f64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    pub fn validate(&self) -> Result<(), VineError> {
        positive("grab_radius", self.grab_radius)?;
        non_negative("min_upward_speed", self.min_upward_speed)?;
        non_negative("cooldown_ms", self.cooldown_ms)
    }
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a [`VineManager`](crate::VineManager) needs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SystemConfig {
    pub vine: VineConfig,
    pub coupling: CouplingConfig,
    pub proximity: ProximityConfig,
}

impl SystemConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vine(mut self, vine: VineConfig) -> Self {
        self.vine = vine;
        self
    }

    pub fn with_coupling(mut self, coupling: CouplingConfig) -> Self {
        self.coupling = coupling;
        self
    }

    pub fn with_proximity(mut self, proximity: ProximityConfig) -> Self {
        self.proximity = proximity;
        self
    }

    pub fn validate(&self) -> Result<(), VineError> {
        self.vine.validate()?;
        self.coupling.validate()?;
        self.proximity.validate()
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), VineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VineError::InvalidLimit { name })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), VineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(VineError::InvalidLimit { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(VineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        assert_eq!(
            VineConfig::new().with_stiffness(0.0).validate(),
            Err(VineError::InvalidStiffness)
        );
        assert_eq!(
            VineConfig::new().with_stiffness(1.5).validate(),
            Err(VineError::InvalidStiffness)
        );
        assert_eq!(
            VineConfig::new().with_damping(0.0).validate(),
            Err(VineError::InvalidDamping)
        );
        assert_eq!(
            VineConfig::new().with_segment_length(f64::NAN).validate(),
            Err(VineError::InvalidSegmentLength)
        );
    }

    #[test]
    fn rejects_negative_or_unbounded_limits() {
        assert_eq!(SystemConfig::default().validate(), Ok(()));
        assert_eq!(
            CouplingConfig::new().with_max_swing_speed(-300.0).validate(),
            Err(VineError::InvalidLimit { name: "max_swing_speed" })
        );
        assert_eq!(
            CouplingConfig::new().with_max_swing_speed(f64::INFINITY).validate(),
            Err(VineError::InvalidLimit { name: "max_swing_speed" })
        );
        assert_eq!(ProximityConfig::new().with_cooldown_ms(0.0).validate(), Ok(()));
        assert_eq!(
            ProximityConfig::new().with_grab_radius(0.0).validate(),
            Err(VineError::InvalidLimit { name: "grab_radius" })
        );
        assert_eq!(
            SystemConfig::new()
                .with_proximity(ProximityConfig::new().with_cooldown_ms(f64::NAN))
                .validate(),
            Err(VineError::InvalidLimit { name: "cooldown_ms" })
        );
    }
}
