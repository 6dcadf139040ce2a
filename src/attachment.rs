//! Grab state and the two-way coupling between a held vine and the body.

use crate::body::PlayerBody;
use crate::chain::VineChain;
use crate::config::CouplingConfig;
use crate::error::VineError;
use crate::handle::VineHandle;
use crate::vec::Vec2;

/// Whether a vine is held, and where.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AttachmentState {
    #[default]
    Free,
    /// `particle_index` is always in `[1, len - 1]`.
    Grabbed { particle_index: usize },
}

impl AttachmentState {
    pub fn is_grabbed(self) -> bool {
        matches!(self, AttachmentState::Grabbed { .. })
    }

    pub fn particle_index(self) -> Option<usize> {
        match self {
            AttachmentState::Free => None,
            AttachmentState::Grabbed { particle_index } => Some(particle_index),
        }
    }
}

/// What started a grab.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GrabCause {
    /// The body jumped into a free vine.
    Proximity,
    /// Caller asked for it.
    Explicit,
}

/// What ended a grab.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReleaseCause {
    Explicit,
    /// Released with an upward jump impulse.
    Jump,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClimbDirection {
    /// Toward the anchor.
    Up,
    /// Toward the free end.
    Down,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwingInput {
    Left,
    Right,
    /// No horizontal input: the swing coasts down.
    None,
}

/// Attach `body` to `chain` at `index`.
///
/// Checks run in order: vine already held, index out of `[1, len - 1]`, body
/// already holding something. On success the body's fall is stopped and its
/// gravity and level collisions are suspended.
pub fn attach<B: PlayerBody>(
    chain: &mut VineChain,
    vine: VineHandle,
    index: usize,
    body: &mut B,
) -> Result<(), VineError> {
    if chain.is_grabbed() {
        return Err(VineError::AlreadyGrabbed { vine });
    }
    if !chain.is_grabbable(index) {
        return Err(VineError::InvalidParticleIndex { index, count: chain.len() });
    }
    if let Some(held) = body.vine() {
        return Err(VineError::BodyAlreadyAttached { vine: held });
    }

    chain.set_attachment(AttachmentState::Grabbed { particle_index: index });

    let vel = body.velocity();
    body.set_velocity(Vec2::new(vel.x, 0.0));
    body.set_gravity_enabled(false);
    body.set_collisions_enabled(false);
    body.set_vine(Some(vine));
    Ok(())
}

/// Free `chain` and the `body` holding it.
///
/// Returns whether anything was released. Nothing happens for a free chain,
/// or when `body` is not the one holding this vine.
pub fn detach<B: PlayerBody>(
    chain: &mut VineChain,
    vine: VineHandle,
    body: &mut B,
    now_ms: f64,
) -> bool {
    if !chain.is_grabbed() || body.vine() != Some(vine) {
        return false;
    }
    chain.set_attachment(AttachmentState::Free);
    leave_vine(body, now_ms);
    true
}

/// Restore a body's free-fall state and stamp the release time.
pub(crate) fn leave_vine<B: PlayerBody>(body: &mut B, now_ms: f64) {
    body.set_vine(None);
    body.set_last_release_ms(now_ms);
    body.set_gravity_enabled(true);
    body.set_collisions_enabled(true);
}

/// Per-frame exchange between a held vine and the body holding it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coupling {
    pub config: CouplingConfig,
}

impl Coupling {
    pub fn new(config: CouplingConfig) -> Self {
        Coupling { config }
    }

    /// Run one exchange. Returns `Some((from, to))` when the grab point moved.
    ///
    /// The body is read once, the vine reacts, the vine is read once, and the
    /// body is written once. Nothing happens for a free chain.
    pub fn couple<B: PlayerBody>(&self, chain: &mut VineChain, body: &mut B) -> Option<(usize, usize)> {
        let AttachmentState::Grabbed { particle_index } = chain.attachment() else {
            return None;
        };
        let cfg = &self.config;

        let body_pos = body.position();
        let body_vel = body.velocity();

        // Swing: push the held particle sideways, with a bit of carried inertia.
        if libm::fabs(body_vel.x) > cfg.swing_threshold {
            let p = chain.particle_mut(particle_index);
            if !p.pinned {
                p.pos.x += body_vel.x * cfg.swing_gain;
                p.prev_pos.x -= body_vel.x * cfg.swing_inertia_gain;
            }
        }

        // Climb: one particle per frame, never onto the anchor.
        let mut index = particle_index;
        if libm::fabs(body_vel.y) > cfg.climb_threshold {
            let last = chain.len() - 1;
            index = if body_vel.y > 0.0 {
                (index + 1).min(last)
            } else {
                index.saturating_sub(1).max(1)
            };
            chain.set_attachment(AttachmentState::Grabbed { particle_index: index });
        }

        let held = chain.particle(index);
        let held_pos = held.pos;
        let held_vel = held.velocity_raw();

        let target = held_pos + Vec2::new(0.0, cfg.follow_offset);
        let new_pos = body_pos.lerp(target, cfg.follow_blend);

        // Follow plus feedback is a loop; the clamp keeps it from pumping energy.
        let new_vel = Vec2::new(
            body_vel.x + held_vel.x * cfg.feedback_x,
            held_vel.y * cfg.feedback_y,
        )
        .clamp_length(cfg.max_swing_speed);

        body.set_position(new_pos);
        body.set_velocity(new_vel);

        (index != particle_index).then_some((particle_index, index))
    }

    /// Displace the held particle by an external force. No-op on a free chain.
    pub fn apply_force(&self, chain: &mut VineChain, force: Vec2) -> bool {
        match chain.attachment() {
            AttachmentState::Grabbed { particle_index } => {
                chain.particle_mut(particle_index).displace(force.scale(self.config.force_gain));
                true
            }
            AttachmentState::Free => false,
        }
    }

    /// Vertical velocity for climb input.
    pub fn climb_velocity(&self, direction: ClimbDirection) -> f64 {
        match direction {
            ClimbDirection::Up => -self.config.climb_speed,
            ClimbDirection::Down => self.config.climb_speed,
        }
    }

    /// Horizontal velocity for swing input, given the current one.
    pub fn swing_velocity(&self, input: SwingInput, current_x: f64) -> f64 {
        let speed = self.config.run_speed * self.config.swing_input_factor;
        match input {
            SwingInput::Left => -speed,
            SwingInput::Right => speed,
            SwingInput::None => current_x * self.config.coast_factor,
        }
    }
}
