//! The player body as seen by the vine system.

use crate::handle::VineHandle;
use crate::vec::Vec2;

/// Capability surface of an externally owned rigid body.
///
/// The vine system borrows the body for the length of a call and never keeps
/// it. Velocities are in world units per second.
pub trait PlayerBody {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);

    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    /// The vine currently held, if any.
    fn vine(&self) -> Option<VineHandle>;
    fn set_vine(&mut self, vine: Option<VineHandle>);

    /// Manager clock reading of the last release, in ms.
    fn last_release_ms(&self) -> Option<f64>;
    fn set_last_release_ms(&mut self, at_ms: f64);

    /// Toggle world gravity for the body. Suspended while on a vine.
    fn set_gravity_enabled(&mut self, enabled: bool);

    /// Toggle collisions with level geometry. Suspended while on a vine.
    fn set_collisions_enabled(&mut self, enabled: bool);

    fn is_on_vine(&self) -> bool {
        self.vine().is_some()
    }
}

/// Minimal body with plain fields, for tools, tests, and engines that mirror
/// their own body state into it each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub vine: Option<VineHandle>,
    pub last_release_ms: Option<f64>,
    pub gravity_enabled: bool,
    pub collisions_enabled: bool,
}

impl SimpleBody {
    pub fn new(position: Vec2) -> Self {
        SimpleBody {
            position,
            velocity: Vec2::ZERO,
            vine: None,
            last_release_ms: None,
            gravity_enabled: true,
            collisions_enabled: true,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

impl PlayerBody for SimpleBody {
    fn position(&self) -> Vec2 { self.position }
    fn set_position(&mut self, position: Vec2) { self.position = position; }

    fn velocity(&self) -> Vec2 { self.velocity }
    fn set_velocity(&mut self, velocity: Vec2) { self.velocity = velocity; }

    fn vine(&self) -> Option<VineHandle> { self.vine }
    fn set_vine(&mut self, vine: Option<VineHandle>) { self.vine = vine; }

    fn last_release_ms(&self) -> Option<f64> { self.last_release_ms }
    fn set_last_release_ms(&mut self, at_ms: f64) { self.last_release_ms = Some(at_ms); }

    fn set_gravity_enabled(&mut self, enabled: bool) { self.gravity_enabled = enabled; }
    fn set_collisions_enabled(&mut self, enabled: bool) { self.collisions_enabled = enabled; }
}
