//! Auto-grab detection for free vines.

use crate::body::PlayerBody;
use crate::chain::VineChain;
use crate::config::ProximityConfig;

/// Decides when a jumping body catches a free vine.
///
/// Grabs are gated on an upward jump, not proximity alone, and refused for
/// `cooldown_ms` after the body last let go of any vine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProximityDetector {
    pub config: ProximityConfig,
}

impl ProximityDetector {
    pub fn new(config: ProximityConfig) -> Self {
        ProximityDetector { config }
    }

    /// Whether the re-grab cooldown has run out at `now_ms`.
    pub fn cooldown_elapsed<B: PlayerBody>(&self, body: &B, now_ms: f64) -> bool {
        match body.last_release_ms() {
            Some(at) => now_ms - at >= self.config.cooldown_ms,
            None => true,
        }
    }

    /// Whether the body is moving up fast enough to catch a vine.
    pub fn is_jumping<B: PlayerBody>(&self, body: &B) -> bool {
        body.velocity().y < -self.config.min_upward_speed
    }

    /// Index of the particle to auto-grab, if any.
    ///
    /// Scans from the anchor outward and stops at the first particle inside
    /// the grab radius, so the lowest index wins.
    pub fn scan<B: PlayerBody>(&self, chain: &VineChain, body: &B, now_ms: f64) -> Option<usize> {
        if chain.is_grabbed() || body.is_on_vine() {
            return None;
        }
        if !self.cooldown_elapsed(body, now_ms) || !self.is_jumping(body) {
            return None;
        }
        self.first_within(chain, body)
    }

    fn first_within<B: PlayerBody>(&self, chain: &VineChain, body: &B) -> Option<usize> {
        let origin = body.position();
        let radius_sq = self.config.grab_radius * self.config.grab_radius;
        chain
            .particles()
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, p)| p.pos.distance_sq(origin) < radius_sq)
            .map(|(i, _)| i)
    }

    /// Nearest non-anchor particle within the grab radius and its squared
    /// distance, ignoring velocity and cooldown. Used for input-driven grabs.
    pub fn nearest<B: PlayerBody>(&self, chain: &VineChain, body: &B) -> Option<(usize, f64)> {
        if chain.is_grabbed() {
            return None;
        }
        let origin = body.position();
        let radius_sq = self.config.grab_radius * self.config.grab_radius;
        chain
            .particles()
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, p)| (i, p.pos.distance_sq(origin)))
            .filter(|&(_, d)| d < radius_sq)
            .fold(None, |best: Option<(usize, f64)>, cur| match best {
                Some(b) if b.1 <= cur.1 => Some(b),
                _ => Some(cur),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::SimpleBody;
    use crate::config::VineConfig;
    use crate::vec::Vec2;

    fn chain() -> VineChain {
        VineChain::new(Vec2::new(0.0, 0.0), 10, &VineConfig::default()).unwrap()
    }

    #[test]
    fn lowest_index_wins() {
        // Particles 3, 4, 5 sit at y = 45, 60, 75; all within 40 of (30, 60).
        let body = SimpleBody::new(Vec2::new(30.0, 60.0)).with_velocity(Vec2::new(0.0, -250.0));
        assert_eq!(ProximityDetector::default().scan(&chain(), &body, 0.0), Some(3));
    }

    #[test]
    fn needs_upward_motion() {
        let falling = SimpleBody::new(Vec2::new(0.0, 60.0)).with_velocity(Vec2::new(0.0, 250.0));
        let slow = SimpleBody::new(Vec2::new(0.0, 60.0)).with_velocity(Vec2::new(0.0, -150.0));
        let detector = ProximityDetector::default();
        assert_eq!(detector.scan(&chain(), &falling, 0.0), None);
        assert_eq!(detector.scan(&chain(), &slow, 0.0), None);
    }

    #[test]
    fn anchor_is_never_a_target() {
        let body = SimpleBody::new(Vec2::new(0.0, -30.0)).with_velocity(Vec2::new(0.0, -250.0));
        assert_eq!(ProximityDetector::default().scan(&chain(), &body, 0.0), None);
    }

    #[test]
    fn cooldown_blocks_until_window_passes() {
        let mut body = SimpleBody::new(Vec2::new(0.0, 60.0)).with_velocity(Vec2::new(0.0, -250.0));
        body.last_release_ms = Some(1000.0);
        let detector = ProximityDetector::default();
        assert_eq!(detector.scan(&chain(), &body, 1100.0), None);
        assert_eq!(detector.scan(&chain(), &body, 1499.0), None);
        assert!(detector.scan(&chain(), &body, 1600.0).is_some());
    }

    #[test]
    fn nearest_picks_closest_particle() {
        let body = SimpleBody::new(Vec2::new(5.0, 74.0));
        let (index, _) = ProximityDetector::default().nearest(&chain(), &body).unwrap();
        assert_eq!(index, 5);
    }
}
