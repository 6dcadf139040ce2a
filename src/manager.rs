//! Owner of all vines in a level and driver of the per-frame update.

use crate::attachment::{
    self, AttachmentState, ClimbDirection, Coupling, GrabCause, ReleaseCause, SwingInput,
};
use crate::body::PlayerBody;
use crate::chain::VineChain;
use crate::config::{SystemConfig, VineConfig};
use crate::error::VineError;
use crate::handle::VineHandle;
use crate::integrator::Integrator;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::proximity::ProximityDetector;
use crate::solver::ConstraintSolver;
use crate::vec::Vec2;
use alloc::vec::Vec;
use log::{debug, trace};

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    chain: Option<VineChain>,
}

/// Owns every vine of a level and steps them once per game tick.
///
/// Per vine and frame the order is fixed: integrate, relax, then either
/// couple with the body (held vine) or check for an auto-grab (free vine).
/// Vines never interact with each other, only with the one body passed in.
///
/// The manager keeps its own clock, advanced by the raw frame time, and uses
/// it to stamp releases and enforce the re-grab cooldown.
#[derive(Clone, Debug)]
pub struct VineManager {
    slots: Vec<Slot>,
    free: Vec<u32>,
    vine_config: VineConfig,
    integrator: Integrator,
    solver: ConstraintSolver,
    coupling: Coupling,
    detector: ProximityDetector,
    now_ms: f64,
}

impl VineManager {
    pub fn new(config: SystemConfig) -> Result<Self, VineError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SystemConfig) -> Self {
        VineManager {
            slots: Vec::new(),
            free: Vec::new(),
            integrator: Integrator::from_config(&config.vine),
            solver: ConstraintSolver::new(config.vine.iterations),
            coupling: Coupling::new(config.coupling),
            detector: ProximityDetector::new(config.proximity),
            vine_config: config.vine,
            now_ms: 0.0,
        }
    }

    pub fn vine_config(&self) -> &VineConfig { &self.vine_config }
    pub fn coupling(&self) -> &Coupling { &self.coupling }
    pub fn detector(&self) -> &ProximityDetector { &self.detector }

    /// Clock reading in ms: the sum of all frame times passed to `update`.
    pub fn now_ms(&self) -> f64 { self.now_ms }

    // ---- level lifecycle ----

    /// Hang a new vine of `segment_count` particles from `(anchor_x, anchor_y)`.
    pub fn create_vine(
        &mut self,
        anchor_x: f64,
        anchor_y: f64,
        segment_count: usize,
    ) -> Result<VineHandle, VineError> {
        let config = self.vine_config.clone();
        self.create_vine_with(Vec2::new(anchor_x, anchor_y), segment_count, &config)
    }

    /// Like [`create_vine`](Self::create_vine) with its own shape parameters.
    /// Integration timing and solver passes stay shared.
    pub fn create_vine_with(
        &mut self,
        anchor: Vec2,
        segment_count: usize,
        config: &VineConfig,
    ) -> Result<VineHandle, VineError> {
        let chain = VineChain::new(anchor, segment_count, config)?;
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.chain = Some(chain);
                VineHandle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, chain: Some(chain) });
                VineHandle::new(index, 0)
            }
        };
        debug!(
            "vine {} created at ({}, {}) with {} particles",
            handle, anchor.x, anchor.y, segment_count
        );
        Ok(handle)
    }

    /// Remove a vine. Its handle, and any copy a body still holds, goes stale.
    pub fn remove_vine(&mut self, vine: VineHandle) -> Option<VineChain> {
        let slot = self.slots.get_mut(vine.index as usize)?;
        if slot.generation != vine.generation {
            return None;
        }
        let chain = slot.chain.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(vine.index);
        debug!("vine {} removed", vine);
        Some(chain)
    }

    /// Scene teardown: drop every vine.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.chain.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        debug!("all vines cleared");
    }

    // ---- read access ----

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.chain.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, vine: VineHandle) -> bool {
        self.vine(vine).is_some()
    }

    pub fn vine(&self, vine: VineHandle) -> Option<&VineChain> {
        self.slots
            .get(vine.index as usize)
            .filter(|s| s.generation == vine.generation)
            .and_then(|s| s.chain.as_ref())
    }

    fn chain_mut(&mut self, vine: VineHandle) -> Result<&mut VineChain, VineError> {
        Self::lookup_mut(&mut self.slots, vine)
    }

    fn lookup_mut(slots: &mut [Slot], vine: VineHandle) -> Result<&mut VineChain, VineError> {
        slots
            .get_mut(vine.index as usize)
            .filter(|s| s.generation == vine.generation)
            .and_then(|s| s.chain.as_mut())
            .ok_or(VineError::UnknownVine { vine })
    }

    /// All live vines, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (VineHandle, &VineChain)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.chain.as_ref().map(|c| (VineHandle::new(i as u32, s.generation), c))
        })
    }

    /// Particle positions of a vine, anchor first, for drawing.
    pub fn positions(&self, vine: VineHandle) -> Option<Vec<Vec2>> {
        self.vine(vine).map(VineChain::positions)
    }

    pub fn attachment(&self, vine: VineHandle) -> Option<AttachmentState> {
        self.vine(vine).map(VineChain::attachment)
    }

    // ---- simulation ----

    /// Advance every vine by one frame of `dt_ms`.
    pub fn update<B: PlayerBody>(&mut self, dt_ms: f64, body: &mut B) {
        self.update_observed(dt_ms, body, &mut NoOpStepObserver);
    }

    pub fn update_observed<B: PlayerBody, O: StepObserver>(
        &mut self,
        dt_ms: f64,
        body: &mut B,
        observer: &mut O,
    ) {
        if dt_ms > 0.0 {
            self.now_ms += dt_ms;
        }
        self.drop_stale_hold(body);

        if self.integrator.clamp_step(dt_ms) == 0.0 {
            observer.on_step_complete();
            return;
        }

        let now_ms = self.now_ms;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(chain) = slot.chain.as_mut() else {
                continue;
            };
            let handle = VineHandle::new(index as u32, slot.generation);

            self.integrator.step(chain, dt_ms);
            observer.on_integrate(handle);

            self.solver
                .solve_observed(chain, |i| observer.on_constraint_iteration(handle, i));

            if chain.is_grabbed() {
                if body.vine() == Some(handle) {
                    if let Some((from, to)) = self.coupling.couple(chain, body) {
                        trace!("vine {} climb {} -> {}", handle, from, to);
                        observer.on_climb(handle, from, to);
                    }
                }
            } else if let Some(i) = self.detector.scan(chain, body, now_ms) {
                if attachment::attach(chain, handle, i, body).is_ok() {
                    debug!("vine {} auto-grabbed at particle {}", handle, i);
                    observer.on_grab(handle, i, GrabCause::Proximity);
                }
            }
        }

        observer.on_step_complete();
    }

    /// A body holding a removed vine, or one that is no longer grabbed, falls
    /// free again.
    fn drop_stale_hold<B: PlayerBody>(&self, body: &mut B) {
        if let Some(vine) = body.vine() {
            if !self.vine(vine).is_some_and(VineChain::is_grabbed) {
                debug!("body held released or removed vine {}, dropping it", vine);
                attachment::leave_vine(body, self.now_ms);
            }
        }
    }

    // ---- grab / release ----

    /// Attach `body` to `vine` at `particle_index`.
    ///
    /// Fails with `AlreadyGrabbed` on a held vine, `InvalidParticleIndex` for
    /// the anchor or past the end (never clamped), `BodyAlreadyAttached` if
    /// the body holds another vine, and `UnknownVine` for a stale handle.
    pub fn grab<B: PlayerBody>(
        &mut self,
        vine: VineHandle,
        particle_index: usize,
        body: &mut B,
    ) -> Result<(), VineError> {
        self.grab_observed(vine, particle_index, body, &mut NoOpStepObserver)
    }

    /// [`grab`](Self::grab), reporting a successful grab to `observer`.
    pub fn grab_observed<B: PlayerBody, O: StepObserver>(
        &mut self,
        vine: VineHandle,
        particle_index: usize,
        body: &mut B,
        observer: &mut O,
    ) -> Result<(), VineError> {
        let chain = self.chain_mut(vine)?;
        match attachment::attach(chain, vine, particle_index, body) {
            Ok(()) => {
                debug!("vine {} grabbed at particle {}", vine, particle_index);
                observer.on_grab(vine, particle_index, GrabCause::Explicit);
                Ok(())
            }
            Err(err) => {
                debug!("grab on vine {} rejected: {}", vine, err);
                Err(err)
            }
        }
    }

    /// Let go of `vine`. Does nothing if it is free, unknown, or held by a
    /// different body.
    pub fn release<B: PlayerBody>(&mut self, vine: VineHandle, body: &mut B) {
        self.release_with(vine, body, ReleaseCause::Explicit);
    }

    fn release_with<B: PlayerBody>(&mut self, vine: VineHandle, body: &mut B, cause: ReleaseCause) {
        let now_ms = self.now_ms;
        match self.chain_mut(vine) {
            Ok(chain) => {
                if attachment::detach(chain, vine, body, now_ms) {
                    debug!("vine {} released ({:?}) at {} ms", vine, cause, now_ms);
                }
            }
            Err(_) => {
                if body.vine() == Some(vine) {
                    attachment::leave_vine(body, now_ms);
                }
            }
        }
    }

    /// Let go of whatever the body holds. Returns whether it held anything.
    pub fn release_body<B: PlayerBody>(&mut self, body: &mut B) -> bool {
        match body.vine() {
            Some(vine) => {
                self.release_with(vine, body, ReleaseCause::Explicit);
                true
            }
            None => false,
        }
    }

    /// Jump off the held vine: release, then kick the body upward.
    pub fn jump_off<B: PlayerBody>(&mut self, body: &mut B) -> bool {
        let Some(vine) = body.vine() else {
            return false;
        };
        self.release_with(vine, body, ReleaseCause::Jump);
        let vel = body.velocity();
        body.set_velocity(Vec2::new(vel.x, self.coupling.config.jump_velocity));
        true
    }

    /// Climb input while on a vine. The coupling turns the resulting vertical
    /// speed into a shift of the held particle.
    pub fn climb<B: PlayerBody>(&self, body: &mut B, direction: ClimbDirection) -> bool {
        if !body.is_on_vine() {
            return false;
        }
        let vel = body.velocity();
        body.set_velocity(Vec2::new(vel.x, self.coupling.climb_velocity(direction)));
        true
    }

    /// Horizontal input while on a vine.
    pub fn swing<B: PlayerBody>(&self, body: &mut B, input: SwingInput) -> bool {
        if !body.is_on_vine() {
            return false;
        }
        let vel = body.velocity();
        body.set_velocity(Vec2::new(self.coupling.swing_velocity(input, vel.x), vel.y));
        true
    }

    /// Nearest grabbable particle on any free vine within reach of the body.
    pub fn find_grab_target<B: PlayerBody>(&self, body: &B) -> Option<(VineHandle, usize)> {
        if body.is_on_vine() {
            return None;
        }
        let mut best: Option<(VineHandle, usize, f64)> = None;
        for (handle, chain) in self.iter() {
            if let Some((index, dist_sq)) = self.detector.nearest(chain, body) {
                if best.map_or(true, |b| dist_sq < b.2) {
                    best = Some((handle, index, dist_sq));
                }
            }
        }
        best.map(|(handle, index, _)| (handle, index))
    }

    /// Grab the nearest reachable particle, if there is one.
    pub fn grab_nearest<B: PlayerBody>(&mut self, body: &mut B) -> Option<(VineHandle, usize)> {
        let (vine, index) = self.find_grab_target(body)?;
        self.grab(vine, index, body).ok()?;
        Some((vine, index))
    }

    /// Push the held particle of `vine`. Returns false for a free or unknown vine.
    pub fn apply_force(&mut self, vine: VineHandle, force: Vec2) -> bool {
        match Self::lookup_mut(&mut self.slots, vine) {
            Ok(chain) => self.coupling.apply_force(chain, force),
            Err(_) => false,
        }
    }
}

impl Default for VineManager {
    fn default() -> Self {
        Self::build(SystemConfig::default())
    }
}
