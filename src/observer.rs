//! Step observer trait for monitoring vine simulation progress.

use crate::attachment::GrabCause;
use crate::handle::VineHandle;

/// Trait for observing vine simulation steps.
///
/// Implement this to watch solver progress or grab events (debug overlays,
/// profiling, sound cues). All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after a vine's particles have been integrated.
    fn on_integrate(&mut self, _vine: VineHandle) {}

    /// Called after each relaxation pass over a vine.
    fn on_constraint_iteration(&mut self, _vine: VineHandle, _iteration: usize) {}

    /// Called when the body attaches to a vine during an update.
    fn on_grab(&mut self, _vine: VineHandle, _particle_index: usize, _cause: GrabCause) {}

    /// Called when the held particle shifts while climbing.
    fn on_climb(&mut self, _vine: VineHandle, _from: usize, _to: usize) {}

    /// Called when a frame is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation is needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
