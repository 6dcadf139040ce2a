//! Error types for vine operations.

use crate::handle::VineHandle;
use thiserror::Error;

/// Errors returned by vine creation, configuration, and grab requests.
///
/// None of these are fatal: the simulation keeps running and callers treat a
/// rejected grab as a no-op.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VineError {
    /// The vine is already held by a body.
    #[error("vine {vine} is already grabbed")]
    AlreadyGrabbed { vine: VineHandle },
    /// Grab index outside `[1, count - 1]`. The anchor can never be grabbed.
    #[error("particle index {index} cannot be grabbed (count: {count})")]
    InvalidParticleIndex { index: usize, count: usize },
    /// The handle does not refer to a live vine.
    #[error("vine {vine} does not exist")]
    UnknownVine { vine: VineHandle },
    /// The body is already holding a vine.
    #[error("body is already attached to vine {vine}")]
    BodyAlreadyAttached { vine: VineHandle },
    /// A vine needs an anchor plus at least one free particle.
    #[error("vine needs at least 2 particles, got {count}")]
    InsufficientSegments { count: usize },
    /// Stiffness must be in (0, 1].
    #[error("stiffness must be in (0, 1]")]
    InvalidStiffness,
    /// Damping must be in (0, 1].
    #[error("damping must be in (0, 1]")]
    InvalidDamping,
    /// Segment length must be positive and finite.
    #[error("segment length must be positive and finite")]
    InvalidSegmentLength,
    /// A speed limit, radius, or cooldown that is negative, zero where that
    /// is not allowed, or not finite.
    #[error("{name} is out of range")]
    InvalidLimit { name: &'static str },
}
