//! Generational handles into the vine table.

use core::fmt;

/// Identifies a vine owned by a [`VineManager`](crate::VineManager).
///
/// A handle outlives the vine it names only as a stale value: once the slot
/// is reused its generation no longer matches and lookups fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VineHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl VineHandle {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        VineHandle { index, generation }
    }

    /// Slot position in the table.
    pub fn index(self) -> u32 { self.index }

    pub fn generation(self) -> u32 { self.generation }
}

impl fmt::Display for VineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
