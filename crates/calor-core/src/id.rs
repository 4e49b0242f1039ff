//! Strongly-typed identifiers for the simulation clock and thread team.

use std::fmt;
use std::num::NonZeroUsize;

/// Position of the simulation clock.
///
/// `StepId(0)` is the initialized state; each completed stencil step +
/// commit advances the clock by one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// Whether this step lands on a multiple of `interval`.
    ///
    /// Always false for a zero interval.
    pub fn is_multiple_of(self, interval: u64) -> bool {
        interval != 0 && self.0 % interval == 0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Size of a thread team.
///
/// A team always has at least one member, so a zero-sized team cannot be
/// handed to a driver. Construct with [`ThreadCount::new`], which rejects
/// zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreadCount(NonZeroUsize);

impl ThreadCount {
    /// A single-member team.
    pub const ONE: Self = Self(NonZeroUsize::MIN);

    /// Create a thread count. Returns `None` for zero.
    pub fn new(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(Self)
    }

    /// The number of team members.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Number of hardware threads reported by the OS, or one if unknown.
    pub fn available() -> Self {
        std::thread::available_parallelism()
            .map(Self)
            .unwrap_or(Self::ONE)
    }
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroUsize> for ThreadCount {
    fn from(v: NonZeroUsize) -> Self {
        Self(v)
    }
}
