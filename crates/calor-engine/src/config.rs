//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] fixes the run parameters (field length, step count,
//! snapshot cadence, impulse strength, commit strategy) for every run of
//! a [`Simulation`](crate::Simulation). [`validate()`](SimConfig::validate)
//! checks structural invariants once at construction.

use std::error::Error;
use std::fmt;

use calor_core::{CommitStrategy, ThreadCount};

/// Default number of samples in the field.
pub const DEFAULT_LEN: usize = 50_000;
/// Default number of time steps per run.
pub const DEFAULT_STEPS: u64 = 2_000;
/// Default snapshot cadence, in steps.
pub const DEFAULT_SNAPSHOT_INTERVAL: u64 = 50;
/// Default value injected at the midpoint by the initializer.
pub const DEFAULT_IMPULSE: f64 = 100.0;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`] or while mapping
/// user input onto run parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The field has fewer than three samples, so no interior to update.
    FieldTooShort {
        /// The configured length.
        len: usize,
    },
    /// Snapshot interval is zero.
    ZeroSnapshotInterval,
    /// The impulse value is NaN or infinite.
    InvalidImpulse {
        /// The invalid value.
        value: f64,
    },
    /// A thread count of zero was requested.
    ZeroThreadCount,
    /// The thread-count sweep is empty.
    EmptySweep,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldTooShort { len } => {
                write!(f, "field length {len} is below minimum of 3")
            }
            Self::ZeroSnapshotInterval => write!(f, "snapshot_interval must be at least 1"),
            Self::InvalidImpulse { value } => {
                write!(f, "impulse must be finite, got {value}")
            }
            Self::ZeroThreadCount => write!(f, "thread count must be at least 1"),
            Self::EmptySweep => write!(f, "thread-count sweep is empty"),
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Fixed parameters for every run of a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Number of samples in the field (N). Must be at least 3.
    pub len: usize,
    /// Number of time steps per run (T).
    pub steps: u64,
    /// Snapshots are emitted at step 0 and every `snapshot_interval`
    /// steps. Must be at least 1.
    pub snapshot_interval: u64,
    /// Value placed at the midpoint by the initializer.
    pub impulse: f64,
    /// How the next buffer becomes current after each step.
    pub commit: CommitStrategy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            len: DEFAULT_LEN,
            steps: DEFAULT_STEPS,
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL,
            impulse: DEFAULT_IMPULSE,
            commit: CommitStrategy::default(),
        }
    }
}

impl SimConfig {
    /// Config with the given length and step count, defaults elsewhere.
    pub fn with_size(len: usize, steps: u64) -> Self {
        Self {
            len,
            steps,
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.len < 3 {
            return Err(ConfigError::FieldTooShort { len: self.len });
        }
        if self.snapshot_interval == 0 {
            return Err(ConfigError::ZeroSnapshotInterval);
        }
        if !self.impulse.is_finite() {
            return Err(ConfigError::InvalidImpulse {
                value: self.impulse,
            });
        }
        Ok(())
    }

    /// Number of snapshots a run of this config emits when snapshotting
    /// is enabled: step 0 plus every full interval.
    pub fn expected_snapshots(&self) -> u64 {
        self.steps / self.snapshot_interval.max(1) + 1
    }
}

/// Map a raw thread count onto a [`ThreadCount`].
pub fn thread_count(n: usize) -> Result<ThreadCount, ConfigError> {
    ThreadCount::new(n).ok_or(ConfigError::ZeroThreadCount)
}
