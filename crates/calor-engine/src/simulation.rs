//! The user-facing simulation object.
//!
//! [`Simulation`] owns a validated [`SimConfig`] and the
//! [`DoubleBuffer`] both drivers step. Every run starts from whatever
//! state the buffers hold, so callers that want independent runs call
//! [`initialize()`](Simulation::initialize) in between.
//!
//! # Ownership model
//!
//! All running methods take `&mut self`. The sink is borrowed only for the
//! duration of one run and never crosses a thread boundary: the leader of
//! the thread team runs on the calling thread.

use calor_core::{DoubleBuffer, Field, SnapshotError, SnapshotSink, ThreadCount};

use crate::config::{ConfigError, SimConfig};
use crate::init;
use crate::metrics::RunMetrics;
use crate::parallel::run_parallel;
use crate::sequential::run_sequential;

// Compile-time assertion: Simulation can be moved to another thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── ExecutionMode ──────────────────────────────────────────────────

/// Which driver executes a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Single-threaded driver.
    Sequential,
    /// Thread-team driver with the given team size.
    Parallel(ThreadCount),
}

impl ExecutionMode {
    /// Number of threads this mode uses.
    pub fn threads(self) -> ThreadCount {
        match self {
            Self::Sequential => ThreadCount::ONE,
            Self::Parallel(n) => n,
        }
    }
}

// ── Simulation ─────────────────────────────────────────────────────

/// A heat-diffusion simulation over a one-dimensional field.
///
/// # Example
///
/// ```
/// use calor_engine::{Simulation, SimConfig};
///
/// let mut sim = Simulation::new(SimConfig::with_size(5, 1)).unwrap();
/// sim.initialize();
/// sim.run_sequential(None).unwrap();
/// assert_eq!(sim.field().as_slice(), &[0.0, 50.0, 0.0, 50.0, 0.0]);
/// ```
pub struct Simulation {
    config: SimConfig,
    buffers: DoubleBuffer,
}

impl Simulation {
    /// Validate `config` and allocate the buffers.
    ///
    /// The buffers start zeroed; call [`initialize()`](Self::initialize)
    /// to place the impulse.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let buffers = DoubleBuffer::new(config.len);
        Ok(Self { config, buffers })
    }

    /// The configuration this simulation was built with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Reset both buffers to the initial state: all zeros with the
    /// impulse at the midpoint.
    pub fn initialize(&mut self) {
        init::initialize(&mut self.buffers, self.config.impulse);
    }

    /// The current field.
    pub fn field(&self) -> &Field {
        self.buffers.current()
    }

    /// Run the configured steps on the calling thread.
    pub fn run_sequential(
        &mut self,
        sink: Option<&mut dyn SnapshotSink>,
    ) -> Result<RunMetrics, SnapshotError> {
        run_sequential(&mut self.buffers, &self.config, sink)
    }

    /// Run the configured steps on a team of `threads` members.
    ///
    /// The field holds the result afterwards, even when the sink failed.
    pub fn run_parallel(
        &mut self,
        threads: ThreadCount,
        sink: Option<&mut dyn SnapshotSink>,
    ) -> Result<RunMetrics, SnapshotError> {
        run_parallel(threads, &mut self.buffers, &self.config, sink)
    }

    /// Run the configured steps with the chosen driver.
    pub fn run(
        &mut self,
        mode: ExecutionMode,
        sink: Option<&mut dyn SnapshotSink>,
    ) -> Result<RunMetrics, SnapshotError> {
        match mode {
            ExecutionMode::Sequential => self.run_sequential(sink),
            ExecutionMode::Parallel(threads) => self.run_parallel(threads, sink),
        }
    }
}
