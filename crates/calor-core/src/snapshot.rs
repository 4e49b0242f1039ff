//! Snapshot records and the sink trait that receives them.

use crate::error::SnapshotError;
use crate::id::StepId;

/// An immutable copy of the field at one point on the simulation clock.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    step: StepId,
    samples: Vec<f64>,
}

impl Snapshot {
    /// Create a snapshot from owned samples.
    pub fn new(step: StepId, samples: Vec<f64>) -> Self {
        Self { step, samples }
    }

    /// Clock position the snapshot was taken at.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// The captured samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of captured samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the snapshot has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consume the snapshot, returning its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

/// Destination for snapshots emitted by a driver.
///
/// Drivers call [`emit`](SnapshotSink::emit) at step 0 and every
/// snapshot-interval step thereafter, always with the fully committed
/// field. `samples` is only borrowed for the call; implementations copy
/// what they keep.
pub trait SnapshotSink {
    /// Record one snapshot.
    fn emit(&mut self, step: StepId, samples: &[f64]) -> Result<(), SnapshotError>;

    /// Flush any buffered output. Called once after the last emit.
    fn finish(&mut self) -> Result<(), SnapshotError> {
        Ok(())
    }
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &mut S {
    fn emit(&mut self, step: StepId, samples: &[f64]) -> Result<(), SnapshotError> {
        (**self).emit(step, samples)
    }

    fn finish(&mut self) -> Result<(), SnapshotError> {
        (**self).finish()
    }
}

impl SnapshotSink for Vec<Snapshot> {
    fn emit(&mut self, step: StepId, samples: &[f64]) -> Result<(), SnapshotError> {
        self.push(Snapshot::new(step, samples.to_vec()));
        Ok(())
    }
}
