//! Snapshot cadence and delivery for the drivers.

use calor_core::{SnapshotError, SnapshotSink, StepId};

/// When snapshots are due.
///
/// `Copy` so that every team member can hold its own and reach the same
/// decision without coordination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotSchedule {
    interval: u64,
    enabled: bool,
}

impl SnapshotSchedule {
    /// Schedule with the given interval.
    pub fn every(interval: u64, enabled: bool) -> Self {
        Self { interval, enabled }
    }

    /// Whether any snapshot can ever be due.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a snapshot is due after `step` has been committed.
    pub fn is_due(&self, step: StepId) -> bool {
        self.enabled && step.is_multiple_of(self.interval)
    }
}

/// Delivers due snapshots to an optional sink.
///
/// The first sink error is kept and further emission stops, but the run
/// itself carries on so that every team member still completes the same
/// number of barrier phases.
pub struct Emitter<'a> {
    sink: Option<&'a mut dyn SnapshotSink>,
    schedule: SnapshotSchedule,
    scratch: Vec<f64>,
    emitted: u64,
    error: Option<SnapshotError>,
}

impl<'a> Emitter<'a> {
    /// Create an emitter; no sink means nothing is ever due.
    pub fn new(sink: Option<&'a mut dyn SnapshotSink>, interval: u64) -> Self {
        let schedule = SnapshotSchedule::every(interval, sink.is_some());
        Self {
            sink,
            schedule,
            scratch: Vec::new(),
            emitted: 0,
            error: None,
        }
    }

    /// The schedule this emitter follows.
    pub fn schedule(&self) -> SnapshotSchedule {
        self.schedule
    }

    /// Emit a snapshot for `step` if one is due. `fill` copies the
    /// committed field into the provided scratch buffer.
    pub fn offer<F>(&mut self, step: StepId, fill: F)
    where
        F: FnOnce(&mut Vec<f64>),
    {
        if !self.schedule.is_due(step) || self.error.is_some() {
            return;
        }
        let Some(sink) = self.sink.as_deref_mut() else {
            return;
        };
        fill(&mut self.scratch);
        match sink.emit(step, &self.scratch) {
            Ok(()) => self.emitted += 1,
            Err(e) => {
                tracing::warn!(
                    step = step.0,
                    error = %e,
                    "snapshot emission failed; suppressing further snapshots"
                );
                self.error = Some(e);
            }
        }
    }

    /// Number of snapshots successfully delivered.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Flush the sink and report the first error, if any.
    pub fn finish(mut self) -> Result<u64, SnapshotError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.finish()?;
        }
        Ok(self.emitted)
    }
}
