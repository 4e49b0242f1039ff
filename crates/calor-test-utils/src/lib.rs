//! Test utilities and mock sinks for calor development.
//!
//! Provides [`SnapshotSink`] implementations that record or fail on
//! demand, plus small reference fixtures in [`fixtures`] for checking
//! driver output against a naive stencil.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::io;

use calor_core::{Snapshot, SnapshotError, SnapshotSink, StepId};

/// Sink that keeps every snapshot and counts `finish()` calls.
#[derive(Debug, Default)]
pub struct RecordingSink {
    snapshots: Vec<Snapshot>,
    finished: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded snapshots in emission order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Steps of the recorded snapshots, in emission order.
    pub fn steps(&self) -> Vec<u64> {
        self.snapshots.iter().map(|s| s.step().0).collect()
    }

    /// Number of times `finish()` was called.
    pub fn finished(&self) -> usize {
        self.finished
    }
}

impl SnapshotSink for RecordingSink {
    fn emit(&mut self, step: StepId, samples: &[f64]) -> Result<(), SnapshotError> {
        self.snapshots.push(Snapshot::new(step, samples.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SnapshotError> {
        self.finished += 1;
        Ok(())
    }
}

/// Sink that accepts a fixed number of snapshots, then fails every call
/// with an I/O error.
///
/// Counts every `emit()` attempt so tests can check that emission stops
/// after the first failure.
#[derive(Debug)]
pub struct FailingSink {
    succeed_count: usize,
    attempts: usize,
    accepted: Vec<StepId>,
}

impl FailingSink {
    /// Accept `n` snapshots, then fail.
    pub fn after(n: usize) -> Self {
        Self {
            succeed_count: n,
            attempts: 0,
            accepted: Vec::new(),
        }
    }

    /// Fail on the very first snapshot.
    pub fn immediately() -> Self {
        Self::after(0)
    }

    /// Total number of `emit()` calls, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Steps that were accepted before the failure.
    pub fn accepted(&self) -> &[StepId] {
        &self.accepted
    }
}

impl SnapshotSink for FailingSink {
    fn emit(&mut self, step: StepId, _samples: &[f64]) -> Result<(), SnapshotError> {
        self.attempts += 1;
        if self.accepted.len() < self.succeed_count {
            self.accepted.push(step);
            Ok(())
        } else {
            Err(SnapshotError::Io(io::Error::other(format!(
                "injected failure at step {step}"
            ))))
        }
    }
}
