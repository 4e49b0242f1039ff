//! Snapshot forwarding to a dedicated writer thread.
//!
//! ```text
//!   team leader                       writer thread
//!   ───────────                       ─────────────
//!   ChannelSink::emit ──[bounded(n)]──► inner.emit
//!   ChannelSink::finish (close) ──────► inner.finish, exit
//! ```
//!
//! The leader only pays for one copy of the field and a channel send per
//! snapshot; formatting and file I/O happen on the writer thread. When
//! the channel is full the leader blocks until the writer catches up.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use calor_core::{Snapshot, SnapshotError, SnapshotSink, StepId};

/// Sink half of a [`SnapshotPipe`]: forwards snapshots over the channel.
pub struct ChannelSink {
    tx: Option<Sender<Snapshot>>,
}

impl SnapshotSink for ChannelSink {
    fn emit(&mut self, step: StepId, samples: &[f64]) -> Result<(), SnapshotError> {
        let tx = self.tx.as_ref().ok_or(SnapshotError::Disconnected)?;
        tx.send(Snapshot::new(step, samples.to_vec()))
            .map_err(|_| SnapshotError::Disconnected)
    }

    /// Close the channel so the writer thread can drain and exit.
    fn finish(&mut self) -> Result<(), SnapshotError> {
        self.tx = None;
        Ok(())
    }
}

/// Handle onto the writer thread that owns the real sink.
pub struct SnapshotPipe {
    handle: JoinHandle<Result<u64, SnapshotError>>,
}

impl SnapshotPipe {
    /// Move `sink` onto a new writer thread fed by a channel holding at
    /// most `capacity` pending snapshots.
    pub fn spawn<S>(sink: S, capacity: usize) -> Result<(ChannelSink, Self), SnapshotError>
    where
        S: SnapshotSink + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        let handle = thread::Builder::new()
            .name("calor-snapshot-writer".into())
            .spawn(move || drain(sink, rx))?;
        Ok((ChannelSink { tx: Some(tx) }, Self { handle }))
    }

    /// Close the channel, wait for the writer to drain, and return the
    /// number of snapshots it wrote.
    ///
    /// An error from the inner sink takes precedence over the
    /// [`Disconnected`](SnapshotError::Disconnected) that the sending
    /// side observes once the writer has stopped.
    pub fn join(self, sink: ChannelSink) -> Result<u64, SnapshotError> {
        drop(sink);
        self.handle
            .join()
            .map_err(|_| SnapshotError::WriterPanicked)?
    }
}

fn drain<S: SnapshotSink>(mut sink: S, rx: Receiver<Snapshot>) -> Result<u64, SnapshotError> {
    let mut written = 0u64;
    for snapshot in rx {
        sink.emit(snapshot.step(), snapshot.samples())?;
        written += 1;
    }
    sink.finish()?;
    Ok(written)
}
