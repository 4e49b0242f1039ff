//! Single-threaded driver.

use std::time::Instant;

use calor_core::{DoubleBuffer, SnapshotError, SnapshotSink, StepId, ThreadCount};

use crate::config::SimConfig;
use crate::emit::Emitter;
use crate::metrics::RunMetrics;
use crate::stencil::stencil_step;

/// Run `config.steps` stencil steps on the calling thread.
///
/// Each step computes the stencil from the current into the next buffer
/// and commits with `config.commit`. With a sink, a snapshot of the
/// committed field is emitted at step 0 and every
/// `config.snapshot_interval` steps.
///
/// Sink errors do not cut the run short: the first error is returned
/// after all steps have completed.
pub fn run_sequential(
    buffers: &mut DoubleBuffer,
    config: &SimConfig,
    sink: Option<&mut dyn SnapshotSink>,
) -> Result<RunMetrics, SnapshotError> {
    let _span = tracing::debug_span!(
        "run_sequential",
        len = buffers.len(),
        steps = config.steps,
        commit = %config.commit
    )
    .entered();

    let start = Instant::now();
    let mut emitter = Emitter::new(sink, config.snapshot_interval);
    emitter.offer(StepId(0), |out| {
        out.clear();
        out.extend_from_slice(buffers.current().as_slice());
    });

    for t in 1..=config.steps {
        let (current, next) = buffers.split();
        stencil_step(current.as_slice(), next.as_mut_slice());
        buffers.commit(config.commit);

        emitter.offer(StepId(t), |out| {
            out.clear();
            out.extend_from_slice(buffers.current().as_slice());
        });
    }

    let snapshots_emitted = emitter.finish()?;
    let elapsed = start.elapsed();
    tracing::debug!(?elapsed, snapshots_emitted, "sequential run complete");

    Ok(RunMetrics {
        threads: ThreadCount::ONE,
        steps: config.steps,
        snapshots_emitted,
        commit: config.commit,
        elapsed,
    })
}
