//! Thread-team driver.
//!
//! One team is spawned per run and lives for all steps. Each member owns
//! its partition block of both fields as plain `&mut [f64]` slices, so
//! the stencil runs over ordinary memory exactly as the sequential
//! driver's does. Neighbouring blocks meet only through their edge
//! samples, published to a [`HaloExchange`] once per step.
//!
//! Each step is a fixed sequence of barrier phases that every member
//! walks through in lockstep:
//!
//! ```text
//! Copy commit                         Swap commit
//! ───────────                         ───────────
//! stencil(own block, halos)           stencil(own block, halos)
//! copy own block next -> current      publish edges of next
//! publish edges of current            wait
//! wait                                single { swap roles,
//! single { snapshot } (if due)                 snapshot if due }
//! ```
//!
//! Block edges written in step `t` are read in step `t + 1`, on the far
//! side of at least one barrier. A member writes only its own block, and
//! the role index is written only by the leader inside a single-executor
//! section, so no sample is ever written by two members or read while
//! being written.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use calor_core::{CommitStrategy, DoubleBuffer, SnapshotError, SnapshotSink, StepId, ThreadCount};

use crate::config::SimConfig;
use crate::emit::Emitter;
use crate::halo::{Halo, HaloExchange, SharedField};
use crate::metrics::RunMetrics;
use crate::partition::Partition;
use crate::stencil::stencil_block;
use crate::team::ThreadTeam;

/// One member's share of the two fields.
struct Block<'a> {
    /// Field index of the block's first sample.
    offset: usize,
    /// The block in physical slot 0 and slot 1.
    slots: [&'a mut [f64]; 2],
    left: Halo,
    right: Halo,
}

/// `(current, next)` views of a block for the given current slot.
fn roles<'b>(slot: usize, slots: &'b mut [&mut [f64]; 2]) -> (&'b mut [f64], &'b mut [f64]) {
    let [a, b] = slots;
    if slot == 0 {
        (&mut **a, &mut **b)
    } else {
        (&mut **b, &mut **a)
    }
}

/// Halo sources for `block`: another member's edge, or a boundary sample
/// of `current` when no member owns the neighbouring index.
fn halo_sources(partition: &Partition, block: &Range<usize>, current: &[f64]) -> (Halo, Halo) {
    if block.is_empty() {
        return (Halo::Fixed(0.0), Halo::Fixed(0.0));
    }
    let side = |index: usize| match partition.owner_of(index) {
        Some(rank) => Halo::Member(rank),
        None => Halo::Fixed(current[index]),
    };
    (side(block.start - 1), side(block.end))
}

/// Run `config.steps` stencil steps across a team of `threads` members.
///
/// `buffers` must already hold the starting state and holds the result,
/// roles included, when the run returns. Snapshots, when a sink is given,
/// are emitted by the team leader after each due commit and observe the
/// fully committed field.
///
/// Sink errors do not cut the run short: the first error is returned
/// after all steps have completed.
pub fn run_parallel(
    threads: ThreadCount,
    buffers: &mut DoubleBuffer,
    config: &SimConfig,
    sink: Option<&mut dyn SnapshotSink>,
) -> Result<RunMetrics, SnapshotError> {
    let _span = tracing::debug_span!(
        "run_parallel",
        threads = threads.get(),
        len = buffers.len(),
        steps = config.steps,
        commit = %config.commit
    )
    .entered();

    let start = Instant::now();
    let steps = config.steps;
    let commit = config.commit;
    let team = ThreadTeam::new(threads);
    let partition = Partition::contiguous(buffers.current().interior(), team.size().get());

    let mut emitter = Emitter::new(sink, config.snapshot_interval);
    let schedule = emitter.schedule();
    emitter.offer(StepId(0), |out| {
        out.clear();
        out.extend_from_slice(buffers.current().as_slice());
    });

    if commit == CommitStrategy::Swap {
        // Boundaries are never written during a run, so propagating them
        // once here is what every per-step swap commit would do.
        let (current, next) = buffers.split_mut();
        next.copy_boundary_from(current);
    }

    let initial = buffers.current().as_slice();
    let sources: Vec<(Halo, Halo)> = partition
        .ranges()
        .iter()
        .map(|r| halo_sources(&partition, r, initial))
        .collect();
    let stage = schedule
        .is_enabled()
        .then(|| SharedField::from_slice(initial));
    let halos = HaloExchange::new(partition.len());
    let role = AtomicUsize::new(buffers.current_slot());

    let [slot0, slot1] = buffers.fields_mut();
    let blocks: Vec<Block<'_>> = partition
        .split_mut(slot0.as_mut_slice())
        .into_iter()
        .zip(partition.split_mut(slot1.as_mut_slice()))
        .zip(partition.ranges().iter().zip(sources))
        .map(|((a, b), (range, (left, right)))| Block {
            offset: range.start,
            slots: [a, b],
            left,
            right,
        })
        .collect();

    team.run(blocks, &mut emitter, |member, block, mut leader| {
        let rank = member.rank();
        let Block {
            offset,
            mut slots,
            left,
            right,
        } = block;

        let (current, _) = roles(role.load(Ordering::Relaxed), &mut slots);
        halos.publish(0, rank, current);
        member.wait();

        for t in 1..=steps {
            let step = StepId(t);
            let slot = role.load(Ordering::Relaxed);
            let (current, next) = roles(slot, &mut slots);
            let l = halos.left(t - 1, left);
            let r = halos.right(t - 1, right);
            stencil_block(l, current, r, next);

            let due = schedule.is_due(step);
            match commit {
                CommitStrategy::Copy => {
                    current.copy_from_slice(next);
                    halos.publish(t, rank, current);
                    if let Some(stage) = stage.as_ref().filter(|_| due) {
                        stage.write_block(offset, current);
                    }
                    member.wait();
                    if due {
                        member.single(|| {
                            if let Some(emitter) = leader.as_deref_mut() {
                                if let Some(stage) = stage.as_ref() {
                                    emitter.offer(step, |out| stage.read_into(out));
                                }
                            }
                        });
                    }
                }
                CommitStrategy::Swap => {
                    halos.publish(t, rank, next);
                    if let Some(stage) = stage.as_ref().filter(|_| due) {
                        stage.write_block(offset, next);
                    }
                    member.wait();
                    member.single(|| {
                        if let Some(emitter) = leader.as_deref_mut() {
                            role.store(1 - slot, Ordering::Relaxed);
                            if let Some(stage) = stage.as_ref() {
                                emitter.offer(step, |out| stage.read_into(out));
                            }
                        }
                    });
                }
            }
        }
    });

    buffers.set_current_slot(role.into_inner());

    let snapshots_emitted = emitter.finish()?;
    let elapsed = start.elapsed();
    tracing::debug!(?elapsed, snapshots_emitted, "parallel run complete");

    Ok(RunMetrics {
        threads,
        steps,
        snapshots_emitted,
        commit,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::initialize;
    use calor_core::Snapshot;

    fn threads(n: usize) -> ThreadCount {
        ThreadCount::new(n).unwrap()
    }

    fn start_state(len: usize) -> DoubleBuffer {
        let mut buf = DoubleBuffer::new(len);
        initialize(&mut buf, 100.0);
        buf
    }

    #[test]
    fn five_point_scenario_every_team_size() {
        for commit in CommitStrategy::ALL {
            for n in [1, 2, 4, 8] {
                let mut buf = start_state(5);
                let cfg = SimConfig {
                    commit,
                    ..SimConfig::with_size(5, 1)
                };
                run_parallel(threads(n), &mut buf, &cfg, None).unwrap();
                assert_eq!(
                    buf.current().as_slice(),
                    &[0.0, 50.0, 0.0, 50.0, 0.0],
                    "threads={n} commit={commit}"
                );
            }
        }
    }

    #[test]
    fn leader_emits_committed_state() {
        for commit in CommitStrategy::ALL {
            let mut buf = start_state(33);
            let cfg = SimConfig {
                snapshot_interval: 5,
                commit,
                ..SimConfig::with_size(33, 20)
            };
            let four = threads(4);
            let mut out: Vec<Snapshot> = Vec::new();
            let m = run_parallel(four, &mut buf, &cfg, Some(&mut out)).unwrap();

            assert_eq!(m.snapshots_emitted, 5);
            let steps: Vec<u64> = out.iter().map(|s| s.step().0).collect();
            assert_eq!(steps, vec![0, 5, 10, 15, 20]);
            assert_eq!(out.last().unwrap().samples(), buf.current().as_slice());
        }
    }

    #[test]
    fn swap_parity_leaves_role_flipped() {
        let mut buf = start_state(9);
        let cfg = SimConfig {
            commit: CommitStrategy::Swap,
            ..SimConfig::with_size(9, 3)
        };
        run_parallel(threads(2), &mut buf, &cfg, None).unwrap();
        assert_eq!(buf.current_slot(), 1);
    }

    #[test]
    fn halo_sources_skip_empty_blocks() {
        let current = [7.0, 0.0, 0.0, 0.0, 9.0];
        let p = Partition::contiguous(1..4, 5);
        assert_eq!(
            halo_sources(&p, &p.get(0), &current),
            (Halo::Fixed(7.0), Halo::Member(1))
        );
        assert_eq!(
            halo_sources(&p, &p.get(2), &current),
            (Halo::Member(1), Halo::Fixed(9.0))
        );
    }

    #[test]
    fn boundaries_held_by_any_team() {
        for commit in CommitStrategy::ALL {
            let mut start = vec![0.0; 12];
            start[0] = 3.0;
            start[11] = -5.0;
            let mut buf = DoubleBuffer::new(12);
            buf.current_mut().as_mut_slice().copy_from_slice(&start);
            let cfg = SimConfig {
                commit,
                ..SimConfig::with_size(12, 7)
            };
            run_parallel(threads(3), &mut buf, &cfg, None).unwrap();
            assert_eq!(buf.current().boundary(), Some((3.0, -5.0)), "{commit}");
        }
    }
}
