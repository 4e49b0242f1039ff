//! Integration test: a failing sink does not cut a run short.
//!
//! The first sink error is returned only after every step has run, and
//! the final field is the same as for a run without a sink.

use calor_core::{CommitStrategy, SnapshotError, ThreadCount};
use calor_engine::{SimConfig, Simulation};
use calor_test_utils::fixtures::{impulse, reference_run};
use calor_test_utils::FailingSink;

fn simulation(commit: CommitStrategy) -> Simulation {
    let mut sim = Simulation::new(SimConfig {
        commit,
        snapshot_interval: 10,
        ..SimConfig::with_size(41, 100)
    })
    .unwrap();
    sim.initialize();
    sim
}

#[test]
fn sequential_completes_then_reports() {
    for commit in CommitStrategy::ALL {
        let mut sim = simulation(commit);
        let mut sink = FailingSink::after(3);
        let err = sim.run_sequential(Some(&mut sink)).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
        assert_eq!(sink.attempts(), 4);
        assert_eq!(
            sim.field().as_slice(),
            reference_run(&impulse(41, 100.0), 100).as_slice()
        );
    }
}

#[test]
fn parallel_completes_then_reports() {
    for commit in CommitStrategy::ALL {
        let mut sim = simulation(commit);
        let mut sink = FailingSink::immediately();
        let err = sim
            .run_parallel(ThreadCount::new(4).unwrap(), Some(&mut sink))
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
        assert_eq!(sink.attempts(), 1);
        assert_eq!(
            sim.field().as_slice(),
            reference_run(&impulse(41, 100.0), 100).as_slice()
        );
    }
}
