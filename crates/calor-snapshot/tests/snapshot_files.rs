//! Integration test: snapshot files written by real runs.
//!
//! Runs the sequential driver and several team sizes into CSV files on
//! disk, through the writer thread, and checks that every team file
//! reads back identical to the sequential baseline.

use std::fs;
use std::path::{Path, PathBuf};

use calor_core::{CommitStrategy, ThreadCount};
use calor_engine::{ExecutionMode, SimConfig, Simulation};
use calor_snapshot::{
    compare_files, snapshot_file_name, CsvSnapshotWriter, SnapshotPipe, SnapshotReader,
};

/// Fresh scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("calor-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_run(dir: &Path, commit: CommitStrategy, threads: Option<ThreadCount>) -> PathBuf {
    let mut sim = Simulation::new(SimConfig {
        commit,
        ..SimConfig::with_size(301, 500)
    })
    .unwrap();
    sim.initialize();

    let path = dir.join(snapshot_file_name(threads));
    let writer = CsvSnapshotWriter::create(&path).unwrap();
    let (mut sink, pipe) = SnapshotPipe::spawn(writer, 4).unwrap();
    let mode = match threads {
        None => ExecutionMode::Sequential,
        Some(n) => ExecutionMode::Parallel(n),
    };
    let metrics = sim.run(mode, Some(&mut sink)).unwrap();
    assert_eq!(pipe.join(sink).unwrap(), metrics.snapshots_emitted);
    path
}

#[test]
fn team_files_match_sequential_file() {
    for commit in CommitStrategy::ALL {
        let dir = scratch_dir(&format!("match-{commit}"));
        let baseline = write_run(&dir, commit, None);

        let rows = SnapshotReader::open(&baseline).unwrap().read_all().unwrap();
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0].samples()[150], 100.0);
        assert!(rows.iter().all(|r| r.len() == 301));

        for n in [1, 2, 4, 8] {
            let file = write_run(&dir, commit, ThreadCount::new(n));
            assert_eq!(
                file.file_name().unwrap().to_str().unwrap(),
                format!("snapshots_{n}.csv")
            );
            assert_eq!(compare_files(&baseline, &file, 0.0).unwrap(), None);
        }
        let _ = fs::remove_dir_all(&dir);
    }
}

#[test]
fn files_are_byte_identical_across_drivers() {
    let dir = scratch_dir("bytes");
    let seq = write_run(&dir, CommitStrategy::Swap, None);
    let par = write_run(&dir, CommitStrategy::Swap, ThreadCount::new(4));
    assert_eq!(fs::read(seq).unwrap(), fs::read(par).unwrap());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_is_io_error() {
    let dir = scratch_dir("missing");
    let err = SnapshotReader::open(dir.join("nope.csv")).err().unwrap();
    assert!(matches!(err, calor_core::SnapshotError::Io(_)));
    let _ = fs::remove_dir_all(&dir);
}
