//! `calor snapshots` command - Write snapshot files for every driver.
//!
//! Writes `snapshots_seq.csv` for the sequential driver and
//! `snapshots_<threads>.csv` for each requested team size, each run
//! starting from a freshly initialized field. Every team file is then
//! compared against the sequential baseline.

use std::path::{Path, PathBuf};

use calor_core::ThreadCount;
use calor_engine::{ExecutionMode, Simulation};
use calor_snapshot::{compare_files, snapshot_file_name, CsvSnapshotWriter, SnapshotPipe};

use crate::commands::{ensure_dir, SimArgs};
use crate::error::{CliError, CliResult};

/// Maximum number of snapshots queued for the writer thread.
const PIPE_CAPACITY: usize = 4;

/// Run the sequential driver and every team size into snapshot files.
/// Returns the paths written, baseline first.
pub fn execute(args: &SimArgs, out_dir: &Path) -> CliResult<Vec<PathBuf>> {
    let config = args.sim_config()?;
    let sweep = args.thread_counts()?;
    ensure_dir(out_dir)?;

    let mut sim = Simulation::new(config)?;
    let baseline = write_run(&mut sim, None, out_dir)?;
    println!("Sequential snapshots saved.");

    let mut written = vec![baseline.clone()];
    for threads in sweep {
        let path = write_run(&mut sim, Some(threads), out_dir)?;
        println!("Parallel snapshots saved for {threads} threads.");

        if let Some(divergence) = compare_files(&baseline, &path, 0.0)? {
            tracing::warn!(file = %path.display(), %divergence, "snapshot file diverges");
            return Err(CliError::Diverged {
                file: path,
                divergence,
            });
        }
        written.push(path);
    }
    Ok(written)
}

/// Initialize, run one driver into its snapshot file, and return the path.
fn write_run(
    sim: &mut Simulation,
    threads: Option<ThreadCount>,
    out_dir: &Path,
) -> CliResult<PathBuf> {
    let path = out_dir.join(snapshot_file_name(threads));
    let writer = CsvSnapshotWriter::create(&path)?;
    let (mut sink, pipe) = SnapshotPipe::spawn(writer, PIPE_CAPACITY)?;

    let mode = match threads {
        None => ExecutionMode::Sequential,
        Some(n) => ExecutionMode::Parallel(n),
    };
    sim.initialize();
    let run = sim.run(mode, Some(&mut sink));
    // The writer's own error explains a failed run better than the
    // disconnect the leader saw.
    let rows = pipe.join(sink)?;
    let metrics = run?;
    tracing::debug!(
        threads = metrics.threads.get(),
        rows,
        elapsed = ?metrics.elapsed,
        per_step = ?metrics.per_step(),
        "snapshot run complete"
    );
    Ok(path)
}
