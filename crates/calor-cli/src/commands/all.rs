//! `calor all` command - Snapshot files for every driver, then the timing sweep.

use std::path::Path;

use crate::commands::{bench, snapshots, SimArgs, TimingArgs};
use crate::error::CliResult;

/// Write all snapshot files, verify them, then run the sweep.
pub fn execute(args: &SimArgs, timing: &TimingArgs, out_dir: &Path) -> CliResult<()> {
    snapshots::execute(args, out_dir)?;
    bench::execute(args, timing)?;
    Ok(())
}
