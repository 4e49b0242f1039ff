//! `calor bench` command - Time the sequential driver against each team size.

use calor_bench::{run_sweep, BenchReport};
use calor_engine::Simulation;

use crate::commands::{SimArgs, TimingArgs};
use crate::error::CliResult;

/// Run the timing sweep and print the console summary.
pub fn execute(args: &SimArgs, timing: &TimingArgs) -> CliResult<BenchReport> {
    let config = args.sim_config()?;
    let bench = timing.bench_config(args.thread_counts()?);

    let mut sim = Simulation::new(config)?;
    let report = run_sweep(&mut sim, &bench)?;
    println!();
    print!("{report}");
    if let Some(best) = report.best() {
        tracing::debug!(
            threads = best.threads.get(),
            speedup = best.speedup,
            "fastest team"
        );
    }
    Ok(report)
}
