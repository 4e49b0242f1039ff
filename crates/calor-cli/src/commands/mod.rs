//! CLI command implementations.

pub mod all;
pub mod bench;
pub mod snapshots;

use std::fs;
use std::path::Path;

use clap::{Args, ValueEnum};
use smallvec::SmallVec;

use calor_bench::{BenchConfig, DEFAULT_SWEEP};
use calor_core::{CommitStrategy, ThreadCount};
use calor_engine::config::{
    DEFAULT_IMPULSE, DEFAULT_LEN, DEFAULT_SNAPSHOT_INTERVAL, DEFAULT_STEPS,
};
use calor_engine::{thread_count, ConfigError, SimConfig};

use crate::error::{CliError, CliResult};

/// Commit strategy as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CommitArg {
    /// Copy the interior of next back into current.
    Copy,
    /// Exchange buffer roles.
    Swap,
}

impl From<CommitArg> for CommitStrategy {
    fn from(c: CommitArg) -> Self {
        match c {
            CommitArg::Copy => CommitStrategy::Copy,
            CommitArg::Swap => CommitStrategy::Swap,
        }
    }
}

/// Run parameters shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct SimArgs {
    /// Number of samples in the field
    #[arg(short = 'n', long, default_value_t = DEFAULT_LEN)]
    pub len: usize,

    /// Number of time steps per run
    #[arg(short = 't', long, default_value_t = DEFAULT_STEPS)]
    pub steps: u64,

    /// Snapshot cadence in steps
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_INTERVAL)]
    pub interval: u64,

    /// Value injected at the midpoint
    #[arg(long, default_value_t = DEFAULT_IMPULSE)]
    pub impulse: f64,

    /// How the next buffer becomes current after each step
    #[arg(long, value_enum, default_value_t = CommitArg::Copy)]
    pub commit: CommitArg,

    /// Thread counts to run (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SWEEP)]
    pub threads: Vec<usize>,
}

impl SimArgs {
    /// Validated simulation config.
    pub fn sim_config(&self) -> Result<SimConfig, ConfigError> {
        let config = SimConfig {
            len: self.len,
            steps: self.steps,
            snapshot_interval: self.interval,
            impulse: self.impulse,
            commit: self.commit.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Requested team sizes in order, zero rejected.
    pub fn thread_counts(&self) -> Result<SmallVec<[ThreadCount; 4]>, ConfigError> {
        if self.threads.is_empty() {
            return Err(ConfigError::EmptySweep);
        }
        self.threads.iter().map(|&n| thread_count(n)).collect()
    }
}

/// Timing options for the sweep.
#[derive(Args, Clone, Debug)]
pub struct TimingArgs {
    /// Untimed warm-up runs per mode
    #[arg(long, default_value_t = 0)]
    pub warmup: u32,

    /// Timed runs per mode; the median is reported
    #[arg(long, default_value_t = 1)]
    pub runs: u32,
}

impl TimingArgs {
    /// Benchmark config for the given sweep.
    pub fn bench_config(&self, threads: SmallVec<[ThreadCount; 4]>) -> BenchConfig {
        BenchConfig {
            threads,
            warmup_runs: self.warmup,
            timed_runs: self.runs,
        }
    }
}

/// Create `dir` (and parents) if needed.
pub fn ensure_dir(dir: &Path) -> CliResult<()> {
    fs::create_dir_all(dir).map_err(|source| CliError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(threads: Vec<usize>) -> SimArgs {
        SimArgs {
            len: 11,
            steps: 5,
            interval: 50,
            impulse: 100.0,
            commit: CommitArg::Swap,
            threads,
        }
    }

    #[test]
    fn sim_config_maps_fields() {
        let c = args(vec![1]).sim_config().unwrap();
        assert_eq!(c.len, 11);
        assert_eq!(c.steps, 5);
        assert_eq!(c.commit, CommitStrategy::Swap);
    }

    #[test]
    fn invalid_length_rejected() {
        let mut a = args(vec![1]);
        a.len = 2;
        assert_eq!(a.sim_config(), Err(ConfigError::FieldTooShort { len: 2 }));
    }

    #[test]
    fn thread_counts_keep_order_and_reject_zero() {
        let sizes: Vec<usize> = args(vec![8, 2])
            .thread_counts()
            .unwrap()
            .iter()
            .map(|t| t.get())
            .collect();
        assert_eq!(sizes, vec![8, 2]);
        assert_eq!(
            args(vec![2, 0]).thread_counts(),
            Err(ConfigError::ZeroThreadCount)
        );
        assert_eq!(args(vec![]).thread_counts(), Err(ConfigError::EmptySweep));
    }
}
