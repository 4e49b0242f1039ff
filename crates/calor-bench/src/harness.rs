//! Sequential vs. thread-team timing sweep.
//!
//! [`run_sweep`] times one sequential run as the baseline, then one run
//! per thread count in [`BenchConfig::threads`]. Every timed run starts
//! from a freshly initialized field and runs without a snapshot sink, so
//! the measured time is pure stencil + commit work.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use smallvec::SmallVec;

use calor_core::{CommitStrategy, SnapshotError, ThreadCount};
use calor_engine::{ConfigError, ExecutionMode, Simulation};

// ── BenchError ─────────────────────────────────────────────────────

/// Errors from a benchmark sweep.
#[derive(Debug)]
pub enum BenchError {
    /// The sweep configuration is invalid.
    Config(ConfigError),
    /// A driver run failed.
    Run(SnapshotError),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid benchmark config: {e}"),
            Self::Run(e) => write!(f, "benchmark run failed: {e}"),
        }
    }
}

impl Error for BenchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Run(e) => Some(e),
        }
    }
}

impl From<ConfigError> for BenchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SnapshotError> for BenchError {
    fn from(e: SnapshotError) -> Self {
        Self::Run(e)
    }
}

// ── BenchConfig ────────────────────────────────────────────────────

/// Thread counts of the standard sweep.
pub const DEFAULT_SWEEP: [usize; 4] = [1, 2, 4, 8];

/// What to time and how often.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchConfig {
    /// Team sizes to time, in report order. Duplicates are timed once.
    pub threads: SmallVec<[ThreadCount; 4]>,
    /// Untimed runs before the timed ones, per mode.
    pub warmup_runs: u32,
    /// Timed runs per mode; the median is reported. Zero is treated as one.
    pub timed_runs: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_SWEEP
                .iter()
                .filter_map(|&n| ThreadCount::new(n))
                .collect(),
            warmup_runs: 0,
            timed_runs: 1,
        }
    }
}

impl BenchConfig {
    /// Check that the sweep is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads.is_empty() {
            return Err(ConfigError::EmptySweep);
        }
        Ok(())
    }

    fn timed(&self) -> u32 {
        self.timed_runs.max(1)
    }
}

// ── Report ─────────────────────────────────────────────────────────

/// Timing of one team size against the sequential baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchRow {
    /// Team size.
    pub threads: ThreadCount,
    /// Median wall-clock time of the timed runs.
    pub elapsed: Duration,
    /// `sequential / elapsed`.
    pub speedup: f64,
    /// `speedup / threads`.
    pub efficiency: f64,
}

/// Result of a full sweep.
#[derive(Clone, Debug)]
pub struct BenchReport {
    /// Field length timed.
    pub len: usize,
    /// Steps per run.
    pub steps: u64,
    /// Commit strategy used by every run.
    pub commit: CommitStrategy,
    /// Median sequential time.
    pub sequential: Duration,
    /// One row per distinct team size, in sweep order.
    pub rows: IndexMap<ThreadCount, BenchRow>,
}

impl BenchReport {
    /// Row for a given team size.
    pub fn row(&self, threads: ThreadCount) -> Option<&BenchRow> {
        self.rows.get(&threads)
    }

    /// Team size with the highest speedup.
    pub fn best(&self) -> Option<&BenchRow> {
        self.rows
            .values()
            .max_by(|a, b| a.speedup.total_cmp(&b.speedup))
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Sequential Time: {:.6} seconds",
            self.sequential.as_secs_f64()
        )?;
        for row in self.rows.values() {
            writeln!(
                f,
                "Threads: {} | Time: {:.6} | Speedup: {:.4} | Efficiency: {:.4}",
                row.threads,
                row.elapsed.as_secs_f64(),
                row.speedup,
                row.efficiency
            )?;
        }
        Ok(())
    }
}

/// `sequential / parallel`; infinite when `parallel` is zero.
pub fn speedup(sequential: Duration, parallel: Duration) -> f64 {
    sequential.as_secs_f64() / parallel.as_secs_f64()
}

/// `speedup / threads`.
pub fn efficiency(speedup: f64, threads: ThreadCount) -> f64 {
    speedup / threads.get() as f64
}

/// Median of `samples`; the mean of the middle pair for even counts.
/// Zero for an empty slice.
pub fn median(samples: &mut [Duration]) -> Duration {
    samples.sort_unstable();
    let n = samples.len();
    match n {
        0 => Duration::ZERO,
        _ if n % 2 == 1 => samples[n / 2],
        _ => (samples[n / 2 - 1] + samples[n / 2]) / 2,
    }
}

// ── Sweep ──────────────────────────────────────────────────────────

/// Time `mode` on `sim`: warm-up runs, then the median of the timed runs.
/// The field is re-initialized before every run.
pub fn time_mode(
    sim: &mut Simulation,
    mode: ExecutionMode,
    config: &BenchConfig,
) -> Result<Duration, BenchError> {
    for _ in 0..config.warmup_runs {
        sim.initialize();
        sim.run(mode, None)?;
    }
    let mut samples: SmallVec<[Duration; 8]> = SmallVec::new();
    for _ in 0..config.timed() {
        sim.initialize();
        samples.push(sim.run(mode, None)?.elapsed);
    }
    Ok(median(&mut samples))
}

/// Time the sequential baseline, then every team size in the sweep.
pub fn run_sweep(sim: &mut Simulation, config: &BenchConfig) -> Result<BenchReport, BenchError> {
    config.validate()?;
    let _span = tracing::debug_span!(
        "run_sweep",
        len = sim.config().len,
        steps = sim.config().steps,
        timed_runs = config.timed()
    )
    .entered();

    let sequential = time_mode(sim, ExecutionMode::Sequential, config)?;
    tracing::info!(
        seconds = sequential.as_secs_f64(),
        "sequential baseline timed"
    );

    let available = ThreadCount::available();
    let mut rows = IndexMap::with_capacity(config.threads.len());
    for &threads in &config.threads {
        if rows.contains_key(&threads) {
            continue;
        }
        if threads > available {
            tracing::warn!(
                threads = threads.get(),
                available = available.get(),
                "team larger than the hardware thread count; timing is oversubscribed"
            );
        }
        let elapsed = time_mode(sim, ExecutionMode::Parallel(threads), config)?;
        let s = speedup(sequential, elapsed);
        let row = BenchRow {
            threads,
            elapsed,
            speedup: s,
            efficiency: efficiency(s, threads),
        };
        tracing::info!(
            threads = threads.get(),
            seconds = elapsed.as_secs_f64(),
            speedup = row.speedup,
            efficiency = row.efficiency,
            "sweep row complete"
        );
        rows.insert(threads, row);
    }

    Ok(BenchReport {
        len: sim.config().len,
        steps: sim.config().steps,
        commit: sim.config().commit,
        sequential,
        rows,
    })
}
