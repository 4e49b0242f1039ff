//! Per-run metrics returned by the drivers.

use std::time::Duration;

use calor_core::{CommitStrategy, ThreadCount};

/// What a driver run did and how long it took.
#[derive(Clone, Debug, PartialEq)]
pub struct RunMetrics {
    /// Team size; one for the sequential driver.
    pub threads: ThreadCount,
    /// Number of stencil steps executed.
    pub steps: u64,
    /// Number of snapshots delivered to the sink.
    pub snapshots_emitted: u64,
    /// Commit strategy used.
    pub commit: CommitStrategy,
    /// Wall-clock time spent in the step loop, snapshot I/O included.
    pub elapsed: Duration,
}

impl RunMetrics {
    /// Average time per step, zero for a zero-step run.
    pub fn per_step(&self) -> Duration {
        match u32::try_from(self.steps) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.elapsed / n,
            Err(_) => Duration::from_secs_f64(self.elapsed.as_secs_f64() / self.steps as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(steps: u64, elapsed: Duration) -> RunMetrics {
        RunMetrics {
            threads: ThreadCount::ONE,
            steps,
            snapshots_emitted: 0,
            commit: CommitStrategy::Copy,
            elapsed,
        }
    }

    #[test]
    fn per_step_divides_elapsed() {
        let m = metrics(4, Duration::from_millis(8));
        assert_eq!(m.per_step(), Duration::from_millis(2));
    }

    #[test]
    fn per_step_of_empty_run_is_zero() {
        let m = metrics(0, Duration::from_millis(8));
        assert_eq!(m.per_step(), Duration::ZERO);
    }
}
