//! Pre-built simulation profiles for benchmarks and smoke runs.

use calor_core::CommitStrategy;
use calor_engine::SimConfig;

/// Full-size reference profile: 50 000 samples, 2 000 steps, copy commit.
pub fn reference_profile() -> SimConfig {
    SimConfig::default()
}

/// Reference profile with role-swap commit.
pub fn reference_swap_profile() -> SimConfig {
    SimConfig {
        commit: CommitStrategy::Swap,
        ..SimConfig::default()
    }
}

/// Small profile for quick checks: 4 097 samples, 200 steps.
///
/// Large enough that every team size in the default sweep gets a
/// non-trivial block.
pub fn quick_profile() -> SimConfig {
    SimConfig::with_size(4_097, 200)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        reference_profile().validate().unwrap();
        reference_swap_profile().validate().unwrap();
        quick_profile().validate().unwrap();
    }

    #[test]
    fn reference_profile_matches_defaults() {
        let p = reference_profile();
        assert_eq!((p.len, p.steps, p.snapshot_interval), (50_000, 2_000, 50));
        assert_eq!(p.expected_snapshots(), 41);
        assert_eq!(reference_swap_profile().commit, CommitStrategy::Swap);
    }
}
