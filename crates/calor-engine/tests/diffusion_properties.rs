//! Property tests for the stencil and the drivers.

use calor_core::{CommitStrategy, DoubleBuffer, Field, ThreadCount};
use calor_engine::{run_parallel, run_sequential, stencil_block, stencil_step, SimConfig};
use calor_test_utils::fixtures::reference_run;
use proptest::prelude::*;

fn samples() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, 3..200)
}

proptest! {
    #[test]
    fn stencil_step_averages_neighbours(current in samples()) {
        let mut next = vec![f64::NAN; current.len()];
        stencil_step(&current, &mut next);
        for i in 1..current.len() - 1 {
            prop_assert_eq!(next[i], 0.5 * (current[i - 1] + current[i + 1]));
        }
        // Boundaries of next are not touched.
        prop_assert!(next[0].is_nan());
        prop_assert!(next[current.len() - 1].is_nan());
    }

    #[test]
    fn any_split_into_blocks_matches_full_step(
        current in samples(),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let len = current.len();
        let mut full = vec![0.0; len];
        stencil_step(&current, &mut full);

        let mut bounds: Vec<usize> = cuts.iter().map(|c| 1 + c.index(len - 1)).collect();
        bounds.push(1);
        bounds.push(len - 1);
        bounds.sort_unstable();
        bounds.dedup();

        let mut pieces = vec![0.0; len];
        for pair in bounds.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (l, r) = (current[a - 1], current[b]);
            stencil_block(l, &current[a..b], r, &mut pieces[a..b]);
        }
        prop_assert_eq!(&pieces[1..len - 1], &full[1..len - 1]);
    }

    #[test]
    fn interior_peak_never_grows(current in samples(), steps in 1u64..40) {
        // Boundaries pinned at zero so the maximum principle applies to
        // the interior alone.
        let mut start = current;
        let last = start.len() - 1;
        start[0] = 0.0;
        start[last] = 0.0;

        let mut buf = DoubleBuffer::new(start.len());
        buf.current_mut().as_mut_slice().copy_from_slice(&start);
        let mut peak = buf.current().max_abs_interior();
        let cfg = SimConfig { commit: CommitStrategy::Swap, ..SimConfig::with_size(start.len(), 1) };
        for _ in 0..steps {
            run_sequential(&mut buf, &cfg, None).unwrap();
            let now = buf.current().max_abs_interior();
            prop_assert!(now <= peak);
            peak = now;
        }
    }

    #[test]
    fn any_team_matches_reference(
        start in samples(),
        steps in 0u64..30,
        n in 1usize..9,
        swap in any::<bool>(),
    ) {
        let commit = if swap { CommitStrategy::Swap } else { CommitStrategy::Copy };
        let mut buf = DoubleBuffer::new(start.len());
        buf.current_mut().as_mut_slice().copy_from_slice(&start);

        let cfg = SimConfig { commit, ..SimConfig::with_size(start.len(), steps) };
        run_parallel(ThreadCount::new(n).unwrap(), &mut buf, &cfg, None).unwrap();

        prop_assert_eq!(buf.current(), &Field::from_vec(reference_run(&start, steps)));
    }
}
