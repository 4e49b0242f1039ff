//! Benchmark harness and profiles for the calor diffusion engine.
//!
//! - [`run_sweep`]: sequential baseline plus one timed run per team size,
//!   reported as a [`BenchReport`] with speedup and efficiency.
//! - [`reference_profile`]: the full-size 50 000 x 2 000 run.
//! - [`quick_profile`]: a small run for smoke tests.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod harness;
pub mod profile;

pub use harness::{
    efficiency, median, run_sweep, speedup, time_mode, BenchConfig, BenchError, BenchReport,
    BenchRow, DEFAULT_SWEEP,
};
pub use profile::{quick_profile, reference_profile, reference_swap_profile};
