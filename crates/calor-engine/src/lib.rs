//! Stencil engine for the calor diffusion simulation.
//!
//! Provides the [`Simulation`] object and the two drivers behind it: a
//! single-threaded loop over an owned [`DoubleBuffer`](calor_core::DoubleBuffer)
//! and a long-lived thread team whose members each own one contiguous
//! block of the interior and advance in lockstep through barrier phases.
//! Both drivers produce bit-identical fields for the same configuration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod emit;
pub mod halo;
pub mod init;
pub mod metrics;
pub mod parallel;
pub mod partition;
pub mod sequential;
pub mod simulation;
pub mod stencil;
pub mod team;

pub use config::{thread_count, ConfigError, SimConfig};
pub use init::initialize;
pub use metrics::RunMetrics;
pub use parallel::run_parallel;
pub use partition::Partition;
pub use sequential::run_sequential;
pub use simulation::{ExecutionMode, Simulation};
pub use stencil::{stencil_block, stencil_step};
pub use team::{Member, ThreadTeam};
