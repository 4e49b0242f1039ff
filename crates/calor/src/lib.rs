//! calor: a 1D heat-diffusion stencil engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the calor sub-crates. For most users, adding `calor` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use calor::prelude::*;
//!
//! // 101 samples, 200 steps, snapshots every 50 steps.
//! let mut sim = Simulation::new(SimConfig::with_size(101, 200)).unwrap();
//!
//! sim.initialize();
//! let mut baseline: Vec<Snapshot> = Vec::new();
//! sim.run(ExecutionMode::Sequential, Some(&mut baseline)).unwrap();
//!
//! sim.initialize();
//! let mut team: Vec<Snapshot> = Vec::new();
//! let threads = ThreadCount::new(4).unwrap();
//! sim.run(ExecutionMode::Parallel(threads), Some(&mut team)).unwrap();
//!
//! assert_eq!(baseline.len(), 5);
//! assert!(compare_snapshots(&baseline, &team, 0.0).is_none());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `calor-core` | IDs, `Field`, `DoubleBuffer`, `Snapshot`, `SnapshotSink` |
//! | [`engine`] | `calor-engine` | `Simulation`, drivers, thread team, partitioning |
//! | [`snapshot`] | `calor-snapshot` | CSV writer and reader, comparison, writer thread |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`calor-core`).
pub use calor_core as types;

/// Stencil engine and drivers (`calor-engine`).
///
/// [`engine::Simulation`] owns the buffers; [`engine::run_sequential`]
/// and [`engine::run_parallel`] are the drivers behind it.
pub use calor_engine as engine;

/// Snapshot files (`calor-snapshot`).
///
/// Write runs with [`snapshot::CsvSnapshotWriter`], read them back with
/// [`snapshot::SnapshotReader`].
pub use calor_snapshot as snapshot;

/// Common imports for typical calor usage.
///
/// ```rust
/// use calor::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use calor_core::{
        CommitStrategy, DoubleBuffer, Field, Snapshot, SnapshotSink, StepId, ThreadCount,
    };

    // Errors
    pub use calor_core::SnapshotError;
    pub use calor_engine::ConfigError;

    // Engine
    pub use calor_engine::{ExecutionMode, RunMetrics, SimConfig, Simulation};

    // Snapshots
    pub use calor_snapshot::{compare_snapshots, CsvSnapshotWriter, SnapshotPipe, SnapshotReader};
}
