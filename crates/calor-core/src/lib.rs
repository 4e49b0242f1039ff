//! Core types and traits for the calor diffusion engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the calor workspace:
//! step and thread-count IDs, the [`Field`] sample array, the
//! [`DoubleBuffer`] that pairs a current and a next field, snapshot
//! records, and the [`SnapshotSink`] trait that receives them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod field;
pub mod id;
pub mod snapshot;

pub use buffer::{CommitStrategy, DoubleBuffer};
pub use error::SnapshotError;
pub use field::Field;
pub use id::{StepId, ThreadCount};
pub use snapshot::{Snapshot, SnapshotSink};
