//! Snapshot persistence for calor runs.
//!
//! - [`CsvSnapshotWriter`]: a [`SnapshotSink`](calor_core::SnapshotSink)
//!   that appends `step,sample,...` rows to any `Write`.
//! - [`SnapshotReader`]: parses those rows back into
//!   [`Snapshot`](calor_core::Snapshot) records.
//! - [`compare_snapshots`] / [`compare_files`]: first-divergence check
//!   between two snapshot streams.
//! - [`SnapshotPipe`]: moves a sink onto a writer thread and hands back
//!   a [`ChannelSink`] for the driver.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod compare;
pub mod csv;
pub mod reader;

pub use channel::{ChannelSink, SnapshotPipe};
pub use compare::{compare_files, compare_snapshots, Divergence, DivergenceKind};
pub use csv::{snapshot_file_name, CsvSnapshotWriter, SEQUENTIAL_FILE_NAME};
pub use reader::SnapshotReader;
