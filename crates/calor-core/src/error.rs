//! Error types for snapshot emission and decoding.
//!
//! The stencil engine itself has no runtime failure path; errors only
//! arise where snapshots leave the engine (writing, forwarding) or come
//! back in (parsing a snapshot file).

use std::error::Error;
use std::fmt;
use std::io;

use crate::id::StepId;

/// Errors produced by a [`SnapshotSink`](crate::SnapshotSink) or while
/// reading snapshot rows back.
#[derive(Debug)]
pub enum SnapshotError {
    /// An I/O error occurred while writing or reading rows.
    Io(io::Error),
    /// A row could not be parsed.
    Malformed {
        /// 1-based line number of the offending row.
        line: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A row had a different sample count than the first row.
    LengthMismatch {
        /// Step index of the offending row.
        step: StepId,
        /// Sample count established by the first row.
        expected: usize,
        /// Sample count found in this row.
        found: usize,
    },
    /// The receiving end of a snapshot channel has gone away.
    Disconnected,
    /// The snapshot writer thread panicked.
    WriterPanicked,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Malformed { line, detail } => {
                write!(f, "malformed snapshot row at line {line}: {detail}")
            }
            Self::LengthMismatch {
                step,
                expected,
                found,
            } => write!(
                f,
                "snapshot at step {step} has {found} samples, expected {expected}"
            ),
            Self::Disconnected => write!(f, "snapshot receiver disconnected"),
            Self::WriterPanicked => write!(f, "snapshot writer thread panicked"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SnapshotError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
