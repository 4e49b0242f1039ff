//! Snapshot stream comparison.
//!
//! Walks two snapshot streams row by row and reports the first row at
//! which they diverge. Used to confirm that every team run reproduced the
//! sequential baseline.

use std::fmt;
use std::path::Path;

use calor_core::{Snapshot, SnapshotError, StepId};

use crate::reader::SnapshotReader;

/// What differed at the first divergent row.
#[derive(Clone, Debug, PartialEq)]
pub enum DivergenceKind {
    /// The two rows carry different step indices.
    Step {
        /// Step in the baseline stream.
        expected: StepId,
        /// Step in the candidate stream.
        found: StepId,
    },
    /// The two rows have different sample counts.
    Length {
        /// Sample count in the baseline row.
        expected: usize,
        /// Sample count in the candidate row.
        found: usize,
    },
    /// At least one sample differs by more than the tolerance.
    Samples {
        /// Index of the first differing sample.
        first_index: usize,
        /// Largest absolute difference in the row.
        max_abs_diff: f64,
        /// Number of differing samples in the row.
        count: usize,
    },
    /// One stream ended before the other.
    RowCount {
        /// Rows in the baseline stream.
        expected: usize,
        /// Rows in the candidate stream.
        found: usize,
    },
}

/// The first divergence between two snapshot streams.
#[derive(Clone, Debug, PartialEq)]
pub struct Divergence {
    /// Zero-based row index of the divergence.
    pub row: usize,
    /// What differed.
    pub kind: DivergenceKind,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DivergenceKind::Step { expected, found } => {
                write!(f, "row {}: step {found}, expected {expected}", self.row)
            }
            DivergenceKind::Length { expected, found } => {
                write!(f, "row {}: {found} samples, expected {expected}", self.row)
            }
            DivergenceKind::Samples {
                first_index,
                max_abs_diff,
                count,
            } => write!(
                f,
                "row {}: {count} samples differ, first at index {first_index}, max |diff| {max_abs_diff}",
                self.row
            ),
            DivergenceKind::RowCount { expected, found } => {
                write!(f, "{found} rows, expected {expected}")
            }
        }
    }
}

/// Compare `candidate` against `baseline`.
///
/// Samples differ when their absolute difference exceeds `tolerance`, or
/// when exactly one of them is NaN. A tolerance of `0.0` demands exact
/// equality. Returns `None` when the streams agree.
pub fn compare_snapshots(
    baseline: &[Snapshot],
    candidate: &[Snapshot],
    tolerance: f64,
) -> Option<Divergence> {
    for (row, (b, c)) in baseline.iter().zip(candidate).enumerate() {
        if let Some(kind) = compare_row(b, c, tolerance) {
            return Some(Divergence { row, kind });
        }
    }
    if baseline.len() != candidate.len() {
        return Some(Divergence {
            row: baseline.len().min(candidate.len()),
            kind: DivergenceKind::RowCount {
                expected: baseline.len(),
                found: candidate.len(),
            },
        });
    }
    None
}

/// Read two snapshot files and compare them with [`compare_snapshots`].
pub fn compare_files(
    baseline: impl AsRef<Path>,
    candidate: impl AsRef<Path>,
    tolerance: f64,
) -> Result<Option<Divergence>, SnapshotError> {
    let baseline = SnapshotReader::open(baseline)?.read_all()?;
    let candidate = SnapshotReader::open(candidate)?.read_all()?;
    Ok(compare_snapshots(&baseline, &candidate, tolerance))
}

fn compare_row(b: &Snapshot, c: &Snapshot, tolerance: f64) -> Option<DivergenceKind> {
    if b.step() != c.step() {
        return Some(DivergenceKind::Step {
            expected: b.step(),
            found: c.step(),
        });
    }
    if b.len() != c.len() {
        return Some(DivergenceKind::Length {
            expected: b.len(),
            found: c.len(),
        });
    }

    let mut first_index = None;
    let mut max_abs_diff = 0.0f64;
    let mut count = 0;
    for (i, (&x, &y)) in b.samples().iter().zip(c.samples()).enumerate() {
        let diff = (x - y).abs();
        let differs = if x.is_nan() || y.is_nan() {
            x.is_nan() != y.is_nan()
        } else {
            diff > tolerance
        };
        if differs {
            first_index.get_or_insert(i);
            count += 1;
            if diff > max_abs_diff || diff.is_nan() {
                max_abs_diff = diff;
            }
        }
    }

    first_index.map(|first_index| DivergenceKind::Samples {
        first_index,
        max_abs_diff,
        count,
    })
}
