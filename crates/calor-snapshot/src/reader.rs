//! Snapshot CSV reader.
//!
//! [`SnapshotReader`] parses rows written by
//! [`CsvSnapshotWriter`](crate::CsvSnapshotWriter) back into
//! [`Snapshot`] records. Blank lines are skipped; every other row must be
//! a step index followed by samples with the sample count of the first
//! row.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use calor_core::{Snapshot, SnapshotError, StepId};

/// Reads snapshot rows from a buffered byte stream.
pub struct SnapshotReader<R: BufRead> {
    reader: R,
    line: String,
    line_no: usize,
    row_len: Option<usize>,
    rows_read: u64,
    done: bool,
}

impl<R: BufRead> SnapshotReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
            row_len: None,
            rows_read: 0,
            done: false,
        }
    }

    /// Read the next snapshot, or `None` at end of input.
    pub fn next_snapshot(&mut self) -> Result<Option<Snapshot>, SnapshotError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let row = self.line.trim_end_matches(['\n', '\r']);
            if row.trim().is_empty() {
                continue;
            }
            let snapshot = parse_row(row, self.line_no)?;
            match self.row_len {
                Some(expected) if expected != snapshot.len() => {
                    return Err(SnapshotError::LengthMismatch {
                        step: snapshot.step(),
                        expected,
                        found: snapshot.len(),
                    });
                }
                Some(_) => {}
                None => self.row_len = Some(snapshot.len()),
            }
            self.rows_read += 1;
            return Ok(Some(snapshot));
        }
    }

    /// Read every remaining snapshot.
    pub fn read_all(mut self) -> Result<Vec<Snapshot>, SnapshotError> {
        let mut out = Vec::new();
        while let Some(s) = self.next_snapshot()? {
            out.push(s);
        }
        Ok(out)
    }

    /// Number of snapshots read so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

impl SnapshotReader<BufReader<File>> {
    /// Open the snapshot file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> Iterator for SnapshotReader<R> {
    type Item = Result<Snapshot, SnapshotError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_snapshot() {
            Ok(Some(s)) => Some(Ok(s)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn parse_row(row: &str, line: usize) -> Result<Snapshot, SnapshotError> {
    let mut cols = row.split(',');
    let head = cols.next().unwrap_or_default().trim();
    let step: u64 = head.parse().map_err(|_| SnapshotError::Malformed {
        line,
        detail: format!("invalid step index {head:?}"),
    })?;

    let samples = cols
        .enumerate()
        .map(|(i, col)| {
            let col = col.trim();
            col.parse::<f64>().map_err(|_| SnapshotError::Malformed {
                line,
                detail: format!("invalid sample {col:?} in column {}", i + 1),
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(Snapshot::new(StepId(step), samples))
}
