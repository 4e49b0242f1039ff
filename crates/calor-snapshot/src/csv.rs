//! Snapshot CSV writer.
//!
//! One row per snapshot: the step index followed by every sample of the
//! field, comma separated, no header.
//!
//! ```text
//! 0,0,0,100,0,0
//! 50,0,12.5,0,12.5,0
//! ```
//!
//! Samples are written with `f64`'s `Display`, which yields the shortest
//! text that parses back to the same bits, so a file written here reads
//! back exactly through [`SnapshotReader`](crate::SnapshotReader).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use calor_core::{SnapshotError, SnapshotSink, StepId, ThreadCount};

/// File name of the sequential baseline snapshot file.
pub const SEQUENTIAL_FILE_NAME: &str = "snapshots_seq.csv";

/// Snapshot file name for a run: `snapshots_seq.csv` for the sequential
/// driver, `snapshots_<threads>.csv` for a team run.
pub fn snapshot_file_name(threads: Option<ThreadCount>) -> String {
    match threads {
        None => SEQUENTIAL_FILE_NAME.to_string(),
        Some(n) => format!("snapshots_{n}.csv"),
    }
}

/// Writes snapshot rows to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`. Every row must have the sample count
/// of the first row.
pub struct CsvSnapshotWriter<W: Write> {
    writer: W,
    path: Option<PathBuf>,
    row_len: Option<usize>,
    rows_written: u64,
}

impl<W: Write> CsvSnapshotWriter<W> {
    /// Wrap a writer. Nothing is written until the first row.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            path: None,
            row_len: None,
            rows_written: 0,
        }
    }

    /// Append one row.
    pub fn write_row(&mut self, step: StepId, samples: &[f64]) -> Result<(), SnapshotError> {
        match self.row_len {
            Some(expected) if expected != samples.len() => {
                return Err(SnapshotError::LengthMismatch {
                    step,
                    expected,
                    found: samples.len(),
                });
            }
            Some(_) => {}
            None => self.row_len = Some(samples.len()),
        }

        write!(self.writer, "{}", step.0)?;
        for v in samples {
            write!(self.writer, ",{v}")?;
        }
        self.writer.write_all(b"\n")?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), SnapshotError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvSnapshotWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write to it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut writer = Self::new(BufWriter::new(file));
        writer.path = Some(path.to_path_buf());
        Ok(writer)
    }
}

impl<W: Write> SnapshotSink for CsvSnapshotWriter<W> {
    fn emit(&mut self, step: StepId, samples: &[f64]) -> Result<(), SnapshotError> {
        self.write_row(step, samples)
    }

    fn finish(&mut self) -> Result<(), SnapshotError> {
        self.flush()?;
        if let Some(path) = &self.path {
            tracing::info!(path = %path.display(), rows = self.rows_written, "saved snapshots");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(w: CsvSnapshotWriter<Vec<u8>>) -> String {
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn file_names() {
        assert_eq!(snapshot_file_name(None), "snapshots_seq.csv");
        let four = ThreadCount::new(4).unwrap();
        assert_eq!(snapshot_file_name(Some(four)), "snapshots_4.csv");
    }

    #[test]
    fn rows_are_step_then_samples() {
        let mut w = CsvSnapshotWriter::new(Vec::new());
        let impulse = [0.0, 0.0, 100.0, 0.0, 0.0];
        let spread = [0.0, 50.0, 0.0, 50.0, 0.0];
        w.write_row(StepId(0), &impulse).unwrap();
        w.write_row(StepId(1), &spread).unwrap();
        assert_eq!(w.rows_written(), 2);
        assert_eq!(text(w), "0,0,0,100,0,0\n1,0,50,0,50,0\n");
    }

    #[test]
    fn fractional_samples_are_shortest_round_trip() {
        let mut w = CsvSnapshotWriter::new(Vec::new());
        let row = [0.1, 1.0 / 3.0, -2.5e-300];
        w.write_row(StepId(50), &row).unwrap();
        let out = text(w);
        assert_eq!(out, format!("50,0.1,{},{}\n", 1.0f64 / 3.0, -2.5e-300f64));
    }

    #[test]
    fn row_length_is_fixed_by_first_row() {
        let mut w = CsvSnapshotWriter::new(Vec::new());
        w.write_row(StepId(0), &[1.0, 2.0, 3.0]).unwrap();
        let err = w.write_row(StepId(50), &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::LengthMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
        assert_eq!(w.rows_written(), 1);
    }

    #[test]
    fn sink_finish_flushes() {
        let mut w = CsvSnapshotWriter::new(BufWriter::new(Vec::new()));
        w.emit(StepId(0), &[1.0]).unwrap();
        w.finish().unwrap();
        let inner = w.into_inner();
        assert!(inner.buffer().is_empty());
        assert_eq!(inner.get_ref().as_slice(), b"0,1\n");
    }
}
