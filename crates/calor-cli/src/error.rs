//! Error types for the calor CLI.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use calor_bench::BenchError;
use calor_core::SnapshotError;
use calor_engine::ConfigError;
use calor_snapshot::Divergence;

/// CLI result type alias.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Debug)]
pub enum CliError {
    /// Invalid run parameters.
    Config(ConfigError),
    /// Writing or reading a snapshot file failed.
    Snapshot(SnapshotError),
    /// The timing sweep failed.
    Bench(BenchError),
    /// The output directory could not be prepared.
    OutputDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A team run's snapshot file differs from the sequential baseline.
    Diverged {
        /// The offending file.
        file: PathBuf,
        /// Where it first differs.
        divergence: Divergence,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Snapshot(e) => write!(f, "snapshot error: {e}"),
            Self::Bench(e) => write!(f, "{e}"),
            Self::OutputDir { path, source } => write!(
                f,
                "cannot create output directory {}: {source}",
                path.display()
            ),
            Self::Diverged { file, divergence } => write!(
                f,
                "{} diverges from the sequential baseline at {divergence}",
                file.display()
            ),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Snapshot(e) => Some(e),
            Self::Bench(e) => Some(e),
            Self::OutputDir { source, .. } => Some(source),
            Self::Diverged { .. } => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SnapshotError> for CliError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

impl From<BenchError> for CliError {
    fn from(e: BenchError) -> Self {
        Self::Bench(e)
    }
}
