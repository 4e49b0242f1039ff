//! calor CLI - Heat-diffusion snapshot runs and sequential vs. thread-team timing.
//!
//! # Commands
//!
//! - `calor snapshots` - Write `snapshots_seq.csv` and `snapshots_<threads>.csv`
//! - `calor bench` - Time the sequential driver against each team size
//! - `calor all` - Both of the above, snapshots first
//!
//! # Examples
//!
//! ```bash
//! # Full reference run: 50 000 samples, 2 000 steps, teams of 1, 2, 4, 8
//! calor all --output-dir out
//!
//! # Quick sweep with role-swap commit and median of five runs
//! calor bench -n 4096 -t 200 --commit swap --runs 5 --threads 2,4
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::{all, bench, snapshots, SimArgs, TimingArgs};

/// calor - 1D heat-diffusion stencil engine
#[derive(Parser)]
#[command(name = "calor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write snapshot files for the sequential driver and each team size
    Snapshots {
        #[command(flatten)]
        sim: SimArgs,

        /// Directory for the snapshot files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Time the sequential driver against each team size
    Bench {
        #[command(flatten)]
        sim: SimArgs,

        #[command(flatten)]
        timing: TimingArgs,
    },

    /// Write snapshot files, then run the timing sweep
    All {
        #[command(flatten)]
        sim: SimArgs,

        #[command(flatten)]
        timing: TimingArgs,

        /// Directory for the snapshot files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Snapshots { sim, output_dir } => {
            snapshots::execute(&sim, &output_dir).map(|_| ())
        }
        Commands::Bench { sim, timing } => bench::execute(&sim, &timing).map(|_| ()),
        Commands::All {
            sim,
            timing,
            output_dir,
        } => all::execute(&sim, &timing, &output_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
