//! # dropqc
//!
//! Command-line front end for control-channel outlier rejection.
//!
//! ## Usage
//!
//! ```bash
//! # Filter a long-format replicate table
//! dropqc filter replicates.csv -o filtered.csv
//!
//! # Keep emptied samples in the output
//! dropqc filter replicates.csv -o filtered.json
//!
//! # Show per-run fences without filtering
//! dropqc inspect replicates.csv
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
